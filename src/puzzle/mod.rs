//! Puzzle input files
//!
//! A puzzle file holds several independent companies, each with its own
//! event list. This module parses them into [`Puzzle`]s and reads the
//! matching file of expected answers; the core engines never see text.

mod reader;

pub use reader::PuzzleReader;

use std::io::BufRead;

use crate::event::Event;
use crate::tree::{Company, EmployeeId};
use crate::{OrgError, Solution, Solver, SolverConfig};
use thiserror::Error;

/// Errors raised while reading puzzle or answer files
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// Underlying reader failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line could not be parsed
    #[error("line {line}: {reason}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Event block length disagrees with the header
    #[error("puzzle {puzzle} declares {declared} events but lists {actual}")]
    EventCountMismatch {
        /// 1-based puzzle number
        puzzle: usize,
        /// Count from the header line
        declared: usize,
        /// Events actually present
        actual: usize,
    },

    /// Read events carry no importance
    #[error("line {line}: read event must have zero importance")]
    InvalidRead {
        /// 1-based line number
        line: usize,
    },

    /// File ended before the declared number of puzzles
    #[error("file declares {expected} puzzles but only {found} are present")]
    MissingPuzzle {
        /// Puzzles declared on the first line
        expected: usize,
        /// Puzzles actually read
        found: usize,
    },

    /// Company or event stream rejected by the engine
    #[error(transparent)]
    Org(#[from] OrgError),
}

/// One company and its chronological events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    /// Number of employees N
    pub num_employees: usize,

    /// Number of distinct values declared by the header (informational)
    pub num_values: usize,

    /// Manager of employee `i + 2` at index `i`
    pub parent_ids: Vec<EmployeeId>,

    /// Events in file order
    pub events: Vec<Event>,
}

impl Puzzle {
    /// Build the company described by the parent list
    pub fn company(&self) -> Result<Company, OrgError> {
        Company::build(self.num_employees, &self.parent_ids)
    }

    /// Build the company and process every event
    pub fn solve(&self, config: &SolverConfig) -> Result<Solution, PuzzleError> {
        let company = self.company()?;
        Ok(Solver::new(&company, config.clone()).run(&self.events)?)
    }
}

/// Read an answers file: one integer per non-blank line
pub fn read_expected<R: BufRead>(reader: R) -> Result<Vec<u64>, PuzzleError> {
    let mut answers = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let answer = trimmed.parse().map_err(|_| PuzzleError::Parse {
            line: idx + 1,
            reason: format!("invalid answer '{trimmed}'"),
        })?;
        answers.push(answer);
    }
    Ok(answers)
}
