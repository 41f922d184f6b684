//! # Bounded Broadcasts over Rooted Hierarchies
//!
//! This library answers a stream of two kinds of events against a rooted
//! tree of numbered employees:
//!
//! * **Broadcast** `(origin, hops, value)`: every descendant of `origin`
//!   within `hops` hops (including `origin`) now holds `value`.
//! * **Read** `(target, weight)`: add `weight × value(target)` to the total.
//!
//! The total is reported modulo 1,000,000,007.
//!
//! ## Core Algorithm
//!
//! 1. **Tree construction**: parents always carry smaller ids than their
//!    reports, so the arena is built in one forward pass
//! 2. **Shape heuristic**: mean depth > √N selects the deep engine
//! 3. **Deep engine**: replays events backwards against a sorted set of
//!    pending reads, answering "is X within k hops above Y?" through
//!    sparse ancestor skip summaries
//! 4. **Shallow engine**: replays events forwards, pushing broadcasts down
//!    the tree lazily, only as far as a read requires
//!
//! ## Usage Example
//!
//! ```
//! use orgcast::{Company, Event, Solver, SolverConfig};
//!
//! let company = Company::build(3, &[1, 2])?;
//! let events = vec![Event::broadcast(1, 2, 7), Event::read(3, 1)];
//!
//! let solution = Solver::new(&company, SolverConfig::default()).run(&events)?;
//! assert_eq!(solution.value, 7);
//! # Ok::<(), orgcast::OrgError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod chain; // Ancestor skip summaries
pub mod engine; // Deep and shallow event engines
pub mod event; // Broadcast and read events
pub mod puzzle; // Puzzle file reader
pub mod tree; // Company arena and shape heuristic

pub use chain::{AncestorChainIndex, AncestorSummary};
pub use engine::{
    DeepEventEngine, Engine, EngineChoice, EventEngine, ModularAccumulator,
    ShallowEventEngine, MODULUS,
};
pub use event::{BroadcastEvent, Event, ReadEvent};
pub use tree::{classify, Company, Employee, EmployeeId, EngineKind, ShapeReport};

use thiserror::Error;
use tracing::info;

/// Errors raised while building a company or processing its events
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrgError {
    /// A company needs at least its root employee
    #[error("company must contain at least one employee")]
    EmptyCompany,

    /// Parent list length disagrees with the declared employee count
    #[error("expected {declared} employees but parent list describes {actual}")]
    NodeCountMismatch {
        /// Employee count declared by the caller
        declared: usize,
        /// Employee count implied by the parent list
        actual: usize,
    },

    /// Manager id refers to an employee that is not constructed yet
    #[error("employee {employee} names manager {manager}, which is out of range")]
    ParentOutOfRange {
        /// Employee being attached
        employee: usize,
        /// Offending manager id
        manager: usize,
    },

    /// Event references an employee outside `[1, N]`
    #[error("event {position} references employee {employee}, company has {num_employees}")]
    EventOutOfRange {
        /// Zero-based index of the event in the stream
        position: usize,
        /// Offending employee id
        employee: usize,
        /// Number of employees in the company
        num_employees: usize,
    },

    /// Query names an employee id outside `[1, N]`
    #[error("employee {employee} is not part of a company of {num_employees}")]
    UnknownEmployee {
        /// Offending employee id
        employee: usize,
        /// Number of employees in the company
        num_employees: usize,
    },

    /// Skip summaries need a positive sampling interval
    #[error("summary interval must be greater than zero")]
    InvalidInterval,

    /// Ancestor summary accessed before setup computed it
    #[error("ancestor summary for employee {employee} was never computed")]
    MissingSummary {
        /// Employee whose summary is missing
        employee: usize,
    },

    /// Internal state contradicts the id-ordering invariant
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl OrgError {
    /// True for errors caused by the caller's input rather than by a logic fault
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            OrgError::EmptyCompany
                | OrgError::NodeCountMismatch { .. }
                | OrgError::ParentOutOfRange { .. }
                | OrgError::EventOutOfRange { .. }
                | OrgError::UnknownEmployee { .. }
        )
    }
}

/// Configuration for a single solve
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Which engine to run (the shape heuristic by default)
    pub engine: EngineChoice,

    /// Sampling interval for ancestor skip summaries.
    ///
    /// `None` picks ⌈√(max depth)⌉.
    pub summary_interval: Option<usize>,
}

impl SolverConfig {
    /// Force a particular engine
    pub fn with_engine(mut self, engine: EngineChoice) -> Self {
        self.engine = engine;
        self
    }

    /// Override the skip summary interval
    pub fn with_summary_interval(mut self, interval: usize) -> Self {
        self.summary_interval = Some(interval);
        self
    }
}

/// Result of processing one event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Weighted sum of all reads, modulo [`MODULUS`]
    pub value: u64,

    /// Engine that produced the value
    pub engine: EngineKind,
}

/// Main entry point: runs the selected engine over one event stream
#[derive(Debug)]
pub struct Solver<'a> {
    company: &'a Company,
    config: SolverConfig,
}

impl<'a> Solver<'a> {
    /// Create a solver over an already built company
    pub fn new(company: &'a Company, config: SolverConfig) -> Self {
        Self { company, config }
    }

    /// Pick the engine and run its setup (ancestor summaries for deep)
    pub fn prepare(&self) -> Result<Engine<'a>, OrgError> {
        Engine::select(self.company, &self.config)
    }

    /// Process the full event list and return the reduced total
    pub fn run(&self, events: &[Event]) -> Result<Solution, OrgError> {
        let mut engine = self.prepare()?;
        let kind = engine.kind();
        info!(?kind, events = events.len(), "processing events");

        let value = engine.process(events)?;
        Ok(Solution {
            value,
            engine: kind,
        })
    }
}

/// Process `events` against `company` with the default configuration
pub fn process(company: &Company, events: &[Event]) -> Result<u64, OrgError> {
    Solver::new(company, SolverConfig::default())
        .run(events)
        .map(|solution| solution.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_event_stream_is_zero() {
        let company = Company::build(4, &[1, 1, 2]).unwrap();
        assert_eq!(process(&company, &[]).unwrap(), 0);
    }

    #[test]
    fn test_forced_engines_agree() {
        let company = Company::build(5, &[1, 2, 2, 4]).unwrap();
        let events = vec![
            Event::broadcast(2, 1, 4),
            Event::read(3, 2),
            Event::read(5, 3),
            Event::broadcast(1, 3, 6),
            Event::read(5, 1),
        ];

        let deep = Solver::new(&company, SolverConfig::default().with_engine(EngineChoice::Deep))
            .run(&events)
            .unwrap();
        let shallow = Solver::new(
            &company,
            SolverConfig::default().with_engine(EngineChoice::Shallow),
        )
        .run(&events)
        .unwrap();

        assert_eq!(deep.engine, EngineKind::Deep);
        assert_eq!(shallow.engine, EngineKind::Shallow);
        // 4*2 + 1*3 + 6*1
        assert_eq!(deep.value, 17);
        assert_eq!(deep.value, shallow.value);
    }

    #[test]
    fn test_error_classification() {
        assert!(OrgError::EmptyCompany.is_malformed_input());
        assert!(!OrgError::MissingSummary { employee: 3 }.is_malformed_input());
        assert!(!OrgError::InvalidInterval.is_malformed_input());
    }
}
