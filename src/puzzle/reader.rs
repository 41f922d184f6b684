//! Line-oriented puzzle parser
//!
//! ```text
//! <number of puzzles>
//!
//! <n> <c> <q>
//! <n-1 manager ids>
//! <q event lines "p i t">
//!
//! <next puzzle> ...
//! ```
//!
//! `t == 0` marks a read of `p` weighted by the event's 1-based position;
//! anything else broadcasts value `t` from `p` over `i` hops.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::str::FromStr;

use super::{Puzzle, PuzzleError};
use crate::event::Event;
use tracing::{debug, info};

/// Streaming reader yielding one [`Puzzle`] at a time
#[derive(Debug)]
pub struct PuzzleReader<R> {
    lines: Lines<R>,
    line_no: usize,
    num_puzzles: usize,
    read: usize,
    /// Set once iteration hit an error; the stream cannot be resumed
    failed: bool,
}

impl PuzzleReader<BufReader<File>> {
    /// Open a puzzle file from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PuzzleError> {
        Self::new(BufReader::new(File::open(path)?))
    }
}

impl<R: BufRead> PuzzleReader<R> {
    /// Read the header line holding the number of puzzles
    pub fn new(reader: R) -> Result<Self, PuzzleError> {
        let mut this = Self {
            lines: reader.lines(),
            line_no: 0,
            num_puzzles: 0,
            read: 0,
            failed: false,
        };

        let header = this.next_non_blank()?.ok_or(PuzzleError::Parse {
            line: 1,
            reason: "missing puzzle count".to_string(),
        })?;
        this.num_puzzles = parse_field(header.trim(), this.line_no, "puzzle count")?;
        info!(num_puzzles = this.num_puzzles, "opened puzzle input");
        Ok(this)
    }

    /// Number of puzzles declared by the file
    pub fn num_puzzles(&self) -> usize {
        self.num_puzzles
    }

    /// Parse the next puzzle, `None` once all declared puzzles are read
    pub fn read_next(&mut self) -> Result<Option<Puzzle>, PuzzleError> {
        if self.read == self.num_puzzles {
            return Ok(None);
        }

        let header = self.next_non_blank()?.ok_or(PuzzleError::MissingPuzzle {
            expected: self.num_puzzles,
            found: self.read,
        })?;
        let [num_employees, num_values, num_events] = self.parse_triple(&header)?;
        info!(num_employees, num_values, num_events, "reading puzzle");

        let parents_line = self.next_line()?.unwrap_or_default();
        let parent_ids = parents_line
            .split_whitespace()
            .map(|field| parse_field(field, self.line_no, "manager id"))
            .collect::<Result<Vec<usize>, _>>()?;

        let mut events = Vec::with_capacity(num_events);
        while let Some(line) = self.next_line()? {
            if line.trim().is_empty() {
                break;
            }
            let [person, importance, tie] = self.parse_triple(&line)?;
            let position = events.len() as u64 + 1;
            let event = if tie == 0 {
                if importance != 0 {
                    return Err(PuzzleError::InvalidRead { line: self.line_no });
                }
                Event::read(person, position)
            } else {
                Event::broadcast(person, importance, tie as u64)
            };
            debug!(%event, "parsed event");
            events.push(event);
        }

        self.read += 1;
        if events.len() != num_events {
            return Err(PuzzleError::EventCountMismatch {
                puzzle: self.read,
                declared: num_events,
                actual: events.len(),
            });
        }

        Ok(Some(Puzzle {
            num_employees,
            num_values,
            parent_ids,
            events,
        }))
    }

    fn next_line(&mut self) -> Result<Option<String>, PuzzleError> {
        match self.lines.next() {
            Some(line) => {
                self.line_no += 1;
                Ok(Some(line?))
            }
            None => Ok(None),
        }
    }

    fn next_non_blank(&mut self) -> Result<Option<String>, PuzzleError> {
        while let Some(line) = self.next_line()? {
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    fn parse_triple(&self, line: &str) -> Result<[usize; 3], PuzzleError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(PuzzleError::Parse {
                line: self.line_no,
                reason: format!("expected 3 fields, found {}", fields.len()),
            });
        }
        Ok([
            parse_field(fields[0], self.line_no, "field")?,
            parse_field(fields[1], self.line_no, "field")?,
            parse_field(fields[2], self.line_no, "field")?,
        ])
    }
}

impl<R: BufRead> Iterator for PuzzleReader<R> {
    type Item = Result<Puzzle, PuzzleError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.read_next().transpose();
        self.failed = matches!(item, Some(Err(_)));
        item
    }
}

fn parse_field<T: FromStr>(field: &str, line: usize, what: &str) -> Result<T, PuzzleError> {
    field.parse().map_err(|_| PuzzleError::Parse {
        line,
        reason: format!("invalid {what} '{field}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TWO_PUZZLES: &str = "2\n\n3 2 5\n1 2\n1 2 7\n3 0 0\n2 0 5\n2 0 0\n3 0 0\n\n1 1 1\n\n1 0 0\n";

    #[test]
    fn test_reads_weights_from_positions() {
        let mut reader = PuzzleReader::new(Cursor::new(TWO_PUZZLES)).unwrap();
        assert_eq!(reader.num_puzzles(), 2);

        let first = reader.read_next().unwrap().unwrap();
        assert_eq!(first.parent_ids, vec![1, 2]);
        assert_eq!(
            first.events,
            vec![
                Event::broadcast(1, 2, 7),
                Event::read(3, 2),
                Event::broadcast(2, 0, 5),
                Event::read(2, 4),
                Event::read(3, 5),
            ]
        );

        let second = reader.read_next().unwrap().unwrap();
        assert_eq!(second.num_employees, 1);
        assert!(second.parent_ids.is_empty());
        assert_eq!(second.events, vec![Event::read(1, 1)]);

        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn test_event_count_mismatch() {
        let input = "1\n\n2 1 3\n1\n1 0 4\n2 0 0\n";
        let err = PuzzleReader::new(Cursor::new(input))
            .unwrap()
            .read_next()
            .unwrap_err();
        assert!(matches!(
            err,
            PuzzleError::EventCountMismatch {
                puzzle: 1,
                declared: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_read_with_importance_rejected() {
        let input = "1\n\n2 1 1\n1\n2 1 0\n";
        let err = PuzzleReader::new(Cursor::new(input))
            .unwrap()
            .read_next()
            .unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidRead { line: 5 }));
    }

    #[test]
    fn test_missing_puzzle() {
        let input = "2\n\n1 1 1\n\n1 0 0\n";
        let results: Vec<_> = PuzzleReader::new(Cursor::new(input)).unwrap().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(PuzzleError::MissingPuzzle {
                expected: 2,
                found: 1
            })
        ));
    }
}
