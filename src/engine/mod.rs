//! Event engines
//!
//! Two algorithms answer the same question:
//! - [`DeepEventEngine`] replays events backwards with ancestor skip
//!   summaries (good for long chains)
//! - [`ShallowEventEngine`] replays events forwards, pushing broadcasts
//!   down lazily (good for wide, flat trees)
//!
//! [`Engine`] picks one per company, once, from the shape heuristic or an
//! explicit [`EngineChoice`].

mod accumulator;
mod deep;
mod queue;
mod shallow;

pub use accumulator::{ModularAccumulator, MODULUS};
pub use deep::DeepEventEngine;
pub use shallow::ShallowEventEngine;

use std::fmt;
use std::str::FromStr;

use crate::chain::default_interval;
use crate::event::Event;
use crate::tree::{classify, Company, EngineKind};
use crate::{OrgError, SolverConfig};
use tracing::info;

/// Capability shared by both engines
pub trait EventEngine {
    /// Which algorithm this is
    fn kind(&self) -> EngineKind;

    /// Consume the full chronological event list.
    ///
    /// Returns `Σ weight × value` over all reads, modulo [`MODULUS`].
    fn process(&mut self, events: &[Event]) -> Result<u64, OrgError>;
}

/// Engine requested by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EngineChoice {
    /// Let the shape heuristic decide
    #[default]
    Auto,

    /// Always use the deep engine
    Deep,

    /// Always use the shallow engine
    Shallow,
}

impl FromStr for EngineChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(EngineChoice::Auto),
            "deep" => Ok(EngineChoice::Deep),
            "shallow" => Ok(EngineChoice::Shallow),
            other => Err(format!("unknown engine '{other}' (expected auto, deep or shallow)")),
        }
    }
}

impl fmt::Display for EngineChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineChoice::Auto => write!(f, "auto"),
            EngineChoice::Deep => write!(f, "deep"),
            EngineChoice::Shallow => write!(f, "shallow"),
        }
    }
}

/// Engine chosen for one company
#[derive(Debug)]
pub enum Engine<'a> {
    /// Reverse replay
    Deep(DeepEventEngine<'a>),

    /// Forward replay
    Shallow(ShallowEventEngine<'a>),
}

impl<'a> Engine<'a> {
    /// Build the engine `config` asks for
    pub fn select(company: &'a Company, config: &SolverConfig) -> Result<Self, OrgError> {
        let report = classify(company);
        let kind = match config.engine {
            EngineChoice::Auto => report.kind,
            EngineChoice::Deep => EngineKind::Deep,
            EngineChoice::Shallow => EngineKind::Shallow,
        };
        info!(
            average_depth = report.average_depth,
            max_depth = report.max_depth,
            %kind,
            "selected engine"
        );

        match kind {
            EngineKind::Deep => {
                let interval = config
                    .summary_interval
                    .unwrap_or_else(|| default_interval(company));
                Ok(Engine::Deep(DeepEventEngine::new(company, interval)?))
            }
            EngineKind::Shallow => Ok(Engine::Shallow(ShallowEventEngine::new(company))),
        }
    }
}

impl EventEngine for Engine<'_> {
    fn kind(&self) -> EngineKind {
        match self {
            Engine::Deep(engine) => engine.kind(),
            Engine::Shallow(engine) => engine.kind(),
        }
    }

    fn process(&mut self, events: &[Event]) -> Result<u64, OrgError> {
        match self {
            Engine::Deep(engine) => engine.process(events),
            Engine::Shallow(engine) => engine.process(events),
        }
    }
}

/// Reject events naming employees outside the company
fn validate_events(company: &Company, events: &[Event]) -> Result<(), OrgError> {
    match events
        .iter()
        .position(|event| !company.contains(event.employee()))
    {
        Some(position) => Err(OrgError::EventOutOfRange {
            position,
            employee: events[position].employee(),
            num_employees: company.len(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_follows_shape() {
        let chain: Vec<usize> = (1..50).collect();
        let company = Company::build(50, &chain).unwrap();
        let engine = Engine::select(&company, &SolverConfig::default()).unwrap();
        assert_eq!(engine.kind(), EngineKind::Deep);

        let star = vec![1; 49];
        let company = Company::build(50, &star).unwrap();
        let engine = Engine::select(&company, &SolverConfig::default()).unwrap();
        assert_eq!(engine.kind(), EngineKind::Shallow);
    }

    #[test]
    fn test_zero_interval_surfaces() {
        let company = Company::build(2, &[1]).unwrap();
        let config = SolverConfig::default()
            .with_engine(EngineChoice::Deep)
            .with_summary_interval(0);
        assert_eq!(
            Engine::select(&company, &config).unwrap_err(),
            OrgError::InvalidInterval
        );
    }

    #[test]
    fn test_out_of_range_event() {
        let company = Company::build(3, &[1, 1]).unwrap();
        let events = vec![Event::read(2, 1), Event::broadcast(4, 0, 2)];
        for choice in [EngineChoice::Deep, EngineChoice::Shallow] {
            let config = SolverConfig::default().with_engine(choice);
            let mut engine = Engine::select(&company, &config).unwrap();
            let err = engine.process(&events).unwrap_err();
            assert_eq!(
                err,
                OrgError::EventOutOfRange {
                    position: 1,
                    employee: 4,
                    num_employees: 3
                }
            );
            assert!(err.is_malformed_input());
        }
    }

    #[test]
    fn test_repeated_process_calls_agree() {
        let company = Company::build(3, &[1, 1]).unwrap();
        let first = vec![Event::broadcast(1, 1, 5), Event::read(2, 1)];
        let second = vec![Event::read(2, 1)];
        for choice in [EngineChoice::Deep, EngineChoice::Shallow] {
            let config = SolverConfig::default().with_engine(choice);
            let mut engine = Engine::select(&company, &config).unwrap();
            assert_eq!(engine.process(&first).unwrap(), 5, "{choice}");
            assert_eq!(engine.process(&second).unwrap(), 1, "{choice}");
        }
    }

    #[test]
    fn test_engine_choice_parsing() {
        assert_eq!("Deep".parse::<EngineChoice>().unwrap(), EngineChoice::Deep);
        assert_eq!("auto".parse::<EngineChoice>().unwrap(), EngineChoice::Auto);
        assert!("bushy".parse::<EngineChoice>().is_err());
        assert_eq!(EngineChoice::Shallow.to_string(), "shallow");
    }
}
