//! Deep engine: reverse replay against pending reads
//!
//! Walking the events backwards, the first broadcast met that reaches a
//! pending read is the latest one in real time, so it settles that read
//! for good. Reads still pending at the start of time see the default 1.

use std::collections::BTreeMap;

use super::accumulator::{add_mod, ModularAccumulator};
use super::EventEngine;
use crate::chain::AncestorChainIndex;
use crate::event::{BroadcastEvent, Event};
use crate::tree::{Company, EmployeeId, EngineKind};
use crate::OrgError;
use tracing::debug;

/// Reads waiting for the broadcast that decides their value, keyed by
/// target id. Weights of repeated targets are merged; matching depends on
/// the target alone.
#[derive(Debug, Default)]
struct PendingReads {
    weights: BTreeMap<EmployeeId, u64>,
}

impl PendingReads {
    fn insert(&mut self, target: EmployeeId, weight: u64) {
        let merged = self.weights.entry(target).or_insert(0);
        *merged = add_mod(*merged, weight);
    }

    fn len(&self) -> usize {
        self.weights.len()
    }
}

/// Reverse-chronological engine for deep, chain-like companies
#[derive(Debug)]
pub struct DeepEventEngine<'a> {
    company: &'a Company,
    index: AncestorChainIndex<'a>,
}

impl<'a> DeepEventEngine<'a> {
    /// Build the engine, computing ancestor summaries with `interval`
    pub fn new(company: &'a Company, interval: usize) -> Result<Self, OrgError> {
        Ok(Self {
            company,
            index: AncestorChainIndex::build(company, interval)?,
        })
    }

    /// The ancestor index backing the queries
    pub fn index(&self) -> &AncestorChainIndex<'a> {
        &self.index
    }

    /// Settle every pending read reached by `broadcast`
    fn apply(
        &self,
        broadcast: &BroadcastEvent,
        pending: &mut PendingReads,
        acc: &mut ModularAccumulator,
    ) -> Result<(), OrgError> {
        let mut settled = Vec::new();

        // Targets below the origin cannot be its descendants
        for (&target, &weight) in pending.weights.range(broadcast.origin..).rev() {
            if self
                .index
                .is_ancestor_within(target, broadcast.origin, broadcast.hops)?
            {
                acc.add(broadcast.value, weight);
                settled.push(target);
            }
        }

        for target in settled {
            pending.weights.remove(&target);
        }
        Ok(())
    }
}

impl EventEngine for DeepEventEngine<'_> {
    fn kind(&self) -> EngineKind {
        EngineKind::Deep
    }

    fn process(&mut self, events: &[Event]) -> Result<u64, OrgError> {
        super::validate_events(self.company, events)?;

        let mut pending = PendingReads::default();
        let mut acc = ModularAccumulator::new();

        for (position, event) in events.iter().enumerate().rev() {
            match event {
                Event::Read(read) => pending.insert(read.target, read.weight),
                Event::Broadcast(broadcast) => {
                    debug!(position, hops = broadcast.hops, pending = pending.len(), "broadcast");
                    self.apply(broadcast, &mut pending, &mut acc)?;
                }
            }
        }

        // Untouched employees keep their initial value of 1
        for &weight in pending.weights.values() {
            acc.add(1, weight);
        }

        Ok(acc.total())
    }
}
