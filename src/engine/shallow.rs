//! Shallow engine: forward replay with lazy push-down
//!
//! A broadcast is queued at its origin and only pushed one level further
//! down when a read needs it. Entries keep their arrival order through
//! every push, so older broadcasts always land before newer ones.

use super::accumulator::ModularAccumulator;
use super::queue::SpliceQueue;
use super::EventEngine;
use crate::event::Event;
use crate::tree::{Company, EmployeeId, EngineKind};
use crate::OrgError;
use tracing::debug;

/// Broadcast not yet pushed below `origin`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingBroadcast {
    origin: EmployeeId,
    remaining_hops: usize,
    value: u64,
}

/// Forward engine for wide, flat companies
#[derive(Debug)]
pub struct ShallowEventEngine<'a> {
    company: &'a Company,

    /// Current value of employee `id` at `id - 1`
    ties: Vec<u64>,

    pending: SpliceQueue<PendingBroadcast>,
}

impl<'a> ShallowEventEngine<'a> {
    /// Create the engine with every value at the default 1
    pub fn new(company: &'a Company) -> Self {
        Self {
            company,
            ties: vec![1; company.len()],
            pending: SpliceQueue::new(),
        }
    }

    /// Current value of `id` as far as broadcasts have been pushed
    pub fn tie(&self, id: EmployeeId) -> Option<u64> {
        if self.company.contains(id) {
            Some(self.ties[id - 1])
        } else {
            None
        }
    }

    /// Drop queued broadcasts and return every value to the default 1
    fn reset(&mut self) {
        self.ties.fill(1);
        self.pending = SpliceQueue::new();
    }

    /// Push pending broadcasts down until `target`'s value is current.
    ///
    /// Only entries at ids `<= target` can sit on `target`'s line; applying
    /// one writes its origin and replaces it by an entry per direct report.
    /// Entries numbered above `target` are left for later reads.
    fn resolve(&mut self, target: EmployeeId) {
        let company = self.company;
        let mut prev = None;
        let mut cursor = self.pending.head();

        while let Some(slot) = cursor {
            let entry = *self.pending.get(slot);
            if entry.origin > target {
                prev = Some(slot);
                cursor = self.pending.next(slot);
                continue;
            }

            self.ties[entry.origin - 1] = entry.value;
            let reports: &[EmployeeId] = if entry.remaining_hops == 0 {
                &[]
            } else {
                company.employee(entry.origin).reports()
            };
            cursor = self.pending.splice(
                prev,
                slot,
                reports.iter().map(|&report| PendingBroadcast {
                    origin: report,
                    remaining_hops: entry.remaining_hops - 1,
                    value: entry.value,
                }),
            );
        }
    }
}

impl EventEngine for ShallowEventEngine<'_> {
    fn kind(&self) -> EngineKind {
        EngineKind::Shallow
    }

    fn process(&mut self, events: &[Event]) -> Result<u64, OrgError> {
        super::validate_events(self.company, events)?;
        self.reset();

        let mut acc = ModularAccumulator::new();

        for (position, event) in events.iter().enumerate() {
            match event {
                Event::Broadcast(broadcast) => self.pending.push_back(PendingBroadcast {
                    origin: broadcast.origin,
                    remaining_hops: broadcast.hops,
                    value: broadcast.value,
                }),
                Event::Read(read) => {
                    debug!(position, queued = self.pending.len(), "read");
                    self.resolve(read.target);
                    acc.add(self.ties[read.target - 1], read.weight);
                }
            }
        }

        Ok(acc.total())
    }
}
