//! Ancestor chain index
//!
//! Answers "is `candidate` at most `k` hops above `node`?" without walking
//! the whole management line. Every summarized employee keeps the
//! ancestors sitting at depths 0, I, 2I, … above it, so a query jumps to
//! the sample nearest the candidate and walks fewer than I hops from
//! there.
//!
//! Setup visits leaves in ascending id order. A leaf whose manager is
//! already summarized stays deferred (no summary of its own); queries on
//! it step to the manager first. Otherwise the leaf and every
//! unsummarized manager above it are summarized, reusing the samples of
//! the nearest summarized ancestor instead of rewalking to the root.

mod summary;

pub use summary::AncestorSummary;
use summary::Sample;

use crate::tree::{Company, EmployeeId};
use crate::OrgError;
use tracing::{debug, info};

/// Default sampling interval: ⌈√(max depth)⌉, at least 1
pub fn default_interval(company: &Company) -> usize {
    let max_depth = company.max_depth() as f64;
    (max_depth.sqrt().ceil() as usize).max(1)
}

/// Per-employee skip summaries over a borrowed company
#[derive(Debug)]
pub struct AncestorChainIndex<'a> {
    company: &'a Company,

    /// Sampling interval I
    interval: usize,

    /// Summary of employee `id` at `id - 1`; `None` while deferred
    summaries: Vec<Option<AncestorSummary>>,
}

impl<'a> AncestorChainIndex<'a> {
    /// Compute every summary the queries will need, each exactly once
    pub fn build(company: &'a Company, interval: usize) -> Result<Self, OrgError> {
        if interval == 0 {
            return Err(OrgError::InvalidInterval);
        }

        let mut index = Self {
            company,
            interval,
            summaries: vec![None; company.len()],
        };
        index.summaries[0] = Some(AncestorSummary::empty());

        let leaves = company.leaf_markers();
        info!(leaves = leaves.count_ones(), interval, "building ancestor summaries");

        let mut segment = Vec::new();
        let mut samples = Vec::new();

        for leaf in leaves.iter_ones().map(|idx| idx + 1) {
            let Some(manager) = company.employee(leaf).manager() else {
                continue;
            };
            if index.summaries[manager - 1].is_some() {
                continue;
            }

            debug!(leaf, "summarizing line");
            index.collect_samples(manager, &mut segment, &mut samples);

            let depth = company.employee(leaf).depth();
            index.summaries[leaf - 1] = Some(AncestorSummary::from_samples(&samples, depth, interval));

            // `segment` runs from the leaf's manager upwards; summarized
            // employees only ever have summarized managers.
            for &id in &segment {
                if index.summaries[id - 1].is_some() {
                    break;
                }
                let depth = company.employee(id).depth();
                while matches!(samples.last(), Some(sample) if sample.depth >= depth) {
                    samples.pop();
                }
                index.summaries[id - 1] = Some(AncestorSummary::from_samples(&samples, depth, interval));
            }
        }

        info!(summarized = index.summarized(), "completed setup");
        Ok(index)
    }

    /// Fill `samples` with the ancestors-or-self of `start` at depths that
    /// are multiples of the interval, root first.
    ///
    /// Walks up until an employee with a non-empty summary is found (whose
    /// samples are reused) or the root is passed. `segment` receives the
    /// walked employees, `start` first.
    fn collect_samples(
        &self,
        start: EmployeeId,
        segment: &mut Vec<EmployeeId>,
        samples: &mut Vec<Sample>,
    ) {
        segment.clear();
        samples.clear();

        let mut cursor = Some(start);
        while let Some(id) = cursor {
            if let Some(summary) = self.summaries[id - 1].as_ref().filter(|s| !s.is_empty()) {
                samples.extend(summary.ids().iter().map(|&ancestor| self.sample(ancestor)));
                self.push_if_sampled(id, samples);
                break;
            }
            segment.push(id);
            cursor = self.company.employee(id).manager();
        }

        for &id in segment.iter().rev() {
            self.push_if_sampled(id, samples);
        }
    }

    #[inline]
    fn sample(&self, id: EmployeeId) -> Sample {
        Sample {
            id,
            depth: self.company.employee(id).depth(),
        }
    }

    fn push_if_sampled(&self, id: EmployeeId, samples: &mut Vec<Sample>) {
        let sample = self.sample(id);
        if sample.depth % self.interval == 0 {
            samples.push(sample);
        }
    }

    /// Sampling interval I
    pub fn interval(&self) -> usize {
        self.interval
    }

    /// Summary of `id`; `None` for deferred leaves and unknown ids
    pub fn summary(&self, id: EmployeeId) -> Option<&AncestorSummary> {
        if self.company.contains(id) {
            self.summaries[id - 1].as_ref()
        } else {
            None
        }
    }

    /// Number of employees holding a summary
    pub fn summarized(&self) -> usize {
        self.summaries.iter().filter(|s| s.is_some()).count()
    }

    /// Check whether `candidate` is `node` or one of its ancestors at most
    /// `max_hops` hops above it.
    ///
    /// Both ids must name employees, otherwise `UnknownEmployee` is
    /// returned. Ids only decrease towards the root, so a candidate
    /// numbered above `node` is rejected immediately.
    pub fn is_ancestor_within(
        &self,
        node: EmployeeId,
        candidate: EmployeeId,
        max_hops: usize,
    ) -> Result<bool, OrgError> {
        for id in [node, candidate] {
            if !self.company.contains(id) {
                return Err(OrgError::UnknownEmployee {
                    employee: id,
                    num_employees: self.company.len(),
                });
            }
        }
        if candidate > node {
            return Ok(false);
        }
        if candidate == node {
            return Ok(true);
        }
        if max_hops == 0 {
            return Ok(false);
        }

        let mut budget = max_hops;
        let mut current = node;

        let summary = match self.summaries[node - 1].as_ref() {
            Some(summary) => summary,
            None => {
                current = self.company.employee(node).manager().ok_or_else(|| {
                    OrgError::InvariantViolation(format!("deferred employee {node} has no manager"))
                })?;
                budget -= 1;
                self.summaries[current - 1]
                    .as_ref()
                    .ok_or(OrgError::MissingSummary { employee: current })?
            }
        };

        if let Some((sampled, distance)) = summary.first_at_or_after(candidate) {
            if distance > budget {
                return Ok(false);
            }
            budget -= distance;
            current = sampled;
        }

        if current == candidate {
            return Ok(true);
        }

        while budget > 0 {
            let Some(manager) = self.company.employee(current).manager() else {
                return Ok(false);
            };
            if manager < candidate {
                return Ok(false);
            }
            if manager == candidate {
                return Ok(true);
            }
            current = manager;
            budget -= 1;
        }

        Ok(false)
    }
}
