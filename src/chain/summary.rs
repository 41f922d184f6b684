//! Sparse skip summary of one employee's management line

use crate::tree::EmployeeId;

/// Ancestor sampled at a depth that is a multiple of the summary interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Sample {
    pub id: EmployeeId,
    pub depth: usize,
}

/// Sampled ancestors of one employee, root first.
///
/// `ids[k]` is an ancestor `distances[k]` hops above the employee. Ids
/// ascend because they are read from the root downwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestorSummary {
    ids: Vec<EmployeeId>,
    distances: Vec<usize>,
}

impl AncestorSummary {
    /// Summary with no samples
    pub fn empty() -> Self {
        Self::default()
    }

    /// Summarize an employee at `depth` from the sampled part of its line.
    ///
    /// `samples` must be root first and lie strictly above `depth`. Lines
    /// holding at most one interval (`depth / interval <= 1`, floor
    /// division) get an empty summary.
    pub(crate) fn from_samples(samples: &[Sample], depth: usize, interval: usize) -> Self {
        if depth / interval <= 1 {
            return Self::empty();
        }

        debug_assert!(samples.iter().all(|sample| sample.depth < depth));
        let ids = samples.iter().map(|sample| sample.id).collect();
        let distances = samples.iter().map(|sample| depth - sample.depth).collect();
        Self { ids, distances }
    }

    /// Number of sampled ancestors
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing was sampled
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Sampled ancestor ids, root first
    pub fn ids(&self) -> &[EmployeeId] {
        &self.ids
    }

    /// Hop distance to each sampled ancestor
    pub fn distances(&self) -> &[usize] {
        &self.distances
    }

    /// Smallest sampled id `>= candidate`, with its distance.
    ///
    /// When `candidate` is an ancestor, this is the sample closest to it on
    /// the employee's side of the line.
    pub fn first_at_or_after(&self, candidate: EmployeeId) -> Option<(EmployeeId, usize)> {
        let idx = self.ids.partition_point(|&id| id < candidate);
        if idx == self.ids.len() {
            None
        } else {
            Some((self.ids[idx], self.distances[idx]))
        }
    }
}
