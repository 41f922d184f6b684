//! A single employee in the hierarchy

use std::fmt;

/// Employee number, 1-based
pub type EmployeeId = usize;

/// Employee node: a manager back-reference plus the ordered direct reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    id: EmployeeId,

    /// Manager id (`None` only for the root)
    manager: Option<EmployeeId>,

    /// Direct reports in ascending id order
    reports: Vec<EmployeeId>,

    /// Hops from the root
    depth: usize,
}

impl Employee {
    pub(crate) fn root() -> Self {
        Self {
            id: super::ROOT,
            manager: None,
            reports: Vec::new(),
            depth: 0,
        }
    }

    pub(crate) fn new(id: EmployeeId, manager: EmployeeId, depth: usize) -> Self {
        Self {
            id,
            manager: Some(manager),
            reports: Vec::new(),
            depth,
        }
    }

    pub(crate) fn add_report(&mut self, report: EmployeeId) {
        debug_assert!(report > self.id, "reports must be numbered after their manager");
        self.reports.push(report);
    }

    /// Employee number
    #[inline]
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// Manager id, `None` for the root
    #[inline]
    pub fn manager(&self) -> Option<EmployeeId> {
        self.manager
    }

    /// Direct reports
    #[inline]
    pub fn reports(&self) -> &[EmployeeId] {
        &self.reports
    }

    /// Hops from the root
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Check if this employee manages nobody
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.reports.is_empty()
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.manager {
            Some(manager) => write!(f, "#{} (reports to #{})", self.id, manager),
            None => write!(f, "#{} (root)", self.id),
        }
    }
}
