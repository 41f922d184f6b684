//! Shape heuristic choosing between the deep and shallow engines
//!
//! Long thin chains favour the deep engine: its cost depends on skip
//! summaries, not on how far a broadcast must be pushed. Wide flat trees
//! favour the shallow engine, where any downward push ends in a few hops.

use super::Company;
use std::fmt;

/// Engine family picked for a company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineKind {
    /// Reverse replay with ancestor skip summaries
    Deep,

    /// Forward replay with lazy push-down
    Shallow,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Deep => write!(f, "deep"),
            EngineKind::Shallow => write!(f, "shallow"),
        }
    }
}

/// Depth statistics gathered by [`classify`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeReport {
    /// Number of employees N
    pub num_employees: usize,

    /// Mean depth over every employee, the root counting as depth 0
    pub average_depth: f64,

    /// Longest management line
    pub max_depth: usize,

    /// Engine the heuristic recommends
    pub kind: EngineKind,
}

/// Single pass over employee depths.
///
/// Deep is chosen when the mean depth over all N employees exceeds √N.
/// The root contributes depth 0, so a lone root has mean depth 0.
pub fn classify(company: &Company) -> ShapeReport {
    let mut depth_total = 0usize;
    let mut max_depth = 0usize;

    for employee in company.iter() {
        depth_total += employee.depth();
        max_depth = max_depth.max(employee.depth());
    }

    let num_employees = company.len();
    let average_depth = if num_employees == 0 {
        0.0
    } else {
        depth_total as f64 / num_employees as f64
    };

    let kind = if average_depth > (num_employees as f64).sqrt() {
        EngineKind::Deep
    } else {
        EngineKind::Shallow
    };

    ShapeReport {
        num_employees,
        average_depth,
        max_depth,
        kind,
    }
}
