//! Broadcast and read events
//!
//! Both engines consume the same chronologically ordered `[Event]`.

use crate::tree::EmployeeId;
use std::fmt;

/// Set the value of every descendant of `origin` within `hops` hops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BroadcastEvent {
    /// Employee the broadcast starts at
    pub origin: EmployeeId,

    /// Maximum number of hops below `origin` (0 = origin only)
    pub hops: usize,

    /// Value written to every reached employee
    pub value: u64,
}

/// Add `weight × value(target)` to the running total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadEvent {
    /// Employee whose value is read
    pub target: EmployeeId,

    /// Multiplier applied to the value
    pub weight: u64,
}

/// One entry in the chronological event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// Push a value down part of the hierarchy
    Broadcast(BroadcastEvent),

    /// Read a value at a single employee
    Read(ReadEvent),
}

impl Event {
    /// Shorthand for [`Event::Broadcast`]
    pub fn broadcast(origin: EmployeeId, hops: usize, value: u64) -> Self {
        Event::Broadcast(BroadcastEvent {
            origin,
            hops,
            value,
        })
    }

    /// Shorthand for [`Event::Read`]
    pub fn read(target: EmployeeId, weight: u64) -> Self {
        Event::Read(ReadEvent { target, weight })
    }

    /// Employee the event is anchored at
    #[inline]
    pub fn employee(&self) -> EmployeeId {
        match self {
            Event::Broadcast(broadcast) => broadcast.origin,
            Event::Read(read) => read.target,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Broadcast(b) => {
                write!(f, "broadcast({}, hops={}, value={})", b.origin, b.hops, b.value)
            }
            Event::Read(r) => write!(f, "read({}, weight={})", r.target, r.weight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_employee() {
        assert_eq!(Event::broadcast(4, 2, 9).employee(), 4);
        assert_eq!(Event::read(7, 3).employee(), 7);
    }

    #[test]
    fn test_display() {
        assert_eq!(Event::broadcast(1, 0, 5).to_string(), "broadcast(1, hops=0, value=5)");
        assert_eq!(Event::read(2, 8).to_string(), "read(2, weight=8)");
    }
}
