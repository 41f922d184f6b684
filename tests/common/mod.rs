//! Shared helpers: company shapes and a brute-force oracle

#![allow(dead_code)]

use orgcast::{Company, Event, MODULUS};

/// Chain 1 -> 2 -> ... -> n
pub fn chain_parents(n: usize) -> Vec<usize> {
    (1..n).collect()
}

/// Every employee reports to the root
pub fn star_parents(n: usize) -> Vec<usize> {
    vec![1; n.saturating_sub(1)]
}

/// Brute force: apply every broadcast eagerly over the whole subtree walk
pub fn oracle(parent_ids: &[usize], events: &[Event]) -> u64 {
    let n = parent_ids.len() + 1;
    let mut reports = vec![Vec::new(); n + 1];
    for (idx, &manager) in parent_ids.iter().enumerate() {
        reports[manager].push(idx + 2);
    }

    let mut values = vec![1u64; n + 1];
    let mut total = 0u64;
    for event in events {
        match *event {
            Event::Broadcast(b) => {
                let mut frontier = vec![b.origin];
                for level in 0..=b.hops {
                    let mut next = Vec::new();
                    for &id in &frontier {
                        values[id] = b.value;
                        if level < b.hops {
                            next.extend_from_slice(&reports[id]);
                        }
                    }
                    if next.is_empty() {
                        break;
                    }
                    frontier = next;
                }
            }
            Event::Read(r) => {
                let product = (values[r.target] % MODULUS) * (r.weight % MODULUS) % MODULUS;
                total = (total + product) % MODULUS;
            }
        }
    }
    total
}

/// Build a company, panicking on malformed input (tests only)
pub fn company(parent_ids: &[usize]) -> Company {
    Company::build(parent_ids.len() + 1, parent_ids).expect("valid parent list")
}
