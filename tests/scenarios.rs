//! Hand-checked scenarios, run through both engines

use orgcast::{Company, EngineChoice, Event, Solver, SolverConfig, MODULUS};
use test_case::test_case;

mod common;
use common::*;

fn solve(parent_ids: &[usize], events: &[Event], choice: EngineChoice, interval: usize) -> u64 {
    let company = company(parent_ids);
    let config = SolverConfig::default()
        .with_engine(choice)
        .with_summary_interval(interval);
    Solver::new(&company, config)
        .run(events)
        .expect("solve succeeds")
        .value
}

#[test_case(&[1, 2], &[Event::broadcast(1, 2, 7), Event::read(3, 1)], 7 ; "chain reaches leaf")]
#[test_case(&[1, 1], &[Event::broadcast(1, 1, 5), Event::read(2, 1), Event::read(3, 1)], 10 ; "star reaches every report")]
#[test_case(&[1], &[Event::broadcast(1, 0, 9), Event::read(2, 1)], 1 ; "hop zero stays at origin")]
#[test_case(&[1, 1], &[Event::broadcast(1, 2, 3), Event::broadcast(1, 2, 8), Event::read(2, 1)], 8 ; "later broadcast overrides")]
#[test_case(&[1, 2, 3], &[Event::read(4, 6)], 6 ; "default value is one")]
#[test_case(&[1, 2, 3], &[Event::broadcast(1, 2, 4), Event::read(4, 1), Event::read(3, 1)], 5 ; "hop limit is inclusive")]
#[test_case(&[1, 1, 2], &[Event::broadcast(3, 5, 4), Event::read(4, 2)], 2 ; "sibling subtree untouched")]
#[test_case(&[1, 2], &[Event::read(3, 2), Event::broadcast(1, 2, 9), Event::read(3, 3)], 29 ; "reads before broadcast keep default")]
fn both_engines(parent_ids: &[usize], events: &[Event], expected: u64) {
    for choice in [EngineChoice::Deep, EngineChoice::Shallow] {
        for interval in [1, 2, 10] {
            assert_eq!(
                solve(parent_ids, events, choice, interval),
                expected,
                "{choice} engine, interval {interval}"
            );
        }
    }
}

#[test_case(EngineChoice::Deep ; "deep")]
#[test_case(EngineChoice::Shallow ; "shallow")]
fn empty_events_sum_to_zero(choice: EngineChoice) {
    assert_eq!(solve(&chain_parents(20), &[], choice, 3), 0);
    assert_eq!(solve(&star_parents(20), &[], choice, 3), 0);
}

#[test_case(EngineChoice::Deep ; "deep")]
#[test_case(EngineChoice::Shallow ; "shallow")]
fn modular_wraparound(choice: EngineChoice) {
    let parents = star_parents(5);
    let mut events = vec![Event::broadcast(1, 1, MODULUS - 2)];
    let mut expected = 0u64;
    for target in 1..=5usize {
        for _ in 0..100 {
            events.push(Event::read(target, 999_999_937));
            expected = (expected + (MODULUS - 2) * 999_999_937 % MODULUS) % MODULUS;
        }
    }
    let value = solve(&parents, &events, choice, 2);
    assert_eq!(value, expected);
    assert!(value < MODULUS);
}

#[test]
fn long_chain_with_sparse_broadcasts() {
    let parents = chain_parents(500);
    let events = vec![
        Event::broadcast(10, 300, 2),
        Event::broadcast(200, 50, 3),
        Event::read(310, 1),
        Event::read(311, 1),
        Event::read(250, 1),
        Event::read(251, 1),
        Event::read(9, 1),
    ];
    // 310: reached by 10 (300 hops); 311: 301 hops, default; 250: 200+50;
    // 251: beyond 200's reach but 10 covers it; 9: above both
    let expected = 2 + 1 + 3 + 2 + 1;
    assert_eq!(oracle(&parents, &events), expected);
    for interval in [1, 7, 22] {
        assert_eq!(solve(&parents, &events, EngineChoice::Deep, interval), expected);
    }
    assert_eq!(solve(&parents, &events, EngineChoice::Shallow, 1), expected);
}

#[test]
fn malformed_hierarchy_is_rejected() {
    let err = Company::build(3, &[1, 5]).unwrap_err();
    assert!(err.is_malformed_input());
}
