//! Engine benchmarks on chain-shaped and star-shaped companies

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use orgcast::{Company, EngineChoice, Event, Solver, SolverConfig};

const EMPLOYEES: usize = 5_000;
const EVENTS: usize = 5_000;

fn events(n: usize) -> Vec<Event> {
    (0..EVENTS)
        .map(|step| {
            let id = step * 7919 % n + 1;
            if step % 4 == 0 {
                Event::broadcast(id, step % 64, step as u64 + 2)
            } else {
                Event::read(id, step as u64 + 1)
            }
        })
        .collect()
}

fn bench_shape(c: &mut Criterion, name: &str, parents: Vec<usize>) {
    let company = Company::build(EMPLOYEES, &parents).expect("valid company");
    let events = events(EMPLOYEES);

    for choice in [EngineChoice::Deep, EngineChoice::Shallow] {
        c.bench_function(&format!("{name}/{choice}"), |b| {
            b.iter(|| {
                let solver = Solver::new(&company, SolverConfig::default().with_engine(choice));
                black_box(solver.run(black_box(&events)).expect("solve succeeds"))
            });
        });
    }
}

fn benchmark_engines(c: &mut Criterion) {
    bench_shape(c, "chain", (1..EMPLOYEES).collect());
    bench_shape(c, "star", vec![1; EMPLOYEES - 1]);
}

criterion_group!(benches, benchmark_engines);
criterion_main!(benches);
