use criterion::{
    criterion_group,
    criterion_main,
    BenchmarkGroup,
    Criterion,
    SamplingMode
};
use criterion::measurement::WallTime;

use rand::SeedableRng;

use rand_chacha::ChaCha8Rng;

use sudoku_engine::Difficulty;
use sudoku_engine::generator::{Carver, Generator};
use sudoku_engine::solver::{BacktrackingSolver, Solver};
use sudoku_engine::validator::{
    CrossCheckValidator,
    RuleValidator,
    ScanValidator
};

use std::time::Duration;

// Explanation of benchmark classes:
//
// generation: filling an empty grid by randomized backtracking, the
//             dominant cost of starting a new game.
// carving: deriving a puzzle from a fixed solution, per difficulty tier.
// solving: completing carved puzzles with the BacktrackingSolver, once per
//          validator implementation.

const MEASUREMENT_TIME_SECS: u64 = 30;
const SAMPLE_SIZE: usize = 100;

fn group<'criterion>(c: &'criterion mut Criterion, name: &str)
        -> BenchmarkGroup<'criterion, WallTime> {
    let mut group = c.benchmark_group(name);
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(MEASUREMENT_TIME_SECS));
    group.sample_size(SAMPLE_SIZE);
    group
}

fn bench_generation(c: &mut Criterion) {
    let mut group = group(c, "generation");

    group.bench_function("scan validator", |b| {
        let mut generator =
            Generator::new(ScanValidator, ChaCha8Rng::seed_from_u64(42));
        b.iter(|| generator.generate_full().unwrap())
    });

    group.bench_function("cross-checked validators", |b| {
        let mut generator = Generator::new(
            CrossCheckValidator::new(ScanValidator, RuleValidator),
            ChaCha8Rng::seed_from_u64(42));
        b.iter(|| generator.generate_full().unwrap())
    });

    group.finish();
}

fn bench_carving(c: &mut Criterion) {
    let mut group = group(c, "carving");
    let solution = Generator::new(ScanValidator,
        ChaCha8Rng::seed_from_u64(43)).generate_full().unwrap();

    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        group.bench_function(difficulty.to_string(), |b| {
            let mut carver = Carver::new(ChaCha8Rng::seed_from_u64(43));
            b.iter(|| carver.carve(&solution, difficulty))
        });
    }

    group.finish();
}

fn bench_solving(c: &mut Criterion) {
    let mut group = group(c, "solving");
    let mut generator =
        Generator::new(ScanValidator, ChaCha8Rng::seed_from_u64(44));
    let mut carver = Carver::new(ChaCha8Rng::seed_from_u64(44));
    let puzzles: Vec<_> = (0..10)
        .map(|_| {
            let solution = generator.generate_full().unwrap();
            carver.carve(&solution, Difficulty::Hard)
        })
        .collect();

    group.bench_function("scan validator", |b| {
        let solver = BacktrackingSolver::new_default();
        b.iter(|| {
            for puzzle in &puzzles {
                solver.solve(puzzle).unwrap();
            }
        })
    });

    group.bench_function("rule validator", |b| {
        let solver = BacktrackingSolver::new(RuleValidator);
        b.iter(|| {
            for puzzle in &puzzles {
                solver.solve(puzzle).unwrap();
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_generation, bench_carving, bench_solving);
criterion_main!(benches);
