//! Criterion benchmarks for the placement, line detection and terminal
//! check hot paths.
//!
//! Run with:
//!     cargo bench --bench valid_placements

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use hexfall_engine::engine::bot_strategy::{BotStrategy, RandomStrategy};
use hexfall_engine::engine::config::EngineConfig;
use hexfall_engine::engine::session::Session;
use hexfall_engine::game::lines::detect_lines;
use hexfall_engine::game::placement::get_valid_placements;
use hexfall_engine::game::types::GameState;
use hexfall_engine::game::RuleEngine;

const SEED: u64 = 42;
const CHECKPOINTS: [usize; 4] = [0, 5, 10, 20];

struct Fixture {
    label: String,
    engine: RuleEngine,
    state: GameState,
}

/// Snapshots of one random game after a fixed number of placements.
fn build_fixtures() -> Vec<Fixture> {
    let config = EngineConfig::default();
    let mut fixtures = Vec::new();

    for &turns in &CHECKPOINTS {
        let grid = config.build_grid().expect("default grid");
        let engine = config.build_engine(&grid);
        let source = config.figure_generator(SEED).expect("default generator");
        let mut session = Session::start(engine.clone(), grid, source);
        let mut rng = StdRng::seed_from_u64(SEED);

        for _ in 0..turns {
            if session.is_over() {
                break;
            }
            let Some(m) = RandomStrategy.choose_move(session.engine(), session.state(), &mut rng) else {
                break;
            };
            for action in m.to_actions() {
                session.apply(&action).expect("random strategy uses active figures");
            }
        }

        fixtures.push(Fixture {
            label: format!("t{}_occ{}", turns, session.state().grid.occupied_count()),
            engine,
            state: session.into_state(),
        });
    }

    fixtures
}

fn bench_valid_placements(c: &mut Criterion) {
    let fixtures = build_fixtures();
    let mut group = c.benchmark_group("get_valid_placements");

    for fixture in &fixtures {
        group.bench_with_input(
            BenchmarkId::new("three_figures", &fixture.label),
            &fixture.state,
            |b, state| {
                b.iter(|| {
                    state
                        .figures
                        .iter()
                        .map(|f| get_valid_placements(&state.grid, f).len())
                        .sum::<usize>()
                });
            },
        );
    }

    group.finish();
}

fn bench_detect_lines(c: &mut Criterion) {
    let fixtures = build_fixtures();
    let mut group = c.benchmark_group("detect_lines");

    for fixture in &fixtures {
        group.bench_with_input(
            BenchmarkId::new("full_partition", &fixture.label),
            &fixture.state.grid,
            |b, grid| {
                b.iter(|| detect_lines(grid));
            },
        );
    }

    group.finish();
}

fn bench_legal_moves(c: &mut Criterion) {
    let fixtures = build_fixtures();
    let mut group = c.benchmark_group("legal_moves");

    for fixture in &fixtures {
        group.bench_with_input(
            BenchmarkId::new("all_figures", &fixture.label),
            fixture,
            |b, f| {
                b.iter(|| f.engine.legal_moves(&f.state));
            },
        );
    }

    group.finish();
}

fn bench_state_clone(c: &mut Criterion) {
    let fixtures = build_fixtures();
    let mut group = c.benchmark_group("state_clone");

    for fixture in &fixtures {
        group.bench_with_input(
            BenchmarkId::new("clone", &fixture.label),
            &fixture.state,
            |b, state| {
                b.iter(|| state.clone());
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_valid_placements,
    bench_detect_lines,
    bench_legal_moves,
    bench_state_clone,
);
criterion_main!(benches);
