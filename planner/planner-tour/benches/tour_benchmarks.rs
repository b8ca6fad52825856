//! Benchmarks for tour planning.
//!
//! Run with: cargo bench -p planner-tour
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p planner-tour -- --save-baseline main
//! 2. After changes: cargo bench -p planner-tour -- --baseline main

#![allow(clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use planner_arena::{Arena, ObstacleGenerator, parse_map_string};
use planner_tour::{TourPlanner, order_goals};
use planner_types::{ArenaConfig, PlannerConfig, SearchStrategy, TourConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// =============================================================================
// Input Generation
// =============================================================================

/// Dense random cost table with the start in the last row.
fn random_costs(goals: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let size = goals + 1;
    (0..size)
        .map(|i| {
            (0..size)
                .map(|j| if i == j { f64::INFINITY } else { rng.gen_range(10.0..300.0) })
                .collect()
        })
        .collect()
}

fn generated_arena(count: usize, seed: u64) -> Arena {
    let mut rng = StdRng::seed_from_u64(seed);
    ObstacleGenerator::new(count)
        .generate(&ArenaConfig::default(), &mut rng)
        .unwrap()
}

// =============================================================================
// Goal Ordering
// =============================================================================

fn bench_order_goals(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_goals");

    for goals in [4, 6, 8] {
        let costs = random_costs(goals, 7);
        group.throughput(Throughput::Elements(goals as u64));

        for strategy in [SearchStrategy::Exhaustive, SearchStrategy::Memoized] {
            let config = TourConfig::default().with_strategy(strategy);
            group.bench_with_input(BenchmarkId::new(format!("{strategy:?}"), goals), &costs, |b, costs| {
                b.iter(|| order_goals(black_box(costs), black_box(&config)));
            });
        }
    }

    group.finish();
}

// =============================================================================
// Full Pipeline
// =============================================================================

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(20);

    let fixed = Arena::with_obstacles(
        ArenaConfig::default(),
        &parse_map_string("MAP=[[1,1,12,1],[2,11,11,3]]").unwrap(),
    )
    .unwrap();
    let planner = TourPlanner::new(PlannerConfig::default());
    group.bench_function("two_obstacles", |b| {
        b.iter(|| planner.solve(black_box(&fixed)));
    });

    for count in [3, 5] {
        let arena = generated_arena(count, 11);
        group.bench_with_input(BenchmarkId::new("generated", count), &arena, |b, arena| {
            b.iter(|| planner.solve(black_box(arena)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_order_goals, bench_solve);
criterion_main!(benches);
