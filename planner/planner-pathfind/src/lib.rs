//! Pairwise tangent-arc path solving for a car-like robot.
//!
//! Given two oriented poses, this crate finds the shortest path made of
//! fixed-radius arcs and straight runs that keeps clear of obstacles and the
//! arena walls:
//!
//! - [`ManeuverFamily`] - the ten arc/straight/arc and arc/arc/arc shapes
//! - [`Reposition`] - the backing-up moves tried before each shape
//! - [`ClearanceChecker`] - accepts or rejects a movement sequence
//! - [`PairwiseSolver`] - the minimum over every shape and reposition
//! - [`DistanceMatrix`] - every ordered pair of goals, solved up front
//!
//! Infeasible shapes and blocked pairs are not errors. They come back as an
//! infeasible [`CandidatePath`](planner_types::CandidatePath) with infinite
//! distance, and the tour search routes around them.
//!
//! # Example
//!
//! ```
//! use planner_arena::{Arena, parse_map_string, plan_landing_zones};
//! use planner_pathfind::{DistanceMatrix, PairwiseSolver, ClearanceChecker};
//! use planner_types::{ArenaConfig, SafetyMargins, VehicleConfig};
//!
//! let obstacles = parse_map_string("MAP=[[1,1,12,1],[2,11,11,3]]").unwrap();
//! let mut arena = Arena::with_obstacles(ArenaConfig::default(), &obstacles).unwrap();
//! let margins = SafetyMargins::default();
//! let plan = plan_landing_zones(&mut arena, margins.landing_supplement())
//!     .with_start(arena.config().start_pose());
//!
//! let solver = PairwiseSolver::new(
//!     VehicleConfig::default(),
//!     ClearanceChecker::for_arena(&arena, margins),
//!     arena.config().start_pose(),
//! );
//! let matrix = DistanceMatrix::build(&plan.goals, &solver);
//! assert_eq!(matrix.size(), 3);
//! ```
//!
//! # Conventions
//!
//! Angles are radians, counter-clockwise from east, with `y` pointing north.
//! A reverse movement carries a negative distance.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

pub mod clearance;
pub mod family;
pub mod matrix;
pub mod pairwise;
pub mod reposition;

pub use clearance::{ClearanceChecker, sweep_contains};
pub use family::ManeuverFamily;
pub use matrix::DistanceMatrix;
pub use pairwise::{PairwiseSolver, pairwise_path};
pub use reposition::Reposition;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod integration_tests {
    use super::*;
    use planner_arena::{Arena, parse_map_string, plan_landing_zones};
    use planner_types::{ArenaConfig, Movement, SafetyMargins, VehicleConfig};

    fn build(map: &str, margins: &SafetyMargins) -> (PairwiseSolver, DistanceMatrix) {
        let obstacles = parse_map_string(map).unwrap();
        let mut arena = Arena::with_obstacles(ArenaConfig::default(), &obstacles).unwrap();
        let plan = plan_landing_zones(&mut arena, margins.landing_supplement())
            .with_start(arena.config().start_pose());
        let solver = PairwiseSolver::new(
            VehicleConfig::default(),
            ClearanceChecker::for_arena(&arena, margins.clone()),
            arena.config().start_pose(),
        );
        let matrix = DistanceMatrix::build(&plan.goals, &solver);
        (solver, matrix)
    }

    #[test]
    fn test_accepted_paths_revalidate() {
        let (solver, matrix) = build("MAP=[[1,1,12,1],[2,11,11,3],[3,15,3,0]]", &SafetyMargins::default());
        for i in 0..matrix.size() {
            for j in 0..matrix.size() {
                let Some(path) = matrix.path(i, j) else { continue };
                if path.is_feasible() && !path.movements().is_empty() {
                    assert!(solver.checker().is_safe(path.movements()));
                    // Twice gives the same answer
                    assert!(solver.checker().is_safe(path.movements()));
                }
            }
        }
    }

    #[test]
    fn test_paths_are_continuous() {
        let (_, matrix) = build("MAP=[[1,1,12,1],[2,11,11,3]]", &SafetyMargins::default());
        for i in 0..matrix.size() {
            for j in 0..matrix.size() {
                let Some(path) = matrix.path(i, j) else { continue };
                let moves: &[Movement] = path.movements();
                for pair in moves.windows(2) {
                    let gap = (pair[0].end.position - pair[1].start.position).norm();
                    assert!(gap < 1e-6, "gap {gap} in path {i}->{j}");
                }
            }
        }
    }

    #[test]
    fn test_start_leg_to_first_obstacle_is_straight() {
        // Obstacle 1 at (1, 12) facing south lands at (15, 105) facing north
        let (_, matrix) = build("MAP=[[1,1,12,1],[2,11,11,3]]", &SafetyMargins::default());
        // Goal order is row-major: obstacle 2 first, then obstacle 1, then start
        let path = matrix.path(2, 1).unwrap();
        assert_eq!(path.movements().len(), 1);
        assert!(path.movements()[0].is_straight());
        assert!((path.distance() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_looser_margins_never_lose_paths() {
        let map = "MAP=[[1,5,9,0],[2,9,9,2],[3,14,15,3]]";
        let (_, strict) = build(map, &SafetyMargins::default());
        let loose = SafetyMargins::default()
            .with_turning_edge(20.0)
            .with_turning_obstacle(30.0)
            .with_check_edge(false);
        let (_, relaxed) = build(map, &loose);
        assert!(relaxed.finite_count() >= strict.finite_count());
    }
}
