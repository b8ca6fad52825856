//! Grid arena model for tangent-arc planning.
//!
//! This crate owns everything about the arena before path planning starts:
//!
//! - [`Arena`] - the square grid of cells with validated obstacle placement
//! - [`plan_landing_zones`] - landing-cell annotation and goal-pose derivation
//! - [`parse_map_string`] / [`parse_obstacle_json`] - the obstacle input contract
//! - [`ObstacleGenerator`] - seeded random layouts for simulation
//!
//! # Example
//!
//! ```
//! use planner_arena::{Arena, parse_map_string, plan_landing_zones};
//! use planner_types::ArenaConfig;
//!
//! let obstacles = parse_map_string("MAP=[[1,1,12,1],[2,11,11,3]]").unwrap();
//! let mut arena = Arena::with_obstacles(ArenaConfig::default(), &obstacles).unwrap();
//!
//! let plan = plan_landing_zones(&mut arena, 10.0)
//!     .with_start(arena.config().start_pose());
//! assert_eq!(plan.len(), 3);
//! assert_eq!(plan.goal_ids, vec![Some(2), Some(1), None]);
//! ```
//!
//! # Grid Coordinates
//!
//! Cells are indexed `(x, y)` with `y` growing north. Cell `(x, y)` covers
//! `[x·s, (x+1)·s) × [y·s, (y+1)·s)` centimeters for cell size `s`.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

pub mod arena;
pub mod generator;
pub mod landing;
pub mod map_input;

pub use arena::{Arena, ObstacleSpec};
pub use generator::ObstacleGenerator;
pub use landing::{LandingPlan, plan_landing_zones, plan_landing_zones_and_goals};
pub use map_input::{format_map_string, parse_map_string, parse_obstacle_json};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod integration_tests {
    use super::*;
    use planner_types::{ArenaConfig, CellKind, Facing};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generated_layout_plans_every_landing() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut arena = ObstacleGenerator::new(5).generate(&ArenaConfig::default(), &mut rng).unwrap();
        let plan = plan_landing_zones(&mut arena, 10.0);
        assert_eq!(plan.len(), 5);
        assert!(arena.count_kind(CellKind::Landing) >= 1);
        assert_eq!(arena.count_kind(CellKind::Obstacle), 5);
        for goal in &plan.goals {
            assert_eq!(goal.kind, CellKind::Landing);
        }
    }

    #[test]
    fn test_json_and_map_inputs_agree() {
        let from_map = parse_map_string("MAP=[[3,8,14,2]]").unwrap();
        let from_json = parse_obstacle_json(r#"[{"id": 3, "x": 8, "y": 14, "dir": "E"}]"#).unwrap();
        assert_eq!(from_map, from_json);
        assert_eq!(from_map[0].facing, Facing::East);
    }

    #[test]
    fn test_invalid_map_placement_surfaces() {
        let obstacles = parse_map_string("MAP=[[1,0,1,1]]").unwrap();
        assert!(Arena::with_obstacles(ArenaConfig::default(), &obstacles).is_err());
    }
}
