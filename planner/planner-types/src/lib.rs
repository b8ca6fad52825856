//! Core types for tangent-arc tour planning.
//!
//! This crate provides the shared vocabulary of the planner crates:
//!
//! - **Poses**: [`Pose`], [`Facing`] and [`CellKind`] for grid cells and
//!   continuous goal poses
//! - **Movements**: [`Movement`], [`Direction`] and [`CandidatePath`] for the
//!   segments the pairwise solver produces
//! - **Tours**: [`Tour`] and [`TourLeg`] for solved visiting orders
//! - **Configuration**: [`VehicleConfig`], [`ArenaConfig`], [`SafetyMargins`],
//!   [`TourConfig`] and the aggregate [`PlannerConfig`]
//! - **Relaxation**: [`Relaxation`] and [`SafetyMargins::relax`] for the
//!   margin ladder used when no tour exists
//! - **Errors**: [`PlannerError`]
//!
//! # Example
//!
//! ```
//! use planner_types::{
//!     ArenaConfig, CandidatePath, Facing, Movement, PlannerConfig, Pose, SafetyMargins,
//! };
//!
//! let config = PlannerConfig::default()
//!     .with_margins(SafetyMargins::default().with_turning_edge(27.0));
//! assert!(config.validate().is_empty());
//!
//! let start = config.arena().start_pose();
//! let goal = Pose::new(start.x(), 95.0, Facing::North);
//! let path = CandidatePath::new(vec![Movement::straight(start, goal, false)]);
//! assert_eq!(path.distance(), 90.0);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for all types

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod movement;
pub mod pose;
pub mod relax;
pub mod tour;

pub use config::{ArenaConfig, CommandFormat, PlannerConfig, SafetyMargins, SearchStrategy, TourConfig, VehicleConfig};
pub use error::PlannerError;
pub use movement::{CandidatePath, Direction, Movement};
pub use pose::{CellKind, Facing, POSITION_EPSILON, Pose};
pub use relax::Relaxation;
pub use tour::{Tour, TourLeg};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use nalgebra::Point2;
    use std::f64::consts::FRAC_PI_2;

    /// A reverse reposition followed by a forward run, as the solver builds them.
    #[test]
    fn test_reposition_then_straight() {
        let vehicle = VehicleConfig::default();
        let r = vehicle.turning_radius();
        let start = Pose::new(100.0, 100.0, Facing::North);
        let center = Point2::new(100.0 + r, 100.0);
        let after = Pose::at(center - Facing::North.unit_vector() * r, Facing::West);

        let reposition = Movement::arc(start, after.clone(), center, r, FRAC_PI_2, Direction::ReverseRight);
        let run_end = Pose::new(after.x() - 40.0, after.y(), Facing::West);
        let run = Movement::straight(after, run_end, false);

        let path = CandidatePath::new(vec![reposition, run]);
        assert!((path.distance() - (r * FRAC_PI_2 + 40.0)).abs() < 1e-9);
        assert!(path.movements()[0].is_reverse());
        assert!(!path.movements()[1].is_reverse());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(PlannerConfig::default().validate().is_empty());
        assert_eq!(PlannerConfig::default().format(), CommandFormat::Tokens);
    }
}
