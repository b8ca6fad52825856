//! Planar geometry kernel for tangent-arc path planning.
//!
//! This crate provides the pure geometric building blocks used by the
//! planner crates:
//!
//! - [`angle_between`] - counter-clockwise sweep between two vectors with a
//!   fixed winding convention
//! - [`vector_properties`], [`arc_length`], [`rotate_vector`], [`normalize`]
//! - [`point_to_segment_distance`], [`segment_segment_distance`] and
//!   [`closest_point_on_segment`] for clearance queries
//! - [`Circle`] with [`outer_tangent`], [`inner_tangent`] and
//!   [`connecting_circle`] for joining turning circles
//!
//! # Layer 0 Crate
//!
//! Nothing here knows about arenas, obstacles or vehicles. All functions are
//! stateless and take `nalgebra` points and vectors in centimeters.
//!
//! # Coordinate System
//!
//! - X: east
//! - Y: north
//!
//! Angles are radians in `[0, 2π)`, counter-clockwise from east.
//!
//! # Example
//!
//! ```
//! use arena_geom::{Circle, Hand, angle_between, arc_length, inner_tangent};
//! use nalgebra::{Point2, Vector2};
//!
//! let north = Vector2::new(0.0, 1.0);
//! let start = Point2::new(15.0, 5.0);
//! let left = Circle::turning(&start, &north, 31.0, Hand::Left);
//! let target = Circle::new(Point2::new(120.0, 150.0), 31.0);
//!
//! // Left turn, straight run, right turn
//! let tangent = inner_tangent(&left, &target, Hand::Left).unwrap();
//! let sweep = angle_between(&left.radial(&start), &tangent.normal);
//! let first_arc = arc_length(31.0, sweep);
//! assert!(first_arc > 0.0);
//! ```
//!
//! # Quality Standards
//!
//! - Zero `unwrap`/`expect` in library code
//! - Degenerate inputs surface as [`GeometryError`] or `NaN`, never a panic

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

pub mod circle;
pub mod distance;
pub mod error;
pub mod vector;

pub use circle::{Circle, ConnectingCircle, Hand, Tangent, connecting_circle, inner_tangent, outer_tangent};
pub use distance::{closest_point_on_segment, point_to_segment_distance, segment_segment_distance};
pub use error::GeometryError;
pub use vector::{
    ANGLE_EPSILON, LENGTH_EPSILON, angle_between, arc_length, heading_vector, normalize, normalize_angle,
    rotate_vector, vector_properties,
};
