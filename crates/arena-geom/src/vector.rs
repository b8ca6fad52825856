//! Vector and angle utilities.
//!
//! All angles are radians in `[0, 2π)`, measured counter-clockwise with the
//! y axis pointing north.
//!
//! # Winding Convention
//!
//! [`angle_between`] returns the counter-clockwise sweep that carries the
//! first vector onto the second. A left (counter-clockwise) turn from radius
//! vector `a` to radius vector `b` therefore sweeps `angle_between(a, b)`,
//! and a right (clockwise) turn sweeps `angle_between(b, a)`.
//!
//! ```
//! use arena_geom::angle_between;
//! use approx::assert_relative_eq;
//! use nalgebra::Vector2;
//! use std::f64::consts::FRAC_PI_2;
//!
//! let east = Vector2::new(1.0, 0.0);
//! let north = Vector2::new(0.0, 1.0);
//!
//! assert_relative_eq!(angle_between(&east, &north), FRAC_PI_2, epsilon = 1e-12);
//! assert_relative_eq!(angle_between(&north, &east), 3.0 * FRAC_PI_2, epsilon = 1e-12);
//! ```

use std::f64::consts::TAU;

use nalgebra::{Rotation2, Vector2};

use crate::error::GeometryError;

/// Angles closer than this to zero (or to a full turn) are treated as zero.
pub const ANGLE_EPSILON: f64 = 1e-9;

/// Vectors shorter than this cannot be normalized.
pub const LENGTH_EPSILON: f64 = 1e-12;

/// Wraps an angle into `[0, 2π)`.
///
/// # Example
///
/// ```
/// use arena_geom::normalize_angle;
/// use approx::assert_relative_eq;
/// use std::f64::consts::{PI, TAU};
///
/// assert_relative_eq!(normalize_angle(-PI / 2.0), 1.5 * PI);
/// assert_relative_eq!(normalize_angle(TAU + 1.0), 1.0, epsilon = 1e-12);
/// ```
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round a tiny negative input up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Returns the length of a vector and its heading in `[0, 2π)`.
///
/// # Example
///
/// ```
/// use arena_geom::vector_properties;
/// use approx::assert_relative_eq;
/// use nalgebra::Vector2;
/// use std::f64::consts::PI;
///
/// let (length, heading) = vector_properties(&Vector2::new(0.0, -2.0));
/// assert_relative_eq!(length, 2.0);
/// assert_relative_eq!(heading, 1.5 * PI);
/// ```
#[must_use]
pub fn vector_properties(v: &Vector2<f64>) -> (f64, f64) {
    (v.norm(), normalize_angle(v.y.atan2(v.x)))
}

/// Returns the counter-clockwise angle from `v1` to `v2`, in `[0, 2π)`.
///
/// The unsigned angle comes from the dot product; when the 2D cross product
/// is negative the angle is reflected to `2π - angle`. Results within
/// [`ANGLE_EPSILON`] of zero or of a full turn snap to exactly zero so that
/// numerically parallel vectors never report a full loop.
///
/// A zero-length input has no direction and yields `NaN`.
#[must_use]
pub fn angle_between(v1: &Vector2<f64>, v2: &Vector2<f64>) -> f64 {
    if v1.norm() < LENGTH_EPSILON || v2.norm() < LENGTH_EPSILON {
        return f64::NAN;
    }

    let cross = v1.perp(v2);
    let dot = v1.dot(v2);
    let angle = normalize_angle(cross.atan2(dot));

    if angle < ANGLE_EPSILON || TAU - angle < ANGLE_EPSILON {
        0.0
    } else {
        angle
    }
}

/// Length of an arc of the given radius sweeping `angle` radians.
///
/// # Example
///
/// ```
/// use arena_geom::arc_length;
/// use approx::assert_relative_eq;
/// use std::f64::consts::PI;
///
/// assert_relative_eq!(arc_length(31.0, PI), 31.0 * PI);
/// assert_relative_eq!(arc_length(31.0, -PI), 31.0 * PI);
/// ```
#[must_use]
pub fn arc_length(radius: f64, angle: f64) -> f64 {
    (radius * angle).abs()
}

/// Rotates a vector counter-clockwise by `radians`.
#[must_use]
pub fn rotate_vector(v: &Vector2<f64>, radians: f64) -> Vector2<f64> {
    Rotation2::new(radians) * v
}

/// Returns the unit vector pointing along `v`.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateVector`] if `v` is (numerically) zero.
///
/// # Example
///
/// ```
/// use arena_geom::normalize;
/// use nalgebra::Vector2;
///
/// let unit = normalize(&Vector2::new(3.0, 4.0)).unwrap();
/// assert!((unit.norm() - 1.0).abs() < 1e-12);
/// assert!(normalize(&Vector2::zeros()).is_err());
/// ```
pub fn normalize(v: &Vector2<f64>) -> Result<Vector2<f64>, GeometryError> {
    let length = v.norm();
    if length < LENGTH_EPSILON || !length.is_finite() {
        return Err(GeometryError::DegenerateVector);
    }
    Ok(v / length)
}

/// Unit vector for a heading in radians.
#[must_use]
pub fn heading_vector(heading: f64) -> Vector2<f64> {
    Vector2::new(heading.cos(), heading.sin())
}
