//! Turning circles and the tangent constructions that join them.
//!
//! A vehicle with a fixed minimum turning radius can turn about one of two
//! circles: the left circle (center offset 90° counter-clockwise from the
//! heading) or the right circle (offset clockwise). Paths between two poses
//! are built by joining one circle of each pose with either
//!
//! - an outer tangent ([`outer_tangent`]), when both turns share a hand,
//! - an inner tangent ([`inner_tangent`]), when the hands differ, or
//! - a third connecting circle ([`connecting_circle`]), giving three arcs
//!   and no straight run.
//!
//! Every construction returns radial unit vectors rather than angles;
//! the caller measures sweeps with [`angle_between`](crate::angle_between).
//!
//! # Example
//!
//! ```
//! use arena_geom::{Circle, Hand, outer_tangent};
//! use approx::assert_relative_eq;
//! use nalgebra::{Point2, Vector2};
//!
//! let north = Vector2::new(0.0, 1.0);
//! let c1 = Circle::turning(&Point2::new(15.0, 5.0), &north, 31.0, Hand::Left);
//! let c2 = Circle::turning(&Point2::new(15.0, 95.0), &north, 31.0, Hand::Left);
//!
//! let tangent = outer_tangent(&c1, &c2, Hand::Left).unwrap();
//! assert_relative_eq!(tangent.start, Point2::new(15.0, 5.0), epsilon = 1e-9);
//! assert_relative_eq!(tangent.length(), 90.0, epsilon = 1e-9);
//! ```

use std::f64::consts::FRAC_PI_2;

use nalgebra::{Point2, Vector2};

use crate::error::GeometryError;
use crate::vector::{normalize, rotate_vector};

/// Handedness of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hand {
    /// Counter-clockwise.
    Left,
    /// Clockwise.
    Right,
}

impl Hand {
    /// Returns the other hand.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// `+1.0` for left, `-1.0` for right.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }
}

/// A circle in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    /// Center point.
    pub center: Point2<f64>,
    /// Radius.
    pub radius: f64,
}

impl Circle {
    /// Creates a circle.
    #[must_use]
    pub const fn new(center: Point2<f64>, radius: f64) -> Self {
        Self { center, radius }
    }

    /// The turning circle on the given hand of a vehicle at `position`
    /// heading along the unit vector `heading`.
    ///
    /// # Example
    ///
    /// ```
    /// use arena_geom::{Circle, Hand};
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let east = Vector2::new(1.0, 0.0);
    /// let left = Circle::turning(&Point2::new(50.0, 50.0), &east, 31.0, Hand::Left);
    /// let right = Circle::turning(&Point2::new(50.0, 50.0), &east, 31.0, Hand::Right);
    ///
    /// assert!((left.center.y - 81.0).abs() < 1e-9);
    /// assert!((right.center.y - 19.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn turning(position: &Point2<f64>, heading: &Vector2<f64>, radius: f64, hand: Hand) -> Self {
        let offset = rotate_vector(heading, hand.sign() * FRAC_PI_2) * radius;
        Self::new(position + offset, radius)
    }

    /// Point on the circle in the direction of the unit vector `radial`.
    #[must_use]
    pub fn point_at(&self, radial: &Vector2<f64>) -> Point2<f64> {
        self.center + radial * self.radius
    }

    /// Vector from the center to `point`.
    #[must_use]
    pub fn radial(&self, point: &Point2<f64>) -> Vector2<f64> {
        point - self.center
    }
}

/// A straight tangent segment leaving one circle and reaching another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tangent {
    /// Unit radial direction of the departure point on the first circle.
    pub normal: Vector2<f64>,
    /// Departure point on the first circle.
    pub start: Point2<f64>,
    /// Arrival point on the second circle.
    pub end: Point2<f64>,
}

impl Tangent {
    /// Length of the straight run.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// A third circle tangent to two turning circles of equal radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectingCircle {
    /// The connecting circle.
    pub circle: Circle,
    /// Unit vector from the first center toward the connecting center.
    pub first_normal: Vector2<f64>,
    /// Unit vector from the second center toward the connecting center.
    pub second_normal: Vector2<f64>,
}

impl ConnectingCircle {
    /// Contact point with the first circle.
    #[must_use]
    pub fn first_contact(&self) -> Point2<f64> {
        self.circle.center - self.first_normal * self.circle.radius
    }

    /// Contact point with the second circle.
    #[must_use]
    pub fn second_contact(&self) -> Point2<f64> {
        self.circle.center - self.second_normal * self.circle.radius
    }
}

/// Outer tangent between two equal circles traversed with the same hand.
///
/// The tangent leaves `c1` at `c1.center + r * n`, where `n` is the center
/// separation rotated a quarter turn clockwise (left hand) or
/// counter-clockwise (right hand), and runs parallel to the separation.
///
/// # Errors
///
/// [`GeometryError::DegenerateVector`] if the centers coincide.
pub fn outer_tangent(c1: &Circle, c2: &Circle, hand: Hand) -> Result<Tangent, GeometryError> {
    let separation = c2.center - c1.center;
    let normal = normalize(&rotate_vector(&separation, -hand.sign() * FRAC_PI_2))?;
    let start = c1.point_at(&normal);
    Ok(Tangent {
        normal,
        start,
        end: start + separation,
    })
}

/// Inner (crossing) tangent from a `first`-handed turn on `c1` to an
/// opposite-handed turn on `c2`.
///
/// # Errors
///
/// [`GeometryError::OutOfWindow`] if the circles are closer than `2r`, and
/// [`GeometryError::DegenerateVector`] if the centers coincide.
pub fn inner_tangent(c1: &Circle, c2: &Circle, first: Hand) -> Result<Tangent, GeometryError> {
    let separation = c2.center - c1.center;
    let distance = separation.norm();
    let radius = c1.radius;
    if distance < 2.0 * radius {
        return Err(GeometryError::OutOfWindow {
            distance,
            min: 2.0 * radius,
            max: f64::INFINITY,
        });
    }

    let theta = (radius / (distance / 2.0)).clamp(-1.0, 1.0).acos();
    let normal = normalize(&rotate_vector(&separation, -first.sign() * theta))?;
    Ok(Tangent {
        normal,
        start: c1.point_at(&normal),
        end: c2.center - normal * c2.radius,
    })
}

/// Connecting circle for a triple-arc maneuver starting with a `first`-handed
/// turn on `c1`.
///
/// The connecting center sits at `c1.center + 2r * n1`, with `n1` the
/// separation rotated away from the turn by `acos((d/2) / 2r)`.
///
/// # Errors
///
/// [`GeometryError::OutOfWindow`] unless `2r <= d <= 4r`, and
/// [`GeometryError::DegenerateVector`] if the construction collapses.
pub fn connecting_circle(c1: &Circle, c2: &Circle, first: Hand) -> Result<ConnectingCircle, GeometryError> {
    let separation = c2.center - c1.center;
    let distance = separation.norm();
    let radius = c1.radius;
    if distance < 2.0 * radius || distance > 4.0 * radius {
        return Err(GeometryError::OutOfWindow {
            distance,
            min: 2.0 * radius,
            max: 4.0 * radius,
        });
    }

    let theta = ((distance / 2.0) / (2.0 * radius)).clamp(-1.0, 1.0).acos();
    let first_normal = normalize(&rotate_vector(&separation, -first.sign() * theta))?;
    let center = c1.center + first_normal * (2.0 * radius);
    let second_normal = normalize(&(center - c2.center))?;

    Ok(ConnectingCircle {
        circle: Circle::new(center, radius),
        first_normal,
        second_normal,
    })
}
