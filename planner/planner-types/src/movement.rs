//! Movements and candidate paths.
//!
//! A [`Movement`] is one atomic drive segment: a straight run or an arc of
//! the vehicle's turning radius. A negative distance means the segment is
//! driven backward; the direction always names the steering side.

use arena_geom::Hand;
use nalgebra::Point2;

use crate::pose::Pose;

/// Steering direction of a segment.
///
/// The reverse variants appear in maneuver descriptions; a constructed
/// [`Movement`] stores the steering side and records reversal in the sign of
/// its distance.
///
/// # Example
///
/// ```
/// use planner_types::Direction;
///
/// assert_eq!(Direction::ReverseRight.steering(), Direction::Right);
/// assert!(Direction::ReverseLeft.is_reverse());
/// assert_eq!(Direction::Straight.letter(), 'S');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// No steering.
    Straight,
    /// Steer left, driving forward.
    Left,
    /// Steer right, driving forward.
    Right,
    /// Steer left, driving backward.
    ReverseLeft,
    /// Steer right, driving backward.
    ReverseRight,
}

impl Direction {
    /// Returns `true` for the backward variants.
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::ReverseLeft | Self::ReverseRight)
    }

    /// The steering side with reversal stripped.
    #[must_use]
    pub const fn steering(self) -> Self {
        match self {
            Self::ReverseLeft => Self::Left,
            Self::ReverseRight => Self::Right,
            other => other,
        }
    }

    /// The turning circle this direction uses, if any.
    #[must_use]
    pub const fn hand(self) -> Option<Hand> {
        match self {
            Self::Left | Self::ReverseLeft => Some(Hand::Left),
            Self::Right | Self::ReverseRight => Some(Hand::Right),
            Self::Straight => None,
        }
    }

    /// Command letter (`S`, `L` or `R`).
    #[must_use]
    pub const fn letter(self) -> char {
        match self.steering() {
            Self::Left => 'L',
            Self::Right => 'R',
            _ => 'S',
        }
    }
}

impl From<Hand> for Direction {
    fn from(hand: Hand) -> Self {
        match hand {
            Hand::Left => Self::Left,
            Hand::Right => Self::Right,
        }
    }
}

/// A directed atomic drive segment.
///
/// Invariant: `turn_angle == 0` exactly when `direction` is
/// [`Direction::Straight`], and arcs always carry a `circle_center`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Movement {
    /// Signed length in centimeters; negative when driven backward.
    pub distance: f64,
    /// Swept angle in radians (zero for straights).
    pub turn_angle: f64,
    /// Steering side.
    pub direction: Direction,
    /// Pose at the beginning of the segment.
    pub start: Pose,
    /// Pose at the end of the segment.
    pub end: Pose,
    /// Center of the turning circle for arcs.
    pub circle_center: Option<Point2<f64>>,
}

impl Movement {
    /// A straight segment from `start` to `end`, backward if `reverse`.
    ///
    /// # Example
    ///
    /// ```
    /// use planner_types::{Movement, Pose, Facing};
    ///
    /// let m = Movement::straight(
    ///     Pose::new(15.0, 20.0, Facing::North),
    ///     Pose::new(15.0, 5.0, Facing::North),
    ///     true,
    /// );
    /// assert_eq!(m.distance, -15.0);
    /// assert!(m.is_reverse());
    /// ```
    #[must_use]
    pub fn straight(start: Pose, end: Pose, reverse: bool) -> Self {
        let length = (end.position - start.position).norm();
        Self {
            distance: if reverse { -length } else { length },
            turn_angle: 0.0,
            direction: Direction::Straight,
            start,
            end,
            circle_center: None,
        }
    }

    /// An arc about `center` sweeping `angle` radians.
    ///
    /// Reverse directions produce a negative distance and store the plain
    /// steering side.
    #[must_use]
    pub fn arc(start: Pose, end: Pose, center: Point2<f64>, radius: f64, angle: f64, direction: Direction) -> Self {
        let length = (radius * angle).abs();
        Self {
            distance: if direction.is_reverse() { -length } else { length },
            turn_angle: angle,
            direction: direction.steering(),
            start,
            end,
            circle_center: Some(center),
        }
    }

    /// Absolute length in centimeters.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.distance.abs()
    }

    /// Returns `true` if driven backward.
    #[must_use]
    pub fn is_reverse(&self) -> bool {
        self.distance < 0.0
    }

    /// Returns `true` for straight segments.
    #[must_use]
    pub fn is_straight(&self) -> bool {
        self.direction == Direction::Straight
    }
}

/// An ordered movement sequence joining two goal poses.
///
/// An infeasible candidate has infinite distance and no movements.
///
/// # Example
///
/// ```
/// use planner_types::{CandidatePath, Movement, Pose, Facing};
///
/// let path = CandidatePath::new(vec![Movement::straight(
///     Pose::new(0.0, 0.0, Facing::East),
///     Pose::new(40.0, 0.0, Facing::East),
///     false,
/// )]);
/// assert_eq!(path.distance(), 40.0);
/// assert!(path.is_feasible());
/// assert!(!CandidatePath::infeasible().is_feasible());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidatePath {
    distance: f64,
    movements: Vec<Movement>,
}

impl CandidatePath {
    /// Builds a path whose distance is the sum of absolute segment lengths.
    #[must_use]
    pub fn new(movements: Vec<Movement>) -> Self {
        let distance = movements.iter().map(Movement::length).sum();
        Self { distance, movements }
    }

    /// The infinite-cost path.
    #[must_use]
    pub const fn infeasible() -> Self {
        Self {
            distance: f64::INFINITY,
            movements: Vec::new(),
        }
    }

    /// The zero-cost path for a pose that is already at its destination.
    #[must_use]
    pub const fn stationary() -> Self {
        Self {
            distance: 0.0,
            movements: Vec::new(),
        }
    }

    /// Total absolute length.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// The segments in driving order.
    #[must_use]
    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    /// Consumes the path, returning its segments.
    #[must_use]
    pub fn into_movements(self) -> Vec<Movement> {
        self.movements
    }

    /// Returns `true` if the distance is finite.
    #[must_use]
    pub const fn is_feasible(&self) -> bool {
        self.distance.is_finite()
    }

    /// Pose reached at the end of the path, if it has any movement.
    #[must_use]
    pub fn end_pose(&self) -> Option<&Pose> {
        self.movements.last().map(|m| &m.end)
    }
}

impl Default for CandidatePath {
    fn default() -> Self {
        Self::infeasible()
    }
}
