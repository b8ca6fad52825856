//! The ten maneuver families.
//!
//! Each family joins a turning circle of the source pose to a turning
//! circle of the destination pose:
//!
//! | # | Family | First arc | Connector | Last arc |
//! |---|--------|-----------|-----------|----------|
//! | 0 | LSL | left | outer tangent | left |
//! | 1 | LSR | left | inner tangent | right |
//! | 2 | LRL | left | right arc | left |
//! | 3 | RSL | right | inner tangent | left |
//! | 4 | RSR | right | outer tangent | right |
//! | 5 | RLR | right | left arc | right |
//! | 6 | rRSL | right, backward | inner tangent | left |
//! | 7 | rRSR | right, backward | outer tangent | right |
//! | 8 | rLSL | left, backward | outer tangent | left |
//! | 9 | rLSR | left, backward | inner tangent | right |
//!
//! A backward first arc travels the complement `2π - θ` of the forward
//! sweep `θ` and reaches the same tangent point.
//!
//! The order of [`ManeuverFamily::ALL`] is the tie-breaking order of the
//! pairwise solver.

use std::f64::consts::{FRAC_PI_2, TAU};

use arena_geom::{
    ANGLE_EPSILON, Circle, Hand, angle_between, connecting_circle, inner_tangent, outer_tangent, rotate_vector,
};
use nalgebra::{Point2, Vector2};
use planner_types::{Direction, Facing, Movement, Pose};

/// Straight runs shorter than this are dropped.
const SEGMENT_EPSILON: f64 = 1e-9;

/// One of the ten hand-enumerated maneuver shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManeuverFamily {
    /// Left, straight, left.
    Lsl,
    /// Left, straight, right.
    Lsr,
    /// Left, right, left.
    Lrl,
    /// Right, straight, left.
    Rsl,
    /// Right, straight, right.
    Rsr,
    /// Right, left, right.
    Rlr,
    /// Backward right, straight, left.
    ReverseRsl,
    /// Backward right, straight, right.
    ReverseRsr,
    /// Backward left, straight, left.
    ReverseLsl,
    /// Backward left, straight, right.
    ReverseLsr,
}

/// How the first and last arcs are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connector {
    Tangent,
    Arc,
}

impl ManeuverFamily {
    /// All families in canonical order.
    pub const ALL: [Self; 10] = [
        Self::Lsl,
        Self::Lsr,
        Self::Lrl,
        Self::Rsl,
        Self::Rsr,
        Self::Rlr,
        Self::ReverseRsl,
        Self::ReverseRsr,
        Self::ReverseLsl,
        Self::ReverseLsr,
    ];

    /// Position in [`ManeuverFamily::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Lsl => 0,
            Self::Lsr => 1,
            Self::Lrl => 2,
            Self::Rsl => 3,
            Self::Rsr => 4,
            Self::Rlr => 5,
            Self::ReverseRsl => 6,
            Self::ReverseRsr => 7,
            Self::ReverseLsl => 8,
            Self::ReverseLsr => 9,
        }
    }

    /// First hand, last hand, connector, and whether the first arc is backward.
    const fn shape(self) -> (Hand, Hand, Connector, bool) {
        use Connector::{Arc, Tangent};
        use Hand::{Left, Right};
        match self {
            Self::Lsl => (Left, Left, Tangent, false),
            Self::Lsr => (Left, Right, Tangent, false),
            Self::Lrl => (Left, Left, Arc, false),
            Self::Rsl => (Right, Left, Tangent, false),
            Self::Rsr => (Right, Right, Tangent, false),
            Self::Rlr => (Right, Right, Arc, false),
            Self::ReverseRsl => (Right, Left, Tangent, true),
            Self::ReverseRsr => (Right, Right, Tangent, true),
            Self::ReverseLsl => (Left, Left, Tangent, true),
            Self::ReverseLsr => (Left, Right, Tangent, true),
        }
    }

    /// The three segment directions of this family.
    ///
    /// # Example
    ///
    /// ```
    /// use planner_pathfind::ManeuverFamily;
    /// use planner_types::Direction;
    ///
    /// assert_eq!(
    ///     ManeuverFamily::ReverseRsl.directions(),
    ///     [Direction::ReverseRight, Direction::Straight, Direction::Left],
    /// );
    /// assert_eq!(
    ///     ManeuverFamily::Lrl.directions(),
    ///     [Direction::Left, Direction::Right, Direction::Left],
    /// );
    /// ```
    #[must_use]
    pub const fn directions(self) -> [Direction; 3] {
        let (first, last, connector, reverse) = self.shape();
        let first = match (first, reverse) {
            (Hand::Left, false) => Direction::Left,
            (Hand::Right, false) => Direction::Right,
            (Hand::Left, true) => Direction::ReverseLeft,
            (Hand::Right, true) => Direction::ReverseRight,
        };
        let middle = match (connector, last) {
            (Connector::Tangent, _) => Direction::Straight,
            (Connector::Arc, Hand::Left) => Direction::Right,
            (Connector::Arc, Hand::Right) => Direction::Left,
        };
        let last = match last {
            Hand::Left => Direction::Left,
            Hand::Right => Direction::Right,
        };
        [first, middle, last]
    }

    /// Short name such as `"LSR"` or `"rRSL"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lsl => "LSL",
            Self::Lsr => "LSR",
            Self::Lrl => "LRL",
            Self::Rsl => "RSL",
            Self::Rsr => "RSR",
            Self::Rlr => "RLR",
            Self::ReverseRsl => "rRSL",
            Self::ReverseRsr => "rRSR",
            Self::ReverseLsl => "rLSL",
            Self::ReverseLsr => "rLSR",
        }
    }

    /// Builds the maneuver from `src` to `dest` with turning radius `radius`.
    ///
    /// Returns `None` when the family is geometrically infeasible for this
    /// pair (coincident circles, or separation outside the family's window).
    /// Zero-length segments are omitted.
    #[must_use]
    pub fn construct(self, src: &Pose, dest: &Pose, radius: f64) -> Option<Vec<Movement>> {
        let (first, last, connector, reverse) = self.shape();
        let c1 = Circle::turning(&src.position, &src.heading(), radius, first);
        let c2 = Circle::turning(&dest.position, &dest.heading(), radius, last);

        let first_direction = self.directions()[0];
        let mut builder = SegmentBuilder::new(src.clone(), radius);

        match connector {
            Connector::Tangent => {
                let tangent = if first == last {
                    outer_tangent(&c1, &c2, first)
                } else {
                    inner_tangent(&c1, &c2, first)
                }
                .ok()?;

                let forward = sweep(first, &c1.radial(&src.position), &tangent.normal);
                let a1 = if reverse { TAU - forward } else { forward };
                builder.arc(&c1, first, tangent.start, a1, first_direction);
                builder.straight(tangent.start, tangent.end);

                let a2 = sweep(last, &c2.radial(&tangent.end), &c2.radial(&dest.position));
                builder.arc(&c2, last, dest.position, a2, Direction::from(last));
            }
            Connector::Arc => {
                let connecting = connecting_circle(&c1, &c2, first).ok()?;
                let middle = first.opposite();

                let a1 = sweep(first, &c1.radial(&src.position), &connecting.first_normal);
                builder.arc(&c1, first, connecting.first_contact(), a1, first_direction);

                let a3 = sweep(middle, &-connecting.first_normal, &-connecting.second_normal);
                builder.arc(
                    &connecting.circle,
                    middle,
                    connecting.second_contact(),
                    a3,
                    Direction::from(middle),
                );

                let a2 = sweep(last, &connecting.second_normal, &c2.radial(&dest.position));
                builder.arc(&c2, last, dest.position, a2, Direction::from(last));
            }
        }

        builder.finish(dest)
    }
}

/// Angle swept turning with `hand` from radial `from` to radial `to`.
fn sweep(hand: Hand, from: &Vector2<f64>, to: &Vector2<f64>) -> f64 {
    match hand {
        Hand::Left => angle_between(from, to),
        Hand::Right => angle_between(to, from),
    }
}

/// Heading of a vehicle on `circle` at `point` while turning with `hand`.
fn heading_on(circle: &Circle, hand: Hand, point: &Point2<f64>) -> Vector2<f64> {
    rotate_vector(&circle.radial(point), hand.sign() * FRAC_PI_2)
}

/// Accumulates segments, dropping zero-length ones.
struct SegmentBuilder {
    current: Pose,
    radius: f64,
    movements: Vec<Movement>,
    valid: bool,
}

impl SegmentBuilder {
    fn new(start: Pose, radius: f64) -> Self {
        Self {
            current: start,
            radius,
            movements: Vec::with_capacity(3),
            valid: true,
        }
    }

    fn arc(&mut self, circle: &Circle, hand: Hand, end: Point2<f64>, angle: f64, direction: Direction) {
        if !angle.is_finite() {
            self.valid = false;
            return;
        }
        if angle < ANGLE_EPSILON {
            return;
        }
        let facing = Facing::nearest(&heading_on(circle, hand, &end));
        let end_pose = Pose::at(end, facing);
        self.movements.push(Movement::arc(
            self.current.clone(),
            end_pose.clone(),
            circle.center,
            self.radius,
            angle,
            direction,
        ));
        self.current = end_pose;
    }

    fn straight(&mut self, start: Point2<f64>, end: Point2<f64>) {
        let run = end - start;
        if !run.norm().is_finite() {
            self.valid = false;
            return;
        }
        if run.norm() < SEGMENT_EPSILON {
            return;
        }
        let end_pose = Pose::at(end, Facing::nearest(&run));
        self.movements.push(Movement::straight(self.current.clone(), end_pose.clone(), false));
        self.current = end_pose;
    }

    /// The last segment ends on the destination pose itself.
    fn finish(mut self, dest: &Pose) -> Option<Vec<Movement>> {
        if !self.valid {
            return None;
        }
        if let Some(last) = self.movements.last_mut() {
            last.end = dest.clone();
        }
        Some(self.movements)
    }
}
