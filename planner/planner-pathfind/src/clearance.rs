//! Clearance validation for movement sequences.
//!
//! Straight runs are measured against the arena edges and obstacle centers.
//! Arcs are measured by their turning center: an obstacle inside the swept
//! sector must be far enough from the center, and (optionally) the center
//! must be far enough from every edge.
//!
//! Movements that begin at the start pose are exempt, since the start box
//! sits against the arena wall.
//!
//! # Example
//!
//! ```
//! use planner_pathfind::clearance::ClearanceChecker;
//! use planner_types::{ArenaConfig, Facing, Movement, Pose, SafetyMargins};
//! use nalgebra::Point2;
//!
//! let arena = ArenaConfig::default();
//! let checker = ClearanceChecker::new(
//!     vec![Point2::new(105.0, 105.0)],
//!     arena.boundary_edges(),
//!     SafetyMargins::default(),
//! );
//!
//! // Passes 5 cm from the obstacle center
//! let close = Movement::straight(
//!     Pose::new(100.0, 40.0, Facing::North),
//!     Pose::new(100.0, 160.0, Facing::North),
//!     false,
//! );
//! assert!(!checker.is_safe(&[close]));
//! ```

use std::f64::consts::TAU;

use arena_geom::{
    closest_point_on_segment, normalize_angle, point_to_segment_distance, segment_segment_distance,
    vector_properties,
};
use nalgebra::Point2;
use planner_arena::Arena;
use planner_types::{Direction, Movement, Pose, SafetyMargins};

/// Validator that accepts or rejects movement sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct ClearanceChecker {
    /// Obstacle centers in centimeters.
    obstacles: Vec<Point2<f64>>,
    /// Arena boundary segments.
    edges: [(Point2<f64>, Point2<f64>); 4],
    /// Active thresholds.
    margins: SafetyMargins,
    /// Movements starting here skip all checks.
    exempt_start: Option<Point2<f64>>,
}

impl ClearanceChecker {
    /// Creates a checker with no exempt start.
    #[must_use]
    pub const fn new(
        obstacles: Vec<Point2<f64>>,
        edges: [(Point2<f64>, Point2<f64>); 4],
        margins: SafetyMargins,
    ) -> Self {
        Self {
            obstacles,
            edges,
            margins,
            exempt_start: None,
        }
    }

    /// Creates a checker for an arena, exempting its start pose.
    #[must_use]
    pub fn for_arena(arena: &Arena, margins: SafetyMargins) -> Self {
        let config = arena.config();
        Self::new(arena.obstacle_centers(), config.boundary_edges(), margins)
            .with_exempt_start(config.start_pose().position)
    }

    /// Exempts movements starting at `position`.
    #[must_use]
    pub const fn with_exempt_start(mut self, position: Point2<f64>) -> Self {
        self.exempt_start = Some(position);
        self
    }

    /// Returns the active margins.
    #[must_use]
    pub const fn margins(&self) -> &SafetyMargins {
        &self.margins
    }

    /// Returns the obstacle centers.
    #[must_use]
    pub fn obstacles(&self) -> &[Point2<f64>] {
        &self.obstacles
    }

    /// Returns `true` if every movement keeps its clearances.
    ///
    /// An empty sequence is unsafe. Never panics: an arc without a center or
    /// any non-finite value makes the sequence unsafe.
    #[must_use]
    pub fn is_safe(&self, movements: &[Movement]) -> bool {
        !movements.is_empty() && movements.iter().all(|m| self.movement_is_safe(m))
    }

    /// Checks a single movement.
    #[must_use]
    pub fn movement_is_safe(&self, movement: &Movement) -> bool {
        if !is_finite_movement(movement) {
            return false;
        }
        if self.is_exempt(&movement.start) {
            return true;
        }
        if movement.is_straight() {
            self.straight_is_safe(&movement.start.position, &movement.end.position)
        } else {
            self.arc_is_safe(movement)
        }
    }

    fn is_exempt(&self, start: &Pose) -> bool {
        self.exempt_start
            .is_some_and(|p| (start.position - p).norm() < planner_types::POSITION_EPSILON)
    }

    fn straight_is_safe(&self, a: &Point2<f64>, b: &Point2<f64>) -> bool {
        let edges_clear = self
            .edges
            .iter()
            .all(|(e1, e2)| segment_segment_distance(a, b, e1, e2) >= self.margins.edge());
        edges_clear
            && self
                .obstacles
                .iter()
                .all(|o| point_to_segment_distance(a, b, o) >= self.margins.obstacle())
    }

    fn arc_is_safe(&self, movement: &Movement) -> bool {
        let Some(center) = movement.circle_center else {
            return false;
        };
        let (_, start_angle) = vector_properties(&(movement.start.position - center));
        let sweep = movement.turn_angle.abs();
        let counter_clockwise = match movement.direction {
            Direction::Left => movement.distance > 0.0,
            Direction::Right => movement.distance <= 0.0,
            _ => return false,
        };

        let obstacles_clear = self.obstacles.iter().all(|o| {
            let (radius, angle) = vector_properties(&(o - center));
            !(sweep_contains(
                start_angle,
                sweep,
                counter_clockwise,
                self.margins.angle_supplement(),
                angle,
            ) && radius < self.margins.turning_obstacle())
        });
        if !obstacles_clear {
            return false;
        }

        !self.margins.check_edge()
            || self.edges.iter().all(|(e1, e2)| {
                (center - closest_point_on_segment(e1, e2, &center)).norm() >= self.margins.turning_edge()
            })
    }
}

/// Returns `true` if `angle` lies in the sector swept from `start` through
/// `sweep` radians, widened by `supplement` on both ends.
///
/// Counter-clockwise sweeps cover `[start - s, start + sweep + s]`;
/// clockwise sweeps cover `[start - sweep - s, start + s]`, all modulo 2π.
///
/// # Example
///
/// ```
/// use planner_pathfind::clearance::sweep_contains;
/// use std::f64::consts::{FRAC_PI_2, PI};
///
/// // Quarter turn counter-clockwise from east reaches north
/// assert!(sweep_contains(0.0, FRAC_PI_2, true, 0.0, PI / 4.0));
/// assert!(!sweep_contains(0.0, FRAC_PI_2, true, 0.0, PI));
///
/// // The same quarter turn clockwise covers the south-east sector instead
/// assert!(sweep_contains(0.0, FRAC_PI_2, false, 0.0, 1.75 * PI));
/// ```
#[must_use]
pub fn sweep_contains(start: f64, sweep: f64, counter_clockwise: bool, supplement: f64, angle: f64) -> bool {
    let span = sweep + 2.0 * supplement;
    if span >= TAU {
        return true;
    }
    let offset = if counter_clockwise {
        normalize_angle(angle - (start - supplement))
    } else {
        normalize_angle((start + supplement) - angle)
    };
    offset <= span
}

fn is_finite_movement(m: &Movement) -> bool {
    m.distance.is_finite()
        && m.turn_angle.is_finite()
        && m.start.position.iter().all(|v| v.is_finite())
        && m.end.position.iter().all(|v| v.is_finite())
        && m.circle_center.is_none_or(|c| c.iter().all(|v| v.is_finite()))
}
