//! Initial repositioning moves.
//!
//! Before a maneuver the vehicle may back up to gain room: straight back by
//! a fixed distance, or a quarter turn backward on either turning circle.
//! Only the start pose skips repositioning.

use std::f64::consts::FRAC_PI_2;

use arena_geom::{Circle, Hand};
use planner_types::{Direction, Movement, Pose, VehicleConfig};

/// A repositioning variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reposition {
    /// Stay in place.
    Stand,
    /// Back up in a straight line.
    ReverseStraight,
    /// Back up a quarter turn on the given turning circle.
    ReverseTurn(Hand),
}

impl Reposition {
    /// Variants tried from an ordinary goal, in priority order.
    pub const FROM_GOAL: [Self; 3] = [
        Self::ReverseStraight,
        Self::ReverseTurn(Hand::Right),
        Self::ReverseTurn(Hand::Left),
    ];

    /// Variants tried from the start pose.
    pub const FROM_START: [Self; 1] = [Self::Stand];

    /// Applies the variant to `src`, returning the move (if any) and the
    /// pose the maneuver starts from.
    ///
    /// Backing a quarter turn on the right circle swings the nose to the
    /// left: the new facing is a quarter turn counter-clockwise. The left
    /// circle mirrors this.
    ///
    /// # Example
    ///
    /// ```
    /// use planner_pathfind::reposition::Reposition;
    /// use planner_types::{Facing, Pose, VehicleConfig};
    /// use arena_geom::Hand;
    ///
    /// let src = Pose::new(100.0, 100.0, Facing::North);
    /// let (movement, pose) = Reposition::ReverseTurn(Hand::Right).apply(&src, &VehicleConfig::default());
    ///
    /// assert_eq!(pose.facing, Facing::West);
    /// assert!((pose.x() - 131.0).abs() < 1e-9);
    /// assert!((pose.y() - 69.0).abs() < 1e-9);
    /// assert!(movement.unwrap().distance < 0.0);
    /// ```
    #[must_use]
    pub fn apply(self, src: &Pose, vehicle: &VehicleConfig) -> (Option<Movement>, Pose) {
        let heading = src.heading();
        match self {
            Self::Stand => (None, src.clone()),
            Self::ReverseStraight => {
                let end = Pose::at(src.position - heading * vehicle.reverse_distance(), src.facing);
                (Some(Movement::straight(src.clone(), end.clone(), true)), end)
            }
            Self::ReverseTurn(hand) => {
                let radius = vehicle.turning_radius();
                let circle = Circle::turning(&src.position, &heading, radius, hand);
                let facing = match hand {
                    Hand::Right => src.facing.rotated_ccw(),
                    Hand::Left => src.facing.rotated_cw(),
                };
                let end = Pose::at(circle.center - heading * radius, facing);
                let direction = match hand {
                    Hand::Right => Direction::ReverseRight,
                    Hand::Left => Direction::ReverseLeft,
                };
                let movement = Movement::arc(src.clone(), end.clone(), circle.center, radius, FRAC_PI_2, direction);
                (Some(movement), end)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use planner_types::Facing;

    #[test]
    fn test_stand_is_identity() {
        let src = Pose::new(15.0, 5.0, Facing::North);
        let (movement, pose) = Reposition::Stand.apply(&src, &VehicleConfig::default());
        assert!(movement.is_none());
        assert_eq!(pose, src);
    }

    #[test]
    fn test_reverse_straight() {
        let src = Pose::new(85.0, 55.0, Facing::West);
        let (movement, pose) = Reposition::ReverseStraight.apply(&src, &VehicleConfig::default());
        let movement = movement.unwrap();
        assert_relative_eq!(pose.x(), 100.0);
        assert_eq!(pose.facing, Facing::West);
        assert_relative_eq!(movement.distance, -15.0);
        assert!(movement.is_straight());
    }

    #[test]
    fn test_reverse_left_turn() {
        let src = Pose::new(100.0, 100.0, Facing::North);
        let (movement, pose) = Reposition::ReverseTurn(Hand::Left).apply(&src, &VehicleConfig::default());
        let movement = movement.unwrap();
        assert_eq!(pose.facing, Facing::East);
        assert_relative_eq!(pose.x(), 69.0, epsilon = 1e-9);
        assert_relative_eq!(pose.y(), 69.0, epsilon = 1e-9);
        assert_eq!(movement.direction, Direction::Left);
        assert_relative_eq!(movement.distance, -31.0 * FRAC_PI_2);
        assert_relative_eq!(movement.turn_angle, FRAC_PI_2);
    }

    #[test]
    fn test_reverse_turn_east_facing() {
        let src = Pose::new(100.0, 100.0, Facing::East);
        let (_, pose) = Reposition::ReverseTurn(Hand::Right).apply(&src, &VehicleConfig::default());
        // Right circle of an east-facing pose is south of it
        assert_eq!(pose.facing, Facing::North);
        assert_relative_eq!(pose.x(), 69.0, epsilon = 1e-9);
        assert_relative_eq!(pose.y(), 69.0, epsilon = 1e-9);
    }
}
