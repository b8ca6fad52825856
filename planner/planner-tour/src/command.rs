//! Drive-command encoding.
//!
//! Every movement becomes a five-character token: a steering letter
//! (`S`, `L`, `R`), `F` or `B` for forward or backward, and a three-digit
//! magnitude. Straights carry centimeters and arcs carry degrees, both
//! truncated toward zero and capped at 999.
//!
//! | Movement | Token |
//! |----------|-------|
//! | 62 cm left arc at r = 31 | `LF114` |
//! | 15 cm straight backward | `SB015` |
//! | 90° right arc | `RF090` |
//!
//! A scan marker follows every leg.

use planner_types::{CommandFormat, Direction, Movement, TourLeg};
use serde_json::json;

/// Marker emitted after each leg to request an image scan.
pub const SCAN_MARKER: &str = "--scan image--";

/// Token emitted for movements that start at the reset sentinel.
pub const RESET_COMMAND: &str = "G";

/// Tag prefix announcing the destination of a leg in annotated output.
pub const MOVING_TAG: &str = "MOVING_TO:";

const MAX_MAGNITUDE: f64 = 999.0;

/// Absorbs float noise just below a whole unit before truncation.
const TRUNCATION_SLACK: f64 = 1e-9;

/// Converts movements and legs into command strings.
///
/// # Example
///
/// ```
/// use planner_tour::CommandEncoder;
/// use planner_types::{Direction, Facing, Movement, Pose};
/// use nalgebra::Point2;
///
/// let encoder = CommandEncoder::new(31.0);
/// let turn = Movement::arc(
///     Pose::new(100.0, 100.0, Facing::North),
///     Pose::new(69.0, 131.0, Facing::West),
///     Point2::new(69.0, 100.0),
///     31.0,
///     2.0,
///     Direction::Left,
/// );
/// assert_eq!(encoder.encode(&turn).as_deref(), Some("LF114"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandEncoder {
    turning_radius: f64,
    reset_sentinel_x: f64,
    format: CommandFormat,
}

impl CommandEncoder {
    /// Creates a token encoder for the given turning radius.
    #[must_use]
    pub const fn new(turning_radius: f64) -> Self {
        Self {
            turning_radius,
            reset_sentinel_x: -1.0,
            format: CommandFormat::Tokens,
        }
    }

    /// Sets the x coordinate that marks a reset pose.
    #[must_use]
    pub const fn with_reset_sentinel(mut self, x: f64) -> Self {
        self.reset_sentinel_x = x;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub const fn with_format(mut self, format: CommandFormat) -> Self {
        self.format = format;
        self
    }

    /// Returns the output format.
    #[must_use]
    pub const fn format(&self) -> CommandFormat {
        self.format
    }

    /// Encodes one movement, or `None` for a zero-length movement.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn encode(&self, movement: &Movement) -> Option<String> {
        if movement.distance == 0.0 {
            return None;
        }
        if movement.start.x() == self.reset_sentinel_x {
            return Some(RESET_COMMAND.to_string());
        }

        let length = movement.distance.abs();
        let magnitude = match movement.direction {
            Direction::Straight => length,
            _ => (length / self.turning_radius).to_degrees(),
        };
        let gear = if movement.distance < 0.0 { 'B' } else { 'F' };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let digits = (magnitude + TRUNCATION_SLACK).trunc().clamp(0.0, MAX_MAGNITUDE) as u32;
        Some(format!("{}{gear}{digits:03}", movement.direction.letter()))
    }

    /// Encodes every leg in order, each followed by the scan marker.
    #[must_use]
    pub fn encode_legs(&self, legs: &[TourLeg]) -> Vec<String> {
        let mut commands = Vec::new();
        for leg in legs {
            match self.format {
                CommandFormat::Tokens => {
                    commands.extend(leg.path.movements().iter().filter_map(|m| self.encode(m)));
                }
                CommandFormat::Annotated => {
                    let target = leg.goal_id.map_or_else(|| leg.to.to_string(), |id| id.to_string());
                    commands.push(format!("{MOVING_TAG}{target}"));
                    commands.extend(
                        leg.path
                            .movements()
                            .iter()
                            .filter_map(|m| self.encode(m).map(|token| annotate(m, token))),
                    );
                }
            }
            commands.push(SCAN_MARKER.to_string());
        }
        commands
    }
}

/// Wraps a token with the pose the car reaches after the movement.
fn annotate(movement: &Movement, command: String) -> String {
    json!({
        "car_position": {
            "x": movement.end.x(),
            "y": movement.end.y(),
            "dir": movement.end.facing.letter().to_string(),
        },
        "command": command,
    })
    .to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use nalgebra::Point2;
    use planner_types::{CandidatePath, Facing, Pose};
    use std::f64::consts::FRAC_PI_2;

    fn pose(x: f64, y: f64, facing: Facing) -> Pose {
        Pose::new(x, y, facing)
    }

    fn right_quarter() -> Movement {
        Movement::arc(
            pose(100.0, 100.0, Facing::North),
            pose(131.0, 131.0, Facing::East),
            Point2::new(131.0, 100.0),
            31.0,
            FRAC_PI_2,
            Direction::Right,
        )
    }

    #[test]
    fn test_left_arc_token() {
        let m = Movement::arc(
            pose(100.0, 100.0, Facing::North),
            pose(69.0, 131.0, Facing::West),
            Point2::new(69.0, 100.0),
            31.0,
            2.0,
            Direction::Left,
        );
        assert_eq!(m.distance, 62.0);
        assert_eq!(CommandEncoder::new(31.0).encode(&m).unwrap(), "LF114");
    }

    #[test]
    fn test_reverse_straight_token() {
        let m = Movement::straight(pose(100.0, 100.0, Facing::North), pose(100.0, 85.0, Facing::North), true);
        assert_eq!(CommandEncoder::new(31.0).encode(&m).unwrap(), "SB015");
    }

    #[test]
    fn test_quarter_turn_token() {
        assert_eq!(CommandEncoder::new(31.0).encode(&right_quarter()).unwrap(), "RF090");
    }

    #[test]
    fn test_reverse_arc_token() {
        let m = Movement::arc(
            pose(100.0, 100.0, Facing::North),
            pose(131.0, 69.0, Facing::West),
            Point2::new(131.0, 100.0),
            31.0,
            FRAC_PI_2,
            Direction::ReverseRight,
        );
        assert_eq!(CommandEncoder::new(31.0).encode(&m).unwrap(), "RB090");
    }

    #[test]
    fn test_zero_distance_dropped() {
        let still = Movement::straight(pose(50.0, 50.0, Facing::East), pose(50.0, 50.0, Facing::East), false);
        assert!(CommandEncoder::new(31.0).encode(&still).is_none());
    }

    #[test]
    fn test_reset_sentinel() {
        let m = Movement::straight(pose(-1.0, 5.0, Facing::North), pose(-1.0, 20.0, Facing::North), false);
        assert_eq!(CommandEncoder::new(31.0).encode(&m).unwrap(), "G");
        let moved = CommandEncoder::new(31.0).with_reset_sentinel(-50.0);
        assert_eq!(moved.encode(&m).unwrap(), "SF015");
    }

    #[test]
    fn test_magnitude_clamped() {
        let long = Movement::straight(pose(0.0, 0.0, Facing::East), pose(1500.0, 0.0, Facing::East), false);
        assert_eq!(CommandEncoder::new(31.0).encode(&long).unwrap(), "SF999");
    }

    #[test]
    fn test_tokens_match_format() {
        let encoder = CommandEncoder::new(31.0);
        let moves = [
            right_quarter(),
            Movement::straight(pose(0.0, 0.0, Facing::East), pose(7.9, 0.0, Facing::East), false),
        ];
        for m in &moves {
            let token = encoder.encode(m).unwrap();
            assert_eq!(token.len(), 5);
            assert!(matches!(token.as_bytes()[0], b'S' | b'L' | b'R'));
            assert!(matches!(token.as_bytes()[1], b'F' | b'B'));
            assert!(token[2..].bytes().all(|b| b.is_ascii_digit()));
        }
        assert_eq!(encoder.encode(&moves[1]).unwrap(), "SF007");
    }

    #[test]
    fn test_legs_end_with_scan_marker() {
        let legs = vec![
            TourLeg {
                from: 2,
                to: 0,
                goal_id: Some(7),
                path: CandidatePath::new(vec![right_quarter()]),
            },
            TourLeg {
                from: 0,
                to: 1,
                goal_id: Some(3),
                path: CandidatePath::stationary(),
            },
        ];
        let tokens = CommandEncoder::new(31.0).encode_legs(&legs);
        assert_eq!(tokens, vec!["RF090", SCAN_MARKER, SCAN_MARKER]);
    }

    #[test]
    fn test_annotated_output() {
        let legs = vec![TourLeg {
            from: 1,
            to: 0,
            goal_id: Some(7),
            path: CandidatePath::new(vec![right_quarter()]),
        }];
        let lines = CommandEncoder::new(31.0)
            .with_format(CommandFormat::Annotated)
            .encode_legs(&legs);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "MOVING_TO:7");
        assert_eq!(lines[2], SCAN_MARKER);

        let record: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(record["command"], "RF090");
        assert_eq!(record["car_position"]["dir"], "E");
        assert_eq!(record["car_position"]["x"], 131.0);
        assert_eq!(record.as_object().map(serde_json::Map::len), Some(2));
        assert_eq!(record["car_position"].as_object().map(serde_json::Map::len), Some(3));
    }
}
