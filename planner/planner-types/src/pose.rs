//! Poses, facings and cell kinds.
//!
//! A [`Pose`] is used in two coordinate spaces:
//!
//! - **Grid space** inside the arena, where `position` holds integral cell
//!   indices.
//! - **Continuous space** (centimeters) inside the path solver, where a
//!   goal pose sits at a landing cell's center shifted by the landing
//!   supplement.
//!
//! The facing is always one of the four cardinal directions.

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use arena_geom::vector_properties;
use nalgebra::{Point2, Vector2};

/// Tolerance for comparing positions in centimeters.
pub const POSITION_EPSILON: f64 = 1e-6;

/// One of the four cardinal directions.
///
/// North is `+y`, east is `+x`.
///
/// # Example
///
/// ```
/// use planner_types::Facing;
///
/// assert_eq!(Facing::North.opposite(), Facing::South);
/// assert_eq!(Facing::North.rotated_ccw(), Facing::West);
/// assert_eq!(Facing::from_map_code(2), Some(Facing::East));
/// assert_eq!(Facing::West.grid_offset(), (-1, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    /// `+y`.
    #[default]
    North,
    /// `+x`.
    East,
    /// `-y`.
    South,
    /// `-x`.
    West,
}

impl Facing {
    /// All facings in clockwise order from north.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// The opposite facing.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// The facing a quarter turn counter-clockwise.
    #[must_use]
    pub const fn rotated_ccw(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// The facing a quarter turn clockwise.
    #[must_use]
    pub const fn rotated_cw(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// One-cell step in grid coordinates.
    #[must_use]
    pub const fn grid_offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }

    /// Unit heading vector.
    #[must_use]
    pub fn unit_vector(self) -> Vector2<f64> {
        let (dx, dy) = self.grid_offset();
        Vector2::new(f64::from(dx), f64::from(dy))
    }

    /// The cardinal facing closest to an arbitrary heading vector.
    ///
    /// # Example
    ///
    /// ```
    /// use planner_types::Facing;
    /// use nalgebra::Vector2;
    ///
    /// assert_eq!(Facing::nearest(&Vector2::new(0.2, 0.9)), Facing::North);
    /// assert_eq!(Facing::nearest(&Vector2::new(-1.0, -0.1)), Facing::West);
    /// ```
    #[must_use]
    pub fn nearest(heading: &Vector2<f64>) -> Self {
        let (_, angle) = vector_properties(heading);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let quadrant = (angle / FRAC_PI_2).round() as u32 % 4;
        match quadrant {
            0 => Self::East,
            1 => Self::North,
            2 => Self::West,
            _ => Self::South,
        }
    }

    /// Decodes the numeric facing used in `MAP=` strings.
    ///
    /// `0` north, `1` south, `2` east, `3` west.
    #[must_use]
    pub const fn from_map_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::North),
            1 => Some(Self::South),
            2 => Some(Self::East),
            3 => Some(Self::West),
            _ => None,
        }
    }

    /// Encodes this facing as a `MAP=` string code.
    #[must_use]
    pub const fn map_code(self) -> u8 {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }

    /// Single-letter form (`N`, `E`, `S`, `W`).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Parses the single-letter form, case-insensitively.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'W' => Some(Self::West),
            _ => None,
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// What occupies an arena cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// Free space.
    #[default]
    Empty,
    /// An obstacle with an image on its facing side.
    Obstacle,
    /// The cell the vehicle parks in to view an obstacle.
    Landing,
    /// The corridor cell between an obstacle and its landing cell.
    LandingPadding,
}

/// A position with a cardinal facing and optional cell metadata.
///
/// # Example
///
/// ```
/// use planner_types::{Pose, Facing, CellKind};
///
/// let goal = Pose::new(105.0, 125.0, Facing::South)
///     .with_kind(CellKind::Landing)
///     .with_id(7);
///
/// assert_eq!(goal.id, Some(7));
/// assert!(goal.same_position(&Pose::new(105.0, 125.0, Facing::East)));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    /// Position (grid indices or centimeters depending on context).
    pub position: Point2<f64>,
    /// Cardinal facing.
    pub facing: Facing,
    /// Cell kind.
    pub kind: CellKind,
    /// Obstacle identity, if any.
    pub id: Option<u32>,
    /// Free-form label carried from obstacle to landing cell.
    pub annotation: Option<String>,
}

impl Pose {
    /// Creates an empty-kind pose.
    #[must_use]
    pub fn new(x: f64, y: f64, facing: Facing) -> Self {
        Self::at(Point2::new(x, y), facing)
    }

    /// Creates an empty-kind pose at a point.
    #[must_use]
    pub const fn at(position: Point2<f64>, facing: Facing) -> Self {
        Self {
            position,
            facing,
            kind: CellKind::Empty,
            id: None,
            annotation: None,
        }
    }

    /// Sets the cell kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: CellKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the obstacle id.
    #[must_use]
    pub const fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// X coordinate.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Y coordinate.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Unit heading vector of the facing.
    #[must_use]
    pub fn heading(&self) -> Vector2<f64> {
        self.facing.unit_vector()
    }

    /// Returns `true` if both poses occupy the same point within
    /// [`POSITION_EPSILON`], regardless of facing.
    #[must_use]
    pub fn same_position(&self, other: &Self) -> bool {
        (self.position - other.position).norm() < POSITION_EPSILON
    }

    /// Returns `true` if both poses share a point and a facing.
    #[must_use]
    pub fn same_pose(&self, other: &Self) -> bool {
        self.same_position(other) && self.facing == other.facing
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(Point2::origin(), Facing::North)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotations_are_inverse() {
        for facing in Facing::ALL {
            assert_eq!(facing.rotated_ccw().rotated_cw(), facing);
            assert_eq!(facing.rotated_ccw().rotated_ccw(), facing.opposite());
        }
    }

    #[test]
    fn test_map_codes_roundtrip() {
        for facing in Facing::ALL {
            assert_eq!(Facing::from_map_code(facing.map_code()), Some(facing));
        }
        assert_eq!(Facing::from_map_code(4), None);
    }

    #[test]
    fn test_map_code_values() {
        assert_eq!(Facing::South.map_code(), 1);
        assert_eq!(Facing::West.map_code(), 3);
    }

    #[test]
    fn test_letters() {
        assert_eq!(Facing::from_letter('w'), Some(Facing::West));
        assert_eq!(Facing::from_letter('X'), None);
        assert_eq!(Facing::East.to_string(), "E");
    }

    #[test]
    fn test_nearest_matches_unit_vectors() {
        for facing in Facing::ALL {
            assert_eq!(Facing::nearest(&facing.unit_vector()), facing);
        }
    }

    #[test]
    fn test_nearest_wraps_near_east() {
        assert_eq!(Facing::nearest(&Vector2::new(1.0, -0.01)), Facing::East);
    }

    #[test]
    fn test_same_pose_requires_facing() {
        let a = Pose::new(1.0, 2.0, Facing::North);
        let b = Pose::new(1.0 + 1e-9, 2.0, Facing::North);
        let c = Pose::new(1.0, 2.0, Facing::West);
        assert!(a.same_pose(&b));
        assert!(a.same_position(&c));
        assert!(!a.same_pose(&c));
    }

    #[test]
    fn test_default_pose_is_empty() {
        let pose = Pose::default();
        assert_eq!(pose.kind, CellKind::Empty);
        assert_eq!(pose.id, None);
    }
}
