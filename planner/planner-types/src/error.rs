//! Error types for planning operations.
//!
//! This module defines the [`PlannerError`] enum. Geometric infeasibility of
//! a single maneuver and unreachable goal pairs are *not* errors: they are
//! carried as infinite costs and never cross a crate boundary.

use std::time::Duration;

/// Errors that can occur while building an arena or solving a tour.
///
/// # Example
///
/// ```
/// use planner_types::PlannerError;
///
/// let error = PlannerError::Unsolvable { attempts: 4 };
/// assert!(error.to_string().contains("no solution"));
/// assert!(error.is_unsolvable());
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum PlannerError {
    /// The obstacle list or map string could not be parsed.
    #[error("malformed map input: {0}")]
    MalformedMap(String),

    /// An obstacle lies outside the grid.
    #[error("obstacle {id} at ({x}, {y}) is outside the arena")]
    ObstacleOutOfBounds {
        /// Obstacle id.
        id: u32,
        /// Grid column.
        x: i32,
        /// Grid row.
        y: i32,
    },

    /// The landing cell of an obstacle would lie outside the grid.
    #[error("landing cell ({x}, {y}) of obstacle {id} is outside the arena")]
    LandingOutOfBounds {
        /// Obstacle id.
        id: u32,
        /// Grid column of the landing cell.
        x: i32,
        /// Grid row of the landing cell.
        y: i32,
    },

    /// Two obstacles were placed in the same cell.
    #[error("cell ({x}, {y}) already holds an obstacle")]
    CellOccupied {
        /// Grid column.
        x: i32,
        /// Grid row.
        y: i32,
    },

    /// The random generator could not place every requested obstacle.
    #[error("placed {placed} of {requested} obstacles before giving up")]
    GeneratorExhausted {
        /// Obstacles successfully placed.
        placed: usize,
        /// Obstacles requested.
        requested: usize,
    },

    /// Every visiting order contains an unreachable leg.
    ///
    /// The degradation ladder reacts to this error by relaxing a margin.
    #[error("no feasible tour through all goals")]
    NoTourFound,

    /// All safety relaxations were exhausted without finding a tour.
    #[error("no solution possible after {attempts} attempts")]
    Unsolvable {
        /// Number of complete solve attempts made.
        attempts: usize,
    },

    /// The tour search ran past its deadline.
    #[error("tour search timed out after {0:?}")]
    Timeout(Duration),

    /// Too many goals for an exhaustive search.
    #[error("{count} goals exceeds the search ceiling of {max}")]
    TooManyGoals {
        /// Number of obstacle goals.
        count: usize,
        /// Configured ceiling.
        max: usize,
    },

    /// An invalid configuration parameter was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PlannerError {
    /// Creates a malformed map error with the given message.
    ///
    /// # Example
    ///
    /// ```
    /// use planner_types::PlannerError;
    ///
    /// let error = PlannerError::malformed_map("missing MAP= prefix");
    /// assert!(error.to_string().contains("MAP="));
    /// ```
    #[must_use]
    pub fn malformed_map(message: impl Into<String>) -> Self {
        Self::MalformedMap(message.into())
    }

    /// Creates an invalid configuration error with the given message.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Returns `true` if this is the terminal "no solution" error.
    #[must_use]
    pub const fn is_unsolvable(&self) -> bool {
        matches!(self, Self::Unsolvable { .. })
    }

    /// Returns `true` if the tour solver found no feasible order.
    #[must_use]
    pub const fn is_no_tour_found(&self) -> bool {
        matches!(self, Self::NoTourFound)
    }

    /// Returns `true` if relaxing safety margins might resolve this error.
    ///
    /// # Example
    ///
    /// ```
    /// use planner_types::PlannerError;
    /// use std::time::Duration;
    ///
    /// assert!(PlannerError::NoTourFound.is_relaxable());
    /// assert!(!PlannerError::Timeout(Duration::from_secs(1)).is_relaxable());
    /// ```
    #[must_use]
    pub const fn is_relaxable(&self) -> bool {
        self.is_no_tour_found()
    }

    /// Returns `true` if the error stems from bad input rather than search.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedMap(_)
                | Self::ObstacleOutOfBounds { .. }
                | Self::LandingOutOfBounds { .. }
                | Self::CellOccupied { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_display() {
        let msg = PlannerError::ObstacleOutOfBounds { id: 3, x: 20, y: 4 }.to_string();
        assert!(msg.contains("obstacle 3"));
        assert!(msg.contains("(20, 4)"));
    }

    #[test]
    fn test_landing_out_of_bounds_display() {
        let msg = PlannerError::LandingOutOfBounds { id: 1, x: -1, y: 5 }.to_string();
        assert!(msg.contains("landing cell"));
        assert!(msg.contains("(-1, 5)"));
    }

    #[test]
    fn test_too_many_goals_display() {
        let msg = PlannerError::TooManyGoals { count: 12, max: 10 }.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn test_predicates() {
        assert!(PlannerError::NoTourFound.is_no_tour_found());
        assert!(PlannerError::NoTourFound.is_relaxable());
        assert!(!PlannerError::Unsolvable { attempts: 1 }.is_relaxable());
        assert!(PlannerError::malformed_map("x").is_input_error());
        assert!(PlannerError::CellOccupied { x: 1, y: 1 }.is_input_error());
        assert!(!PlannerError::NoTourFound.is_input_error());
    }

    #[test]
    fn test_invalid_config_helper() {
        let error = PlannerError::invalid_config("turning radius must be positive");
        assert!(matches!(error, PlannerError::InvalidConfig(_)));
        assert!(error.to_string().contains("turning radius"));
    }
}
