//! The safety-margin relaxation ladder.
//!
//! When no tour exists, the planner loosens one margin at a time and tries
//! again. Steps are checked in a fixed order and the first one that applies
//! is taken:
//!
//! | Step | Condition | Action |
//! |------|-----------|--------|
//! | 1 | landing supplement ≥ 15 | × 0.75 |
//! | 2 | obstacle clearance ≥ 20 | × 0.75 |
//! | 3 | turning-edge clearance ≥ 30 | × 0.9 |
//! | 4 | turning-obstacle clearance ≥ 45 | × 0.9 |
//! | 5 | edge checking enabled | disable |
//! | - | otherwise | exhausted |
//!
//! The angular supplement and the straight-run edge clearance never change.

use std::fmt;

use crate::config::SafetyMargins;

const LANDING_FLOOR: f64 = 15.0;
const OBSTACLE_FLOOR: f64 = 20.0;
const TURNING_EDGE_FLOOR: f64 = 30.0;
const TURNING_OBSTACLE_FLOOR: f64 = 45.0;
const COARSE_FACTOR: f64 = 0.75;
const FINE_FACTOR: f64 = 0.9;

/// A single relaxation step, with the values before and after.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relaxation {
    /// Landing supplement scaled down.
    LandingSupplement {
        /// Previous value.
        from: f64,
        /// New value.
        to: f64,
    },
    /// Straight-run obstacle clearance scaled down.
    Obstacle {
        /// Previous value.
        from: f64,
        /// New value.
        to: f64,
    },
    /// Turning-center edge clearance scaled down.
    TurningEdge {
        /// Previous value.
        from: f64,
        /// New value.
        to: f64,
    },
    /// Turning-center obstacle clearance scaled down.
    TurningObstacle {
        /// Previous value.
        from: f64,
        /// New value.
        to: f64,
    },
    /// Turning-center edge checking switched off.
    DisableEdgeCheck,
}

impl Relaxation {
    /// Short name of the margin this step touches.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LandingSupplement { .. } => "landing_supplement",
            Self::Obstacle { .. } => "obstacle",
            Self::TurningEdge { .. } => "turning_edge",
            Self::TurningObstacle { .. } => "turning_obstacle",
            Self::DisableEdgeCheck => "check_edge",
        }
    }
}

impl fmt::Display for Relaxation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LandingSupplement { from, to }
            | Self::Obstacle { from, to }
            | Self::TurningEdge { from, to }
            | Self::TurningObstacle { from, to } => write!(f, "{} {from} -> {to}", self.name()),
            Self::DisableEdgeCheck => write!(f, "check_edge disabled"),
        }
    }
}

impl SafetyMargins {
    /// Takes the next step down the ladder.
    ///
    /// Returns the relaxed margins and the step taken, or `None` when every
    /// step is exhausted.
    ///
    /// # Example
    ///
    /// ```
    /// use planner_types::{Relaxation, SafetyMargins};
    ///
    /// let (relaxed, step) = SafetyMargins::default().relax().unwrap();
    /// assert!(matches!(step, Relaxation::TurningEdge { .. }));
    /// assert!((relaxed.turning_edge() - 27.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn relax(&self) -> Option<(Self, Relaxation)> {
        let margins = self.clone();
        if self.landing_supplement() >= LANDING_FLOOR {
            let to = self.landing_supplement() * COARSE_FACTOR;
            let from = self.landing_supplement();
            Some((margins.with_landing_supplement(to), Relaxation::LandingSupplement { from, to }))
        } else if self.obstacle() >= OBSTACLE_FLOOR {
            let to = self.obstacle() * COARSE_FACTOR;
            let from = self.obstacle();
            Some((margins.with_obstacle(to), Relaxation::Obstacle { from, to }))
        } else if self.turning_edge() >= TURNING_EDGE_FLOOR {
            let to = self.turning_edge() * FINE_FACTOR;
            let from = self.turning_edge();
            Some((margins.with_turning_edge(to), Relaxation::TurningEdge { from, to }))
        } else if self.turning_obstacle() >= TURNING_OBSTACLE_FLOOR {
            let to = self.turning_obstacle() * FINE_FACTOR;
            let from = self.turning_obstacle();
            Some((margins.with_turning_obstacle(to), Relaxation::TurningObstacle { from, to }))
        } else if self.check_edge() {
            Some((margins.with_check_edge(false), Relaxation::DisableEdgeCheck))
        } else {
            None
        }
    }

    /// Every step from these margins until the ladder is exhausted.
    #[must_use]
    pub fn relaxation_ladder(&self) -> Vec<(Self, Relaxation)> {
        std::iter::successors(self.relax(), |(margins, _)| margins.relax()).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_ladder() {
        let ladder = SafetyMargins::default().relaxation_ladder();
        let names: Vec<_> = ladder.iter().map(|(_, step)| step.name()).collect();
        assert_eq!(names, vec!["turning_edge", "turning_obstacle", "check_edge"]);

        let (last, _) = ladder.last().unwrap();
        assert_relative_eq!(last.turning_edge(), 27.0, epsilon = 1e-9);
        assert_relative_eq!(last.turning_obstacle(), 40.5, epsilon = 1e-9);
        assert!(!last.check_edge());
        assert!(last.relax().is_none());
    }

    #[test]
    fn test_large_margins_shrink_repeatedly() {
        let margins = SafetyMargins::default()
            .with_landing_supplement(30.0)
            .with_obstacle(40.0);
        let ladder = margins.relaxation_ladder();
        // 30 -> 22.5 -> 16.875 -> 12.66
        assert_eq!(ladder[0].1.name(), "landing_supplement");
        assert_eq!(ladder[2].1.name(), "landing_supplement");
        assert_eq!(ladder[3].1.name(), "obstacle");
        assert!(ladder.len() <= 12);
    }

    #[test]
    fn test_each_step_touches_one_margin() {
        let start = SafetyMargins::default()
            .with_landing_supplement(20.0)
            .with_obstacle(25.0)
            .with_turning_edge(35.0)
            .with_turning_obstacle(50.0);
        let mut previous = start.clone();
        for (next, step) in start.relaxation_ladder() {
            let changed = [
                next.landing_supplement() < previous.landing_supplement(),
                next.obstacle() < previous.obstacle(),
                next.turning_edge() < previous.turning_edge(),
                next.turning_obstacle() < previous.turning_obstacle(),
                next.check_edge() != previous.check_edge(),
            ];
            assert_eq!(changed.iter().filter(|c| **c).count(), 1, "step {step}");
            assert!(next.landing_supplement() <= previous.landing_supplement());
            assert!(next.obstacle() <= previous.obstacle());
            assert!(next.turning_edge() <= previous.turning_edge());
            assert!(next.turning_obstacle() <= previous.turning_obstacle());
            assert_eq!(next.edge(), previous.edge());
            assert_eq!(next.angle_supplement(), previous.angle_supplement());
            previous = next;
        }
        assert!(!previous.check_edge());
    }

    #[test]
    fn test_display() {
        let step = Relaxation::TurningEdge { from: 30.0, to: 27.0 };
        assert_eq!(step.to_string(), "turning_edge 30 -> 27");
        assert_eq!(Relaxation::DisableEdgeCheck.to_string(), "check_edge disabled");
    }
}
