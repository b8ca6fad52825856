//! Solved tours.

use crate::movement::{CandidatePath, Movement};

/// One leg of a tour: the path from one goal to the next.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TourLeg {
    /// Goal index the leg starts at.
    pub from: usize,
    /// Goal index the leg ends at.
    pub to: usize,
    /// Obstacle id of the destination goal.
    pub goal_id: Option<u32>,
    /// The driven path.
    pub path: CandidatePath,
}

/// A complete visiting order with its stitched path and drive commands.
///
/// # Example
///
/// ```
/// use planner_types::Tour;
///
/// let tour = Tour::new(0.0, vec![0], Vec::new()).with_commands(Vec::new());
/// assert!(tour.is_trivial());
/// assert!(tour.movement_path().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    total_distance: f64,
    goal_order: Vec<usize>,
    legs: Vec<TourLeg>,
    commands: Vec<String>,
}

impl Tour {
    /// Creates a tour from its order and legs. Commands start empty.
    #[must_use]
    pub const fn new(total_distance: f64, goal_order: Vec<usize>, legs: Vec<TourLeg>) -> Self {
        Self {
            total_distance,
            goal_order,
            legs,
            commands: Vec::new(),
        }
    }

    /// Attaches encoded drive commands.
    #[must_use]
    pub fn with_commands(mut self, commands: Vec<String>) -> Self {
        self.commands = commands;
        self
    }

    /// Sum of leg distances.
    #[must_use]
    pub const fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Goal indices in visiting order, beginning with the start index.
    #[must_use]
    pub fn goal_order(&self) -> &[usize] {
        &self.goal_order
    }

    /// Legs in visiting order.
    #[must_use]
    pub fn legs(&self) -> &[TourLeg] {
        &self.legs
    }

    /// Obstacle ids in visiting order.
    #[must_use]
    pub fn goal_ids(&self) -> Vec<Option<u32>> {
        self.legs.iter().map(|leg| leg.goal_id).collect()
    }

    /// Every movement of every leg, in driving order.
    #[must_use]
    pub fn movement_path(&self) -> Vec<Movement> {
        self.legs
            .iter()
            .flat_map(|leg| leg.path.movements().iter().cloned())
            .collect()
    }

    /// Encoded drive commands.
    #[must_use]
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Returns `true` if the tour visits no obstacle.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.legs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Facing, Pose};

    fn leg(from: usize, to: usize, id: u32, length: f64) -> TourLeg {
        let start = Pose::new(0.0, 0.0, Facing::East);
        let end = Pose::new(length, 0.0, Facing::East);
        TourLeg {
            from,
            to,
            goal_id: Some(id),
            path: CandidatePath::new(vec![Movement::straight(start, end, false)]),
        }
    }

    #[test]
    fn test_tour_accessors() {
        let tour = Tour::new(30.0, vec![2, 0, 1], vec![leg(2, 0, 5, 10.0), leg(0, 1, 9, 20.0)])
            .with_commands(vec!["SF010".to_string()]);
        assert_eq!(tour.goal_order(), &[2, 0, 1]);
        assert_eq!(tour.goal_ids(), vec![Some(5), Some(9)]);
        assert_eq!(tour.movement_path().len(), 2);
        assert_eq!(tour.commands().len(), 1);
        assert!(!tour.is_trivial());
    }
}
