//! Landing-zone planning.
//!
//! Every obstacle is viewed from a landing cell a fixed number of cells in
//! front of its image side. The vehicle parks there facing the obstacle.
//! The goal pose is the landing cell center pushed a further
//! `landing_supplement` centimeters away from the obstacle.
//!
//! # Example
//!
//! ```
//! use planner_arena::{Arena, ObstacleSpec, plan_landing_zones};
//! use planner_types::{ArenaConfig, CellKind, Facing};
//!
//! let mut arena = Arena::new(ArenaConfig::default());
//! arena.place_obstacle(ObstacleSpec::new(3, 10, 10, Facing::North)).unwrap();
//!
//! let plan = plan_landing_zones(&mut arena, 10.0);
//!
//! // Landing cell (10, 12) faces south, goal pushed 10 cm further north
//! assert_eq!(arena.cell(10, 12).map(|c| c.kind), Some(CellKind::Landing));
//! assert_eq!(plan.goals[0].facing, Facing::South);
//! assert_eq!((plan.goals[0].x(), plan.goals[0].y()), (105.0, 135.0));
//! assert_eq!(plan.goal_ids, vec![Some(3)]);
//! ```

use planner_types::{CellKind, Facing, Pose};
use tracing::{debug, warn};

use crate::arena::Arena;

/// Goal poses derived from an arena.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LandingPlan {
    /// Goal poses in discovery order (row-major over obstacle cells).
    pub goals: Vec<Pose>,
    /// Obstacle id of each goal; `None` for the start pose.
    pub goal_ids: Vec<Option<u32>>,
}

impl LandingPlan {
    /// Number of goals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// Returns `true` if there are no goals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Appends the start pose as the last goal.
    #[must_use]
    pub fn with_start(mut self, start: Pose) -> Self {
        self.goals.push(start);
        self.goal_ids.push(None);
        self
    }

    /// Index of the goal carrying obstacle `id`.
    #[must_use]
    pub fn index_of(&self, id: u32) -> Option<usize> {
        self.goal_ids.iter().position(|g| *g == Some(id))
    }
}

/// Annotates landing cells in `arena` and returns the goal poses.
///
/// Obstacles are visited row-major (`y` outer, `x` inner). For each:
///
/// - the landing cell becomes [`CellKind::Landing`] facing the obstacle,
///   with the obstacle's id and annotation, unless it holds an obstacle
///   itself (kept as is, with a warning);
/// - empty cells between obstacle and landing cell become
///   [`CellKind::LandingPadding`];
/// - a goal pose is emitted at the landing cell center, shifted by
///   `landing_supplement` opposite to the landing facing.
pub fn plan_landing_zones(arena: &mut Arena, landing_supplement: f64) -> LandingPlan {
    let distance = arena.config().landing_distance();
    let sources: Vec<(i32, i32, Facing, Option<u32>, Option<String>)> = arena
        .cells()
        .filter(|(_, _, cell)| cell.kind == CellKind::Obstacle)
        .map(|(x, y, cell)| (x, y, cell.facing, cell.id, cell.annotation.clone()))
        .collect();

    let mut plan = LandingPlan::default();
    for (x, y, facing, id, annotation) in sources {
        let (dx, dy) = facing.grid_offset();
        let (lx, ly) = (x + dx * distance, y + dy * distance);
        let landing_facing = facing.opposite();

        let Some(cell) = arena.cell_mut(lx, ly) else {
            warn!(x, y, "landing cell outside arena, obstacle skipped");
            continue;
        };
        if cell.kind == CellKind::Obstacle {
            warn!(x = lx, y = ly, obstacle = ?id, "landing cell holds an obstacle");
        } else {
            cell.kind = CellKind::Landing;
            cell.facing = landing_facing;
            cell.id = id;
            cell.annotation.clone_from(&annotation);
        }

        for step in 1..distance {
            if let Some(pad) = arena.cell_mut(x + dx * step, y + dy * step) {
                if pad.kind == CellKind::Empty {
                    pad.kind = CellKind::LandingPadding;
                    pad.facing = landing_facing;
                }
            }
        }

        let center = arena.config().cell_center(lx, ly);
        let mut goal = Pose::at(
            center - landing_facing.unit_vector() * landing_supplement,
            landing_facing,
        )
        .with_kind(CellKind::Landing);
        goal.id = id;
        goal.annotation = annotation;

        plan.goals.push(goal);
        plan.goal_ids.push(id);
    }

    debug!(goals = plan.len(), landing_supplement, "planned landing zones");
    plan
}

/// Non-mutating form of [`plan_landing_zones`]: returns the annotated copy
/// of `arena` together with the goals.
#[must_use]
pub fn plan_landing_zones_and_goals(arena: &Arena, landing_supplement: f64) -> (Arena, LandingPlan) {
    let mut annotated = arena.clone();
    let plan = plan_landing_zones(&mut annotated, landing_supplement);
    (annotated, plan)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::arena::ObstacleSpec;
    use approx::assert_relative_eq;
    use planner_types::ArenaConfig;

    fn arena_with(obstacles: &[ObstacleSpec]) -> Arena {
        Arena::with_obstacles(ArenaConfig::default(), obstacles).unwrap()
    }

    #[test]
    fn test_goal_offsets_per_facing() {
        let mut arena = arena_with(&[
            ObstacleSpec::new(1, 5, 5, Facing::East),
            ObstacleSpec::new(2, 12, 8, Facing::West),
            ObstacleSpec::new(3, 15, 15, Facing::South),
            ObstacleSpec::new(4, 2, 12, Facing::North),
        ]);
        let plan = plan_landing_zones(&mut arena, 10.0);
        assert_eq!(plan.goal_ids, vec![Some(1), Some(2), Some(4), Some(3)]);

        // East-facing obstacle: landing (7, 5) faces west, goal pushed east
        let east = &plan.goals[0];
        assert_eq!(east.facing, Facing::West);
        assert_relative_eq!(east.x(), 85.0);
        assert_relative_eq!(east.y(), 55.0);

        // West-facing obstacle: landing (10, 8) faces east, goal pushed west
        let west = &plan.goals[1];
        assert_eq!(west.facing, Facing::East);
        assert_relative_eq!(west.x(), 95.0);
        assert_relative_eq!(west.y(), 85.0);

        // North-facing obstacle: landing (2, 14) faces south, goal pushed north
        let north = &plan.goals[2];
        assert_eq!(north.facing, Facing::South);
        assert_relative_eq!(north.y(), 155.0);

        // South-facing obstacle: landing (15, 13) faces north, goal pushed south
        let south = &plan.goals[3];
        assert_eq!(south.facing, Facing::North);
        assert_relative_eq!(south.y(), 125.0);
    }

    #[test]
    fn test_landing_and_padding_cells() {
        let mut arena = arena_with(&[ObstacleSpec::new(9, 6, 6, Facing::East).with_annotation("A")]);
        plan_landing_zones(&mut arena, 10.0);

        let landing = arena.cell(8, 6).unwrap();
        assert_eq!(landing.kind, CellKind::Landing);
        assert_eq!(landing.facing, Facing::West);
        assert_eq!(landing.id, Some(9));
        assert_eq!(landing.annotation.as_deref(), Some("A"));
        assert_eq!(arena.cell(7, 6).unwrap().kind, CellKind::LandingPadding);
        assert_eq!(arena.count_kind(CellKind::Landing), 1);
    }

    #[test]
    fn test_landing_on_obstacle_is_preserved() {
        let mut arena = arena_with(&[
            ObstacleSpec::new(1, 10, 10, Facing::North),
            ObstacleSpec::new(2, 10, 12, Facing::East),
        ]);
        let plan = plan_landing_zones(&mut arena, 0.0);
        assert_eq!(arena.cell(10, 12).unwrap().kind, CellKind::Obstacle);
        assert_eq!(plan.len(), 2);
        assert_relative_eq!(plan.goals[0].y(), 125.0);
    }

    #[test]
    fn test_with_start_appends_last() {
        let mut arena = arena_with(&[ObstacleSpec::new(7, 10, 10, Facing::West)]);
        let plan = plan_landing_zones(&mut arena, 10.0).with_start(Pose::new(15.0, 5.0, Facing::North));
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.goal_ids[1], None);
        assert_eq!(plan.index_of(7), Some(0));
        assert_eq!(plan.index_of(8), None);
    }

    #[test]
    fn test_non_mutating_form_leaves_input() {
        let arena = arena_with(&[ObstacleSpec::new(1, 4, 10, Facing::South)]);
        let (annotated, plan) = plan_landing_zones_and_goals(&arena, 10.0);
        assert_eq!(arena.count_kind(CellKind::Landing), 0);
        assert_eq!(annotated.count_kind(CellKind::Landing), 1);
        assert_eq!(plan.goal_ids, vec![Some(1)]);
    }

    #[test]
    fn test_empty_arena_has_no_goals() {
        let mut arena = Arena::new(ArenaConfig::default());
        assert!(plan_landing_zones(&mut arena, 10.0).is_empty());
    }
}
