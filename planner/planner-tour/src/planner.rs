//! The top-level solve pipeline with margin relaxation.
//!
//! Each attempt runs landing planning, the pairwise distance matrix, goal
//! ordering and command encoding from scratch on a fresh copy of the arena.
//! When no order exists the safety margins are relaxed one step (see
//! [`SafetyMargins::relax`]) and the pipeline runs again, until a tour is
//! found or the ladder is exhausted.

use planner_arena::{Arena, LandingPlan, plan_landing_zones_and_goals};
use planner_pathfind::{ClearanceChecker, DistanceMatrix, PairwiseSolver};
use planner_types::{CandidatePath, PlannerConfig, PlannerError, Pose, Relaxation, SafetyMargins, Tour, TourLeg};
use tracing::{debug, info, warn};

use crate::command::CommandEncoder;
use crate::salesman::order_goals;

/// A solved tour together with the margins that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    /// The tour.
    pub tour: Tour,
    /// Margins in force on the successful attempt.
    pub margins: SafetyMargins,
    /// Relaxation steps taken, in order.
    pub relaxations: Vec<Relaxation>,
    /// Number of pipeline runs, including the successful one.
    pub attempts: usize,
}

impl PlanOutcome {
    /// Returns `true` if the configured margins had to be relaxed.
    #[must_use]
    pub fn was_relaxed(&self) -> bool {
        !self.relaxations.is_empty()
    }
}

/// Plans tours over an arena.
///
/// The arena supplies the grid geometry and, unless overridden, the start
/// pose. The [`PlannerConfig`] supplies the vehicle, initial margins, search
/// limits and output format.
///
/// # Example
///
/// ```
/// use planner_arena::{Arena, parse_map_string};
/// use planner_tour::TourPlanner;
/// use planner_types::{ArenaConfig, PlannerConfig};
///
/// let obstacles = parse_map_string("MAP=[[1,1,12,1],[2,11,11,3]]").unwrap();
/// let arena = Arena::with_obstacles(ArenaConfig::default(), &obstacles).unwrap();
///
/// let outcome = TourPlanner::new(PlannerConfig::default()).solve(&arena).unwrap();
/// assert_eq!(outcome.tour.goal_order().len(), 3);
/// assert!(outcome.tour.commands().contains(&"--scan image--".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TourPlanner {
    config: PlannerConfig,
    start: Option<Pose>,
}

impl TourPlanner {
    /// Creates a planner.
    #[must_use]
    pub const fn new(config: PlannerConfig) -> Self {
        Self { config, start: None }
    }

    /// Overrides the arena's start pose.
    #[must_use]
    pub fn with_start(mut self, start: Pose) -> Self {
        self.start = Some(start);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Solves the arena, relaxing margins as needed.
    ///
    /// The caller's arena is never modified.
    ///
    /// # Errors
    ///
    /// - [`PlannerError::InvalidConfig`] if the configuration fails validation
    /// - [`PlannerError::Unsolvable`] if no tour exists even with every
    ///   relaxation applied
    /// - [`PlannerError::TooManyGoals`] or [`PlannerError::Timeout`] from the
    ///   goal search, which are not retried
    pub fn solve(&self, arena: &Arena) -> Result<PlanOutcome, PlannerError> {
        let issues = self.config.validate();
        if !issues.is_empty() {
            return Err(PlannerError::invalid_config(issues.join("; ")));
        }

        let mut margins = self.config.margins().clone();
        let mut relaxations = Vec::new();
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.attempt(arena, &margins) {
                Ok(tour) => {
                    info!(
                        attempts,
                        relaxations = relaxations.len(),
                        total_distance = tour.total_distance(),
                        order = ?tour.goal_order(),
                        "tour solved"
                    );
                    return Ok(PlanOutcome {
                        tour,
                        margins,
                        relaxations,
                        attempts,
                    });
                }
                Err(e) if e.is_relaxable() => {
                    let Some((next, step)) = margins.relax() else {
                        warn!(attempts, "safety margins exhausted without a tour");
                        return Err(PlannerError::Unsolvable { attempts });
                    };
                    debug!(attempt = attempts, %step, "no tour found, relaxing safety margins");
                    margins = next;
                    relaxations.push(step);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Runs the pipeline once with fixed margins.
    ///
    /// # Errors
    ///
    /// [`PlannerError::NoTourFound`] if no order reaches every goal, plus the
    /// goal-search limits of [`order_goals`].
    pub fn attempt(&self, arena: &Arena, margins: &SafetyMargins) -> Result<Tour, PlannerError> {
        let start = self.start.clone().unwrap_or_else(|| arena.config().start_pose());
        let (planned, plan) = plan_landing_zones_and_goals(arena, margins.landing_supplement());
        let plan = plan.with_start(start.clone());

        let checker = ClearanceChecker::new(planned.obstacle_centers(), arena.config().boundary_edges(), margins.clone())
            .with_exempt_start(start.position);
        let solver = PairwiseSolver::new(self.config.vehicle().clone(), checker, start);
        let matrix = DistanceMatrix::build(&plan.goals, &solver);
        info!(goals = plan.len() - 1, feasible_pairs = matrix.finite_count(), "distance matrix ready");

        let (total, order) = order_goals(&matrix, self.config.tour())?;
        let legs = stitch_legs(&order, &plan, &matrix);
        let encoder = CommandEncoder::new(self.config.vehicle().turning_radius())
            .with_reset_sentinel(arena.config().reset_sentinel_x())
            .with_format(self.config.format());
        let commands = encoder.encode_legs(&legs);
        Ok(Tour::new(total, order, legs).with_commands(commands))
    }
}

fn stitch_legs(order: &[usize], plan: &LandingPlan, matrix: &DistanceMatrix) -> Vec<TourLeg> {
    order
        .windows(2)
        .map(|pair| TourLeg {
            from: pair[0],
            to: pair[1],
            goal_id: plan.goal_ids.get(pair[1]).copied().flatten(),
            path: matrix
                .path(pair[0], pair[1])
                .cloned()
                .unwrap_or_else(CandidatePath::infeasible),
        })
        .collect()
}

/// Solves `arena` from `start` with the default configuration.
///
/// # Errors
///
/// See [`TourPlanner::solve`].
pub fn solve_tour(arena: &Arena, start: Pose) -> Result<Tour, PlannerError> {
    TourPlanner::new(PlannerConfig::default())
        .with_start(start)
        .solve(arena)
        .map(|outcome| outcome.tour)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use planner_arena::parse_map_string;
    use planner_types::{ArenaConfig, TourConfig, VehicleConfig};

    fn arena(map: &str) -> Arena {
        Arena::with_obstacles(ArenaConfig::default(), &parse_map_string(map).unwrap()).unwrap()
    }

    #[test]
    fn test_empty_arena_is_trivial() {
        let outcome = TourPlanner::default().solve(&arena("MAP=[]")).unwrap();
        assert!(outcome.tour.is_trivial());
        assert_eq!(outcome.tour.goal_order(), &[0]);
        assert_eq!(outcome.tour.total_distance(), 0.0);
        assert!(outcome.tour.commands().is_empty());
        assert_eq!(outcome.attempts, 1);
        assert!(!outcome.was_relaxed());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PlannerConfig::default().with_vehicle(VehicleConfig::default().with_turning_radius(-1.0));
        let err = TourPlanner::new(config).solve(&arena("MAP=[]")).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidConfig(_)));
    }

    #[test]
    fn test_goal_ceiling_is_not_retried() {
        let config = PlannerConfig::default().with_tour(TourConfig::default().with_max_goals(1));
        let err = TourPlanner::new(config)
            .solve(&arena("MAP=[[1,1,12,1],[2,11,11,3]]"))
            .unwrap_err();
        assert_eq!(err, PlannerError::TooManyGoals { count: 2, max: 1 });
    }

    #[test]
    fn test_legs_follow_goal_order() {
        let tour = TourPlanner::default()
            .solve(&arena("MAP=[[1,1,12,1],[2,11,11,3]]"))
            .unwrap()
            .tour;
        let order = tour.goal_order();
        assert_eq!(tour.legs().len(), order.len() - 1);
        for (leg, pair) in tour.legs().iter().zip(order.windows(2)) {
            assert_eq!((leg.from, leg.to), (pair[0], pair[1]));
            assert!(leg.goal_id.is_some());
        }
        let sum: f64 = tour.legs().iter().map(|leg| leg.path.distance()).sum();
        assert!((sum - tour.total_distance()).abs() < 1e-6);
    }

    #[test]
    fn test_caller_arena_untouched() {
        let before = arena("MAP=[[1,1,12,1],[2,11,11,3]]");
        let copy = before.clone();
        let _ = TourPlanner::default().solve(&before).unwrap();
        assert_eq!(before, copy);
    }
}
