//! Minimum-length safe path between two goal poses.
//!
//! Every combination of [`ManeuverFamily`] and [`Reposition`] is built,
//! prefixed with its repositioning move, and validated by the
//! [`ClearanceChecker`]. The shortest safe candidate wins; ties go to the
//! earliest combination in family-major, reposition-minor order.
//!
//! # Example
//!
//! ```
//! use planner_pathfind::{ClearanceChecker, PairwiseSolver};
//! use planner_types::{ArenaConfig, Facing, Pose, SafetyMargins, VehicleConfig};
//!
//! let arena = ArenaConfig::default();
//! let checker = ClearanceChecker::new(Vec::new(), arena.boundary_edges(), SafetyMargins::default())
//!     .with_exempt_start(arena.start_pose().position);
//! let solver = PairwiseSolver::new(VehicleConfig::default(), checker, arena.start_pose());
//!
//! let goal = Pose::new(15.0, 95.0, Facing::North);
//! let path = solver.solve(&arena.start_pose(), &goal);
//! assert!((path.distance() - 90.0).abs() < 1e-9);
//! ```

use planner_types::{ArenaConfig, CandidatePath, Pose, SafetyMargins, VehicleConfig};
use tracing::trace;

use crate::clearance::ClearanceChecker;
use crate::family::ManeuverFamily;
use crate::reposition::Reposition;

/// Solver for a single ordered pair of poses.
#[derive(Debug, Clone)]
pub struct PairwiseSolver {
    vehicle: VehicleConfig,
    checker: ClearanceChecker,
    start: Pose,
}

impl PairwiseSolver {
    /// Creates a solver. `start` is the only pose allowed to skip repositioning.
    #[must_use]
    pub const fn new(vehicle: VehicleConfig, checker: ClearanceChecker, start: Pose) -> Self {
        Self { vehicle, checker, start }
    }

    /// Returns the clearance checker.
    #[must_use]
    pub const fn checker(&self) -> &ClearanceChecker {
        &self.checker
    }

    /// Returns the vehicle configuration.
    #[must_use]
    pub const fn vehicle(&self) -> &VehicleConfig {
        &self.vehicle
    }

    /// Reposition variants tried from `src`.
    #[must_use]
    pub fn repositions_for(&self, src: &Pose) -> &'static [Reposition] {
        if src.same_pose(&self.start) {
            &Reposition::FROM_START
        } else {
            &Reposition::FROM_GOAL
        }
    }

    /// Returns the shortest safe path from `src` to `dest`, or an infeasible
    /// path if no combination is safe.
    ///
    /// Coincident poses short-circuit: same facing costs nothing, a
    /// different facing is infeasible.
    #[must_use]
    pub fn solve(&self, src: &Pose, dest: &Pose) -> CandidatePath {
        if src.same_position(dest) {
            return if src.facing == dest.facing {
                CandidatePath::stationary()
            } else {
                CandidatePath::infeasible()
            };
        }

        let radius = self.vehicle.turning_radius();
        let mut best = CandidatePath::infeasible();
        let mut best_label = None;

        for family in ManeuverFamily::ALL {
            for &reposition in self.repositions_for(src) {
                let (prefix, from) = reposition.apply(src, &self.vehicle);
                let Some(body) = family.construct(&from, dest, radius) else {
                    continue;
                };

                let movements: Vec<_> = prefix.into_iter().chain(body).collect();
                let candidate = CandidatePath::new(movements);
                if !candidate.is_feasible() || candidate.distance() >= best.distance() {
                    continue;
                }
                if self.checker.is_safe(candidate.movements()) {
                    best = candidate;
                    best_label = Some((family, reposition));
                }
            }
        }

        if let Some((family, reposition)) = best_label {
            trace!(
                family = family.name(),
                reposition = ?reposition,
                distance = best.distance(),
                "pairwise path found"
            );
        } else {
            trace!(src = ?src.position, dest = ?dest.position, "no safe pairwise path");
        }
        best
    }
}

/// Solves a single pair against obstacle centers in a default arena.
///
/// Uses the default vehicle and arena dimensions, exempting the default
/// start pose. `obstacles` are obstacle center poses in centimeters; only
/// their positions matter.
#[must_use]
pub fn pairwise_path(src: &Pose, dest: &Pose, obstacles: &[Pose], margins: &SafetyMargins) -> CandidatePath {
    let arena = ArenaConfig::default();
    let checker = ClearanceChecker::new(
        obstacles.iter().map(|o| o.position).collect(),
        arena.boundary_edges(),
        margins.clone(),
    )
    .with_exempt_start(arena.start_pose().position);
    PairwiseSolver::new(VehicleConfig::default(), checker, arena.start_pose()).solve(src, dest)
}
