//! Pairwise cost matrix over the goal list.

use planner_types::{CandidatePath, Pose};
use tracing::debug;

use crate::pairwise::PairwiseSolver;

/// Square matrix of pairwise paths, indexed by goal index.
///
/// Row `i`, column `j` holds the path from goal `i` to goal `j`. The diagonal
/// is infeasible. The matrix is not assumed symmetric: a path depends on both
/// facings.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<CandidatePath>,
}

impl DistanceMatrix {
    /// Solves every ordered pair of `goals`.
    #[must_use]
    pub fn build(goals: &[Pose], solver: &PairwiseSolver) -> Self {
        let size = goals.len();
        let mut cells = Vec::with_capacity(size * size);
        for (i, src) in goals.iter().enumerate() {
            for (j, dest) in goals.iter().enumerate() {
                cells.push(if i == j {
                    CandidatePath::infeasible()
                } else {
                    solver.solve(src, dest)
                });
            }
        }

        let matrix = Self { size, cells };
        debug!(
            goals = size,
            finite = matrix.finite_count(),
            pairs = size * size.saturating_sub(1),
            "distance matrix built"
        );
        matrix
    }

    /// Number of goals.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Cost from `i` to `j`; infinite on the diagonal and out of range.
    #[must_use]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.path(i, j).map_or(f64::INFINITY, CandidatePath::distance)
    }

    /// Path from `i` to `j`, or `None` when out of range.
    #[must_use]
    pub fn path(&self, i: usize, j: usize) -> Option<&CandidatePath> {
        if i >= self.size || j >= self.size {
            return None;
        }
        self.cells.get(i * self.size + j)
    }

    /// Number of off-diagonal cells with a finite cost.
    #[must_use]
    pub fn finite_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_feasible()).count()
    }

    /// Returns `true` if every mirrored pair agrees within `tolerance`.
    #[must_use]
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.size).all(|i| {
            (i + 1..self.size).all(|j| {
                let (a, b) = (self.distance(i, j), self.distance(j, i));
                a == b || (a - b).abs() <= tolerance
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clearance::ClearanceChecker;
    use planner_types::{ArenaConfig, Facing, SafetyMargins, VehicleConfig};

    fn solver() -> PairwiseSolver {
        let arena = ArenaConfig::default();
        let checker = ClearanceChecker::new(Vec::new(), arena.boundary_edges(), SafetyMargins::default())
            .with_exempt_start(arena.start_pose().position);
        PairwiseSolver::new(VehicleConfig::default(), checker, arena.start_pose())
    }

    #[test]
    fn test_diagonal_is_infinite() {
        let goals = vec![
            Pose::new(100.0, 100.0, Facing::North),
            Pose::new(150.0, 60.0, Facing::West),
            ArenaConfig::default().start_pose(),
        ];
        let m = DistanceMatrix::build(&goals, &solver());
        assert_eq!(m.size(), 3);
        for i in 0..3 {
            assert!(m.distance(i, i).is_infinite());
        }
        assert!(m.distance(0, 7).is_infinite());
        assert!(m.path(3, 0).is_none());
    }

    #[test]
    fn test_open_arena_is_fully_connected() {
        let goals = vec![
            Pose::new(100.0, 100.0, Facing::North),
            Pose::new(150.0, 60.0, Facing::West),
            ArenaConfig::default().start_pose(),
        ];
        let m = DistanceMatrix::build(&goals, &solver());
        // The start box hugs the wall, so nothing drives back into it
        assert!(m.distance(0, 2).is_infinite());
        assert!(m.finite_count() >= 2);
        assert!(m.distance(2, 0).is_finite());
        assert!(m.distance(2, 1).is_finite());
    }

    #[test]
    fn test_asymmetric_costs() {
        let goals = vec![
            Pose::new(100.0, 100.0, Facing::North),
            Pose::new(100.0, 160.0, Facing::North),
        ];
        let m = DistanceMatrix::build(&goals, &solver());
        // Forward along the facing is cheaper than coming back around
        assert!(m.distance(0, 1) < m.distance(1, 0));
        assert!(!m.is_symmetric(1e-6));
    }

    #[test]
    fn test_empty_goals() {
        let m = DistanceMatrix::build(&[], &solver());
        assert_eq!(m.size(), 0);
        assert_eq!(m.finite_count(), 0);
        assert!(m.is_symmetric(0.0));
    }
}
