//! Goal ordering over a pairwise cost matrix.
//!
//! The last index is the start. A tour begins there and visits every other
//! index exactly once, with no return leg. Two strategies produce the same
//! order:
//!
//! - [`SearchStrategy::Exhaustive`] walks every permutation depth-first in
//!   index order, pruning branches that can no longer win.
//! - [`SearchStrategy::Memoized`] solves the `(visited set, current goal)`
//!   recurrence over a bitmask table in `O(2^n · n²)`.
//!
//! Both keep the earliest order in index sequence among equal costs.
//!
//! # Example
//!
//! ```
//! use planner_tour::salesman::order_goals;
//! use planner_types::TourConfig;
//!
//! let inf = f64::INFINITY;
//! // Goals 0 and 1, start is index 2
//! let costs = vec![
//!     vec![inf, 5.0, inf],
//!     vec![1.0, inf, inf],
//!     vec![10.0, 2.0, inf],
//! ];
//! let (total, order) = order_goals(&costs, &TourConfig::default()).unwrap();
//! assert_eq!(order, vec![2, 1, 0]);
//! assert_eq!(total, 3.0);
//! ```

use std::time::{Duration, Instant};

use planner_pathfind::DistanceMatrix;
use planner_types::{PlannerError, SearchStrategy, TourConfig};

/// Largest goal count the memoized strategy accepts.
///
/// Its table holds `2^n · n` entries, so this is the point past which the
/// allocation alone becomes impractical.
pub const MEMOIZED_GOAL_LIMIT: usize = 24;

/// Read access to a square cost table.
pub trait TourCosts {
    /// Number of indices, including the start.
    fn size(&self) -> usize;

    /// Cost from `from` to `to`; infinite when unreachable.
    fn cost(&self, from: usize, to: usize) -> f64;
}

impl TourCosts for DistanceMatrix {
    fn size(&self) -> usize {
        Self::size(self)
    }

    fn cost(&self, from: usize, to: usize) -> f64 {
        self.distance(from, to)
    }
}

impl TourCosts for Vec<Vec<f64>> {
    fn size(&self) -> usize {
        self.len()
    }

    fn cost(&self, from: usize, to: usize) -> f64 {
        self.get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(f64::INFINITY)
    }
}

/// Finds the cheapest visiting order.
///
/// Returns the total cost and the order, beginning with the start index.
/// With only the start present the order is `[start]` at zero cost.
///
/// # Errors
///
/// - [`PlannerError::TooManyGoals`] if the goal count exceeds the ceiling,
///   or [`MEMOIZED_GOAL_LIMIT`] for the memoized strategy
/// - [`PlannerError::Timeout`] if the deadline passes mid-search
/// - [`PlannerError::NoTourFound`] if every order has an unreachable leg
pub fn order_goals<C: TourCosts + ?Sized>(costs: &C, config: &TourConfig) -> Result<(f64, Vec<usize>), PlannerError> {
    let size = costs.size();
    let Some(start) = size.checked_sub(1) else {
        return Ok((0.0, Vec::new()));
    };
    if let Some(max) = config.max_goals() {
        if start > max {
            return Err(PlannerError::TooManyGoals { count: start, max });
        }
    }
    if config.strategy() == SearchStrategy::Memoized && start > MEMOIZED_GOAL_LIMIT {
        return Err(PlannerError::TooManyGoals {
            count: start,
            max: MEMOIZED_GOAL_LIMIT,
        });
    }
    if start == 0 {
        return Ok((0.0, vec![start]));
    }

    let deadline = Deadline::new(config.timeout());
    let (total, order) = match config.strategy() {
        SearchStrategy::Exhaustive => exhaustive(costs, start, &deadline)?,
        SearchStrategy::Memoized => memoized(costs, start, &deadline)?,
    };
    if total.is_finite() {
        Ok((total, order))
    } else {
        Err(PlannerError::NoTourFound)
    }
}

struct Deadline {
    at: Option<(Instant, Duration)>,
}

impl Deadline {
    fn new(timeout: Option<Duration>) -> Self {
        Self {
            at: timeout.map(|t| (Instant::now() + t, t)),
        }
    }

    fn check(&self) -> Result<(), PlannerError> {
        match self.at {
            Some((at, timeout)) if Instant::now() >= at => Err(PlannerError::Timeout(timeout)),
            _ => Ok(()),
        }
    }
}

struct Search<'a, C: ?Sized> {
    costs: &'a C,
    goals: usize,
    deadline: &'a Deadline,
    visited: Vec<bool>,
    path: Vec<usize>,
    best_cost: f64,
    best_path: Vec<usize>,
}

impl<C: TourCosts + ?Sized> Search<'_, C> {
    fn descend(&mut self, current: usize, accumulated: f64) -> Result<(), PlannerError> {
        self.deadline.check()?;
        if self.path.len() == self.goals + 1 {
            if accumulated < self.best_cost {
                self.best_cost = accumulated;
                self.best_path.clone_from(&self.path);
            }
            return Ok(());
        }

        for next in 0..self.goals {
            if self.visited[next] {
                continue;
            }
            let total = accumulated + self.costs.cost(current, next);
            // Costs are non-negative, so this branch cannot beat the best
            if !total.is_finite() || total >= self.best_cost {
                continue;
            }
            self.visited[next] = true;
            self.path.push(next);
            self.descend(next, total)?;
            self.path.pop();
            self.visited[next] = false;
        }
        Ok(())
    }
}

fn exhaustive<C: TourCosts + ?Sized>(
    costs: &C,
    start: usize,
    deadline: &Deadline,
) -> Result<(f64, Vec<usize>), PlannerError> {
    let mut search = Search {
        costs,
        goals: start,
        deadline,
        visited: vec![false; start],
        path: vec![start],
        best_cost: f64::INFINITY,
        best_path: Vec::new(),
    };
    search.descend(start, 0.0)?;
    Ok((search.best_cost, search.best_path))
}

fn memoized<C: TourCosts + ?Sized>(
    costs: &C,
    start: usize,
    deadline: &Deadline,
) -> Result<(f64, Vec<usize>), PlannerError> {
    let goals = start;
    let full = (1usize << goals) - 1;
    // remaining[mask * goals + current]: cheapest completion from `current`
    // having visited `mask`, and the goal taken next
    let mut remaining = vec![f64::INFINITY; (full + 1) * goals];
    let mut choice = vec![usize::MAX; (full + 1) * goals];
    for current in 0..goals {
        remaining[full * goals + current] = 0.0;
    }

    for mask in (1..full).rev() {
        deadline.check()?;
        for current in (0..goals).filter(|c| mask & (1 << c) != 0) {
            let slot = mask * goals + current;
            for next in (0..goals).filter(|n| mask & (1 << n) == 0) {
                let total = costs.cost(current, next) + remaining[(mask | (1 << next)) * goals + next];
                if total < remaining[slot] {
                    remaining[slot] = total;
                    choice[slot] = next;
                }
            }
        }
    }

    let mut best = (f64::INFINITY, usize::MAX);
    for first in 0..goals {
        let total = costs.cost(start, first) + remaining[(1 << first) * goals + first];
        if total < best.0 {
            best = (total, first);
        }
    }
    if !best.0.is_finite() {
        return Ok((f64::INFINITY, Vec::new()));
    }

    let mut order = Vec::with_capacity(goals + 1);
    order.push(start);
    let (mut mask, mut current) = (1usize << best.1, best.1);
    order.push(current);
    while mask != full {
        let next = choice[mask * goals + current];
        if next == usize::MAX {
            return Ok((f64::INFINITY, Vec::new()));
        }
        mask |= 1 << next;
        current = next;
        order.push(current);
    }
    Ok((best.0, order))
}
