//! Random obstacle layouts for simulation and benchmarking.
//!
//! Obstacles are dropped on uniformly random cells with a random facing.
//! A candidate is rejected when it falls inside the start box or when the
//! approach lane in front of its image (three cells wide, four deep) is not
//! entirely empty and inside the arena. Lanes of obstacles already placed
//! stay reserved.
//!
//! # Example
//!
//! ```
//! use planner_arena::ObstacleGenerator;
//! use planner_types::ArenaConfig;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let arena = ObstacleGenerator::new(5)
//!     .generate(&ArenaConfig::default(), &mut rng)
//!     .unwrap();
//! assert_eq!(arena.obstacles().len(), 5);
//! ```

use planner_types::{ArenaConfig, CellKind, Facing, PlannerError};
use rand::Rng;
use tracing::debug;

use crate::arena::{Arena, ObstacleSpec};

/// Generator of random, approachable obstacle layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleGenerator {
    /// Number of obstacles to place.
    count: usize,
    /// Cells kept free in front of each image.
    lane_depth: i32,
    /// Side length of the square start box kept free, in cells.
    start_box: i32,
    /// Candidate draws before giving up.
    max_attempts: usize,
}

impl ObstacleGenerator {
    /// Creates a generator for `count` obstacles.
    ///
    /// Defaults: lane depth 4, start box 5×5, 10 000 attempts.
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self {
            count,
            lane_depth: 4,
            start_box: 5,
            max_attempts: 10_000,
        }
    }

    /// Sets the depth of the free approach lane.
    #[must_use]
    pub const fn with_lane_depth(mut self, depth: i32) -> Self {
        self.lane_depth = depth;
        self
    }

    /// Sets the side of the free start box.
    #[must_use]
    pub const fn with_start_box(mut self, cells: i32) -> Self {
        self.start_box = cells;
        self
    }

    /// Sets the number of draws before giving up.
    #[must_use]
    pub const fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Returns the number of obstacles to place.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Generates an arena. Obstacle ids run from 1.
    ///
    /// # Errors
    ///
    /// [`PlannerError::GeneratorExhausted`] if the attempt limit is reached.
    pub fn generate<R: Rng + ?Sized>(&self, config: &ArenaConfig, rng: &mut R) -> Result<Arena, PlannerError> {
        let mut arena = Arena::new(config.clone());
        let grid = config.grid_count();
        if grid <= 0 {
            return Err(PlannerError::invalid_config("grid_count must be positive"));
        }

        let mut attempts = 0;
        while arena.obstacles().len() < self.count {
            if attempts >= self.max_attempts {
                return Err(PlannerError::GeneratorExhausted {
                    placed: arena.obstacles().len(),
                    requested: self.count,
                });
            }
            attempts += 1;

            let x = rng.gen_range(0..grid);
            let y = rng.gen_range(0..grid);
            let facing = Facing::ALL[rng.gen_range(0..Facing::ALL.len())];

            if x < self.start_box && y < self.start_box {
                continue;
            }
            if !self.lane_is_clear(&arena, x, y, facing) {
                continue;
            }

            let number = arena.obstacles().len() + 1;
            let id = u32::try_from(number).map_err(|_| PlannerError::invalid_config("too many obstacles"))?;
            let spec = ObstacleSpec::new(id, x, y, facing).with_annotation(format!("obstacle {number}"));
            if arena.place_obstacle(spec).is_err() {
                continue;
            }
        }

        debug!(obstacles = self.count, attempts, "generated random layout");
        Ok(arena)
    }

    /// The obstacle cell and every lane cell must exist and be empty, and
    /// the obstacle must not sit in an earlier obstacle's lane.
    fn lane_is_clear(&self, arena: &Arena, x: i32, y: i32, facing: Facing) -> bool {
        let is_empty = |cx: i32, cy: i32| arena.cell(cx, cy).is_some_and(|c| c.kind == CellKind::Empty);
        if !is_empty(x, y) || arena.obstacles().iter().any(|o| self.in_lane(o, x, y)) {
            return false;
        }

        let (dx, dy) = facing.grid_offset();
        let (px, py) = (-dy, dx);
        (1..=self.lane_depth).all(|depth| {
            (-1..=1).all(|side| is_empty(x + dx * depth + px * side, y + dy * depth + py * side))
        })
    }

    fn in_lane(&self, obstacle: &ObstacleSpec, x: i32, y: i32) -> bool {
        let (dx, dy) = obstacle.facing.grid_offset();
        let (rx, ry) = (x - obstacle.x, y - obstacle.y);
        let depth = rx * dx + ry * dy;
        let side = -rx * dy + ry * dx;
        (1..=self.lane_depth).contains(&depth) && (-1..=1).contains(&side)
    }
}
