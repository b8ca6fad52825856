//! The grid arena and obstacle placement.
//!
//! # Example
//!
//! ```
//! use planner_arena::{Arena, ObstacleSpec};
//! use planner_types::{ArenaConfig, CellKind, Facing};
//!
//! let mut arena = Arena::new(ArenaConfig::default());
//! arena.place_obstacle(ObstacleSpec::new(1, 10, 10, Facing::North)).unwrap();
//!
//! assert_eq!(arena.cell(10, 10).map(|c| c.kind), Some(CellKind::Obstacle));
//! assert_eq!(arena.obstacles().len(), 1);
//! ```

use nalgebra::Point2;
use planner_types::{ArenaConfig, CellKind, Facing, PlannerError, Pose};

/// One obstacle of the input contract: an id, a grid cell and a facing.
///
/// The facing is the side carrying the image to be scanned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObstacleSpec {
    /// Obstacle id.
    pub id: u32,
    /// Grid column.
    pub x: i32,
    /// Grid row.
    pub y: i32,
    /// Image side.
    pub facing: Facing,
    /// Optional label copied onto the landing cell.
    pub annotation: Option<String>,
}

impl ObstacleSpec {
    /// Creates an obstacle without annotation.
    #[must_use]
    pub const fn new(id: u32, x: i32, y: i32, facing: Facing) -> Self {
        Self {
            id,
            x,
            y,
            facing,
            annotation: None,
        }
    }

    /// Sets the annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// Grid cell of the landing zone `distance` cells in front of the image.
    #[must_use]
    pub const fn landing_cell(&self, distance: i32) -> (i32, i32) {
        let (dx, dy) = self.facing.grid_offset();
        (self.x + dx * distance, self.y + dy * distance)
    }
}

/// A square grid of cells with obstacles placed on it.
///
/// Cells are stored as grid-space [`Pose`]s. The arena is mutated during
/// setup (placement, then landing annotation) and read-only afterwards;
/// the planner clones it for every solve attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Arena {
    config: ArenaConfig,
    cells: Vec<Pose>,
    obstacles: Vec<ObstacleSpec>,
}

impl Arena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new(config: ArenaConfig) -> Self {
        let count = config.grid_count().max(0);
        let cells = (0..count)
            .flat_map(|y| (0..count).map(move |x| Pose::new(f64::from(x), f64::from(y), Facing::North)))
            .collect();
        Self {
            config,
            cells,
            obstacles: Vec::new(),
        }
    }

    /// Creates an arena and places every obstacle.
    ///
    /// # Errors
    ///
    /// Returns the first placement error, see [`Arena::place_obstacle`].
    pub fn with_obstacles<'a>(
        config: ArenaConfig,
        obstacles: impl IntoIterator<Item = &'a ObstacleSpec>,
    ) -> Result<Self, PlannerError> {
        let mut arena = Self::new(config);
        for spec in obstacles {
            arena.place_obstacle(spec.clone())?;
        }
        Ok(arena)
    }

    /// Places an obstacle.
    ///
    /// # Errors
    ///
    /// - [`PlannerError::ObstacleOutOfBounds`] if the cell is off the grid
    /// - [`PlannerError::CellOccupied`] if the cell already holds an obstacle
    /// - [`PlannerError::LandingOutOfBounds`] if the landing cell would be off the grid
    pub fn place_obstacle(&mut self, spec: ObstacleSpec) -> Result<(), PlannerError> {
        let Some(index) = self.index(spec.x, spec.y) else {
            return Err(PlannerError::ObstacleOutOfBounds {
                id: spec.id,
                x: spec.x,
                y: spec.y,
            });
        };
        if self.cells[index].kind == CellKind::Obstacle {
            return Err(PlannerError::CellOccupied { x: spec.x, y: spec.y });
        }
        let (lx, ly) = spec.landing_cell(self.config.landing_distance());
        if !self.config.in_bounds(lx, ly) {
            return Err(PlannerError::LandingOutOfBounds { id: spec.id, x: lx, y: ly });
        }

        let cell = &mut self.cells[index];
        cell.kind = CellKind::Obstacle;
        cell.facing = spec.facing;
        cell.id = Some(spec.id);
        cell.annotation.clone_from(&spec.annotation);
        self.obstacles.push(spec);
        Ok(())
    }

    /// The arena configuration.
    #[must_use]
    pub const fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Obstacles in placement order.
    #[must_use]
    pub fn obstacles(&self) -> &[ObstacleSpec] {
        &self.obstacles
    }

    /// Cell at `(x, y)`, if in bounds.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<&Pose> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Mutable cell at `(x, y)`, if in bounds.
    pub fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Pose> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Cells in row-major order (`y` outer, `x` inner).
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, &Pose)> {
        let count = self.config.grid_count();
        (0..count)
            .flat_map(move |y| (0..count).map(move |x| (x, y)))
            .zip(self.cells.iter())
            .map(|((x, y), cell)| (x, y, cell))
    }

    /// Obstacle cell centers in centimeters.
    #[must_use]
    pub fn obstacle_centers(&self) -> Vec<Point2<f64>> {
        self.obstacles
            .iter()
            .map(|o| self.config.cell_center(o.x, o.y))
            .collect()
    }

    /// Number of cells of the given kind.
    #[must_use]
    pub fn count_kind(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind == kind).count()
    }

    #[allow(clippy::cast_sign_loss)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.config
            .in_bounds(x, y)
            .then(|| (y * self.config.grid_count() + x) as usize)
    }
}
