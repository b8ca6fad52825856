//! Configuration types for the planner.
//!
//! All configuration structs follow the same builder shape: private fields,
//! `with_*` setters, getters, and a `validate()` that lists problems.
//!
//! # Example
//!
//! ```
//! use planner_types::{PlannerConfig, SafetyMargins, TourConfig, SearchStrategy};
//! use std::time::Duration;
//!
//! let config = PlannerConfig::default()
//!     .with_margins(SafetyMargins::default().with_landing_supplement(12.0))
//!     .with_tour(
//!         TourConfig::default()
//!             .with_strategy(SearchStrategy::Memoized)
//!             .with_timeout(Duration::from_secs(5)),
//!     );
//!
//! assert!(config.validate().is_empty());
//! ```

use std::time::Duration;

use nalgebra::Point2;

use crate::pose::{Facing, Pose};

/// Physical parameters of the vehicle.
///
/// Defaults: turning radius 31 cm, reverse reposition 15 cm.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VehicleConfig {
    /// Radius of every arc in centimeters.
    turning_radius: f64,
    /// Length of the reverse-straight reposition in centimeters.
    reverse_distance: f64,
}

impl VehicleConfig {
    /// Creates the default vehicle configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            turning_radius: 31.0,
            reverse_distance: 15.0,
        }
    }

    /// Sets the turning radius.
    #[must_use]
    pub const fn with_turning_radius(mut self, radius: f64) -> Self {
        self.turning_radius = radius;
        self
    }

    /// Sets the reverse-straight reposition distance.
    #[must_use]
    pub const fn with_reverse_distance(mut self, distance: f64) -> Self {
        self.reverse_distance = distance;
        self
    }

    /// Returns the turning radius.
    #[must_use]
    pub const fn turning_radius(&self) -> f64 {
        self.turning_radius
    }

    /// Returns the reverse-straight reposition distance.
    #[must_use]
    pub const fn reverse_distance(&self) -> f64 {
        self.reverse_distance
    }

    /// Validates the configuration and returns any issues.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !(self.turning_radius > 0.0 && self.turning_radius.is_finite()) {
            issues.push(format!("turning_radius must be positive, got {}", self.turning_radius));
        }
        if !(self.reverse_distance > 0.0 && self.reverse_distance.is_finite()) {
            issues.push(format!("reverse_distance must be positive, got {}", self.reverse_distance));
        }
        issues
    }
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Arena dimensions and the fixed start pose.
///
/// Defaults: 20×20 grid of 10 cm cells, landing cells 2 cells from their
/// obstacle, start at (15, 5) cm facing north, reset sentinel at x = -1.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArenaConfig {
    /// Cells per side.
    grid_count: i32,
    /// Cell edge length in centimeters.
    cell_size: f64,
    /// Cells between an obstacle and its landing cell.
    landing_distance: i32,
    /// Start position in centimeters.
    start_position: (f64, f64),
    /// Start facing.
    start_facing: Facing,
    /// X coordinate that marks a reset movement.
    reset_sentinel_x: f64,
}

impl ArenaConfig {
    /// Creates the default arena configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            grid_count: 20,
            cell_size: 10.0,
            landing_distance: 2,
            start_position: (15.0, 5.0),
            start_facing: Facing::North,
            reset_sentinel_x: -1.0,
        }
    }

    /// Sets the number of cells per side.
    #[must_use]
    pub const fn with_grid_count(mut self, count: i32) -> Self {
        self.grid_count = count;
        self
    }

    /// Sets the cell size in centimeters.
    #[must_use]
    pub const fn with_cell_size(mut self, size: f64) -> Self {
        self.cell_size = size;
        self
    }

    /// Sets the obstacle-to-landing distance in cells.
    #[must_use]
    pub const fn with_landing_distance(mut self, cells: i32) -> Self {
        self.landing_distance = cells;
        self
    }

    /// Sets the start pose in centimeters.
    #[must_use]
    pub const fn with_start(mut self, x: f64, y: f64, facing: Facing) -> Self {
        self.start_position = (x, y);
        self.start_facing = facing;
        self
    }

    /// Returns the number of cells per side.
    #[must_use]
    pub const fn grid_count(&self) -> i32 {
        self.grid_count
    }

    /// Returns the cell size in centimeters.
    #[must_use]
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Returns the obstacle-to-landing distance in cells.
    #[must_use]
    pub const fn landing_distance(&self) -> i32 {
        self.landing_distance
    }

    /// Returns the reset sentinel x coordinate.
    #[must_use]
    pub const fn reset_sentinel_x(&self) -> f64 {
        self.reset_sentinel_x
    }

    /// Side length of the arena in centimeters.
    #[must_use]
    pub fn arena_size(&self) -> f64 {
        f64::from(self.grid_count) * self.cell_size
    }

    /// The start pose in centimeters.
    #[must_use]
    pub fn start_pose(&self) -> Pose {
        Pose::new(self.start_position.0, self.start_position.1, self.start_facing)
    }

    /// Center of grid cell `(x, y)` in centimeters.
    ///
    /// # Example
    ///
    /// ```
    /// use planner_types::ArenaConfig;
    /// use nalgebra::Point2;
    ///
    /// let config = ArenaConfig::default();
    /// assert_eq!(config.cell_center(1, 10), Point2::new(15.0, 105.0));
    /// ```
    #[must_use]
    pub fn cell_center(&self, x: i32, y: i32) -> Point2<f64> {
        Point2::new(
            (f64::from(x) + 0.5) * self.cell_size,
            (f64::from(y) + 0.5) * self.cell_size,
        )
    }

    /// Returns `true` if `(x, y)` is a valid cell index.
    #[must_use]
    pub const fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.grid_count && y < self.grid_count
    }

    /// The four arena boundary segments: west, north, south, east.
    #[must_use]
    pub fn boundary_edges(&self) -> [(Point2<f64>, Point2<f64>); 4] {
        let size = self.arena_size();
        [
            (Point2::new(0.0, 0.0), Point2::new(0.0, size)),
            (Point2::new(0.0, size), Point2::new(size, size)),
            (Point2::new(0.0, 0.0), Point2::new(size, 0.0)),
            (Point2::new(size, 0.0), Point2::new(size, size)),
        ]
    }

    /// Validates the configuration and returns any issues.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.grid_count <= 0 {
            issues.push(format!("grid_count must be positive, got {}", self.grid_count));
        }
        if !(self.cell_size > 0.0 && self.cell_size.is_finite()) {
            issues.push(format!("cell_size must be positive, got {}", self.cell_size));
        }
        if self.landing_distance <= 0 {
            issues.push(format!("landing_distance must be positive, got {}", self.landing_distance));
        }
        let (x, y) = self.start_position;
        let size = self.arena_size();
        if !(0.0..=size).contains(&x) || !(0.0..=size).contains(&y) {
            issues.push(format!("start position ({x}, {y}) lies outside the arena"));
        }
        issues
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Clearance thresholds enforced by the clearance checker.
///
/// The degradation ladder relaxes these one step at a time. The angular
/// supplement is never relaxed.
///
/// # Example
///
/// ```
/// use planner_types::SafetyMargins;
///
/// let margins = SafetyMargins::default();
/// assert_eq!(margins.turning_obstacle(), 45.0);
/// assert!(margins.check_edge());
///
/// let relaxed = margins.with_check_edge(false);
/// assert!(!relaxed.check_edge());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SafetyMargins {
    /// Extra standoff between a landing cell center and its goal pose.
    landing_supplement: f64,
    /// Minimum distance from a straight run to the arena edges.
    edge: f64,
    /// Minimum distance from a straight run to an obstacle center.
    obstacle: f64,
    /// Minimum distance from a turning center to the arena edges.
    turning_edge: f64,
    /// Minimum distance from a turning center to an obstacle inside the sweep.
    turning_obstacle: f64,
    /// Whether turning centers are checked against the edges at all.
    check_edge: bool,
    /// Angular widening of every arc sweep, in radians.
    angle_supplement: f64,
}

impl SafetyMargins {
    /// Creates the default margins.
    ///
    /// Defaults:
    /// - Landing supplement: 10 cm
    /// - Edge: 3 cm
    /// - Obstacle: 15 cm
    /// - Turning edge: 30 cm
    /// - Turning obstacle: 45 cm
    /// - Edge checking: enabled
    /// - Angular supplement: 0 rad
    #[must_use]
    pub const fn new() -> Self {
        Self {
            landing_supplement: 10.0,
            edge: 3.0,
            obstacle: 15.0,
            turning_edge: 30.0,
            turning_obstacle: 45.0,
            check_edge: true,
            angle_supplement: 0.0,
        }
    }

    /// Sets the landing supplement.
    #[must_use]
    pub const fn with_landing_supplement(mut self, value: f64) -> Self {
        self.landing_supplement = value;
        self
    }

    /// Sets the straight-to-edge clearance.
    #[must_use]
    pub const fn with_edge(mut self, value: f64) -> Self {
        self.edge = value;
        self
    }

    /// Sets the straight-to-obstacle clearance.
    #[must_use]
    pub const fn with_obstacle(mut self, value: f64) -> Self {
        self.obstacle = value;
        self
    }

    /// Sets the turning-center-to-edge clearance.
    #[must_use]
    pub const fn with_turning_edge(mut self, value: f64) -> Self {
        self.turning_edge = value;
        self
    }

    /// Sets the turning-center-to-obstacle clearance.
    #[must_use]
    pub const fn with_turning_obstacle(mut self, value: f64) -> Self {
        self.turning_obstacle = value;
        self
    }

    /// Enables or disables the turning-edge check.
    #[must_use]
    pub const fn with_check_edge(mut self, enabled: bool) -> Self {
        self.check_edge = enabled;
        self
    }

    /// Sets the angular supplement in radians.
    #[must_use]
    pub const fn with_angle_supplement(mut self, radians: f64) -> Self {
        self.angle_supplement = radians;
        self
    }

    /// Returns the landing supplement.
    #[must_use]
    pub const fn landing_supplement(&self) -> f64 {
        self.landing_supplement
    }

    /// Returns the straight-to-edge clearance.
    #[must_use]
    pub const fn edge(&self) -> f64 {
        self.edge
    }

    /// Returns the straight-to-obstacle clearance.
    #[must_use]
    pub const fn obstacle(&self) -> f64 {
        self.obstacle
    }

    /// Returns the turning-center-to-edge clearance.
    #[must_use]
    pub const fn turning_edge(&self) -> f64 {
        self.turning_edge
    }

    /// Returns the turning-center-to-obstacle clearance.
    #[must_use]
    pub const fn turning_obstacle(&self) -> f64 {
        self.turning_obstacle
    }

    /// Returns whether the turning-edge check is enabled.
    #[must_use]
    pub const fn check_edge(&self) -> bool {
        self.check_edge
    }

    /// Returns the angular supplement in radians.
    #[must_use]
    pub const fn angle_supplement(&self) -> f64 {
        self.angle_supplement
    }

    /// Validates the margins and returns any issues.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for (name, value) in [
            ("landing_supplement", self.landing_supplement),
            ("edge", self.edge),
            ("obstacle", self.obstacle),
            ("turning_edge", self.turning_edge),
            ("turning_obstacle", self.turning_obstacle),
            ("angle_supplement", self.angle_supplement),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                issues.push(format!("{name} must be a non-negative finite value, got {value}"));
            }
        }
        issues
    }
}

impl Default for SafetyMargins {
    fn default() -> Self {
        Self::new()
    }
}

/// Tour search algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStrategy {
    /// Recursive enumeration of every visiting order.
    #[default]
    Exhaustive,
    /// Dynamic programming over `(visited set, current goal)`.
    ///
    /// Same result as [`SearchStrategy::Exhaustive`] in `O(2^n n^2)`.
    Memoized,
}

/// Configuration for the tour solver.
///
/// Defaults: exhaustive search, at most 10 obstacle goals, no timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TourConfig {
    /// Search algorithm.
    strategy: SearchStrategy,
    /// Maximum number of obstacle goals.
    max_goals: Option<usize>,
    /// Search deadline.
    timeout: Option<Duration>,
}

impl TourConfig {
    /// Creates the default tour configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strategy: SearchStrategy::Exhaustive,
            max_goals: Some(10),
            timeout: None,
        }
    }

    /// Sets the search strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the goal ceiling.
    #[must_use]
    pub const fn with_max_goals(mut self, max: usize) -> Self {
        self.max_goals = Some(max);
        self
    }

    /// Removes the goal ceiling.
    #[must_use]
    pub const fn without_max_goals(mut self) -> Self {
        self.max_goals = None;
        self
    }

    /// Sets the timeout duration.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Removes the timeout.
    #[must_use]
    pub const fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Returns the search strategy.
    #[must_use]
    pub const fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Returns the goal ceiling, if set.
    #[must_use]
    pub const fn max_goals(&self) -> Option<usize> {
        self.max_goals
    }

    /// Returns the timeout duration, if set.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for TourConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Output form of the command encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandFormat {
    /// Bare move tokens and scan markers.
    #[default]
    Tokens,
    /// Destination tags and JSON records with the vehicle position.
    Annotated,
}

/// Complete planner configuration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    vehicle: VehicleConfig,
    arena: ArenaConfig,
    margins: SafetyMargins,
    tour: TourConfig,
    format: CommandFormat,
}

impl PlannerConfig {
    /// Creates the default planner configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the vehicle configuration.
    #[must_use]
    pub fn with_vehicle(mut self, vehicle: VehicleConfig) -> Self {
        self.vehicle = vehicle;
        self
    }

    /// Sets the arena configuration.
    #[must_use]
    pub fn with_arena(mut self, arena: ArenaConfig) -> Self {
        self.arena = arena;
        self
    }

    /// Sets the initial safety margins.
    #[must_use]
    pub fn with_margins(mut self, margins: SafetyMargins) -> Self {
        self.margins = margins;
        self
    }

    /// Sets the tour configuration.
    #[must_use]
    pub fn with_tour(mut self, tour: TourConfig) -> Self {
        self.tour = tour;
        self
    }

    /// Sets the command output format.
    #[must_use]
    pub const fn with_format(mut self, format: CommandFormat) -> Self {
        self.format = format;
        self
    }

    /// Returns the vehicle configuration.
    #[must_use]
    pub const fn vehicle(&self) -> &VehicleConfig {
        &self.vehicle
    }

    /// Returns the arena configuration.
    #[must_use]
    pub const fn arena(&self) -> &ArenaConfig {
        &self.arena
    }

    /// Returns the initial safety margins.
    #[must_use]
    pub const fn margins(&self) -> &SafetyMargins {
        &self.margins
    }

    /// Returns the tour configuration.
    #[must_use]
    pub const fn tour(&self) -> &TourConfig {
        &self.tour
    }

    /// Returns the command output format.
    #[must_use]
    pub const fn format(&self) -> CommandFormat {
        self.format
    }

    /// Validates every section and returns any issues.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = self.vehicle.validate();
        issues.extend(self.arena.validate());
        issues.extend(self.margins.validate());
        if self.tour.max_goals == Some(0) {
            issues.push("max_goals must be positive when set".to_string());
        }
        issues
    }
}
