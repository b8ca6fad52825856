//! Error types for geometry operations.

/// Errors that can occur in geometric constructions.
///
/// Most kernel functions are total; only constructions that divide by a
/// vector norm or require a particular circle separation can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum GeometryError {
    /// A zero-length vector was normalized.
    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,

    /// Two circles are too close together or too far apart for the construction.
    #[error("circle separation {distance} outside valid window [{min}, {max}]")]
    OutOfWindow {
        /// Distance between the circle centers.
        distance: f64,
        /// Smallest admissible separation.
        min: f64,
        /// Largest admissible separation.
        max: f64,
    },
}

impl GeometryError {
    /// Returns `true` if the construction failed on a separation window.
    ///
    /// # Example
    ///
    /// ```
    /// use arena_geom::GeometryError;
    ///
    /// let error = GeometryError::OutOfWindow { distance: 10.0, min: 62.0, max: f64::INFINITY };
    /// assert!(error.is_out_of_window());
    /// assert!(!GeometryError::DegenerateVector.is_out_of_window());
    /// ```
    #[must_use]
    pub const fn is_out_of_window(&self) -> bool {
        matches!(self, Self::OutOfWindow { .. })
    }
}
