//! Error types for the janus-observation crate.

/// Error type for all fallible operations in the janus-observation crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ObservationError {
    /// Returned when a data segment has the wrong length for the model.
    #[error("segment has {got} values, model requires {expected}")]
    SegmentLength {
        /// Segment length required by the model.
        expected: usize,
        /// Segment length provided.
        got: usize,
    },

    /// Returned when the parameter grid dimension does not match the model.
    #[error("grid has {got} axes, model has {expected} parameters")]
    GridDimension {
        /// Parameter count of the model.
        expected: usize,
        /// Axis count of the grid.
        got: usize,
    },

    /// Returned when a configured uninformative likelihood does not match
    /// the grid shape.
    #[error("uninformative likelihood has shape {got:?}, grid has shape {expected:?}")]
    UninformativeShape {
        /// Shape of the grid.
        expected: Vec<usize>,
        /// Shape of the configured array.
        got: Vec<usize>,
    },

    /// Returned when a Poisson observation is negative, infinite, or not
    /// an integer.
    #[error("Poisson count must be a non-negative integer, got {value}")]
    InvalidCount {
        /// Offending observation.
        value: f64,
    },

    /// Returned when a Poisson rate grid contains negative values.
    #[error("Poisson rate grid must be non-negative, found {value}")]
    NegativeRate {
        /// Offending grid value.
        value: f64,
    },

    /// Returned when a noise-amplitude or standard-deviation grid contains
    /// values at or below zero (the density is singular there).
    #[error("scale parameter grid must be strictly positive, found {value}")]
    NonPositiveScale {
        /// Offending grid value.
        value: f64,
    },
}
