//! Error types for the janus-transition crate.

/// Error type for all fallible operations in the janus-transition crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransitionError {
    /// Returned when the number of bound values does not match the number
    /// of declared hyperparameters.
    #[error("expected {expected} hyperparameter values, got {got}")]
    HyperParameterCount {
        /// Number of declared hyperparameters.
        expected: usize,
        /// Number of values provided.
        got: usize,
    },

    /// Returned when a bound hyperparameter value is NaN or infinite.
    #[error("hyperparameter '{name}' bound to non-finite value {value}")]
    NonFiniteValue {
        /// Hyperparameter name.
        name: String,
        /// Offending value.
        value: f64,
    },

    /// Returned when a change-point or break-point time is negative or not
    /// an integer.
    #[error("hyperparameter '{name}' must be a non-negative integer time index, got {value}")]
    InvalidTimeIndex {
        /// Hyperparameter name.
        name: String,
        /// Offending value.
        value: f64,
    },

    /// Returned when a random-walk standard deviation is negative or
    /// non-finite.
    #[error("random-walk sigma must be finite and non-negative, got {value}")]
    InvalidSigma {
        /// Offending value.
        value: f64,
    },

    /// Returned when break-points are not strictly increasing.
    #[error("break-points must be strictly increasing, got {prev} before {next}")]
    UnorderedBreakPoints {
        /// Earlier break-point.
        prev: f64,
        /// Later break-point that violates the ordering.
        next: f64,
    },

    /// Returned when a serial model is built with a mismatched number of
    /// sub-models and break-points.
    #[error("serial model requires {breaks} break-points to join {models} sub-models")]
    SerialArity {
        /// Number of sub-models provided.
        models: usize,
        /// Number of break-points provided.
        breaks: usize,
    },

    /// Returned when a posterior array does not match the grid shape.
    #[error("posterior has shape {got:?}, grid has shape {expected:?}")]
    ShapeMismatch {
        /// Shape of the grid.
        expected: Vec<usize>,
        /// Shape of the posterior array.
        got: Vec<usize>,
    },
}
