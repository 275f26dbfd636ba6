//! Error types for the janus-filter crate.

use janus_observation::ObservationError;
use janus_transition::TransitionError;

/// Error type for all fallible operations in the janus-filter crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FilterError {
    /// Returned when the formatted data has no time steps.
    #[error("formatted data is empty")]
    EmptyData,

    /// Returned when the data segment length does not match the
    /// observation model.
    #[error("data segments have {got} values, observation model requires {expected}")]
    SegmentLength {
        /// Segment length required by the observation model.
        expected: usize,
        /// Segment length of the formatted data.
        got: usize,
    },

    /// Returned when the parameter grid dimension does not match the
    /// observation model.
    #[error("grid has {got} axes, observation model has {expected} parameters")]
    GridDimension {
        /// Parameter count of the observation model.
        expected: usize,
        /// Axis count of the grid.
        got: usize,
    },

    /// Returned when a change-point or break-point lies outside the time
    /// range of the data. The configuration is structurally invalid, not
    /// merely improbable.
    #[error("hyperparameter '{name}' = {value} is outside the time range 0..={max}")]
    InvalidTransitionConfig {
        /// Offending hyperparameter name.
        name: String,
        /// Bound value.
        value: f64,
        /// Largest admissible time index (`T - 1`).
        max: usize,
    },

    /// Returned when a posterior normalization constant is zero, NaN, or
    /// infinite: the model assigns no probability mass to the observed
    /// data anywhere on the grid.
    #[error("degenerate posterior normalization {norm} at time step {t}")]
    DegenerateNorm {
        /// Time step at which normalization failed.
        t: usize,
        /// Offending normalization constant.
        norm: f64,
    },

    /// A likelihood evaluation failed.
    #[error(transparent)]
    Observation(#[from] ObservationError),

    /// A transition-model propagation failed.
    #[error(transparent)]
    Transition(#[from] TransitionError),
}
