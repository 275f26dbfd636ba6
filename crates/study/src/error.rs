//! Error types for the janus-study crate.

use janus_filter::FilterError;
use janus_grid::GridError;
use janus_raster::RasterError;
use janus_transition::TransitionError;

/// Error type for all fallible operations in the janus-study crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StudyError {
    /// Grid construction or data segmentation failed.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Raster construction or a marginal query failed.
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// Binding hyperparameter values to the transition model failed.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// The sequential filter failed for one raster tuple. The whole
    /// aggregate is aborted: evidence comparison across tuples is only
    /// meaningful if every tuple was actually evaluated.
    #[error("sequential filter failed for raster tuple {tuple}: {source}")]
    Filter {
        /// Index of the offending tuple within the valid tuples.
        tuple: usize,
        /// The underlying filter failure.
        source: FilterError,
    },

    /// Returned when explicit prior weights do not match the number of
    /// valid tuples.
    #[error("expected {expected} prior weights (one per valid tuple), got {got}")]
    PriorWeightCount {
        /// Number of valid tuples.
        expected: usize,
        /// Number of weights provided.
        got: usize,
    },

    /// Returned when a prior weight is negative, NaN, or infinite.
    #[error("prior weight {index} is invalid: {value}")]
    InvalidPriorWeight {
        /// Index of the offending weight.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// Returned when all prior weights are zero.
    #[error("prior weights sum to zero")]
    ZeroPriorMass,

    /// Returned when an extra raster axis names no continuous
    /// hyperparameter of the transition model.
    #[error("extra raster axis '{name}' matches no continuous hyperparameter of the transition model")]
    UnknownHyperParameter {
        /// Name of the unmatched axis.
        name: String,
    },

    /// Returned when a change-point query is made on a study without
    /// change-points.
    #[error("study has no change-point axes")]
    NoChangePoints,

    /// Returned when a break-point query is made on a study without
    /// break-points.
    #[error("study has no break-point axes")]
    NoBreakPoints,
}
