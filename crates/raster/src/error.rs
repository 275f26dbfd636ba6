//! Error types for the janus-raster crate.

/// Error type for all fallible operations in the janus-raster crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RasterError {
    /// Returned when a transition model declares both change-points and
    /// break-points. Only one structural-change kind is supported per
    /// study.
    #[error("transition model declares {change_points} change-point(s) and {break_points} break-point(s); only one kind is supported")]
    MixedStructuralKinds {
        /// Number of declared change-points.
        change_points: usize,
        /// Number of declared break-points.
        break_points: usize,
    },

    /// Returned when break-points belong to more than one serial model.
    #[error("break-points from {groups} independent serial models; only a single group is supported")]
    MultipleBreakPointGroups {
        /// Number of distinct break-point groups.
        groups: usize,
    },

    /// Returned when there are no structural-change axes and no extra
    /// axes: nothing to scan.
    #[error("no change-points, break-points, or extra raster axes to scan")]
    NothingToScan,

    /// Returned when no combination survives the strict-ordering mask,
    /// i.e. the series is too short for the requested number of ordered
    /// points.
    #[error("no admissible combination of {points} ordered point(s) in {t_len} time step(s)")]
    EmptyRaster {
        /// Number of ordered-discrete axes requested.
        points: usize,
        /// Number of time steps available.
        t_len: usize,
    },

    /// Returned when a continuous raster axis has fewer than two steps
    /// (its integration constant would be undefined).
    #[error("continuous raster axis '{name}' needs at least 2 steps, got {steps}")]
    InvalidAxis {
        /// Axis name.
        name: String,
        /// Number of steps provided.
        steps: usize,
    },

    /// Returned when a distribution has the wrong length for the raster.
    #[error("distribution has {got} values, expected {expected}")]
    LengthMismatch {
        /// Expected number of values.
        expected: usize,
        /// Number of values provided.
        got: usize,
    },

    /// Returned when an axis index is out of range.
    #[error("axis {axis} is out of range for a raster with {n_axes} axes")]
    AxisOutOfRange {
        /// Offending axis index.
        axis: usize,
        /// Number of raster axes.
        n_axes: usize,
    },

    /// Returned when a joint query names the same axis twice.
    #[error("joint query requires two distinct axes, got axis {axis} twice")]
    DuplicateAxis {
        /// Repeated axis index.
        axis: usize,
    },

    /// Returned when a duration query names a non-structural axis.
    #[error("axis {axis} is not an ordered-discrete axis (raster has {n_structural})")]
    NotStructural {
        /// Offending axis index.
        axis: usize,
        /// Number of ordered-discrete axes.
        n_structural: usize,
    },
}
