//! Error types for the janus-grid crate.

/// Error type for all fallible operations in the janus-grid crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GridError {
    /// Returned when an axis boundary is NaN or infinite.
    #[error("axis '{name}' has non-finite boundaries [{lower}, {upper}]")]
    NonFiniteBounds {
        /// Axis name.
        name: String,
        /// Lower boundary as provided.
        lower: f64,
        /// Upper boundary as provided.
        upper: f64,
    },

    /// Returned when an axis with more than one step has `lower >= upper`.
    #[error("axis '{name}' requires lower < upper, got [{lower}, {upper}]")]
    BoundsReversed {
        /// Axis name.
        name: String,
        /// Lower boundary as provided.
        lower: f64,
        /// Upper boundary as provided.
        upper: f64,
    },

    /// Returned when an axis is requested with zero steps.
    #[error("axis '{name}' has zero steps")]
    ZeroSteps {
        /// Axis name.
        name: String,
    },

    /// Returned when a single-step axis has distinct boundaries.
    #[error("single-step axis '{name}' requires lower == upper, got [{lower}, {upper}]")]
    DegenerateBounds {
        /// Axis name.
        name: String,
        /// Lower boundary as provided.
        lower: f64,
        /// Upper boundary as provided.
        upper: f64,
    },

    /// Returned when a parameter grid is built without any axes.
    #[error("parameter grid requires at least one axis")]
    EmptyGrid,

    /// Returned when a grid point index has the wrong number of coordinates.
    #[error("grid index has {got} coordinates, grid has {expected} axes")]
    IndexDimension {
        /// Number of axes of the grid.
        expected: usize,
        /// Number of coordinates provided.
        got: usize,
    },

    /// Returned when a grid point index is outside the grid shape.
    #[error("grid index {index} is out of range for axis {axis} with {steps} steps")]
    IndexOutOfRange {
        /// Offending axis.
        axis: usize,
        /// Offending index value.
        index: usize,
        /// Number of steps on that axis.
        steps: usize,
    },

    /// Returned when data is segmented with a zero segment length.
    #[error("segment length must be at least 1")]
    ZeroSegmentLength,

    /// Returned when the raw series is shorter than one segment.
    #[error("series of length {n} is too short for segments of length {segment_length}")]
    SeriesTooShort {
        /// Length of the raw series.
        n: usize,
        /// Requested segment length.
        segment_length: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_non_finite_bounds() {
        let err = GridError::NonFiniteBounds {
            name: "lambda".into(),
            lower: f64::NAN,
            upper: 1.0,
        };
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn error_series_too_short() {
        let err = GridError::SeriesTooShort {
            n: 1,
            segment_length: 2,
        };
        assert_eq!(
            err.to_string(),
            "series of length 1 is too short for segments of length 2"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<GridError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<GridError>();
    }
}
