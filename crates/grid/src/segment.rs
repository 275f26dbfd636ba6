//! Moving-window segmentation of raw time series.

use ndarray::{Array2, ArrayView1};

use crate::error::GridError;

/// Sentinel for a missing observation.
pub const MISSING: f64 = f64::NAN;

/// Returns `true` if `x` is the missing-data sentinel.
pub fn is_missing(x: f64) -> bool {
    x.is_nan()
}

/// A raw series segmented into overlapping fixed-length windows.
///
/// Row `t` holds the data segment consumed by the observation model at time
/// step `t`; the number of rows defines the number of inference time steps
/// `T`, which in turn bounds the domain of change-point and break-point
/// hyperparameters.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedData {
    segments: Array2<f64>,
}

impl FormattedData {
    /// Returns the number of time steps `T`.
    pub fn len(&self) -> usize {
        self.segments.nrows()
    }

    /// Returns `true` if there are no time steps.
    pub fn is_empty(&self) -> bool {
        self.segments.nrows() == 0
    }

    /// Returns the segment length.
    pub fn segment_length(&self) -> usize {
        self.segments.ncols()
    }

    /// Returns the data segment at time step `t`.
    ///
    /// # Panics
    ///
    /// Panics if `t >= len()`.
    pub fn segment(&self, t: usize) -> ArrayView1<'_, f64> {
        self.segments.row(t)
    }
}

/// Segments a raw series into overlapping windows of `segment_length`
/// consecutive samples, producing `raw.len() - segment_length + 1` segments.
///
/// Missing values (NaN) pass through untouched; the observation models
/// decide how to treat them.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`GridError::ZeroSegmentLength`] | `segment_length == 0` |
/// | [`GridError::SeriesTooShort`] | `raw.len() < segment_length` |
///
/// # Example
///
/// ```
/// use janus_grid::moving_window;
///
/// let data = moving_window(&[1.0, 2.0, 3.0, 4.0], 2).unwrap();
/// assert_eq!(data.len(), 3);
/// assert_eq!(data.segment(1).to_vec(), vec![2.0, 3.0]);
/// ```
pub fn moving_window(raw: &[f64], segment_length: usize) -> Result<FormattedData, GridError> {
    if segment_length == 0 {
        return Err(GridError::ZeroSegmentLength);
    }
    if raw.len() < segment_length {
        return Err(GridError::SeriesTooShort {
            n: raw.len(),
            segment_length,
        });
    }
    let t_len = raw.len() - segment_length + 1;
    let segments = Array2::from_shape_fn((t_len, segment_length), |(t, j)| raw[t + j]);
    Ok(FormattedData { segments })
}
