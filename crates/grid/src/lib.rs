//! # janus-grid
//!
//! Parameter grids and data segmentation for the Janus inference engine.
//!
//! A [`ParameterGrid`] discretizes the parameter space of an observation
//! model into an ordered tuple of axes; posterior distributions are arrays
//! shaped like the grid. [`moving_window`] cuts a raw time series into the
//! overlapping, fixed-length [`FormattedData`] segments the sequential
//! filter consumes. Missing observations are carried as `NaN` and handled
//! downstream by the observation models.

mod axis;
mod error;
mod grid;
mod segment;

pub use axis::GridAxis;
pub use error::GridError;
pub use grid::ParameterGrid;
pub use segment::{is_missing, moving_window, FormattedData, MISSING};
