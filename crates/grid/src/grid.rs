//! D-dimensional parameter grids.

use ndarray::{ArrayD, Array1, IxDyn};

use crate::axis::GridAxis;
use crate::error::GridError;

/// A discretized parameter space: an ordered tuple of [`GridAxis`] values.
///
/// Posterior distributions over the parameter space are `ndarray` arrays
/// shaped like the grid, one probability value per grid point. The axis
/// order is fixed for the lifetime of a study; axis `d` of a posterior
/// array always corresponds to axis `d` of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGrid {
    axes: Vec<GridAxis>,
    values: Vec<Array1<f64>>,
}

impl ParameterGrid {
    /// Creates a grid from an ordered list of axes.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyGrid`] if `axes` is empty.
    pub fn new(axes: Vec<GridAxis>) -> Result<Self, GridError> {
        if axes.is_empty() {
            return Err(GridError::EmptyGrid);
        }
        let values = axes.iter().map(|a| a.values()).collect();
        Ok(Self { axes, values })
    }

    /// Returns the axes in grid order.
    pub fn axes(&self) -> &[GridAxis] {
        &self.axes
    }

    /// Returns the number of axes (the parameter dimension).
    pub fn dim(&self) -> usize {
        self.axes.len()
    }

    /// Returns the number of grid points per axis.
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(|a| a.steps()).collect()
    }

    /// Returns the total number of grid points.
    pub fn len(&self) -> usize {
        self.axes.iter().map(|a| a.steps()).product()
    }

    /// Returns `true` if the grid has no points. Never true for a
    /// successfully constructed grid.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the precomputed values of axis `d`.
    ///
    /// # Panics
    ///
    /// Panics if `d` is not a valid axis index.
    pub fn axis_values(&self, d: usize) -> &Array1<f64> {
        &self.values[d]
    }

    /// Returns the spacing of axis `d` (0.0 for a single-step axis).
    ///
    /// # Panics
    ///
    /// Panics if `d` is not a valid axis index.
    pub fn spacing(&self, d: usize) -> f64 {
        self.axes[d].spacing()
    }

    /// Returns the parameter coordinates of the grid point at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexDimension`] if `index` has the wrong
    /// number of coordinates and [`GridError::IndexOutOfRange`] if any
    /// coordinate exceeds its axis.
    pub fn point(&self, index: &[usize]) -> Result<Vec<f64>, GridError> {
        if index.len() != self.dim() {
            return Err(GridError::IndexDimension {
                expected: self.dim(),
                got: index.len(),
            });
        }
        let mut coords = Vec::with_capacity(index.len());
        for (d, &i) in index.iter().enumerate() {
            if i >= self.axes[d].steps() {
                return Err(GridError::IndexOutOfRange {
                    axis: d,
                    index: i,
                    steps: self.axes[d].steps(),
                });
            }
            coords.push(self.values[d][i]);
        }
        Ok(coords)
    }

    /// Returns the discrete-uniform distribution over the grid: every entry
    /// equals `1 / len()`. Used as the filter's default prior and as the
    /// reset distribution of change-point transition models.
    pub fn flat_prior(&self) -> ArrayD<f64> {
        let n = self.len();
        ArrayD::from_elem(IxDyn(&self.shape()), 1.0 / n as f64)
    }

    /// Returns a grid-shaped array holding the coordinate of axis `d` at
    /// every grid point (the meshgrid component of axis `d`). Used for
    /// probability-weighted first moments.
    ///
    /// # Panics
    ///
    /// Panics if `d` is not a valid axis index.
    pub fn axis_mesh(&self, d: usize) -> ArrayD<f64> {
        let shape = self.shape();
        ArrayD::from_shape_fn(IxDyn(&shape), |ix| self.values[d][ix[d]])
    }
}
