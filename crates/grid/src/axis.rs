//! Discretized axes for parameter grids and hyperparameter rasters.

use ndarray::Array1;

use crate::error::GridError;

/// One discretized axis: `steps` evenly spaced values on `[lower, upper]`.
///
/// The same type describes both parameter-grid axes (e.g. a Poisson rate
/// axis) and scannable hyperparameter axes of a raster study.
///
/// # Example
///
/// ```
/// use janus_grid::GridAxis;
///
/// let axis = GridAxis::new("lambda", 0.0, 1.0, 5).unwrap();
/// let values = axis.values();
/// assert_eq!(values.len(), 5);
/// assert_eq!(values[0], 0.0);
/// assert_eq!(values[4], 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GridAxis {
    name: String,
    lower: f64,
    upper: f64,
    steps: usize,
}

impl GridAxis {
    /// Creates a new axis with `steps` values evenly spaced on `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`GridError::NonFiniteBounds`] | `lower` or `upper` is NaN or infinite |
    /// | [`GridError::ZeroSteps`] | `steps == 0` |
    /// | [`GridError::BoundsReversed`] | `steps > 1` and `lower >= upper` |
    /// | [`GridError::DegenerateBounds`] | `steps == 1` and `lower != upper` |
    pub fn new(name: impl Into<String>, lower: f64, upper: f64, steps: usize) -> Result<Self, GridError> {
        let name = name.into();
        if !lower.is_finite() || !upper.is_finite() {
            return Err(GridError::NonFiniteBounds { name, lower, upper });
        }
        if steps == 0 {
            return Err(GridError::ZeroSteps { name });
        }
        if steps > 1 && lower >= upper {
            return Err(GridError::BoundsReversed { name, lower, upper });
        }
        if steps == 1 && lower != upper {
            return Err(GridError::DegenerateBounds { name, lower, upper });
        }
        Ok(Self {
            name,
            lower,
            upper,
            steps,
        })
    }

    /// Returns the axis name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the lower boundary.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Returns the upper boundary.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Returns the number of steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the spacing between adjacent values, or 0.0 for a
    /// single-step axis.
    pub fn spacing(&self) -> f64 {
        if self.steps < 2 {
            0.0
        } else {
            (self.upper - self.lower) / (self.steps - 1) as f64
        }
    }

    /// Returns the axis values as an inclusive linspace.
    pub fn values(&self) -> Array1<f64> {
        if self.steps == 1 {
            Array1::from_elem(1, self.lower)
        } else {
            Array1::linspace(self.lower, self.upper, self.steps)
        }
    }
}
