//! Poisson observation model.

use janus_grid::{GridAxis, ParameterGrid};
use ndarray::{ArrayD, ArrayView1};
use statrs::function::gamma::ln_gamma;

use crate::error::ObservationError;
use crate::model::{check_inputs, ObservationModel};

/// Poisson observation model for event-count data.
///
/// Subsequent data points are independent and Poisson distributed; the
/// single parameter is the event rate, commonly written lambda. The
/// likelihood of count `x` at rate `lambda` is
/// `lambda^x * exp(-lambda) / x!`, evaluated in log space so large counts
/// and fine grids stay finite.
///
/// # Example
///
/// ```
/// use janus_grid::{GridAxis, ParameterGrid};
/// use janus_observation::{ObservationModel, Poisson};
/// use ndarray::array;
///
/// let model = Poisson::new();
/// let grid = ParameterGrid::new(vec![GridAxis::new("lambda", 0.0, 3.0, 4).unwrap()]).unwrap();
/// let pdf = model.likelihood(&grid, array![2.0].view()).unwrap();
/// assert_eq!(pdf.len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Poisson {
    uninformative: Option<ArrayD<f64>>,
}

impl Poisson {
    /// Creates a Poisson observation model.
    pub fn new() -> Self {
        Self {
            uninformative: None,
        }
    }

    /// Sets an explicit likelihood to use for missing data instead of the
    /// discrete-uniform default.
    pub fn with_uninformative(mut self, pdf: ArrayD<f64>) -> Self {
        self.uninformative = Some(pdf);
        self
    }
}

impl ObservationModel for Poisson {
    fn segment_length(&self) -> usize {
        1
    }

    fn parameter_names(&self) -> &[&'static str] {
        &["lambda"]
    }

    fn default_axes(&self) -> Vec<GridAxis> {
        vec![GridAxis::new("lambda", 0.0, 1.0, 1000).expect("static axis bounds are valid")]
    }

    fn uninformative(&self) -> Option<&ArrayD<f64>> {
        self.uninformative.as_ref()
    }

    fn likelihood(
        &self,
        grid: &ParameterGrid,
        segment: ArrayView1<'_, f64>,
    ) -> Result<ArrayD<f64>, ObservationError> {
        if let Some(fallback) = check_inputs(self, grid, segment)? {
            return Ok(fallback);
        }
        let x = segment[0];
        if !x.is_finite() || x < 0.0 || x.fract() != 0.0 {
            return Err(ObservationError::InvalidCount { value: x });
        }
        let min_rate = grid.axis_values(0).iter().copied().fold(f64::INFINITY, f64::min);
        if min_rate < 0.0 {
            return Err(ObservationError::NegativeRate { value: min_rate });
        }
        let ln_x_factorial = ln_gamma(x + 1.0);
        let mesh = grid.axis_mesh(0);
        Ok(mesh.mapv(|rate| {
            if rate > 0.0 {
                (x * rate.ln() - rate - ln_x_factorial).exp()
            } else if x == 0.0 {
                // 0^0 * e^0 / 0! = 1
                1.0
            } else {
                0.0
            }
        }))
    }
}
