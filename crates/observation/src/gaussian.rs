//! Gaussian observation model.

use janus_grid::{GridAxis, ParameterGrid};
use ndarray::{ArrayD, ArrayView1, IxDyn};

use crate::error::ObservationError;
use crate::model::{check_inputs, ObservationModel};

/// Gaussian observation model with unknown mean and standard deviation.
///
/// Subsequent data points are independent draws from a normal distribution;
/// the two parameters are the mean and the standard deviation. As for
/// [`Ar1`](crate::Ar1), the standard-deviation axis must stay strictly
/// positive across the grid.
#[derive(Debug, Clone, Default)]
pub struct Gaussian {
    uninformative: Option<ArrayD<f64>>,
}

impl Gaussian {
    /// Creates a Gaussian observation model.
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

impl ObservationModel for Gaussian {
    fn segment_length(&self) -> usize {
        1
    }

    fn parameter_names(&self) -> &[&'static str] {
        &["mean", "std"]
    }

    fn default_axes(&self) -> Vec<GridAxis> {
        vec![
            GridAxis::new("mean", -1.0, 1.0, 200).expect("static axis bounds are valid"),
            GridAxis::new("std", 0.005, 1.0, 200).expect("static axis bounds are valid"),
        ]
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
        let min_std = grid.axis_values(1).iter().copied().fold(f64::INFINITY, f64::min);
        if min_std <= 0.0 {
            return Err(ObservationError::NonPositiveScale { value: min_std });
        }
        let x = segment[0];
        let mean_values = grid.axis_values(0);
        let std_values = grid.axis_values(1);
        let ln_two_pi = (2.0 * std::f64::consts::PI).ln();
        Ok(ArrayD::from_shape_fn(IxDyn(&grid.shape()), |ix| {
            let mu = mean_values[ix[0]];
            let sigma = std_values[ix[1]];
            let residual = x - mu;
            (-residual * residual / (2.0 * sigma * sigma) - 0.5 * (ln_two_pi + 2.0 * sigma.ln()))
                .exp()
        }))
    }
}
