//! First-order autoregressive observation model.

use janus_grid::{GridAxis, ParameterGrid};
use ndarray::{ArrayD, ArrayView1, IxDyn};

use crate::error::ObservationError;
use crate::model::{check_inputs, ObservationModel};

/// Auto-regressive process of first order.
///
/// A simple stochastic process with exponential autocorrelation, defined
/// recursively as `d_t = r * d_(t-1) + s * e_t` with correlation
/// coefficient `r`, noise amplitude `s`, and standard-normal innovations
/// `e_t`. Each data segment holds two consecutive samples because the
/// density of `d_t` is conditioned on `d_(t-1)`:
///
/// ```text
/// p(x1 | x0, r, s) = exp(-(x1 - r*x0)^2 / (2 s^2)) / sqrt(2 pi s^2)
/// ```
///
/// The noise-amplitude axis must stay strictly positive across the grid;
/// the density is singular at `s = 0`, so the default boundaries start one
/// lattice spacing above zero.
#[derive(Debug, Clone, Default)]
pub struct Ar1 {
    uninformative: Option<ArrayD<f64>>,
}

impl Ar1 {
    /// Creates an AR1 observation model.
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

impl ObservationModel for Ar1 {
    fn segment_length(&self) -> usize {
        2
    }

    fn parameter_names(&self) -> &[&'static str] {
        &["correlation", "noise"]
    }

    fn default_axes(&self) -> Vec<GridAxis> {
        vec![
            GridAxis::new("correlation", -1.0, 1.0, 200).expect("static axis bounds are valid"),
            GridAxis::new("noise", 0.005, 1.0, 200).expect("static axis bounds are valid"),
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
        let min_noise = grid.axis_values(1).iter().copied().fold(f64::INFINITY, f64::min);
        if min_noise <= 0.0 {
            return Err(ObservationError::NonPositiveScale { value: min_noise });
        }
        let x0 = segment[0];
        let x1 = segment[1];
        let r_values = grid.axis_values(0);
        let s_values = grid.axis_values(1);
        let ln_two_pi = (2.0 * std::f64::consts::PI).ln();
        Ok(ArrayD::from_shape_fn(IxDyn(&grid.shape()), |ix| {
            let r = r_values[ix[0]];
            let s = s_values[ix[1]];
            let residual = x1 - r * x0;
            (-residual * residual / (2.0 * s * s) - 0.5 * (ln_two_pi + 2.0 * s.ln())).exp()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn small_grid() -> ParameterGrid {
        ParameterGrid::new(vec![
            GridAxis::new("correlation", -1.0, 1.0, 3).unwrap(),
            GridAxis::new("noise", 0.5, 1.5, 3).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn matches_gaussian_density() {
        let model = Ar1::new();
        let grid = small_grid();
        let pdf = model.likelihood(&grid, array![2.0, 1.0].view()).unwrap();
        // r = 1 (index 2), s = 1 (index 1): residual = 1 - 2 = -1
        let expected = (-0.5f64).exp() / (2.0 * std::f64::consts::PI).sqrt();
        assert_relative_eq!(pdf[[2, 1]], expected, epsilon = 1e-12);
        // r = 0 (index 1), s = 0.5 (index 0): residual = 1
        let expected = (-2.0f64).exp() / (2.0 * std::f64::consts::PI * 0.25).sqrt();
        assert_relative_eq!(pdf[[1, 0]], expected, epsilon = 1e-12);
    }

    #[test]
    fn perfect_prediction_peaks_at_small_noise() {
        let model = Ar1::new();
        let grid = small_grid();
        // x1 = r * x0 exactly for r = 1: density should decrease with s.
        let pdf = model.likelihood(&grid, array![1.0, 1.0].view()).unwrap();
        assert!(pdf[[2, 0]] > pdf[[2, 1]]);
        assert!(pdf[[2, 1]] > pdf[[2, 2]]);
    }

    #[test]
    fn zero_noise_grid_rejected() {
        let model = Ar1::new();
        let grid = ParameterGrid::new(vec![
            GridAxis::new("correlation", -1.0, 1.0, 3).unwrap(),
            GridAxis::new("noise", 0.0, 1.0, 3).unwrap(),
        ])
        .unwrap();
        let err = model.likelihood(&grid, array![1.0, 1.0].view()).unwrap_err();
        assert!(matches!(err, ObservationError::NonPositiveScale { .. }));
    }

    #[test]
    fn missing_either_sample_yields_uniform() {
        let model = Ar1::new();
        let grid = small_grid();
        for seg in [array![f64::NAN, 1.0], array![1.0, f64::NAN]] {
            let pdf = model.likelihood(&grid, seg.view()).unwrap();
            assert_relative_eq!(pdf.sum(), 1.0, epsilon = 1e-12);
            for &v in pdf.iter() {
                assert_relative_eq!(v, 1.0 / 9.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn default_axes_keep_noise_positive() {
        let model = Ar1::new();
        let axes = model.default_axes();
        assert_eq!(axes.len(), 2);
        assert!(axes[1].lower() > 0.0);
        assert_eq!(model.segment_length(), 2);
    }
}
