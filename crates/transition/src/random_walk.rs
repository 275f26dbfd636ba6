//! Gaussian random-walk transition model.

use janus_grid::ParameterGrid;
use ndarray::{ArrayD, Axis};

use crate::error::TransitionError;
use crate::model::{check_shape, HyperKind, HyperParameter, TransitionModel};

/// Gradual parameter diffusion: between time steps each parameter takes an
/// independent Gaussian step with standard deviation `sigma` (in parameter
/// units).
///
/// On the discretized grid the prediction step becomes a separable
/// convolution with a truncated Gaussian kernel along every axis, with
/// `sigma` converted to lattice units via the axis spacing. Reflecting
/// boundaries keep the total probability mass conserved. `sigma = 0`
/// degenerates to the identity, i.e. [`Static`](crate::Static) behavior.
///
/// Declares one continuous hyperparameter, `sigma`, so a raster study can
/// scan the diffusion magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianRandomWalk {
    sigma: f64,
}

impl GaussianRandomWalk {
    /// Creates a random-walk model with step standard deviation `sigma`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::InvalidSigma`] if `sigma` is negative,
    /// NaN, or infinite.
    pub fn new(sigma: f64) -> Result<Self, TransitionError> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(TransitionError::InvalidSigma { value: sigma });
        }
        Ok(Self { sigma })
    }

    /// Returns the step standard deviation.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

/// Reflects an out-of-range index into `0..n` (half-sample symmetric
/// boundary: `-1` maps to `0`, `n` maps to `n - 1`).
fn reflect(index: isize, n: usize) -> usize {
    let period = 2 * n as isize;
    let mut m = index % period;
    if m < 0 {
        m += period;
    }
    if m < n as isize {
        m as usize
    } else {
        (period - 1 - m) as usize
    }
}

/// Normalized truncated-Gaussian kernel for a lattice-unit sigma.
fn kernel(sigma_lattice: f64, n: usize) -> Vec<f64> {
    let radius = ((4.0 * sigma_lattice).ceil() as usize).clamp(1, n.saturating_sub(1).max(1));
    let mut weights = Vec::with_capacity(2 * radius + 1);
    for k in -(radius as isize)..=(radius as isize) {
        let z = k as f64 / sigma_lattice;
        weights.push((-0.5 * z * z).exp());
    }
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}

/// Convolves every lane of `arr` along `axis` with the symmetric `kernel`,
/// reflecting at the boundaries.
fn convolve_axis(arr: &mut ArrayD<f64>, axis: usize, kernel: &[f64]) {
    let radius = (kernel.len() / 2) as isize;
    let mut buffer = Vec::new();
    for mut lane in arr.lanes_mut(Axis(axis)) {
        let n = lane.len();
        buffer.clear();
        buffer.extend(lane.iter().copied());
        for i in 0..n {
            let mut acc = 0.0;
            for (k, &w) in kernel.iter().enumerate() {
                let offset = i as isize + k as isize - radius;
                acc += w * buffer[reflect(offset, n)];
            }
            lane[i] = acc;
        }
    }
}

impl TransitionModel for GaussianRandomWalk {
    fn hyper_parameters(&self) -> Vec<HyperParameter> {
        vec![HyperParameter::new("sigma", self.sigma, HyperKind::Continuous)]
    }

    fn bind_hyper_parameters(&mut self, values: &[f64]) -> Result<(), TransitionError> {
        if values.len() != 1 {
            return Err(TransitionError::HyperParameterCount {
                expected: 1,
                got: values.len(),
            });
        }
        if !values[0].is_finite() || values[0] < 0.0 {
            return Err(TransitionError::InvalidSigma { value: values[0] });
        }
        self.sigma = values[0];
        Ok(())
    }

    fn propagate(
        &self,
        posterior: &ArrayD<f64>,
        grid: &ParameterGrid,
        _t: usize,
    ) -> Result<ArrayD<f64>, TransitionError> {
        check_shape(posterior, grid)?;
        let mut out = posterior.clone();
        if self.sigma == 0.0 {
            return Ok(out);
        }
        for d in 0..grid.dim() {
            let spacing = grid.spacing(d);
            if spacing == 0.0 {
                // Single-point axis: nothing to diffuse into.
                continue;
            }
            let sigma_lattice = self.sigma / spacing;
            if sigma_lattice == 0.0 {
                continue;
            }
            let k = kernel(sigma_lattice, grid.shape()[d]);
            convolve_axis(&mut out, d, &k);
        }
        Ok(out)
    }

    fn boxed_clone(&self) -> Box<dyn TransitionModel> {
        Box::new(self.clone())
    }
}
