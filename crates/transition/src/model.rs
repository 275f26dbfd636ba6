//! The transition model trait and hyperparameter declarations.

use janus_grid::ParameterGrid;
use ndarray::ArrayD;

use crate::error::TransitionError;

/// Classification of a declared hyperparameter.
///
/// Change-point and break-point times are *ordered-discrete*: their domain
/// is the integer time-step indices `0..T-1`, and multiple axes of the same
/// kind must be strictly increasing within a raster tuple. Everything else
/// is continuous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HyperKind {
    /// A time index after which the transition behavior changes.
    ChangePoint,
    /// A time index at which one sub-model hands over to the next.
    BreakPoint,
    /// Any other transition-model parameter.
    Continuous,
}

/// One declared, freely scannable hyperparameter of a transition model.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperParameter {
    /// Hyperparameter name (e.g. `t_change`, `sigma`).
    pub name: String,
    /// Currently bound value.
    pub value: f64,
    /// Ordered-discrete or continuous classification.
    pub kind: HyperKind,
    /// Break-point group identity: all break-points of one serial model
    /// share a group. Zero for everything else.
    pub group: usize,
}

impl HyperParameter {
    /// Creates a declaration with group 0.
    pub fn new(name: impl Into<String>, value: f64, kind: HyperKind) -> Self {
        Self {
            name: name.into(),
            value,
            kind,
            group: 0,
        }
    }
}

/// A transition model: the evolution of the parameter distribution between
/// time steps.
///
/// # Time conventions
///
/// - [`propagate`](TransitionModel::propagate) maps the posterior at time
///   `t` to the prior at time `t + 1`.
/// - [`propagate_back`](TransitionModel::propagate_back) maps a backward
///   message at time `t` to time `t - 1`; `t` is always the later index of
///   the step. The default implementation reuses `propagate`, which is
///   correct for symmetric, time-homogeneous kernels.
pub trait TransitionModel: std::fmt::Debug {
    /// Declared free hyperparameters, flattened in declaration order
    /// (nested sub-models included).
    fn hyper_parameters(&self) -> Vec<HyperParameter>;

    /// Binds one value per declared hyperparameter, in declaration order.
    ///
    /// This is the rebinding step of a raster study: the study clones a
    /// prototype model and binds each raster tuple in turn. Binding is pure
    /// configuration; range checks against the number of time steps happen
    /// in the sequential filter, which knows `T`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::HyperParameterCount`] on a length
    /// mismatch, plus the model's own domain checks.
    fn bind_hyper_parameters(&mut self, values: &[f64]) -> Result<(), TransitionError>;

    /// Computes the prior for time `t + 1` from the posterior at time `t`.
    fn propagate(
        &self,
        posterior: &ArrayD<f64>,
        grid: &ParameterGrid,
        t: usize,
    ) -> Result<ArrayD<f64>, TransitionError>;

    /// Computes the backward message for time `t - 1` from the message at
    /// time `t`.
    fn propagate_back(
        &self,
        posterior: &ArrayD<f64>,
        grid: &ParameterGrid,
        t: usize,
    ) -> Result<ArrayD<f64>, TransitionError> {
        self.propagate(posterior, grid, t)
    }

    /// Clones the model behind a trait object. Needed so serial models can
    /// own heterogeneous sub-models.
    fn boxed_clone(&self) -> Box<dyn TransitionModel>;
}

impl Clone for Box<dyn TransitionModel> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

impl TransitionModel for Box<dyn TransitionModel> {
    fn hyper_parameters(&self) -> Vec<HyperParameter> {
        (**self).hyper_parameters()
    }

    fn bind_hyper_parameters(&mut self, values: &[f64]) -> Result<(), TransitionError> {
        (**self).bind_hyper_parameters(values)
    }

    fn propagate(
        &self,
        posterior: &ArrayD<f64>,
        grid: &ParameterGrid,
        t: usize,
    ) -> Result<ArrayD<f64>, TransitionError> {
        (**self).propagate(posterior, grid, t)
    }

    fn propagate_back(
        &self,
        posterior: &ArrayD<f64>,
        grid: &ParameterGrid,
        t: usize,
    ) -> Result<ArrayD<f64>, TransitionError> {
        (**self).propagate_back(posterior, grid, t)
    }

    fn boxed_clone(&self) -> Box<dyn TransitionModel> {
        (**self).boxed_clone()
    }
}

/// Checks a time-index hyperparameter value: finite, non-negative, integral.
pub(crate) fn check_time_index(name: &str, value: f64) -> Result<(), TransitionError> {
    if !value.is_finite() {
        return Err(TransitionError::NonFiniteValue {
            name: name.to_string(),
            value,
        });
    }
    if value < 0.0 || value.fract() != 0.0 {
        return Err(TransitionError::InvalidTimeIndex {
            name: name.to_string(),
            value,
        });
    }
    Ok(())
}

/// Checks that a posterior array matches the grid shape.
pub(crate) fn check_shape(
    posterior: &ArrayD<f64>,
    grid: &ParameterGrid,
) -> Result<(), TransitionError> {
    if posterior.shape() != grid.shape().as_slice() {
        return Err(TransitionError::ShapeMismatch {
            expected: grid.shape(),
            got: posterior.shape().to_vec(),
        });
    }
    Ok(())
}
