//! Change-point transition model.

use janus_grid::ParameterGrid;
use ndarray::ArrayD;

use crate::error::TransitionError;
use crate::model::{check_shape, check_time_index, HyperKind, HyperParameter, TransitionModel};

/// Abrupt parameter change at a single time step.
///
/// Parameters stay constant everywhere except at the change-point time
/// `t_change`, where they are re-drawn from scratch: the prior arriving at
/// `t_change` is the flat distribution over the grid, discarding everything
/// learned before. The change therefore manifests *at* index `t_change`.
///
/// `t_change` is declared as an ordered-discrete hyperparameter, which is
/// what a raster study scans to locate structural change.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangePoint {
    t_change: f64,
}

impl ChangePoint {
    /// Creates a change-point model with the change at time index
    /// `t_change`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::InvalidTimeIndex`] if `t_change` is
    /// negative or not an integer.
    pub fn new(t_change: f64) -> Result<Self, TransitionError> {
        check_time_index("t_change", t_change)?;
        Ok(Self { t_change })
    }

    /// Returns the change-point time index.
    pub fn t_change(&self) -> f64 {
        self.t_change
    }
}

impl TransitionModel for ChangePoint {
    fn hyper_parameters(&self) -> Vec<HyperParameter> {
        vec![HyperParameter::new(
            "t_change",
            self.t_change,
            HyperKind::ChangePoint,
        )]
    }

    fn bind_hyper_parameters(&mut self, values: &[f64]) -> Result<(), TransitionError> {
        if values.len() != 1 {
            return Err(TransitionError::HyperParameterCount {
                expected: 1,
                got: values.len(),
            });
        }
        check_time_index("t_change", values[0])?;
        self.t_change = values[0];
        Ok(())
    }

    fn propagate(
        &self,
        posterior: &ArrayD<f64>,
        grid: &ParameterGrid,
        t: usize,
    ) -> Result<ArrayD<f64>, TransitionError> {
        check_shape(posterior, grid)?;
        if (t + 1) as f64 == self.t_change {
            Ok(grid.flat_prior())
        } else {
            Ok(posterior.clone())
        }
    }

    fn propagate_back(
        &self,
        posterior: &ArrayD<f64>,
        grid: &ParameterGrid,
        t: usize,
    ) -> Result<ArrayD<f64>, TransitionError> {
        check_shape(posterior, grid)?;
        // Crossing the boundary backwards decouples the two regimes the
        // same way: the message for t - 1 carries no parameter information.
        if t as f64 == self.t_change {
            Ok(grid.flat_prior())
        } else {
            Ok(posterior.clone())
        }
    }

    fn boxed_clone(&self) -> Box<dyn TransitionModel> {
        Box::new(self.clone())
    }
}
