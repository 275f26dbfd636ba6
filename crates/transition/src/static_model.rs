//! The trivial transition model: parameters never change.

use janus_grid::ParameterGrid;
use ndarray::ArrayD;

use crate::error::TransitionError;
use crate::model::{check_shape, HyperParameter, TransitionModel};

/// Transition model for constant parameters.
///
/// The posterior passes through every prediction step unchanged. Declares
/// no hyperparameters, so it is only useful in a raster study as a
/// sub-model of a [`Serial`](crate::Serial) composition or together with a
/// [`ChangePoint`](crate::ChangePoint).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Static;

impl Static {
    /// Creates a static transition model.
    pub fn new() -> Self {
        Self
    }
}

impl TransitionModel for Static {
    fn hyper_parameters(&self) -> Vec<HyperParameter> {
        Vec::new()
    }

    fn bind_hyper_parameters(&mut self, values: &[f64]) -> Result<(), TransitionError> {
        if values.is_empty() {
            Ok(())
        } else {
            Err(TransitionError::HyperParameterCount {
                expected: 0,
                got: values.len(),
            })
        }
    }

    fn propagate(
        &self,
        posterior: &ArrayD<f64>,
        grid: &ParameterGrid,
        _t: usize,
    ) -> Result<ArrayD<f64>, TransitionError> {
        check_shape(posterior, grid)?;
        Ok(posterior.clone())
    }

    fn boxed_clone(&self) -> Box<dyn TransitionModel> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use janus_grid::GridAxis;

    fn grid() -> ParameterGrid {
        ParameterGrid::new(vec![GridAxis::new("x", 0.0, 1.0, 4).unwrap()]).unwrap()
    }

    #[test]
    fn propagate_is_identity() {
        let grid = grid();
        let prior = grid.flat_prior();
        let out = Static::new().propagate(&prior, &grid, 0).unwrap();
        assert_eq!(out, prior);
    }

    #[test]
    fn declares_no_hyper_parameters() {
        assert!(Static::new().hyper_parameters().is_empty());
    }

    #[test]
    fn bind_rejects_values() {
        let err = Static::new().bind_hyper_parameters(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            TransitionError::HyperParameterCount {
                expected: 0,
                got: 1
            }
        ));
    }

    #[test]
    fn shape_mismatch_rejected() {
        let grid = grid();
        let wrong = ParameterGrid::new(vec![GridAxis::new("x", 0.0, 1.0, 3).unwrap()])
            .unwrap()
            .flat_prior();
        let err = Static::new().propagate(&wrong, &grid, 0).unwrap_err();
        assert!(matches!(err, TransitionError::ShapeMismatch { .. }));
    }
}
