//! Simultaneous combination of transition models.

use janus_grid::ParameterGrid;
use ndarray::ArrayD;

use crate::error::TransitionError;
use crate::model::{HyperKind, HyperParameter, TransitionModel};

/// Simultaneous combination: every prediction step applies all sub-models'
/// kernels in turn.
///
/// This is how a study scans several change-points at once (one
/// [`ChangePoint`](crate::ChangePoint) sub-model per hypothesized change),
/// or mixes gradual diffusion with abrupt resets. Declared hyperparameters
/// are the concatenation of the sub-models' declarations in sub-model
/// order.
#[derive(Debug, Clone)]
pub struct Combined {
    models: Vec<Box<dyn TransitionModel>>,
}

impl Combined {
    /// Creates a combined model from the given sub-models.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::SerialArity`] if fewer than two
    /// sub-models are given (a combination of one model is the model
    /// itself).
    pub fn new(models: Vec<Box<dyn TransitionModel>>) -> Result<Self, TransitionError> {
        if models.len() < 2 {
            return Err(TransitionError::SerialArity {
                models: models.len(),
                breaks: 0,
            });
        }
        Ok(Self { models })
    }
}

impl TransitionModel for Combined {
    fn hyper_parameters(&self) -> Vec<HyperParameter> {
        let mut out = Vec::new();
        for model in &self.models {
            for mut hp in model.hyper_parameters() {
                if hp.kind == HyperKind::BreakPoint {
                    hp.group += 1;
                }
                out.push(hp);
            }
        }
        out
    }

    fn bind_hyper_parameters(&mut self, values: &[f64]) -> Result<(), TransitionError> {
        let expected: usize = self
            .models
            .iter()
            .map(|m| m.hyper_parameters().len())
            .sum();
        if values.len() != expected {
            return Err(TransitionError::HyperParameterCount {
                expected,
                got: values.len(),
            });
        }
        let mut rest = values;
        for model in &mut self.models {
            let n = model.hyper_parameters().len();
            let (own, tail) = rest.split_at(n);
            model.bind_hyper_parameters(own)?;
            rest = tail;
        }
        Ok(())
    }

    fn propagate(
        &self,
        posterior: &ArrayD<f64>,
        grid: &ParameterGrid,
        t: usize,
    ) -> Result<ArrayD<f64>, TransitionError> {
        let mut out = posterior.clone();
        for model in &self.models {
            out = model.propagate(&out, grid, t)?;
        }
        Ok(out)
    }

    fn propagate_back(
        &self,
        posterior: &ArrayD<f64>,
        grid: &ParameterGrid,
        t: usize,
    ) -> Result<ArrayD<f64>, TransitionError> {
        let mut out = posterior.clone();
        for model in self.models.iter().rev() {
            out = model.propagate_back(&out, grid, t)?;
        }
        Ok(out)
    }

    fn boxed_clone(&self) -> Box<dyn TransitionModel> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change_point::ChangePoint;
    use crate::random_walk::GaussianRandomWalk;
    use crate::static_model::Static;
    use approx::assert_relative_eq;
    use janus_grid::GridAxis;
    use ndarray::IxDyn;

    fn grid() -> ParameterGrid {
        ParameterGrid::new(vec![GridAxis::new("x", 0.0, 1.0, 9).unwrap()]).unwrap()
    }

    fn two_change_points() -> Combined {
        Combined::new(vec![
            Box::new(ChangePoint::new(2.0).unwrap()),
            Box::new(ChangePoint::new(5.0).unwrap()),
        ])
        .unwrap()
    }

    #[test]
    fn needs_at_least_two_models() {
        let err = Combined::new(vec![Box::new(Static::new())]).unwrap_err();
        assert!(matches!(err, TransitionError::SerialArity { models: 1, .. }));
    }

    #[test]
    fn declares_concatenated_hyper_parameters() {
        let model = two_change_points();
        let hp = model.hyper_parameters();
        assert_eq!(hp.len(), 2);
        assert!(hp.iter().all(|h| h.kind == HyperKind::ChangePoint));
        assert_relative_eq!(hp[0].value, 2.0);
        assert_relative_eq!(hp[1].value, 5.0);
    }

    #[test]
    fn resets_at_either_change_point() {
        let grid = grid();
        let model = two_change_points();
        let mut peaked = ArrayD::zeros(IxDyn(&[9]));
        peaked[[3]] = 1.0;
        for t in [1usize, 4] {
            let out = model.propagate(&peaked, &grid, t).unwrap();
            assert_relative_eq!(out[[0]], 1.0 / 9.0, epsilon = 1e-12);
        }
        let out = model.propagate(&peaked, &grid, 6).unwrap();
        assert_eq!(out, peaked);
    }

    #[test]
    fn bind_distributes_across_sub_models() {
        let mut model = two_change_points();
        model.bind_hyper_parameters(&[1.0, 7.0]).unwrap();
        let hp = model.hyper_parameters();
        assert_relative_eq!(hp[0].value, 1.0);
        assert_relative_eq!(hp[1].value, 7.0);
        assert!(model.bind_hyper_parameters(&[1.0]).is_err());
    }

    #[test]
    fn composes_reset_with_diffusion() {
        let grid = grid();
        let model = Combined::new(vec![
            Box::new(ChangePoint::new(3.0).unwrap()),
            Box::new(GaussianRandomWalk::new(0.05).unwrap()),
        ])
        .unwrap();
        let mut peaked = ArrayD::zeros(IxDyn(&[9]));
        peaked[[4]] = 1.0;
        // Away from the change point only the diffusion acts.
        let out = model.propagate(&peaked, &grid, 0).unwrap();
        assert!(out[[4]] < 1.0 && out[[4]] > 0.5);
        assert_relative_eq!(out.sum(), 1.0, epsilon = 1e-12);
        // At the change point the reset wins, then diffusion keeps it flat.
        let out = model.propagate(&peaked, &grid, 2).unwrap();
        for &v in out.iter() {
            assert_relative_eq!(v, 1.0 / 9.0, epsilon = 1e-9);
        }
    }
}
