//! Serial composition of transition models joined at break-points.

use janus_grid::ParameterGrid;
use ndarray::ArrayD;

use crate::error::TransitionError;
use crate::model::{check_time_index, HyperKind, HyperParameter, TransitionModel};

/// Serial composition: `n + 1` sub-models joined by `n` break-points.
///
/// Sub-model `k` governs the time steps from break-point `k - 1` (inclusive)
/// up to break-point `k` (exclusive); the first sub-model governs everything
/// before the first break-point, the last everything from the last
/// break-point on. A break-point is a hand-off, not a parameter jump: the
/// posterior flows through unchanged, only the kernel that evolves it
/// switches.
///
/// The break-point times are declared as ordered-discrete hyperparameters
/// (one group per serial model), followed by the sub-models' own
/// hyperparameters in sub-model order.
#[derive(Debug, Clone)]
pub struct Serial {
    models: Vec<Box<dyn TransitionModel>>,
    breaks: Vec<f64>,
}

impl Serial {
    /// Creates a serial model from sub-models and strictly increasing
    /// break-point time indices.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`TransitionError::SerialArity`] | `models.len() != breaks.len() + 1` or no break-points |
    /// | [`TransitionError::InvalidTimeIndex`] | a break-point is negative or fractional |
    /// | [`TransitionError::UnorderedBreakPoints`] | break-points not strictly increasing |
    pub fn new(
        models: Vec<Box<dyn TransitionModel>>,
        breaks: Vec<f64>,
    ) -> Result<Self, TransitionError> {
        if breaks.is_empty() || models.len() != breaks.len() + 1 {
            return Err(TransitionError::SerialArity {
                models: models.len(),
                breaks: breaks.len(),
            });
        }
        check_breaks(&breaks)?;
        Ok(Self { models, breaks })
    }

    /// Returns the break-point time indices.
    pub fn breaks(&self) -> &[f64] {
        &self.breaks
    }

    /// Index of the sub-model governing time step `t`.
    fn active(&self, t: usize) -> usize {
        self.breaks.iter().filter(|&&b| b <= t as f64).count()
    }
}

fn check_breaks(breaks: &[f64]) -> Result<(), TransitionError> {
    for &b in breaks {
        check_time_index("t_break", b)?;
    }
    for pair in breaks.windows(2) {
        if pair[0] >= pair[1] {
            return Err(TransitionError::UnorderedBreakPoints {
                prev: pair[0],
                next: pair[1],
            });
        }
    }
    Ok(())
}

impl TransitionModel for Serial {
    fn hyper_parameters(&self) -> Vec<HyperParameter> {
        let mut out: Vec<HyperParameter> = self
            .breaks
            .iter()
            .map(|&b| HyperParameter::new("t_break", b, HyperKind::BreakPoint))
            .collect();
        for model in &self.models {
            for mut hp in model.hyper_parameters() {
                // A nested serial model's break-points belong to their own
                // group; offsetting keeps them distinct from ours so the
                // raster builder can reject the unsupported nesting.
                if hp.kind == HyperKind::BreakPoint {
                    hp.group += 1;
                }
                out.push(hp);
            }
        }
        out
    }

    fn bind_hyper_parameters(&mut self, values: &[f64]) -> Result<(), TransitionError> {
        let expected: usize = self.breaks.len()
            + self
                .models
                .iter()
                .map(|m| m.hyper_parameters().len())
                .sum::<usize>();
        if values.len() != expected {
            return Err(TransitionError::HyperParameterCount {
                expected,
                got: values.len(),
            });
        }
        let (break_values, mut rest) = values.split_at(self.breaks.len());
        check_breaks(break_values)?;
        self.breaks.copy_from_slice(break_values);
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
        // The step t -> t + 1 is governed by the sub-model owning the
        // arrival step.
        let idx = self.active(t + 1);
        self.models[idx].propagate(posterior, grid, t)
    }

    fn propagate_back(
        &self,
        posterior: &ArrayD<f64>,
        grid: &ParameterGrid,
        t: usize,
    ) -> Result<ArrayD<f64>, TransitionError> {
        // The step t -> t - 1 reverses the physical step arriving at t.
        let idx = self.active(t);
        self.models[idx].propagate_back(posterior, grid, t)
    }

    fn boxed_clone(&self) -> Box<dyn TransitionModel> {
        Box::new(self.clone())
    }
}
