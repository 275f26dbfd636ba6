//! Forward-backward inference over the parameter grid.

use janus_grid::{FormattedData, ParameterGrid};
use janus_observation::ObservationModel;
use janus_transition::{HyperKind, TransitionModel};
use ndarray::Array1;
use tracing::debug;

use crate::error::FilterError;
use crate::outcome::FilterOutcome;

/// Runs the sequential filter for one fully configured transition model.
///
/// Starting from the flat prior over `grid`, each forward step multiplies
/// in the likelihood of the current data segment, records the
/// normalization constant as that step's local evidence, renormalizes, and
/// propagates through the transition model. The total log-evidence is the
/// sum of the logs of the normalization constants (prediction-error
/// decomposition). Unless `forward_only` is set, a backward sweep then
/// refines every stored distribution into the smoothed posterior that
/// incorporates the full series.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`FilterError::EmptyData`] | `data` has no time steps |
/// | [`FilterError::SegmentLength`] | segment length does not match the observation model |
/// | [`FilterError::GridDimension`] | grid dimension does not match the observation model |
/// | [`FilterError::InvalidTransitionConfig`] | a change/break-point lies outside `0..=T-1` |
/// | [`FilterError::DegenerateNorm`] | a normalization constant is zero or non-finite |
/// | [`FilterError::Observation`] | likelihood evaluation failed |
/// | [`FilterError::Transition`] | transition propagation failed |
#[tracing::instrument(skip_all, fields(t_len = data.len(), forward_only))]
pub fn filter_sequence<O, T>(
    data: &FormattedData,
    grid: &ParameterGrid,
    observation: &O,
    transition: &T,
    forward_only: bool,
) -> Result<FilterOutcome, FilterError>
where
    O: ObservationModel + ?Sized,
    T: TransitionModel + ?Sized,
{
    validate(data, grid, observation, transition)?;
    let t_len = data.len();

    // Forward pass: filtering distributions and the evidence decomposition.
    let mut posteriors = Vec::with_capacity(t_len);
    let mut local_evidence = Array1::zeros(t_len);
    let mut log_evidence = 0.0;
    let mut prior = grid.flat_prior();
    for t in 0..t_len {
        let likelihood = observation.likelihood(grid, data.segment(t))?;
        let mut posterior = &prior * &likelihood;
        let norm = posterior.sum();
        if !norm.is_finite() || norm <= 0.0 {
            return Err(FilterError::DegenerateNorm { t, norm });
        }
        posterior /= norm;
        local_evidence[t] = norm;
        log_evidence += norm.ln();
        if t + 1 < t_len {
            prior = transition.propagate(&posterior, grid, t)?;
        }
        posteriors.push(posterior);
    }
    debug!(log_evidence, "forward pass complete");

    if !forward_only {
        // Backward pass: fold in the information from later time steps.
        // The backward message is renormalized every step; its scale
        // cancels in the smoothed posterior.
        let mut beta = grid.flat_prior();
        for t in (0..t_len.saturating_sub(1)).rev() {
            let likelihood_next = observation.likelihood(grid, data.segment(t + 1))?;
            let message = &likelihood_next * &beta;
            beta = transition.propagate_back(&message, grid, t + 1)?;
            let beta_norm = beta.sum();
            if !beta_norm.is_finite() || beta_norm <= 0.0 {
                return Err(FilterError::DegenerateNorm {
                    t,
                    norm: beta_norm,
                });
            }
            beta /= beta_norm;

            let mut smoothed = &posteriors[t] * &beta;
            let norm = smoothed.sum();
            if !norm.is_finite() || norm <= 0.0 {
                return Err(FilterError::DegenerateNorm { t, norm });
            }
            smoothed /= norm;
            posteriors[t] = smoothed;
        }
        debug!("backward pass complete");
    }

    Ok(FilterOutcome {
        posterior_sequence: posteriors,
        log_evidence,
        local_evidence,
    })
}

fn validate<O, T>(
    data: &FormattedData,
    grid: &ParameterGrid,
    observation: &O,
    transition: &T,
) -> Result<(), FilterError>
where
    O: ObservationModel + ?Sized,
    T: TransitionModel + ?Sized,
{
    if data.is_empty() {
        return Err(FilterError::EmptyData);
    }
    if data.segment_length() != observation.segment_length() {
        return Err(FilterError::SegmentLength {
            expected: observation.segment_length(),
            got: data.segment_length(),
        });
    }
    if grid.dim() != observation.parameter_names().len() {
        return Err(FilterError::GridDimension {
            expected: observation.parameter_names().len(),
            got: grid.dim(),
        });
    }
    let max = data.len() - 1;
    for hp in transition.hyper_parameters() {
        if hp.kind != HyperKind::Continuous && (hp.value < 0.0 || hp.value > max as f64) {
            return Err(FilterError::InvalidTransitionConfig {
                name: hp.name,
                value: hp.value,
                max,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use janus_grid::{moving_window, GridAxis};
    use janus_observation::Poisson;
    use janus_transition::{ChangePoint, Static};

    fn rate_grid() -> ParameterGrid {
        ParameterGrid::new(vec![GridAxis::new("lambda", 0.0, 10.0, 101).unwrap()]).unwrap()
    }

    #[test]
    fn empty_data_rejected() {
        // moving_window cannot produce empty data, so an empty series
        // already fails at segmentation; cover the segment-length check
        // instead.
        let grid = rate_grid();
        let data = moving_window(&[1.0, 2.0], 2).unwrap();
        let err = filter_sequence(&data, &grid, &Poisson::new(), &Static::new(), true).unwrap_err();
        assert!(matches!(
            err,
            FilterError::SegmentLength {
                expected: 1,
                got: 2
            }
        ));
    }

    #[test]
    fn out_of_range_change_point_rejected() {
        let grid = rate_grid();
        let data = moving_window(&[1.0, 2.0, 3.0], 1).unwrap();
        let model = ChangePoint::new(5.0).unwrap();
        let err = filter_sequence(&data, &grid, &Poisson::new(), &model, true).unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidTransitionConfig { max: 2, .. }
        ));
    }

    #[test]
    fn posteriors_are_normalized() {
        let grid = rate_grid();
        let data = moving_window(&[2.0, 3.0, 2.0, 4.0], 1).unwrap();
        for forward_only in [true, false] {
            let outcome =
                filter_sequence(&data, &grid, &Poisson::new(), &Static::new(), forward_only)
                    .unwrap();
            assert_eq!(outcome.posterior_sequence.len(), 4);
            for posterior in &outcome.posterior_sequence {
                assert_relative_eq!(posterior.sum(), 1.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn local_evidence_factorizes_total_evidence() {
        let grid = rate_grid();
        let data = moving_window(&[2.0, 3.0, 2.0, 4.0, 1.0], 1).unwrap();
        let outcome =
            filter_sequence(&data, &grid, &Poisson::new(), &Static::new(), false).unwrap();
        let recomposed: f64 = outcome.local_evidence.mapv(f64::ln).sum();
        assert_relative_eq!(recomposed, outcome.log_evidence, epsilon = 1e-10);
    }

    #[test]
    fn smoothing_sharpens_early_posteriors() {
        let grid = rate_grid();
        let data = moving_window(&[3.0, 2.0, 4.0, 3.0, 3.0, 2.0], 1).unwrap();
        let filtered =
            filter_sequence(&data, &grid, &Poisson::new(), &Static::new(), true).unwrap();
        let smoothed =
            filter_sequence(&data, &grid, &Poisson::new(), &Static::new(), false).unwrap();
        // With a static model the smoothed posterior at t = 0 equals the
        // final filtering posterior: all information flows back.
        let last = filtered.posterior_sequence.last().unwrap();
        let first_smoothed = &smoothed.posterior_sequence[0];
        for (a, b) in last.iter().zip(first_smoothed.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-8);
        }
        // The evidence is a forward-pass quantity and unaffected.
        assert_relative_eq!(
            filtered.log_evidence,
            smoothed.log_evidence,
            epsilon = 1e-12
        );
    }

    #[test]
    fn change_point_decouples_the_two_regimes() {
        let grid = rate_grid();
        // Low counts, then high counts, change at index 3.
        let data = moving_window(&[1.0, 1.0, 1.0, 8.0, 8.0, 8.0], 1).unwrap();
        let model = ChangePoint::new(3.0).unwrap();
        let outcome = filter_sequence(&data, &grid, &Poisson::new(), &model, false).unwrap();
        let mean = |t: usize| {
            (&outcome.posterior_sequence[t] * &grid.axis_mesh(0)).sum()
        };
        // Posterior mean before the change tracks the low rate, after it
        // the high rate.
        assert!(mean(2) < 3.0, "pre-change mean {}", mean(2));
        assert!(mean(3) > 5.0, "post-change mean {}", mean(3));
    }
}
