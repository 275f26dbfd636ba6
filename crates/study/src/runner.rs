//! The raster-study runner.

use janus_filter::filter_sequence;
use janus_grid::{moving_window, GridAxis, ParameterGrid};
use janus_observation::ObservationModel;
use janus_raster::{expand, RasterSpec};
use janus_transition::{HyperKind, TransitionModel};
use ndarray::{Array1, Array2};
use tracing::debug;

use crate::accumulate::{log_sum_exp, WeightedPosteriorSum};
use crate::error::StudyError;
use crate::options::FitOptions;
use crate::outcome::StudyOutcome;

/// A study that repeats sequential inference over every admissible
/// combination of the transition model's change-point or break-point
/// times, plus any extra hyperparameter axes, and aggregates the runs
/// into an evidence-weighted average model.
///
/// The transition model passed to [`RasterStudy::new`] acts as a
/// prototype: its declared hyperparameters define the raster axes, and
/// for every admissible tuple a clone of the prototype is rebound to the
/// tuple's values and handed to the sequential filter. The parameter grid
/// defaults to the observation model's own discretization.
///
/// # Example
///
/// ```ignore
/// use janus_observation::Poisson;
/// use janus_study::{FitOptions, RasterStudy};
/// use janus_transition::ChangePoint;
///
/// let study = RasterStudy::new(Poisson::new(), ChangePoint::new(0.0)?)?
///     .with_grid(grid);
/// let outcome = study.fit(&counts, &FitOptions::new())?;
/// ```
#[derive(Debug, Clone)]
pub struct RasterStudy<O, T> {
    observation: O,
    transition: T,
    grid: ParameterGrid,
    extra_axes: Vec<GridAxis>,
}

impl<O, T> RasterStudy<O, T>
where
    O: ObservationModel,
    T: TransitionModel + Clone,
{
    /// Creates a study over the observation model's default parameter
    /// grid.
    ///
    /// # Errors
    ///
    /// Propagates grid construction failures from the observation model's
    /// default axes.
    pub fn new(observation: O, transition: T) -> Result<Self, StudyError> {
        let grid = ParameterGrid::new(observation.default_axes())?;
        Ok(Self {
            observation,
            transition,
            grid,
            extra_axes: Vec::new(),
        })
    }

    /// Replaces the parameter grid.
    pub fn with_grid(mut self, grid: ParameterGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Appends an extra continuous hyperparameter axis to scan. The axis
    /// name must match a continuous hyperparameter declared by the
    /// transition model; values are bound by declaration order after the
    /// structural axes.
    pub fn with_axis(mut self, axis: GridAxis) -> Self {
        self.extra_axes.push(axis);
        self
    }

    /// Returns the parameter grid in use.
    pub fn grid(&self) -> &ParameterGrid {
        &self.grid
    }

    /// Runs the full raster study on a raw data series.
    ///
    /// Segments the series, builds the raster from the transition model's
    /// declared hyperparameters, runs the sequential filter once per
    /// admissible tuple, and aggregates the runs into a [`StudyOutcome`].
    /// A filter failure for any tuple aborts the whole fit; a partial
    /// aggregate would silently skew every evidence-weighted quantity.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`StudyError::Grid`] | series shorter than one segment |
    /// | [`StudyError::Raster`] | unsupported hyperparameter structure, or no admissible tuple |
    /// | [`StudyError::Transition`] | a tuple could not be bound to the model |
    /// | [`StudyError::Filter`] | the sequential filter failed for one tuple |
    /// | [`StudyError::PriorWeightCount`] and friends | malformed prior weights |
    #[tracing::instrument(skip_all, fields(n = raw_data.len()))]
    pub fn fit(&self, raw_data: &[f64], options: &FitOptions) -> Result<StudyOutcome, StudyError> {
        let data = moving_window(raw_data, self.observation.segment_length())?;
        let descriptors = self.transition.hyper_parameters();
        let raster = RasterSpec::build(&descriptors, data.len(), &self.extra_axes)?;
        let n_valid = raster.valid_tuples().nrows();
        let n_structural = raster.n_structural();
        let log_prior = options.normalized_log_weights(n_valid)?;
        debug!(
            n_valid,
            n_total = raster.len(),
            t_len = data.len(),
            "raster built"
        );

        // Raster columns map onto the declaration vector: structural axes
        // onto the structural declarations in order, extra axes onto the
        // first unclaimed continuous declaration with a matching name.
        // Hyperparameters that are not scanned keep their prototype value.
        let structural_slots: Vec<usize> = descriptors
            .iter()
            .enumerate()
            .filter(|(_, d)| d.kind != HyperKind::Continuous)
            .map(|(i, _)| i)
            .collect();
        let mut claimed = vec![false; descriptors.len()];
        let mut extra_slots = Vec::with_capacity(self.extra_axes.len());
        for axis in &self.extra_axes {
            let slot = descriptors
                .iter()
                .enumerate()
                .position(|(i, d)| {
                    d.kind == HyperKind::Continuous && !claimed[i] && d.name == axis.name()
                })
                .ok_or_else(|| StudyError::UnknownHyperParameter {
                    name: axis.name().to_string(),
                })?;
            claimed[slot] = true;
            extra_slots.push(slot);
        }

        let forward_only = options.forward_only() || options.evidence_only();
        let mut log_evidences = Vec::with_capacity(n_valid);
        let mut local_evidences: Vec<Array1<f64>> = Vec::with_capacity(n_valid);
        let mut posterior_sum = WeightedPosteriorSum::new();

        for (tuple, values) in raster.valid_tuples().rows().into_iter().enumerate() {
            let mut bound: Vec<f64> = descriptors.iter().map(|d| d.value).collect();
            for (col, &slot) in structural_slots.iter().enumerate() {
                bound[slot] = values[col];
            }
            for (col, &slot) in extra_slots.iter().enumerate() {
                bound[slot] = values[n_structural + col];
            }
            let mut model = self.transition.clone();
            model.bind_hyper_parameters(&bound)?;
            let run = filter_sequence(&data, &self.grid, &self.observation, &model, forward_only)
                .map_err(|source| StudyError::Filter { tuple, source })?;
            if !options.evidence_only() {
                posterior_sum.add(run.log_evidence + log_prior[tuple], run.posterior_sequence);
            }
            log_evidences.push(run.log_evidence);
            local_evidences.push(run.local_evidence);
        }

        // Posterior weights of the tuples: exp(log evidence + log prior),
        // computed against the maximum so very negative log-evidences
        // survive, normalized to sum to 1 over the valid tuples.
        let weighted: Vec<f64> = log_evidences
            .iter()
            .zip(&log_prior)
            .map(|(le, lp)| le + lp)
            .collect();
        let log_evidence = log_sum_exp(&weighted);
        let max = weighted.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut tuple_weights: Array1<f64> =
            weighted.iter().map(|w| (w - max).exp()).collect();
        let weight_sum = tuple_weights.sum();
        tuple_weights /= weight_sum;
        debug!(log_evidence, "aggregated {} filter runs", n_valid);

        let hyper_distribution = expand(&tuple_weights, raster.mask())?;

        let t_len = data.len();
        let mut local_evidence = Array1::zeros(t_len);
        for (weight, local) in tuple_weights.iter().zip(&local_evidences) {
            local_evidence.scaled_add(*weight, local);
        }

        let (average_posterior, posterior_means) = if options.evidence_only() {
            (None, None)
        } else {
            let average = posterior_sum
                .into_normalized()
                .expect("at least one tuple with positive weight was accumulated");
            let meshes: Vec<_> = (0..self.grid.dim()).map(|d| self.grid.axis_mesh(d)).collect();
            let mut means = Array2::zeros((self.grid.dim(), t_len));
            for (t, posterior) in average.iter().enumerate() {
                for (d, mesh) in meshes.iter().enumerate() {
                    means[[d, t]] = (posterior * mesh).sum();
                }
            }
            (Some(average), Some(means))
        };

        Ok(StudyOutcome {
            grid: self.grid.clone(),
            raster,
            average_posterior,
            hyper_distribution,
            log_evidence,
            local_evidence,
            posterior_means,
        })
    }
}
