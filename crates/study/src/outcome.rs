//! The fitted state of a raster study.

use janus_grid::ParameterGrid;
use janus_raster::{duration_distribution, marginal, RasterSpec};
use janus_transition::HyperKind;
use ndarray::{Array1, Array2, ArrayD};

use crate::error::StudyError;

/// Everything a raster-study fit exposes to downstream reporting.
///
/// The hyperparameter distribution is *dense*: one entry per tuple of the
/// full raster, zero at every combination the ordering mask rejected, so
/// it reshapes by the raster's per-axis step counts for marginalization.
/// The posterior fields are absent after an evidence-only fit.
#[derive(Debug, Clone)]
pub struct StudyOutcome {
    pub(crate) grid: ParameterGrid,
    pub(crate) raster: RasterSpec,
    pub(crate) average_posterior: Option<Vec<ArrayD<f64>>>,
    pub(crate) hyper_distribution: Array1<f64>,
    pub(crate) log_evidence: f64,
    pub(crate) local_evidence: Array1<f64>,
    pub(crate) posterior_means: Option<Array2<f64>>,
}

impl StudyOutcome {
    /// Returns the parameter grid the posteriors are defined over.
    pub fn grid(&self) -> &ParameterGrid {
        &self.grid
    }

    /// Returns the raster specification (axes, tuples, mask, constants)
    /// needed to interpret the hyperparameter distribution.
    pub fn raster(&self) -> &RasterSpec {
        &self.raster
    }

    /// Returns the evidence-weighted average posterior sequence, one
    /// grid-shaped distribution per time step. `None` after an
    /// evidence-only fit.
    pub fn average_posterior(&self) -> Option<&[ArrayD<f64>]> {
        self.average_posterior.as_deref()
    }

    /// Returns the dense hyperparameter distribution over the full raster.
    pub fn hyper_distribution(&self) -> &Array1<f64> {
        &self.hyper_distribution
    }

    /// Returns the log-evidence of the evidence-weighted mixture model.
    pub fn log_evidence(&self) -> f64 {
        self.log_evidence
    }

    /// Returns the combined local evidence: the per-time-step evidence
    /// contributions of the individual configurations, weighted by the
    /// hyperparameter distribution.
    pub fn local_evidence(&self) -> &Array1<f64> {
        &self.local_evidence
    }

    /// Returns the posterior mean trajectories: row `d` holds the first
    /// moment of the averaged posterior along grid axis `d` at every time
    /// step. `None` after an evidence-only fit.
    pub fn posterior_means(&self) -> Option<&Array2<f64>> {
        self.posterior_means.as_ref()
    }

    /// Marginal distribution of the change-point with index `idx` (0 =
    /// first change-point of the transition model).
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::NoChangePoints`] if the study scans
    /// break-points or only continuous axes.
    pub fn change_point_distribution(&self, idx: usize) -> Result<Array1<f64>, StudyError> {
        if self.raster.structural_kind() != Some(HyperKind::ChangePoint) {
            return Err(StudyError::NoChangePoints);
        }
        self.structural_marginal(idx)
    }

    /// Marginal distribution of the break-point with index `idx`.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::NoBreakPoints`] if the study scans
    /// change-points or only continuous axes.
    pub fn break_point_distribution(&self, idx: usize) -> Result<Array1<f64>, StudyError> {
        if self.raster.structural_kind() != Some(HyperKind::BreakPoint) {
            return Err(StudyError::NoBreakPoints);
        }
        self.structural_marginal(idx)
    }

    /// Distribution of the number of time steps between two change- or
    /// break-points.
    pub fn duration_between(&self, first: usize, second: usize) -> Result<Array1<f64>, StudyError> {
        Ok(duration_distribution(
            &self.raster,
            &self.hyper_distribution,
            first,
            second,
        )?)
    }

    /// Marginal distribution of an arbitrary raster axis (structural or
    /// continuous), Riemann-corrected for the axes summed out.
    pub fn axis_marginal(&self, axis: usize) -> Result<Array1<f64>, StudyError> {
        Ok(marginal(&self.raster, &self.hyper_distribution, axis)?)
    }

    fn structural_marginal(&self, idx: usize) -> Result<Array1<f64>, StudyError> {
        if idx >= self.raster.n_structural() {
            return Err(StudyError::Raster(
                janus_raster::RasterError::NotStructural {
                    axis: idx,
                    n_structural: self.raster.n_structural(),
                },
            ));
        }
        Ok(marginal(&self.raster, &self.hyper_distribution, idx)?)
    }
}
