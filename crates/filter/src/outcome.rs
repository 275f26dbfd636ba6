//! Result of one sequential-filter pass.

use ndarray::{Array1, ArrayD};

/// Result of one sequential-filter pass for one fully configured
/// transition model.
///
/// The evidence fields satisfy
/// `log_evidence == local_evidence.mapv(f64::ln).sum()`: local evidence is
/// the per-time-step factor of the total marginal likelihood.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Posterior distribution over the parameter grid at every time step.
    /// Filtering distributions after a forward-only pass, smoothed
    /// distributions otherwise.
    pub posterior_sequence: Vec<ArrayD<f64>>,
    /// Log of the marginal likelihood of the data under this
    /// configuration.
    pub log_evidence: f64,
    /// Likelihood of each time step's data given the posterior accumulated
    /// from the preceding steps.
    pub local_evidence: Array1<f64>,
}
