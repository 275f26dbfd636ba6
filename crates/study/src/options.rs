//! Options for a raster-study fit.

use crate::error::StudyError;

/// Configuration for one [`RasterStudy::fit`](crate::RasterStudy::fit) call.
///
/// Use the builder methods to customise the fit.
///
/// # Example
///
/// ```
/// use janus_study::FitOptions;
///
/// let options = FitOptions::new().with_forward_only(true);
/// assert!(options.forward_only());
/// assert!(!options.evidence_only());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FitOptions {
    forward_only: bool,
    evidence_only: bool,
    prior_weights: Option<Vec<f64>>,
}

impl FitOptions {
    /// Creates default options: smoothed posteriors, full aggregation,
    /// uniform prior over valid tuples.
    pub fn new() -> Self {
        Self::default()
    }

    /// Terminates each filter pass after the forward sweep. The resulting
    /// posterior distributions are filtering distributions that only
    /// incorporate past data points, emulating an online analysis.
    pub fn with_forward_only(mut self, forward_only: bool) -> Self {
        self.forward_only = forward_only;
        self
    }

    /// Skips posterior accumulation entirely: only the evidence surface,
    /// the mixture log-evidence, and the combined local evidence are
    /// produced. Implies a forward-only pass.
    pub fn with_evidence_only(mut self, evidence_only: bool) -> Self {
        self.evidence_only = evidence_only;
        self
    }

    /// Sets an explicit prior weight per valid raster tuple, replacing the
    /// uniform default. Weights are normalized internally; zero weights
    /// are allowed, the total must be positive.
    pub fn with_prior_weights(mut self, weights: Vec<f64>) -> Self {
        self.prior_weights = Some(weights);
        self
    }

    /// Returns whether the backward pass is skipped.
    pub fn forward_only(&self) -> bool {
        self.forward_only
    }

    /// Returns whether posterior accumulation is skipped.
    pub fn evidence_only(&self) -> bool {
        self.evidence_only
    }

    /// Returns the explicit prior weights, if any.
    pub fn prior_weights(&self) -> Option<&[f64]> {
        self.prior_weights.as_deref()
    }

    /// Validates the prior weights against the number of valid tuples and
    /// returns normalized log-weights (uniform when none were supplied).
    pub(crate) fn normalized_log_weights(&self, n_valid: usize) -> Result<Vec<f64>, StudyError> {
        match &self.prior_weights {
            None => Ok(vec![-(n_valid as f64).ln(); n_valid]),
            Some(weights) => {
                if weights.len() != n_valid {
                    return Err(StudyError::PriorWeightCount {
                        expected: n_valid,
                        got: weights.len(),
                    });
                }
                for (index, &value) in weights.iter().enumerate() {
                    if !value.is_finite() || value < 0.0 {
                        return Err(StudyError::InvalidPriorWeight { index, value });
                    }
                }
                let total: f64 = weights.iter().sum();
                if total <= 0.0 {
                    return Err(StudyError::ZeroPriorMass);
                }
                Ok(weights.iter().map(|&w| (w / total).ln()).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults() {
        let options = FitOptions::new();
        assert!(!options.forward_only());
        assert!(!options.evidence_only());
        assert!(options.prior_weights().is_none());
    }

    #[test]
    fn builder_chaining() {
        let options = FitOptions::new()
            .with_forward_only(true)
            .with_evidence_only(true)
            .with_prior_weights(vec![1.0, 2.0]);
        assert!(options.forward_only());
        assert!(options.evidence_only());
        assert_eq!(options.prior_weights(), Some(&[1.0, 2.0][..]));
    }

    #[test]
    fn uniform_log_weights() {
        let lw = FitOptions::new().normalized_log_weights(4).unwrap();
        assert_eq!(lw.len(), 4);
        for &w in &lw {
            assert_relative_eq!(w, 0.25f64.ln(), epsilon = 1e-12);
        }
    }

    #[test]
    fn explicit_weights_normalized() {
        let lw = FitOptions::new()
            .with_prior_weights(vec![1.0, 3.0])
            .normalized_log_weights(2)
            .unwrap();
        assert_relative_eq!(lw[0], 0.25f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(lw[1], 0.75f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn zero_weight_maps_to_negative_infinity() {
        let lw = FitOptions::new()
            .with_prior_weights(vec![0.0, 1.0])
            .normalized_log_weights(2)
            .unwrap();
        assert_eq!(lw[0], f64::NEG_INFINITY);
        assert_relative_eq!(lw[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn weight_count_checked() {
        let err = FitOptions::new()
            .with_prior_weights(vec![1.0])
            .normalized_log_weights(3)
            .unwrap_err();
        assert!(matches!(
            err,
            StudyError::PriorWeightCount {
                expected: 3,
                got: 1
            }
        ));
    }

    #[test]
    fn negative_and_nan_weights_rejected() {
        for bad in [vec![-1.0, 1.0], vec![f64::NAN, 1.0]] {
            let err = FitOptions::new()
                .with_prior_weights(bad)
                .normalized_log_weights(2)
                .unwrap_err();
            assert!(matches!(err, StudyError::InvalidPriorWeight { index: 0, .. }));
        }
    }

    #[test]
    fn all_zero_weights_rejected() {
        let err = FitOptions::new()
            .with_prior_weights(vec![0.0, 0.0])
            .normalized_log_weights(2)
            .unwrap_err();
        assert!(matches!(err, StudyError::ZeroPriorMass));
    }
}
