//! Numerically stable accumulation of evidence-weighted quantities.

use ndarray::ArrayD;

/// Log of a sum of exponentials, shifted by the maximum so that long
/// series with very negative log-evidences neither underflow nor
/// overflow. Terms of `-inf` (zero weight) contribute nothing; the result
/// is `-inf` only if every term is.
pub(crate) fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    let sum: f64 = values.iter().map(|v| (v - max).exp()).sum();
    max + sum.ln()
}

/// Running sum of posterior sequences weighted by `exp(log_weight)`,
/// rescaled against the largest weight seen so far.
///
/// Adding sequences one at a time keeps memory at a single sequence
/// regardless of the raster size; rescaling whenever a new maximum
/// arrives keeps every term representable. The common scale cancels in
/// the final per-time-step normalization.
#[derive(Debug)]
pub(crate) struct WeightedPosteriorSum {
    shift: f64,
    sums: Vec<ArrayD<f64>>,
}

impl WeightedPosteriorSum {
    pub(crate) fn new() -> Self {
        Self {
            shift: f64::NEG_INFINITY,
            sums: Vec::new(),
        }
    }

    /// Folds in one posterior sequence with weight `exp(log_weight)`.
    pub(crate) fn add(&mut self, log_weight: f64, sequence: Vec<ArrayD<f64>>) {
        if log_weight == f64::NEG_INFINITY {
            // Zero weight: nothing to add.
            return;
        }
        if self.sums.is_empty() {
            self.shift = log_weight;
            self.sums = sequence;
            return;
        }
        if log_weight <= self.shift {
            let w = (log_weight - self.shift).exp();
            for (sum, posterior) in self.sums.iter_mut().zip(&sequence) {
                sum.scaled_add(w, posterior);
            }
        } else {
            // New maximum: rescale the accumulator instead of the term.
            let r = (self.shift - log_weight).exp();
            for (sum, posterior) in self.sums.iter_mut().zip(sequence) {
                sum.mapv_inplace(|x| x * r);
                *sum += &posterior;
            }
            self.shift = log_weight;
        }
    }

    /// Normalizes the accumulated sum at every time step so it sums to 1
    /// over the parameter grid. Returns `None` if nothing was added or a
    /// time step carries no mass.
    pub(crate) fn into_normalized(self) -> Option<Vec<ArrayD<f64>>> {
        if self.sums.is_empty() {
            return None;
        }
        let mut out = self.sums;
        for sum in &mut out {
            let total = sum.sum();
            if !total.is_finite() || total <= 0.0 {
                return None;
            }
            *sum /= total;
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::IxDyn;

    #[test]
    fn log_sum_exp_matches_naive_in_safe_range() {
        let values: [f64; 3] = [-1.0, 0.5, 2.0];
        let naive: f64 = values.iter().map(|v| v.exp()).sum::<f64>().ln();
        assert_relative_eq!(log_sum_exp(&values), naive, epsilon = 1e-12);
    }

    #[test]
    fn log_sum_exp_survives_extreme_magnitudes() {
        // Naive exponentiation underflows to log(0) here.
        let values = [-1200.0, -1201.0];
        let expected = -1200.0 + (1.0 + (-1.0f64).exp()).ln();
        assert_relative_eq!(log_sum_exp(&values), expected, epsilon = 1e-12);
        assert!(log_sum_exp(&[1000.0, 999.0]).is_finite());
    }

    #[test]
    fn log_sum_exp_ignores_zero_terms() {
        let values = [f64::NEG_INFINITY, 0.0];
        assert_relative_eq!(log_sum_exp(&values), 0.0, epsilon = 1e-12);
        assert_eq!(
            log_sum_exp(&[f64::NEG_INFINITY, f64::NEG_INFINITY]),
            f64::NEG_INFINITY
        );
    }

    fn point_mass(at: usize) -> Vec<ArrayD<f64>> {
        let mut p = ArrayD::zeros(IxDyn(&[3]));
        p[[at]] = 1.0;
        vec![p]
    }

    #[test]
    fn weighted_sum_matches_direct_average() {
        let mut acc = WeightedPosteriorSum::new();
        acc.add(0.0, point_mass(0));
        acc.add((0.5f64).ln(), point_mass(1));
        let out = acc.into_normalized().unwrap();
        assert_relative_eq!(out[0][[0]], 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(out[0][[1]], 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(out[0][[2]], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn weighted_sum_is_order_independent() {
        // Ascending weights force a rescale; descending never do. Both
        // orders must agree.
        let weights = [-700.0, -1.0, -350.0];
        let mut ascending = WeightedPosteriorSum::new();
        let mut descending = WeightedPosteriorSum::new();
        for (i, &w) in weights.iter().enumerate() {
            ascending.add(w, point_mass(i));
        }
        for (i, &w) in weights.iter().enumerate().rev() {
            descending.add(w, point_mass(i));
        }
        let a = ascending.into_normalized().unwrap();
        let d = descending.into_normalized().unwrap();
        for (x, y) in a[0].iter().zip(d[0].iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-12);
        }
        // The dominant weight dwarfs the others.
        assert!(a[0][[1]] > 0.999);
    }

    #[test]
    fn weighted_sum_survives_tiny_log_weights() {
        let mut acc = WeightedPosteriorSum::new();
        acc.add(-5000.0, point_mass(0));
        acc.add(-5000.0 + (0.5f64).ln(), point_mass(1));
        let out = acc.into_normalized().unwrap();
        assert_relative_eq!(out[0][[0]], 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(out[0][[1]], 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_weight_contributes_nothing() {
        let mut acc = WeightedPosteriorSum::new();
        acc.add(f64::NEG_INFINITY, point_mass(2));
        acc.add(0.0, point_mass(0));
        let out = acc.into_normalized().unwrap();
        assert_relative_eq!(out[0][[0]], 1.0, epsilon = 1e-12);
        assert_relative_eq!(out[0][[2]], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_accumulator_yields_none() {
        assert!(WeightedPosteriorSum::new().into_normalized().is_none());
    }
}
