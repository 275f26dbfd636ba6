//! Raster construction: Cartesian enumeration, validity mask, constants.

use std::collections::BTreeSet;

use janus_grid::GridAxis;
use janus_transition::{HyperKind, HyperParameter};
use ndarray::{Array1, Array2};

use crate::error::RasterError;

/// The full specification of one hyperparameter raster.
///
/// Holds the ordered axes (structural-change axes first, extra continuous
/// axes after), every value tuple of their Cartesian product, the validity
/// mask enforcing strict ordering among the structural axes, the admissible
/// tuples, and the per-axis integration constants.
///
/// Tuples are enumerated in row-major order with the last axis varying
/// fastest, so a dense distribution over the full raster reshapes into
/// [`shape()`](RasterSpec::shape) without any axis permutation.
#[derive(Debug, Clone)]
pub struct RasterSpec {
    axes: Vec<GridAxis>,
    n_structural: usize,
    kind: Option<HyperKind>,
    all_tuples: Array2<f64>,
    mask: Vec<bool>,
    valid_tuples: Array2<f64>,
    constants: Vec<f64>,
}

impl RasterSpec {
    /// Builds the raster for a transition model's declared hyperparameters
    /// plus caller-supplied extra continuous axes.
    ///
    /// Every change-point or break-point declaration becomes one
    /// ordered-discrete axis spanning the time indices `0..=t_len-1` with
    /// `t_len` steps; the extra axes follow in caller order. A tuple is
    /// admissible iff its structural values are strictly increasing.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`RasterError::MixedStructuralKinds`] | both change- and break-points declared |
    /// | [`RasterError::MultipleBreakPointGroups`] | break-points from more than one serial model |
    /// | [`RasterError::NothingToScan`] | no structural axes and no extra axes |
    /// | [`RasterError::InvalidAxis`] | an extra axis has fewer than 2 steps |
    /// | [`RasterError::EmptyRaster`] | no tuple survives the ordering mask (`t_len` too small) |
    pub fn build(
        descriptors: &[HyperParameter],
        t_len: usize,
        extra: &[GridAxis],
    ) -> Result<Self, RasterError> {
        let change_points = descriptors
            .iter()
            .filter(|d| d.kind == HyperKind::ChangePoint)
            .count();
        let break_points: Vec<&HyperParameter> = descriptors
            .iter()
            .filter(|d| d.kind == HyperKind::BreakPoint)
            .collect();

        if change_points > 0 && !break_points.is_empty() {
            return Err(RasterError::MixedStructuralKinds {
                change_points,
                break_points: break_points.len(),
            });
        }
        let groups: BTreeSet<usize> = break_points.iter().map(|d| d.group).collect();
        if groups.len() > 1 {
            return Err(RasterError::MultipleBreakPointGroups {
                groups: groups.len(),
            });
        }
        let n_structural = change_points + break_points.len();
        if n_structural == 0 && extra.is_empty() {
            return Err(RasterError::NothingToScan);
        }
        for axis in extra {
            if axis.steps() < 2 {
                return Err(RasterError::InvalidAxis {
                    name: axis.name().to_string(),
                    steps: axis.steps(),
                });
            }
        }
        let kind = if change_points > 0 {
            Some(HyperKind::ChangePoint)
        } else if !break_points.is_empty() {
            Some(HyperKind::BreakPoint)
        } else {
            None
        };
        if n_structural > t_len {
            // Fewer time steps than ordered points: the mask is empty
            // before it is even built.
            return Err(RasterError::EmptyRaster {
                points: n_structural,
                t_len,
            });
        }

        let mut axes = Vec::with_capacity(n_structural + extra.len());
        let structural_name = match kind {
            Some(HyperKind::BreakPoint) => "t_break",
            _ => "t_change",
        };
        for _ in 0..n_structural {
            let axis = if t_len == 1 {
                GridAxis::new(structural_name, 0.0, 0.0, 1)
            } else {
                GridAxis::new(structural_name, 0.0, (t_len - 1) as f64, t_len)
            };
            axes.push(axis.expect("time axis bounds are valid"));
        }
        axes.extend(extra.iter().cloned());

        let shape: Vec<usize> = axes.iter().map(|a| a.steps()).collect();
        let values: Vec<Array1<f64>> = axes.iter().map(|a| a.values()).collect();
        let n_axes = axes.len();
        let total: usize = shape.iter().product();

        // Cartesian product, last axis fastest.
        let mut all_tuples = Array2::zeros((total, n_axes));
        for row in 0..total {
            let mut rem = row;
            for d in (0..n_axes).rev() {
                let idx = rem % shape[d];
                rem /= shape[d];
                all_tuples[[row, d]] = values[d][idx];
            }
        }

        // A tuple is valid iff its ordered-discrete values strictly
        // increase; ties and inversions are masked out.
        let mut mask = vec![true; total];
        if n_structural > 1 {
            for (row, valid) in mask.iter_mut().enumerate() {
                for d in 0..n_structural - 1 {
                    if all_tuples[[row, d]] >= all_tuples[[row, d + 1]] {
                        *valid = false;
                        break;
                    }
                }
            }
        }

        let n_valid = mask.iter().filter(|&&v| v).count();
        if n_valid == 0 {
            return Err(RasterError::EmptyRaster {
                points: n_structural,
                t_len,
            });
        }
        let mut flat = Vec::with_capacity(n_valid * n_axes);
        for (row, &valid) in mask.iter().enumerate() {
            if valid {
                flat.extend(all_tuples.row(row).iter().copied());
            }
        }
        let valid_tuples = Array2::from_shape_vec((n_valid, n_axes), flat)
            .expect("valid tuple count matches buffer length");

        let constants = axes
            .iter()
            .enumerate()
            .map(|(d, a)| if d < n_structural { 1.0 } else { a.spacing() })
            .collect();

        Ok(Self {
            axes,
            n_structural,
            kind,
            all_tuples,
            mask,
            valid_tuples,
            constants,
        })
    }

    /// Returns the raster axes: structural axes first, extra axes after.
    pub fn axes(&self) -> &[GridAxis] {
        &self.axes
    }

    /// Returns the number of ordered-discrete axes.
    pub fn n_structural(&self) -> usize {
        self.n_structural
    }

    /// Returns the structural-change kind, or `None` for a pure
    /// continuous raster.
    pub fn structural_kind(&self) -> Option<HyperKind> {
        self.kind
    }

    /// Returns the per-axis step counts.
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(|a| a.steps()).collect()
    }

    /// Returns the total number of tuples, valid or not.
    pub fn len(&self) -> usize {
        self.mask.len()
    }

    /// Returns `true` if the raster has no tuples. Never true for a
    /// successfully built raster.
    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    /// Returns every tuple of the Cartesian product, one row per tuple,
    /// columns in axis order.
    pub fn all_tuples(&self) -> &Array2<f64> {
        &self.all_tuples
    }

    /// Returns the validity mask over [`all_tuples`](RasterSpec::all_tuples).
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// Returns the admissible tuples in raster order.
    pub fn valid_tuples(&self) -> &Array2<f64> {
        &self.valid_tuples
    }

    /// Returns the per-axis integration constants: 1 for ordered-discrete
    /// axes, the axis spacing for continuous axes.
    pub fn constants(&self) -> &[f64] {
        &self.constants
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use janus_transition::HyperParameter;

    fn change_points(n: usize) -> Vec<HyperParameter> {
        (0..n)
            .map(|_| HyperParameter::new("t_change", 0.0, HyperKind::ChangePoint))
            .collect()
    }

    fn break_points(n: usize, group: usize) -> Vec<HyperParameter> {
        (0..n)
            .map(|_| {
                let mut hp = HyperParameter::new("t_break", 0.0, HyperKind::BreakPoint);
                hp.group = group;
                hp
            })
            .collect()
    }

    #[test]
    fn two_change_points_in_four_steps() {
        let spec = RasterSpec::build(&change_points(2), 4, &[]).unwrap();
        assert_eq!(spec.len(), 16);
        assert_eq!(spec.valid_tuples().nrows(), 6);
        let expected = [
            (0.0, 1.0),
            (0.0, 2.0),
            (0.0, 3.0),
            (1.0, 2.0),
            (1.0, 3.0),
            (2.0, 3.0),
        ];
        for (row, &(a, b)) in spec.valid_tuples().rows().into_iter().zip(&expected) {
            assert_relative_eq!(row[0], a);
            assert_relative_eq!(row[1], b);
        }
    }

    #[test]
    fn ties_and_inversions_masked_out() {
        let spec = RasterSpec::build(&change_points(2), 4, &[]).unwrap();
        for (row, &valid) in spec.mask().iter().enumerate() {
            let a = spec.all_tuples()[[row, 0]];
            let b = spec.all_tuples()[[row, 1]];
            assert_eq!(valid, a < b, "tuple ({a}, {b})");
        }
    }

    #[test]
    fn last_axis_varies_fastest() {
        let spec = RasterSpec::build(&change_points(2), 3, &[]).unwrap();
        let t = spec.all_tuples();
        assert_relative_eq!(t[[0, 0]], 0.0);
        assert_relative_eq!(t[[0, 1]], 0.0);
        assert_relative_eq!(t[[1, 0]], 0.0);
        assert_relative_eq!(t[[1, 1]], 1.0);
        assert_relative_eq!(t[[3, 0]], 1.0);
        assert_relative_eq!(t[[3, 1]], 0.0);
    }

    #[test]
    fn extra_axes_follow_structural_axes() {
        let extra = [GridAxis::new("sigma", 0.0, 1.0, 5).unwrap()];
        let spec = RasterSpec::build(&change_points(1), 3, &extra).unwrap();
        assert_eq!(spec.axes().len(), 2);
        assert_eq!(spec.axes()[0].name(), "t_change");
        assert_eq!(spec.axes()[1].name(), "sigma");
        assert_eq!(spec.len(), 15);
        assert_eq!(spec.valid_tuples().nrows(), 15);
        assert_eq!(spec.n_structural(), 1);
        assert_eq!(spec.structural_kind(), Some(HyperKind::ChangePoint));
    }

    #[test]
    fn constants_one_for_structural_spacing_for_continuous() {
        let extra = [GridAxis::new("sigma", 0.0, 1.0, 5).unwrap()];
        let spec = RasterSpec::build(&change_points(2), 4, &extra).unwrap();
        assert_relative_eq!(spec.constants()[0], 1.0);
        assert_relative_eq!(spec.constants()[1], 1.0);
        assert_relative_eq!(spec.constants()[2], 0.25);
    }

    #[test]
    fn continuous_axes_never_affect_validity() {
        let extra = [GridAxis::new("sigma", 0.0, 1.0, 3).unwrap()];
        let spec = RasterSpec::build(&change_points(2), 3, &extra).unwrap();
        // 3 valid ordered pairs x 3 sigma values.
        assert_eq!(spec.valid_tuples().nrows(), 9);
    }

    #[test]
    fn break_points_accepted_as_single_group() {
        let spec = RasterSpec::build(&break_points(2, 0), 5, &[]).unwrap();
        assert_eq!(spec.structural_kind(), Some(HyperKind::BreakPoint));
        assert_eq!(spec.axes()[0].name(), "t_break");
        assert_eq!(spec.valid_tuples().nrows(), 10);
    }

    #[test]
    fn mixed_kinds_rejected() {
        let mut descriptors = change_points(1);
        descriptors.extend(break_points(1, 0));
        let err = RasterSpec::build(&descriptors, 5, &[]).unwrap_err();
        assert!(matches!(err, RasterError::MixedStructuralKinds { .. }));
    }

    #[test]
    fn multiple_break_point_groups_rejected() {
        let mut descriptors = break_points(1, 0);
        descriptors.extend(break_points(1, 1));
        let err = RasterSpec::build(&descriptors, 5, &[]).unwrap_err();
        assert!(matches!(
            err,
            RasterError::MultipleBreakPointGroups { groups: 2 }
        ));
    }

    #[test]
    fn nothing_to_scan_rejected() {
        let err = RasterSpec::build(&[], 5, &[]).unwrap_err();
        assert!(matches!(err, RasterError::NothingToScan));
    }

    #[test]
    fn continuous_only_raster_allowed() {
        let extra = [GridAxis::new("sigma", 0.0, 1.0, 4).unwrap()];
        let spec = RasterSpec::build(&[], 5, &extra).unwrap();
        assert_eq!(spec.n_structural(), 0);
        assert_eq!(spec.structural_kind(), None);
        assert_eq!(spec.valid_tuples().nrows(), 4);
    }

    #[test]
    fn empty_raster_when_too_few_time_steps() {
        let err = RasterSpec::build(&change_points(3), 2, &[]).unwrap_err();
        assert!(matches!(
            err,
            RasterError::EmptyRaster {
                points: 3,
                t_len: 2
            }
        ));
    }

    #[test]
    fn single_step_extra_axis_rejected() {
        let extra = [GridAxis::new("sigma", 0.5, 0.5, 1).unwrap()];
        let err = RasterSpec::build(&change_points(1), 3, &extra).unwrap_err();
        assert!(matches!(err, RasterError::InvalidAxis { steps: 1, .. }));
    }
}
