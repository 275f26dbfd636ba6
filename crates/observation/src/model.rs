//! The observation model trait and the shared missing-data policy.

use janus_grid::{is_missing, GridAxis, ParameterGrid};
use ndarray::{ArrayD, ArrayView1};

use crate::error::ObservationError;

/// A likelihood function over a discretized parameter grid.
///
/// An observation model consumes one data segment per time step (a window
/// of `segment_length()` consecutive raw samples) and evaluates the
/// likelihood of that segment at every grid point. The capability set is
/// deliberately closed: segment length, default axes, the uninformative
/// override, and likelihood evaluation are all the sequential filter ever
/// needs.
pub trait ObservationModel {
    /// Number of consecutive raw samples one data segment consumes.
    fn segment_length(&self) -> usize;

    /// Names of the model parameters, in grid-axis order.
    fn parameter_names(&self) -> &[&'static str];

    /// Default discretization of the parameter space.
    fn default_axes(&self) -> Vec<GridAxis>;

    /// The configured uninformative likelihood, if any. Returned by
    /// [`ObservationModel::likelihood`] whenever the segment contains
    /// missing data.
    fn uninformative(&self) -> Option<&ArrayD<f64>>;

    /// Evaluates the likelihood of `segment` at every point of `grid`.
    ///
    /// Missing-data policy: if any required value in the segment is the
    /// missing sentinel, the configured uninformative likelihood is
    /// returned if one is set, else the discrete-uniform array, so the
    /// update step is a no-op on the posterior shape.
    ///
    /// # Errors
    ///
    /// Implementations reject mismatched segment lengths and grid
    /// dimensions, and domain violations of their parameters (see the
    /// [`ObservationError`] variants).
    fn likelihood(
        &self,
        grid: &ParameterGrid,
        segment: ArrayView1<'_, f64>,
    ) -> Result<ArrayD<f64>, ObservationError>;
}

/// Checks segment length and grid dimension against the model, returning
/// the uninformative fallback when the segment contains missing data.
///
/// `Ok(Some(array))` means the caller should return `array` as-is;
/// `Ok(None)` means the segment is complete and the model should evaluate
/// its density.
pub(crate) fn check_inputs<M: ObservationModel + ?Sized>(
    model: &M,
    grid: &ParameterGrid,
    segment: ArrayView1<'_, f64>,
) -> Result<Option<ArrayD<f64>>, ObservationError> {
    if segment.len() != model.segment_length() {
        return Err(ObservationError::SegmentLength {
            expected: model.segment_length(),
            got: segment.len(),
        });
    }
    if grid.dim() != model.parameter_names().len() {
        return Err(ObservationError::GridDimension {
            expected: model.parameter_names().len(),
            got: grid.dim(),
        });
    }
    if segment.iter().any(|&x| is_missing(x)) {
        match model.uninformative() {
            Some(pdf) => {
                if pdf.shape() != grid.shape().as_slice() {
                    return Err(ObservationError::UninformativeShape {
                        expected: grid.shape(),
                        got: pdf.shape().to_vec(),
                    });
                }
                Ok(Some(pdf.clone()))
            }
            None => Ok(Some(grid.flat_prior())),
        }
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poisson::Poisson;
    use approx::assert_relative_eq;
    use ndarray::{array, ArrayD, IxDyn};

    fn toy_grid() -> ParameterGrid {
        ParameterGrid::new(vec![GridAxis::new("lambda", 0.0, 2.0, 3).unwrap()]).unwrap()
    }

    #[test]
    fn missing_segment_yields_uniform() {
        let model = Poisson::new();
        let grid = toy_grid();
        let seg = array![f64::NAN];
        let pdf = model.likelihood(&grid, seg.view()).unwrap();
        assert_relative_eq!(pdf.sum(), 1.0, epsilon = 1e-12);
        for &v in pdf.iter() {
            assert_relative_eq!(v, 1.0 / 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn missing_segment_yields_configured_override() {
        let grid = toy_grid();
        let custom = ArrayD::from_shape_vec(IxDyn(&[3]), vec![0.2, 0.3, 0.5]).unwrap();
        let model = Poisson::new().with_uninformative(custom.clone());
        let seg = array![f64::NAN];
        let pdf = model.likelihood(&grid, seg.view()).unwrap();
        assert_eq!(pdf, custom);
    }

    #[test]
    fn override_shape_checked_against_grid() {
        let grid = toy_grid();
        let custom = ArrayD::from_shape_vec(IxDyn(&[2]), vec![0.5, 0.5]).unwrap();
        let model = Poisson::new().with_uninformative(custom);
        let seg = array![f64::NAN];
        let err = model.likelihood(&grid, seg.view()).unwrap_err();
        assert!(matches!(err, ObservationError::UninformativeShape { .. }));
    }

    #[test]
    fn segment_length_checked_before_missing_data() {
        let model = Poisson::new();
        let grid = toy_grid();
        let seg = array![f64::NAN, 1.0];
        let err = model.likelihood(&grid, seg.view()).unwrap_err();
        assert!(matches!(
            err,
            ObservationError::SegmentLength {
                expected: 1,
                got: 2
            }
        ));
    }
}
