//! Dense reconstruction and marginal queries over raster distributions.

use ndarray::{Array1, Array2, ArrayD, Axis, Ix1, Ix2, IxDyn};

use crate::error::RasterError;
use crate::spec::RasterSpec;

/// Scatters a distribution defined over the valid tuples back into the
/// full raster: zero at every masked-out index, the given values at the
/// valid indices, in matching order.
///
/// Downstream marginalization reshapes the result by per-axis step counts,
/// so invalid combinations must be present with exactly zero mass rather
/// than absent.
///
/// # Errors
///
/// Returns [`RasterError::LengthMismatch`] if `values` does not have one
/// entry per valid tuple.
pub fn expand(values: &Array1<f64>, mask: &[bool]) -> Result<Array1<f64>, RasterError> {
    let n_valid = mask.iter().filter(|&&m| m).count();
    if values.len() != n_valid {
        return Err(RasterError::LengthMismatch {
            expected: n_valid,
            got: values.len(),
        });
    }
    let mut dense = Array1::zeros(mask.len());
    let mut source = values.iter();
    for (slot, &valid) in dense.iter_mut().zip(mask.iter()) {
        if valid {
            // The mask counted exactly values.len() valid slots.
            *slot = *source.next().expect("one value per valid slot");
        }
    }
    Ok(dense)
}

/// Reshapes a dense distribution into the raster shape.
fn as_raster_shape(spec: &RasterSpec, dense: &Array1<f64>) -> Result<ArrayD<f64>, RasterError> {
    if dense.len() != spec.len() {
        return Err(RasterError::LengthMismatch {
            expected: spec.len(),
            got: dense.len(),
        });
    }
    Ok(ArrayD::from_shape_vec(IxDyn(&spec.shape()), dense.to_vec())
        .expect("dense length equals the product of the raster shape"))
}

fn check_axis(spec: &RasterSpec, axis: usize) -> Result<(), RasterError> {
    if axis >= spec.axes().len() {
        return Err(RasterError::AxisOutOfRange {
            axis,
            n_axes: spec.axes().len(),
        });
    }
    Ok(())
}

/// Marginal distribution of one raster axis: the dense distribution summed
/// over every other axis and scaled by the product of their integration
/// constants (Riemann-sum correction).
///
/// # Errors
///
/// Returns [`RasterError::AxisOutOfRange`] or
/// [`RasterError::LengthMismatch`] for malformed queries.
pub fn marginal(
    spec: &RasterSpec,
    dense: &Array1<f64>,
    axis: usize,
) -> Result<Array1<f64>, RasterError> {
    check_axis(spec, axis)?;
    let mut arr = as_raster_shape(spec, dense)?;
    let n_axes = spec.axes().len();
    let mut factor = 1.0;
    for d in (0..n_axes).rev() {
        if d != axis {
            arr = arr.sum_axis(Axis(d));
            factor *= spec.constants()[d];
        }
    }
    let flat = arr
        .into_dimensionality::<Ix1>()
        .expect("exactly one axis remains");
    Ok(flat * factor)
}

/// Joint marginal distribution of two raster axes, with rows indexing
/// `axis_a` and columns indexing `axis_b`.
///
/// # Errors
///
/// Returns [`RasterError::DuplicateAxis`], [`RasterError::AxisOutOfRange`],
/// or [`RasterError::LengthMismatch`] for malformed queries.
pub fn joint_marginal(
    spec: &RasterSpec,
    dense: &Array1<f64>,
    axis_a: usize,
    axis_b: usize,
) -> Result<Array2<f64>, RasterError> {
    check_axis(spec, axis_a)?;
    check_axis(spec, axis_b)?;
    if axis_a == axis_b {
        return Err(RasterError::DuplicateAxis { axis: axis_a });
    }
    let mut arr = as_raster_shape(spec, dense)?;
    let n_axes = spec.axes().len();
    let mut factor = 1.0;
    for d in (0..n_axes).rev() {
        if d != axis_a && d != axis_b {
            arr = arr.sum_axis(Axis(d));
            factor *= spec.constants()[d];
        }
    }
    let joint = arr
        .into_dimensionality::<Ix2>()
        .expect("exactly two axes remain");
    // Summing preserved ascending axis order; flip if the caller asked for
    // the higher axis first.
    let joint = if axis_a < axis_b {
        joint
    } else {
        joint.reversed_axes()
    };
    Ok(joint * factor)
}

/// Distribution of the number of time steps between two ordered-discrete
/// axes: a histogram of `|i - j|` weighted by the joint marginal at grid
/// indices `(i, j)`.
///
/// # Errors
///
/// Returns [`RasterError::NotStructural`] if either axis is continuous,
/// plus the [`joint_marginal`] errors.
pub fn duration_distribution(
    spec: &RasterSpec,
    dense: &Array1<f64>,
    axis_a: usize,
    axis_b: usize,
) -> Result<Array1<f64>, RasterError> {
    for axis in [axis_a, axis_b] {
        check_axis(spec, axis)?;
        if axis >= spec.n_structural() {
            return Err(RasterError::NotStructural {
                axis,
                n_structural: spec.n_structural(),
            });
        }
    }
    let joint = joint_marginal(spec, dense, axis_a, axis_b)?;
    let steps = joint.nrows();
    let mut durations = Array1::zeros(steps);
    for i in 0..steps {
        for j in 0..joint.ncols() {
            durations[i.abs_diff(j)] += joint[[i, j]];
        }
    }
    Ok(durations)
}
