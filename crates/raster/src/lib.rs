//! # janus-raster
//!
//! Hyperparameter rasters for the Janus inference engine.
//!
//! A raster is the Cartesian grid of every hyperparameter combination under
//! study: the change-point or break-point times a transition model
//! declares, prepended to any additional continuous axes the caller wants
//! scanned. [`RasterSpec::build`] enumerates all combinations, masks out
//! the ones whose ordered-discrete values are not strictly increasing, and
//! computes the per-axis integration constants that turn discrete sums into
//! Riemann approximations of integrals.
//!
//! The companion query functions work on *dense* distributions defined over
//! the full raster (invalid combinations carrying exactly zero mass):
//! [`expand`] scatters a distribution over the valid combinations back into
//! the full raster, and [`marginal`], [`joint_marginal`], and
//! [`duration_distribution`] reduce the dense distribution for reporting.

mod error;
mod reconstruct;
mod spec;

pub use error::RasterError;
pub use reconstruct::{duration_distribution, expand, joint_marginal, marginal};
pub use spec::RasterSpec;
