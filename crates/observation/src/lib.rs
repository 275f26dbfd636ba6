//! # janus-observation
//!
//! Observation models for the Janus inference engine.
//!
//! An observation model is a likelihood function: it maps one data segment
//! and a discretized [`ParameterGrid`](janus_grid::ParameterGrid) to a
//! grid-shaped array of likelihood values. Segments containing the missing
//! data sentinel produce an uninformative likelihood (configured override,
//! or discrete-uniform) so the update step leaves the posterior shape
//! untouched.
//!
//! | Model | Parameters | Segment length |
//! |-------|------------|----------------|
//! | [`Poisson`] | event rate | 1 |
//! | [`Gaussian`] | mean, standard deviation | 1 |
//! | [`Ar1`] | correlation coefficient, noise amplitude | 2 |

mod ar1;
mod error;
mod gaussian;
mod model;
mod poisson;

pub use ar1::Ar1;
pub use error::ObservationError;
pub use gaussian::Gaussian;
pub use model::ObservationModel;
pub use poisson::Poisson;
