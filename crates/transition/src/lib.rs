//! # janus-transition
//!
//! Transition models for the Janus inference engine.
//!
//! A transition model describes how the posterior distribution over the
//! parameter grid evolves between time steps: the sequential filter calls
//! [`TransitionModel::propagate`] after every update step to turn the
//! posterior at time `t` into the prior at time `t + 1`.
//!
//! Models declare their free hyperparameters through
//! [`TransitionModel::hyper_parameters`]; a raster study rebinds those
//! declarations via [`TransitionModel::bind_hyper_parameters`] on a cloned
//! prototype, once per raster tuple. Change-point and break-point times are
//! ordered-discrete hyperparameters ([`HyperKind`]); everything else is
//! continuous.
//!
//! | Model | Hyperparameters | Behavior |
//! |-------|-----------------|----------|
//! | [`Static`] | none | parameters never change |
//! | [`GaussianRandomWalk`] | `sigma` | gradual diffusion of parameters |
//! | [`ChangePoint`] | `t_change` | full parameter reset at one time step |
//! | [`Serial`] | `t_break` per hand-off | sub-models joined at break-points |
//! | [`Combined`] | union of sub-models | all kernels applied every step |

mod change_point;
mod combined;
mod error;
mod model;
mod random_walk;
mod serial;
mod static_model;

pub use change_point::ChangePoint;
pub use combined::Combined;
pub use error::TransitionError;
pub use model::{HyperKind, HyperParameter, TransitionModel};
pub use random_walk::GaussianRandomWalk;
pub use serial::Serial;
pub use static_model::Static;
