//! # janus-filter
//!
//! The single-pass sequential filter of the Janus inference engine.
//!
//! Given formatted data, a parameter grid, one observation model, and one
//! fully configured transition model, [`filter_sequence`] sweeps forward
//! through the data (and optionally backward for smoothing) and produces a
//! [`FilterOutcome`]: the per-time-step posterior distributions over the
//! grid, the total log-evidence of the configuration, and the per-time-step
//! local evidence. Raster studies run this filter once per admissible
//! hyperparameter combination.

mod error;
mod filter;
mod outcome;

pub use error::FilterError;
pub use filter::filter_sequence;
pub use outcome::FilterOutcome;
