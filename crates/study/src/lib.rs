//! # janus-study
//!
//! Raster studies for the Janus inference engine: sequential Bayesian
//! inference repeated over every admissible combination of change-point or
//! break-point times (plus any extra scanned hyperparameters), aggregated
//! into an evidence-weighted average model.
//!
//! # Pipeline
//!
//! ```text
//!  ┌─────────────┐    ┌───────────────┐    ┌────────────────────┐
//!  │ moving_window │──▶│  RasterSpec   │──▶│  filter per tuple   │
//!  │ (segmentation)│    │ (enumeration, │    │ (posterior, evidence)│
//!  └─────────────┘    │  ordering mask)│    └────────────────────┘
//!                      └───────────────┘              │
//!                                                     ▼
//!                                      ┌───────────────────────────┐
//!                                      │ StudyOutcome (log-sum-exp  │
//!                                      │ weighted average, marginals)│
//!                                      └───────────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```ignore
//! use janus_study::{FitOptions, RasterStudy};
//! use janus_observation::Poisson;
//! use janus_transition::ChangePoint;
//!
//! let study = RasterStudy::new(Poisson::new(), ChangePoint::new(0.0)?)?;
//! let outcome = study.fit(&counts, &FitOptions::new())?;
//! let distribution = outcome.change_point_distribution(0)?;
//! ```

mod accumulate;
mod error;
mod options;
mod outcome;
mod runner;

pub use error::StudyError;
pub use options::FitOptions;
pub use outcome::StudyOutcome;
pub use runner::RasterStudy;

pub use janus_grid::{moving_window, GridAxis, ParameterGrid};
pub use janus_raster::RasterSpec;
