#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Truncation-corrected distribution estimation via Lynden-Bell's C⁻ method.
//!
//! Given a bivariate sample where each point `(x, y)` was only observable
//! below per-point limits `(xmax, ymax)`, this crate recovers the 1D marginal
//! densities of x and y free of the selection bias the truncation introduces,
//! assuming the underlying joint distribution is separable. Standard errors
//! come from bootstrap resampling with a seedable random source.
//!
//! # Getting Started
//!
//! Recover both marginals from a pre-filtered sample:
//!
//! ```
//! use cminus::{CminusEstimator, FitGrid, TruncatedSample};
//!
//! // observations and their per-point truncation limits
//! let sample = TruncatedSample::new(
//!     vec![0.12, 0.35, 0.48, 0.71, 0.88, 0.25, 0.61],
//!     vec![0.40, 0.20, 0.60, 0.30, 0.50, 0.45, 0.15],
//!     vec![1.0; 7],
//!     vec![1.0; 7],
//! )
//! .unwrap();
//!
//! let grid = FitGrid::linspace(0.0, 1.0, 11).unwrap();
//!
//! let estimator = CminusEstimator::builder()
//!     .n_bootstraps(20)
//!     .normalize(true)
//!     .seed(42)
//!     .build();
//!
//! let result = estimator.estimate(&sample, &grid, &grid).unwrap();
//!
//! // result.x / result.y hold midpoint-aligned densities and standard errors
//! let integral: f64 = result
//!     .x
//!     .density
//!     .iter()
//!     .zip(grid.widths())
//!     .map(|(d, w)| d * w)
//!     .sum();
//! assert!((integral - 1.0).abs() < 1e-9);
//! ```
//!
//! Raw draws that still contain unobservable points can be filtered without
//! touching the inputs via [`TruncatedSample::retain_observable`].
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`TruncatedSample`] | Validated, immutable observation set with per-point truncation limits. |
//! | [`FitGrid`] | Bin edges a marginal density is evaluated on. |
//! | [`CminusEstimator`] | Runs the C⁻ reconstruction and the bootstrap, configured via its builder. |
//! | [`BivariateEstimate`] | Output: a [`MarginalDensity`] per axis. |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on the output types | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at estimation milestones | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod cminus;
mod error;
mod estimator;
mod grid;
mod sample;
mod types;

pub use error::{Error, Result};
pub use estimator::{CminusEstimator, CminusEstimatorBuilder};
pub use grid::FitGrid;
pub use sample::TruncatedSample;
pub use types::{Axis, BivariateEstimate, MarginalDensity};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use cminus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::estimator::{CminusEstimator, CminusEstimatorBuilder};
    pub use crate::grid::FitGrid;
    pub use crate::sample::TruncatedSample;
    pub use crate::types::{Axis, BivariateEstimate, MarginalDensity};
}
