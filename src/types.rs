//! Core types shared across the estimator.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the two coordinate axes of the bivariate sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// The first coordinate.
    X,
    /// The second coordinate.
    Y,
}

impl core::fmt::Display for Axis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// The recovered marginal density along one axis, aligned to bin midpoints.
///
/// All three vectors have length `n_bins` of the fit grid the estimate was
/// computed on. `std_error` is the per-bin bootstrap standard deviation; it is
/// all zeros when the estimator was configured with `n_bootstraps = 0`, which
/// is a sentinel for "not estimated" rather than a claim of zero uncertainty.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarginalDensity {
    /// Midpoints of the fit-grid bins the density is evaluated at.
    pub midpoints: Vec<f64>,
    /// The truncation-corrected density estimate at each midpoint.
    pub density: Vec<f64>,
    /// Bootstrap standard error of the density at each midpoint.
    pub std_error: Vec<f64>,
}

impl MarginalDensity {
    /// Returns the number of bins in this estimate.
    #[must_use]
    pub fn n_bins(&self) -> usize {
        self.density.len()
    }
}

/// The full output of one estimation call: both marginal densities.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BivariateEstimate {
    /// The marginal density along the x axis.
    pub x: MarginalDensity,
    /// The marginal density along the y axis.
    pub y: MarginalDensity,
}
