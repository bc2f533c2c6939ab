//! The public estimator: C⁻ marginals for both axes plus bootstrap errors.

use parking_lot::Mutex;

use crate::cminus::CumulativeMarginal;
use crate::error::{Error, Result};
use crate::grid::FitGrid;
use crate::sample::TruncatedSample;
use crate::types::{Axis, BivariateEstimate, MarginalDensity};

/// Recovers the marginal densities of a truncated, separable bivariate sample.
///
/// The estimator applies Lynden-Bell's C⁻ method independently to each axis:
/// the x marginal is corrected using the y-truncation limits and vice versa,
/// which is unbiased when the underlying bivariate distribution factors into
/// a product of 1D marginals. Uncertainty comes from resampling the
/// observation set with replacement `n_bootstraps` times and taking the
/// per-bin standard deviation of the re-binned replicates.
///
/// The reported density is always the estimate from the **original** sample;
/// bootstrap replicates feed only the standard errors. With
/// `n_bootstraps = 0` the standard errors are an all-zero sentinel, not an
/// estimated uncertainty of zero.
///
/// The estimator owns its random source behind a mutex, so [`estimate`] takes
/// `&self` and a shared estimator can serve callers from multiple threads.
///
/// [`estimate`]: CminusEstimator::estimate
///
/// # Examples
///
/// ```
/// use cminus::{CminusEstimator, FitGrid, TruncatedSample};
///
/// let sample = TruncatedSample::new(
///     vec![0.12, 0.35, 0.48, 0.71, 0.88],
///     vec![0.40, 0.20, 0.60, 0.30, 0.50],
///     vec![1.0; 5],
///     vec![1.0; 5],
/// )
/// .unwrap();
/// let grid = FitGrid::linspace(0.0, 1.0, 6).unwrap();
///
/// let estimator = CminusEstimator::builder()
///     .n_bootstraps(50)
///     .seed(42)
///     .build();
/// let result = estimator.estimate(&sample, &grid, &grid).unwrap();
///
/// assert_eq!(result.x.n_bins(), 5);
/// assert!(result.x.density.iter().all(|&d| d >= 0.0));
/// ```
pub struct CminusEstimator {
    n_bootstraps: usize,
    normalize: bool,
    rng: Mutex<fastrand::Rng>,
}

impl CminusEstimator {
    /// Creates an estimator with default settings (20 bootstrap replicates,
    /// normalized output, OS-seeded RNG).
    #[must_use]
    pub fn new() -> Self {
        CminusEstimatorBuilder::new().build()
    }

    /// Creates a builder for configuring the estimator.
    ///
    /// # Examples
    ///
    /// ```
    /// use cminus::CminusEstimator;
    ///
    /// let estimator = CminusEstimator::builder()
    ///     .n_bootstraps(100)
    ///     .normalize(false)
    ///     .seed(7)
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> CminusEstimatorBuilder {
        CminusEstimatorBuilder::new()
    }

    /// Estimates both marginal densities of `sample` on the supplied grids.
    ///
    /// Returns midpoint-aligned densities and bootstrap standard errors for
    /// each axis. Grid bins the recovered distribution never rises across
    /// report density 0 with error 0.
    ///
    /// # Errors
    ///
    /// Returns `Error::DegenerateComparableSet` when an axis has no
    /// information to recover: every observation's comparable set is empty.
    /// No partial result is produced. Bootstrap replicates that individually
    /// come out degenerate are skipped instead; the standard errors are taken
    /// over the surviving replicates.
    pub fn estimate(
        &self,
        sample: &TruncatedSample,
        x_grid: &FitGrid,
        y_grid: &FitGrid,
    ) -> Result<BivariateEstimate> {
        let (x_density, y_density) = binned_marginals(sample, x_grid, y_grid, self.normalize)?;

        let mut x_replicates: Vec<Vec<f64>> = Vec::with_capacity(self.n_bootstraps);
        let mut y_replicates: Vec<Vec<f64>> = Vec::with_capacity(self.n_bootstraps);
        {
            let mut rng = self.rng.lock();
            for _ in 0..self.n_bootstraps {
                let replicate = sample.resample(&mut rng);
                match binned_marginals(&replicate, x_grid, y_grid, self.normalize) {
                    Ok((dx, dy)) => {
                        x_replicates.push(dx);
                        y_replicates.push(dy);
                    }
                    Err(Error::DegenerateComparableSet(_axis)) => {
                        trace_debug!(axis = %_axis, "skipping degenerate bootstrap replicate");
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        let x_error = per_bin_std(&x_replicates, x_grid.n_bins());
        let y_error = per_bin_std(&y_replicates, y_grid.n_bins());
        trace_info!(
            n = sample.len(),
            n_bootstraps = self.n_bootstraps,
            "estimation complete"
        );

        Ok(BivariateEstimate {
            x: MarginalDensity {
                midpoints: x_grid.midpoints(),
                density: x_density,
                std_error: x_error,
            },
            y: MarginalDensity {
                midpoints: y_grid.midpoints(),
                density: y_density,
                std_error: y_error,
            },
        })
    }
}

impl Default for CminusEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes both binned marginals of one sample.
fn binned_marginals(
    sample: &TruncatedSample,
    x_grid: &FitGrid,
    y_grid: &FitGrid,
    normalize: bool,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let n = sample.len();
    let cum_x = CumulativeMarginal::build(sample.x(), sample.y(), sample.ymax(), Axis::X)?;
    let cum_y = CumulativeMarginal::build(sample.y(), sample.x(), sample.xmax(), Axis::Y)?;
    Ok((
        cum_x.binned_density(x_grid, n, normalize),
        cum_y.binned_density(y_grid, n, normalize),
    ))
}

/// Per-bin population standard deviation across bootstrap replicates.
///
/// Returns all zeros when there are no replicates, the documented sentinel
/// for `n_bootstraps = 0` (and for the rare case that every replicate was
/// skipped as degenerate).
#[allow(clippy::cast_precision_loss)]
fn per_bin_std(replicates: &[Vec<f64>], n_bins: usize) -> Vec<f64> {
    if replicates.is_empty() {
        return vec![0.0; n_bins];
    }
    let m = replicates.len() as f64;
    (0..n_bins)
        .map(|k| {
            let mean = replicates.iter().map(|r| r[k]).sum::<f64>() / m;
            let variance = replicates
                .iter()
                .map(|r| (r[k] - mean).powi(2))
                .sum::<f64>()
                / m;
            variance.sqrt()
        })
        .collect()
}

/// Builder for configuring a [`CminusEstimator`].
///
/// # Examples
///
/// ```
/// use cminus::CminusEstimatorBuilder;
///
/// let estimator = CminusEstimatorBuilder::new()
///     .n_bootstraps(200)
///     .seed(1234)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct CminusEstimatorBuilder {
    n_bootstraps: usize,
    normalize: bool,
    seed: Option<u64>,
}

impl CminusEstimatorBuilder {
    /// Creates a new builder with default settings.
    ///
    /// Default settings:
    /// - `n_bootstraps`: 20
    /// - `normalize`: true (densities integrate to 1 over their fit grid)
    /// - seed: None (use OS-provided entropy)
    #[must_use]
    pub fn new() -> Self {
        Self {
            n_bootstraps: 20,
            normalize: true,
            seed: None,
        }
    }

    /// Sets the number of bootstrap replicates used for the standard errors.
    ///
    /// Zero disables uncertainty estimation: the call still succeeds and the
    /// `std_error` vectors are all zeros.
    #[must_use]
    pub fn n_bootstraps(mut self, n_bootstraps: usize) -> Self {
        self.n_bootstraps = n_bootstraps;
        self
    }

    /// Sets whether output densities are rescaled to integrate to 1 over
    /// their fit grid. When disabled, densities are truncation-corrected
    /// counts per unit length instead.
    #[must_use]
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Sets a fixed RNG seed so bootstrap draws are reproducible.
    ///
    /// Two estimators built with the same seed produce bit-identical results
    /// for identical inputs. The seed only affects the standard errors; the
    /// point estimate never depends on it.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the estimator.
    #[must_use]
    pub fn build(self) -> CminusEstimator {
        let rng = self
            .seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        CminusEstimator {
            n_bootstraps: self.n_bootstraps,
            normalize: self.normalize,
            rng: Mutex::new(rng),
        }
    }
}

impl Default for CminusEstimatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
