//! Validated truncated observation sets.

use crate::error::{Error, Result};
use crate::types::Axis;

/// An immutable set of 2D observations with per-point truncation limits.
///
/// Each observation `(x_i, y_i)` carries the limits `(xmax_i, ymax_i)` beyond
/// which it could not have entered the sample: every retained point satisfies
/// `x_i < xmax_i` and `y_i < ymax_i`. The constructor enforces this invariant
/// so the estimator never has to re-check it.
///
/// A sample is validated once on construction and never mutated; bootstrap
/// replicates are fresh samples drawn from it, not in-place shuffles.
///
/// # Examples
///
/// ```
/// use cminus::TruncatedSample;
///
/// let sample = TruncatedSample::new(
///     vec![0.2, 0.5, 0.7],
///     vec![0.1, 0.4, 0.3],
///     vec![1.0, 1.0, 1.0],
///     vec![1.0, 1.0, 1.0],
/// )
/// .unwrap();
/// assert_eq!(sample.len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TruncatedSample {
    x: Vec<f64>,
    y: Vec<f64>,
    xmax: Vec<f64>,
    ymax: Vec<f64>,
}

impl TruncatedSample {
    /// Creates a sample from coordinate and limit sequences.
    ///
    /// # Errors
    ///
    /// - `Error::LengthMismatch` if `y`, `xmax` or `ymax` differ in length from `x`.
    /// - `Error::EmptySample` if the sequences are empty.
    /// - `Error::NonFinite` if any coordinate or limit is NaN or infinite.
    /// - `Error::TruncationViolation` if any point fails `x_i < xmax_i` or
    ///   `y_i < ymax_i` — such a point could not have been observed and must be
    ///   removed by the caller (see [`TruncatedSample::retain_observable`]).
    pub fn new(x: Vec<f64>, y: Vec<f64>, xmax: Vec<f64>, ymax: Vec<f64>) -> Result<Self> {
        let n = x.len();
        for (name, seq) in [("y", &y), ("xmax", &xmax), ("ymax", &ymax)] {
            if seq.len() != n {
                return Err(Error::LengthMismatch {
                    name,
                    expected: n,
                    got: seq.len(),
                });
            }
        }
        if n == 0 {
            return Err(Error::EmptySample);
        }
        for i in 0..n {
            if !(x[i].is_finite() && y[i].is_finite() && xmax[i].is_finite() && ymax[i].is_finite())
            {
                return Err(Error::NonFinite { index: i });
            }
            if x[i] >= xmax[i] {
                return Err(Error::TruncationViolation {
                    index: i,
                    axis: Axis::X,
                    value: x[i],
                    limit: xmax[i],
                });
            }
            if y[i] >= ymax[i] {
                return Err(Error::TruncationViolation {
                    index: i,
                    axis: Axis::Y,
                    value: y[i],
                    limit: ymax[i],
                });
            }
        }
        Ok(Self { x, y, xmax, ymax })
    }

    /// Creates a sample by dropping every point outside its observable region.
    ///
    /// This is the pure counterpart to pre-filtering raw draws against a
    /// truncation boundary: points with `x_i >= xmax_i` or `y_i >= ymax_i`
    /// (and points with non-finite entries) are discarded rather than
    /// reported as errors. The inputs are left untouched.
    ///
    /// # Errors
    ///
    /// - `Error::LengthMismatch` if the sequences differ in length.
    /// - `Error::EmptySample` if no point survives the filter.
    pub fn retain_observable(x: &[f64], y: &[f64], xmax: &[f64], ymax: &[f64]) -> Result<Self> {
        let n = x.len();
        for (name, len) in [("y", y.len()), ("xmax", xmax.len()), ("ymax", ymax.len())] {
            if len != n {
                return Err(Error::LengthMismatch {
                    name,
                    expected: n,
                    got: len,
                });
            }
        }

        let mut kept = Self {
            x: Vec::new(),
            y: Vec::new(),
            xmax: Vec::new(),
            ymax: Vec::new(),
        };
        for i in 0..n {
            let finite =
                x[i].is_finite() && y[i].is_finite() && xmax[i].is_finite() && ymax[i].is_finite();
            if finite && x[i] < xmax[i] && y[i] < ymax[i] {
                kept.x.push(x[i]);
                kept.y.push(y[i]);
                kept.xmax.push(xmax[i]);
                kept.ymax.push(ymax[i]);
            }
        }
        if kept.x.is_empty() {
            return Err(Error::EmptySample);
        }
        Ok(kept)
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns `false`: a constructed sample always holds at least one point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Returns the x coordinates.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Returns the y coordinates.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Returns the per-point truncation limits on x.
    #[must_use]
    pub fn xmax(&self) -> &[f64] {
        &self.xmax
    }

    /// Returns the per-point truncation limits on y.
    #[must_use]
    pub fn ymax(&self) -> &[f64] {
        &self.ymax
    }

    /// Draws a bootstrap replicate: `len()` points sampled uniformly with
    /// replacement. The replicate satisfies the sample invariant by
    /// construction, so no re-validation happens.
    pub(crate) fn resample(&self, rng: &mut fastrand::Rng) -> Self {
        let n = self.len();
        let mut replicate = Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            xmax: Vec::with_capacity(n),
            ymax: Vec::with_capacity(n),
        };
        for _ in 0..n {
            let i = rng.usize(0..n);
            replicate.x.push(self.x[i]);
            replicate.y.push(self.y[i]);
            replicate.xmax.push(self.xmax[i]);
            replicate.ymax.push(self.ymax[i]);
        }
        replicate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_sample() -> TruncatedSample {
        TruncatedSample::new(
            vec![0.1, 0.2, 0.3, 0.4],
            vec![0.4, 0.3, 0.2, 0.1],
            vec![0.5, 0.6, 0.7, 0.8],
            vec![0.8, 0.7, 0.6, 0.5],
        )
        .unwrap()
    }

    #[test]
    fn test_new_accepts_valid_input() {
        let sample = valid_sample();
        assert_eq!(sample.len(), 4);
        assert!(!sample.is_empty());
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let result = TruncatedSample::new(vec![0.1, 0.2], vec![0.1], vec![1.0, 1.0], vec![1.0, 1.0]);
        assert!(matches!(
            result,
            Err(Error::LengthMismatch {
                name: "y",
                expected: 2,
                got: 1,
            })
        ));
    }

    #[test]
    fn test_new_rejects_empty() {
        let result = TruncatedSample::new(vec![], vec![], vec![], vec![]);
        assert!(matches!(result, Err(Error::EmptySample)));
    }

    #[test]
    fn test_new_rejects_truncation_violation() {
        // second point sits exactly on its x limit
        let result = TruncatedSample::new(
            vec![0.1, 0.6],
            vec![0.1, 0.1],
            vec![0.5, 0.6],
            vec![1.0, 1.0],
        );
        assert!(matches!(
            result,
            Err(Error::TruncationViolation {
                index: 1,
                axis: Axis::X,
                ..
            })
        ));
    }

    #[test]
    fn test_new_rejects_nan() {
        let result = TruncatedSample::new(
            vec![0.1, f64::NAN],
            vec![0.1, 0.1],
            vec![1.0, 1.0],
            vec![1.0, 1.0],
        );
        assert!(matches!(result, Err(Error::NonFinite { index: 1 })));
    }

    #[test]
    fn test_retain_observable_filters_instead_of_failing() {
        let sample = TruncatedSample::retain_observable(
            &[0.1, 0.9, 0.3],
            &[0.1, 0.1, 0.9],
            &[0.5, 0.5, 0.5],
            &[0.5, 0.5, 0.5],
        )
        .unwrap();
        assert_eq!(sample.len(), 1);
        assert!((sample.x()[0] - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_retain_observable_all_filtered_is_empty() {
        let result =
            TruncatedSample::retain_observable(&[0.9, 0.8], &[0.1, 0.1], &[0.5, 0.5], &[0.5, 0.5]);
        assert!(matches!(result, Err(Error::EmptySample)));
    }

    #[test]
    fn test_resample_preserves_size_and_invariant() {
        let sample = valid_sample();
        let mut rng = fastrand::Rng::with_seed(42);
        let replicate = sample.resample(&mut rng);
        assert_eq!(replicate.len(), sample.len());
        for i in 0..replicate.len() {
            assert!(replicate.x()[i] < replicate.xmax()[i]);
            assert!(replicate.y()[i] < replicate.ymax()[i]);
            // every drawn point exists in the original
            assert!(sample.x().contains(&replicate.x()[i]));
        }
    }

    #[test]
    fn test_resample_is_seed_deterministic() {
        let sample = valid_sample();
        let a = sample.resample(&mut fastrand::Rng::with_seed(7));
        let b = sample.resample(&mut fastrand::Rng::with_seed(7));
        assert_eq!(a, b);
    }
}
