//! The Lynden-Bell C⁻ construction.
//!
//! This module builds the truncation-corrected cumulative distribution along
//! one axis and turns it into a binned density on a caller-supplied grid. It
//! is the crate-private numerical core; [`crate::CminusEstimator`] drives it
//! for both axes and layers bootstrap errors on top.

use crate::error::{Error, Result};
use crate::grid::FitGrid;
use crate::types::Axis;

/// A truncation-corrected cumulative distribution estimate along one axis:
/// the nonparametric maximum-likelihood step function of the C⁻ method.
#[derive(Clone, Debug)]
pub(crate) struct CumulativeMarginal {
    /// Observation coordinates, sorted ascending.
    positions: Vec<f64>,
    /// Cumulative estimate at each sorted position, normalized so the last
    /// entry is 1. Nondecreasing.
    cumulative: Vec<f64>,
}

impl CumulativeMarginal {
    /// Builds the C⁻ cumulative estimate for the axis holding `values`.
    ///
    /// `other` and `other_limits` are the coordinates and truncation limits of
    /// the opposite axis. After sorting by `values`, the comparable count of
    /// the j-th point is the number of earlier points whose `other` coordinate
    /// lies below the j-th point's `other_limits` entry — the points that were
    /// still observable at its position. Each point multiplies the running
    /// cumulative by `1 + 1/count`; a point with an empty comparable set
    /// contributes no step.
    ///
    /// # Errors
    ///
    /// Returns `Error::DegenerateComparableSet` when every comparable count is
    /// zero, which makes the step function flat and carries no distributional
    /// information. A single-point sample always lands here.
    pub(crate) fn build(
        values: &[f64],
        other: &[f64],
        other_limits: &[f64],
        axis: Axis,
    ) -> Result<Self> {
        let n = values.len();
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

        // comparable counts in sorted order
        let mut counts = vec![0_usize; n];
        for j in 1..n {
            let limit = other_limits[order[j]];
            counts[j] = order[..j].iter().filter(|&&k| other[k] < limit).count();
        }
        if counts.iter().all(|&c| c == 0) {
            return Err(Error::DegenerateComparableSet(axis));
        }

        #[allow(clippy::cast_precision_loss)]
        let cumulative: Vec<f64> = counts
            .iter()
            .scan(1.0_f64, |product, &c| {
                if c > 0 {
                    *product *= 1.0 + 1.0 / c as f64;
                }
                Some(*product)
            })
            .collect();
        let last = cumulative[n - 1];

        Ok(Self {
            positions: order.iter().map(|&i| values[i]).collect(),
            cumulative: cumulative.into_iter().map(|v| v / last).collect(),
        })
    }

    /// Evaluates the cumulative step function at `t`: the estimate at the
    /// largest observation not exceeding `t`, and 0 left of all observations.
    fn eval(&self, t: f64) -> f64 {
        let i = self.positions.partition_point(|&p| p <= t);
        if i == 0 {
            0.0
        } else {
            self.cumulative[i - 1]
        }
    }

    /// Differences the cumulative estimate across the grid edges into a
    /// per-bin density.
    ///
    /// Bins the step function never rises across come out as exactly 0. With
    /// `normalize` set, the result is rescaled to unit integral over the grid
    /// (left at all zeros when nothing falls inside the grid); otherwise it is
    /// scaled by `n_obs`, giving truncation-corrected counts per unit length.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn binned_density(&self, grid: &FitGrid, n_obs: usize, normalize: bool) -> Vec<f64> {
        let edges = grid.edges();
        let widths = grid.widths();
        let mut density: Vec<f64> = (0..grid.n_bins())
            .map(|k| (self.eval(edges[k + 1]) - self.eval(edges[k])) / widths[k])
            .collect();

        if normalize {
            let total: f64 = density.iter().zip(&widths).map(|(d, w)| d * w).sum();
            if total > 0.0 {
                for d in &mut density {
                    *d /= total;
                }
            }
        } else {
            for d in &mut density {
                *d *= n_obs as f64;
            }
        }
        density
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// With limits far beyond every observation the comparable count of the
    /// j-th sorted point is exactly j, so the C⁻ cumulative collapses to the
    /// empirical CDF: prod_{k=1..j} (1 + 1/k) = j + 1, normalized to (j+1)/n.
    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn test_untruncated_cumulative_is_empirical_cdf() {
        let values = vec![0.3, 0.1, 0.4, 0.2, 0.5];
        let other = vec![0.1; 5];
        let limits = vec![10.0; 5];
        let cum = CumulativeMarginal::build(&values, &other, &limits, Axis::X).unwrap();

        for (j, &c) in cum.cumulative.iter().enumerate() {
            let expected = (j + 1) as f64 / 5.0;
            assert!(
                (c - expected).abs() < 1e-12,
                "cumulative[{j}] = {c}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_single_point_is_degenerate() {
        let result = CumulativeMarginal::build(&[0.5], &[0.5], &[1.0], Axis::X);
        assert!(matches!(result, Err(Error::DegenerateComparableSet(Axis::X))));
    }

    #[test]
    fn test_fully_incomparable_sample_is_degenerate() {
        // each point's limit sits below every other point's coordinate
        let values = vec![0.1, 0.2, 0.3];
        let other = vec![5.0, 6.0, 7.0];
        let limits = vec![1.0, 1.0, 1.0];
        let result = CumulativeMarginal::build(&values, &other, &limits, Axis::Y);
        assert!(matches!(result, Err(Error::DegenerateComparableSet(Axis::Y))));
    }

    #[test]
    fn test_eval_is_zero_left_of_data_and_one_right_of_data() {
        let values = vec![0.4, 0.6];
        let cum = CumulativeMarginal::build(&values, &[0.1, 0.2], &[1.0, 1.0], Axis::X).unwrap();
        assert!((cum.eval(0.0)).abs() < f64::EPSILON);
        assert!((cum.eval(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_bins_report_zero_density() {
        // all observations inside [0.4, 0.6]; outer bins must be exactly zero
        let values = vec![0.45, 0.5, 0.55, 0.42, 0.58];
        let other = vec![0.1; 5];
        let limits = vec![10.0; 5];
        let cum = CumulativeMarginal::build(&values, &other, &limits, Axis::X).unwrap();
        let grid = FitGrid::linspace(0.0, 1.0, 11).unwrap();
        let density = cum.binned_density(&grid, 5, true);

        assert_eq!(density.len(), 10);
        assert!(density[0].abs() < f64::EPSILON);
        assert!(density[9].abs() < f64::EPSILON);
        assert!(density[4] > 0.0 || density[5] > 0.0);
    }

    #[test]
    fn test_normalized_density_integrates_to_one() {
        let values = vec![0.1, 0.3, 0.5, 0.7, 0.9];
        let cum = CumulativeMarginal::build(&values, &[0.1; 5], &[10.0; 5], Axis::X).unwrap();
        let grid = FitGrid::linspace(0.0, 1.0, 6).unwrap();
        let density = cum.binned_density(&grid, 5, true);
        let integral: f64 = density
            .iter()
            .zip(grid.widths())
            .map(|(d, w)| d * w)
            .sum();
        assert!((integral - 1.0).abs() < 1e-12, "integral = {integral}");
    }

    #[test]
    fn test_unnormalized_density_integrates_to_count() {
        let values = vec![0.1, 0.3, 0.5, 0.7, 0.9];
        let cum = CumulativeMarginal::build(&values, &[0.1; 5], &[10.0; 5], Axis::X).unwrap();
        let grid = FitGrid::linspace(0.0, 1.0, 6).unwrap();
        let density = cum.binned_density(&grid, 5, false);
        let integral: f64 = density
            .iter()
            .zip(grid.widths())
            .map(|(d, w)| d * w)
            .sum();
        // untruncated case: the integral recovers the observation count
        assert!((integral - 5.0).abs() < 1e-12, "integral = {integral}");
    }
}
