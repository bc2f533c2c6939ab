//! Bin-edge grids the marginal densities are evaluated on.

use crate::error::{Error, Result};

/// A validated sequence of bin edges defining the resolution of one marginal
/// density estimate.
///
/// Edges must be strictly increasing and there must be at least two of them
/// (one bin). Midpoints and widths are derived on demand, never stored.
///
/// # Examples
///
/// ```
/// use cminus::FitGrid;
///
/// let grid = FitGrid::linspace(0.0, 1.0, 21).unwrap();
/// assert_eq!(grid.n_bins(), 20);
/// assert!((grid.midpoints()[0] - 0.025).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FitGrid {
    edges: Vec<f64>,
}

impl FitGrid {
    /// Creates a grid from an explicit edge sequence.
    ///
    /// # Errors
    ///
    /// Returns `Error::TooFewEdges` if fewer than two edges are supplied and
    /// `Error::NonMonotonicEdges` if the sequence is not strictly increasing
    /// (non-finite edges fail this check as well).
    pub fn new(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(Error::TooFewEdges(edges.len()));
        }
        for (i, pair) in edges.windows(2).enumerate() {
            if !pair[0].is_finite() || !pair[1].is_finite() || pair[1] <= pair[0] {
                return Err(Error::NonMonotonicEdges {
                    index: i,
                    index_next: i + 1,
                    prev: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(Self { edges })
    }

    /// Creates a grid of `n_edges` evenly spaced edges spanning `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns `Error::TooFewEdges` if `n_edges < 2` and
    /// `Error::NonMonotonicEdges` if `low >= high` or either bound is NaN.
    #[allow(clippy::cast_precision_loss)]
    pub fn linspace(low: f64, high: f64, n_edges: usize) -> Result<Self> {
        if n_edges < 2 {
            return Err(Error::TooFewEdges(n_edges));
        }
        let step = (high - low) / (n_edges - 1) as f64;
        let mut edges: Vec<f64> = (0..n_edges).map(|i| low + step * i as f64).collect();
        // pin the last edge so the span is exact
        edges[n_edges - 1] = high;
        Self::new(edges)
    }

    /// Returns the bin edges.
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Returns the number of bins (one less than the number of edges).
    #[must_use]
    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Returns the midpoint of each bin.
    #[must_use]
    pub fn midpoints(&self) -> Vec<f64> {
        self.edges
            .windows(2)
            .map(|pair| 0.5 * (pair[0] + pair[1]))
            .collect()
    }

    /// Returns the width of each bin.
    #[must_use]
    pub fn widths(&self) -> Vec<f64> {
        self.edges.windows(2).map(|pair| pair[1] - pair[0]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_rejects_single_edge() {
        assert!(matches!(FitGrid::new(vec![0.0]), Err(Error::TooFewEdges(1))));
    }

    #[test]
    fn test_grid_rejects_decreasing_edges() {
        let result = FitGrid::new(vec![0.0, 0.5, 0.4, 1.0]);
        assert!(matches!(
            result,
            Err(Error::NonMonotonicEdges { index: 1, .. })
        ));
    }

    #[test]
    fn test_grid_rejects_duplicate_edges() {
        let result = FitGrid::new(vec![0.0, 0.5, 0.5, 1.0]);
        assert!(matches!(result, Err(Error::NonMonotonicEdges { .. })));
    }

    #[test]
    fn test_grid_rejects_nan_edge() {
        let result = FitGrid::new(vec![0.0, f64::NAN, 1.0]);
        assert!(matches!(result, Err(Error::NonMonotonicEdges { .. })));
    }

    #[test]
    fn test_linspace_spans_range_exactly() {
        let grid = FitGrid::linspace(0.0, 1.0, 21).unwrap();
        assert_eq!(grid.edges().len(), 21);
        assert!((grid.edges()[0] - 0.0).abs() < f64::EPSILON);
        assert!((grid.edges()[20] - 1.0).abs() < f64::EPSILON);
        assert_eq!(grid.n_bins(), 20);
    }

    #[test]
    fn test_midpoints_and_widths() {
        let grid = FitGrid::new(vec![0.0, 1.0, 3.0]).unwrap();
        let mids = grid.midpoints();
        let widths = grid.widths();
        assert!((mids[0] - 0.5).abs() < 1e-12);
        assert!((mids[1] - 2.0).abs() < 1e-12);
        assert!((widths[0] - 1.0).abs() < 1e-12);
        assert!((widths[1] - 2.0).abs() < 1e-12);
    }
}
