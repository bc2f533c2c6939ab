use crate::types::Axis;

/// Errors reported while validating inputs or running the estimator.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the input coordinate and limit sequences disagree in length.
    #[error("length mismatch: expected {expected} elements for `{name}`, got {got}")]
    LengthMismatch {
        /// The name of the offending input sequence.
        name: &'static str,
        /// The expected length (taken from the `x` sequence).
        expected: usize,
        /// The actual length of the offending sequence.
        got: usize,
    },

    /// Returned when a sample is constructed with zero observations.
    #[error("sample must contain at least one observation")]
    EmptySample,

    /// Returned when an observation lies on or beyond its truncation limit.
    ///
    /// Such a point could not have been observed under the stated truncation
    /// and makes the estimator ill-defined.
    #[error("observation {index}: {axis} = {value} is not below its truncation limit {limit}")]
    TruncationViolation {
        /// The index of the offending observation.
        index: usize,
        /// The axis on which the limit is violated.
        axis: Axis,
        /// The observed coordinate.
        value: f64,
        /// The truncation limit for this observation.
        limit: f64,
    },

    /// Returned when a coordinate or limit is NaN or infinite.
    #[error("observation {index} has a non-finite coordinate or truncation limit")]
    NonFinite {
        /// The index of the offending observation.
        index: usize,
    },

    /// Returned when a fit grid has fewer than two bin edges.
    #[error("fit grid needs at least two edges to define a bin, got {0}")]
    TooFewEdges(usize),

    /// Returned when fit grid edges are not strictly increasing.
    #[error("fit grid edges must be strictly increasing: edges[{index}] = {prev} >= edges[{index_next}] = {next}")]
    NonMonotonicEdges {
        /// The index of the earlier edge of the offending pair.
        index: usize,
        /// The index of the later edge of the offending pair.
        index_next: usize,
        /// The earlier edge value.
        prev: f64,
        /// The later edge value.
        next: f64,
    },

    /// Returned when no observation on an axis has a non-empty comparable set,
    /// so the cumulative estimator carries no information at all.
    ///
    /// A single-observation sample always trips this: its one point has nothing
    /// to be compared against.
    #[error("no comparable observations along the {0} axis; sample is too sparse or fully truncated")]
    DegenerateComparableSet(Axis),
}

pub type Result<T> = core::result::Result<T, Error>;
