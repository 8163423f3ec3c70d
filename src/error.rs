//! Error type shared by every operation in the crate.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KnnError>;

/// Contract violations detected by the weight solver, the ranker, the
/// LOOCV evaluator and the classifier.
///
/// All of these are raised eagerly at the start of the operation and are
/// never retried: they describe a bad call, not a transient condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnnError {
    /// Feature dimensionality of zero.
    #[error("invalid dimension: d must be at least 1, got {0}")]
    InvalidDimension(usize),

    /// Neighborhood size outside the range allowed by the operation.
    #[error("invalid k = {k}: {reason}")]
    InvalidK { k: usize, reason: String },

    /// Feature matrix with no rows.
    #[error("dataset has no rows")]
    EmptyDataset,

    /// Raw label outside the two recognised classes (1 and 2).
    #[error("label {0} is not binary; expected 1 or 2")]
    NonBinaryLabel(i64),

    /// Row count, label count or feature count disagree.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// `predict` called before `fit`.
    #[error("classifier is not fitted; call fit() first")]
    NotFitted,

    /// `select_best_k` called with no candidates.
    #[error("candidate list for k is empty")]
    EmptyCandidateSet,

    /// Fewer usable reference rows than requested neighbors.
    #[error("insufficient data: requested {requested} neighbors but only {available} reference rows are usable")]
    InsufficientData { requested: usize, available: usize },
}

impl KnnError {
    pub(crate) fn invalid_k(k: usize, reason: impl Into<String>) -> Self {
        KnnError::InvalidK { k, reason: reason.into() }
    }

    pub(crate) fn shape(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        KnnError::ShapeMismatch { expected: expected.into(), actual: actual.into() }
    }
}
