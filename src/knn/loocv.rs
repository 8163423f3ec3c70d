//! Leave-one-out cross-validation of the weighted k-NN rule and selection of k.

use num_traits::{AsPrimitive, Float};
use rayon::prelude::*;
use tracing::{debug, info};

use super::ranking::rank_neighbors;
use super::vote::classify;
use super::weights::compute_optimal_weights;
use crate::common_types::{FeatureMatrix, Label};
use crate::error::{KnnError, Result};

/// A tested neighborhood size and its LOOCV error rate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CvResult {
    pub k: usize,
    /// Fraction of held-out rows misclassified, in `[0, 1]`.
    pub error: f64,
}

pub(crate) fn validate_training<F>(x: &FeatureMatrix<'_, F>, y: &[Label], d: usize) -> Result<()>
where
    F: Float + AsPrimitive<f64>,
{
    if d == 0 {
        return Err(KnnError::InvalidDimension(d));
    }
    if x.is_empty() {
        return Err(KnnError::EmptyDataset);
    }
    x.check_dimension(d)?;
    x.check_labels(y)
}

/// Holding one row out leaves `n - 1` possible neighbors.
fn check_leave_one_out_k(k: usize, n: usize) -> Result<()> {
    if k == 0 || k > n - 1 {
        return Err(KnnError::invalid_k(
            k,
            format!("leave-one-out needs 1 <= k <= n - 1 = {}", n - 1),
        ));
    }
    Ok(())
}

/// Leave-one-out error rate of the weighted k-NN rule with optimal weights for `(k, d)`.
///
/// Each row is classified against the other `n - 1` rows; the result is the
/// fraction of rows whose prediction differs from their label. Rows are
/// evaluated in parallel and the mismatch count is reduced once at the end.
///
/// # Errors
/// `InvalidDimension`, `EmptyDataset`, `ShapeMismatch` (labels or `d` not
/// matching `x`) and `InvalidK` unless `1 <= k <= n - 1`.
pub fn loocv_error<F>(x: &FeatureMatrix<'_, F>, y: &[Label], k: usize, d: usize) -> Result<f64>
where
    F: Float + AsPrimitive<f64> + Send + Sync,
{
    validate_training(x, y, d)?;
    let n = x.n_rows();
    check_leave_one_out_k(k, n)?;
    let weights = compute_optimal_weights(k, d)?;
    debug!(n, k, d, "running leave-one-out cross-validation");

    let errors = (0..n)
        .into_par_iter()
        .map(|j| -> Result<usize> {
            let neighbors = rank_neighbors(x.row(j), x, y, k, Some(j))?;
            Ok(usize::from(classify(weights.as_slice(), &neighbors) != y[j]))
        })
        .try_reduce(|| 0, |a, b| Ok(a + b))?;

    Ok(errors as f64 / n as f64)
}

/// Runs [`loocv_error`] for every candidate and returns the results in candidate order.
///
/// All candidates are validated before any evaluation starts.
pub fn evaluate_candidates<F>(
    x: &FeatureMatrix<'_, F>,
    y: &[Label],
    candidates: &[usize],
    d: usize,
) -> Result<Vec<CvResult>>
where
    F: Float + AsPrimitive<f64> + Send + Sync,
{
    if candidates.is_empty() {
        return Err(KnnError::EmptyCandidateSet);
    }
    validate_training(x, y, d)?;
    for &k in candidates {
        check_leave_one_out_k(k, x.n_rows())?;
    }

    candidates
        .par_iter()
        .map(|&k| loocv_error(x, y, k, d).map(|error| CvResult { k, error }))
        .collect()
}

/// Picks the candidate with the lowest LOOCV error.
///
/// Candidates are compared in the order given and a later one replaces the
/// current best only when its error is strictly lower, so on a tie the
/// earliest candidate wins.
///
/// # Errors
/// `EmptyCandidateSet` for an empty list, `InvalidK` if any candidate is
/// outside `1..=n-1`, plus the errors of [`loocv_error`].
pub fn select_best_k<F>(x: &FeatureMatrix<'_, F>, y: &[Label], candidates: &[usize], d: usize) -> Result<CvResult>
where
    F: Float + AsPrimitive<f64> + Send + Sync,
{
    let results = evaluate_candidates(x, y, candidates, d)?;
    for result in &results {
        info!(k = result.k, error = result.error, "candidate evaluated");
    }

    let best = results
        .into_iter()
        .reduce(|best, next| if next.error < best.error { next } else { best })
        .ok_or(KnnError::EmptyCandidateSet)?;
    info!(k = best.k, error = best.error, "selected k");
    Ok(best)
}
