//! Distance computation and nearest-neighbor ranking.

use num_traits::{AsPrimitive, Float};

use super::heap_utils::KBestNeighbors;
use crate::common_types::{FeatureMatrix, Label};
use crate::error::{KnnError, Result};

/// One ranked reference row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row index in the reference matrix.
    pub index: usize,
    pub distance: f64,
    pub label: Label,
}

/// The k nearest reference rows, nearest first.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborSet(Vec<Neighbor>);

impl NeighborSet {
    pub fn as_slice(&self) -> &[Neighbor] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.0.iter().map(|n| n.label)
    }
}

/// Euclidean (L2) distance, accumulated in `f64` whatever the feature type.
pub fn euclidean_distance<F>(a: &[F], b: &[F]) -> f64
where
    F: Float + AsPrimitive<f64>,
{
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = x.as_() - y.as_();
            diff * diff
        })
        .sum::<f64>()
        .sqrt()
}

/// Ranks the rows of `reference` by distance to `query` and returns the nearest `k`.
///
/// Ties in distance go to the lower row index, so the result is the same as a
/// stable ascending sort followed by taking the first `k`. `exclude_index`
/// drops one row from consideration (the held-out point during LOOCV).
///
/// # Errors
/// - `InvalidK` if `k == 0`.
/// - `ShapeMismatch` if `reference_labels` is not aligned with `reference`, the
///   query has the wrong number of features, or `exclude_index` is out of range.
/// - `InsufficientData` if fewer than `k` rows remain after exclusion.
pub fn rank_neighbors<F>(
    query: &[F],
    reference: &FeatureMatrix<'_, F>,
    reference_labels: &[Label],
    k: usize,
    exclude_index: Option<usize>,
) -> Result<NeighborSet>
where
    F: Float + AsPrimitive<f64>,
{
    if k == 0 {
        return Err(KnnError::invalid_k(k, "k must be at least 1"));
    }
    reference.check_labels(reference_labels)?;
    if query.len() != reference.n_features() {
        return Err(KnnError::shape(
            format!("query with {} features", reference.n_features()),
            format!("query with {} features", query.len()),
        ));
    }
    let n = reference.n_rows();
    if let Some(excluded) = exclude_index {
        if excluded >= n {
            return Err(KnnError::shape(
                format!("exclude index below {}", n),
                format!("exclude index {}", excluded),
            ));
        }
    }
    let available = n - usize::from(exclude_index.is_some());
    if available < k {
        return Err(KnnError::InsufficientData { requested: k, available });
    }

    let mut best = KBestNeighbors::new(k);
    for (index, (row, &label)) in reference.rows().zip(reference_labels).enumerate() {
        if exclude_index == Some(index) {
            continue;
        }
        best.add(euclidean_distance(query, row), index, label);
    }

    let neighbors = best
        .into_sorted_elements()
        .into_iter()
        .map(|elem| Neighbor { index: elem.index, distance: elem.distance.into_inner(), label: elem.data })
        .collect();
    Ok(NeighborSet(neighbors))
}
