//! The weighted vote shared by LOOCV and prediction.

use super::ranking::NeighborSet;
use crate::common_types::Label;

/// Vote share at or above which class 1 wins. A vote of exactly one half goes to class 1.
pub const CLASS_ONE_THRESHOLD: f64 = 0.5;

/// Sums the weights of the neighbors labelled class 1 (rank `i` uses `weights[i]`)
/// and predicts class 1 when that sum reaches [`CLASS_ONE_THRESHOLD`].
pub fn weighted_vote(weights: &[f64], neighbor_labels: impl IntoIterator<Item = Label>) -> Label {
    let vote: f64 = weights
        .iter()
        .zip(neighbor_labels)
        .filter(|(_, label)| *label == Label::One)
        .map(|(w, _)| *w)
        .sum();
    if vote >= CLASS_ONE_THRESHOLD { Label::One } else { Label::Two }
}

pub(crate) fn classify(weights: &[f64], neighbors: &NeighborSet) -> Label {
    weighted_vote(weights, neighbors.labels())
}
