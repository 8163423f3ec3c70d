//! Evaluation helpers for predicted labels.

use crate::common_types::Label;
use crate::error::{KnnError, Result};

/// Fraction of positions where `predicted` matches `truth`.
pub fn accuracy(predicted: &[Label], truth: &[Label]) -> Result<f64> {
    if predicted.len() != truth.len() {
        return Err(KnnError::shape(
            format!("{} predictions", truth.len()),
            format!("{} predictions", predicted.len()),
        ));
    }
    if truth.is_empty() {
        return Err(KnnError::EmptyDataset);
    }
    let correct = predicted.iter().zip(truth).filter(|(p, t)| p == t).count();
    Ok(correct as f64 / truth.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        let truth = [Label::One, Label::Two, Label::Two, Label::One];
        let predicted = [Label::One, Label::One, Label::Two, Label::One];
        assert_eq!(accuracy(&predicted, &truth).unwrap(), 0.75);
    }

    #[test]
    fn test_accuracy_rejects_mismatched_lengths() {
        assert!(matches!(accuracy(&[Label::One], &[]), Err(KnnError::ShapeMismatch { .. })));
        assert_eq!(accuracy(&[], &[]).unwrap_err(), KnnError::EmptyDataset);
    }
}
