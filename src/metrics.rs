//! Accuracy and confusion-matrix metrics for binary labels

use crate::core::Label;

/// Fraction of positions where `gold` and `predicted` agree.
///
/// Returns 0.0 when the lengths differ or when there is nothing to compare.
pub fn accuracy(gold: &[Label], predicted: &[Label]) -> f64 {
    if gold.len() != predicted.len() || gold.is_empty() {
        return 0.0;
    }
    let correct = gold
        .iter()
        .zip(predicted.iter())
        .filter(|(g, p)| g == p)
        .count();
    correct as f64 / gold.len() as f64
}

/// Detailed evaluation metrics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationMetrics {
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl EvaluationMetrics {
    pub fn new(tp: usize, tn: usize, fp: usize, fn_: usize) -> Self {
        Self {
            true_positives: tp,
            true_negatives: tn,
            false_positives: fp,
            false_negatives: fn_,
        }
    }

    /// Tally gold/predicted pairs; labels above zero count as positive
    pub fn from_labels(gold: &[Label], predicted: &[Label]) -> Self {
        let mut metrics = Self::default();
        for (&actual, &pred) in gold.iter().zip(predicted.iter()) {
            match (pred > 0, actual > 0) {
                (true, true) => metrics.true_positives += 1,
                (false, false) => metrics.true_negatives += 1,
                (true, false) => metrics.false_positives += 1,
                (false, true) => metrics.false_negatives += 1,
            }
        }
        metrics
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    /// Calculate accuracy: (TP + TN) / (TP + TN + FP + FN)
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    /// Calculate precision: TP / (TP + FP)
    pub fn precision(&self) -> f64 {
        ratio(
            self.true_positives,
            self.true_positives + self.false_positives,
        )
    }

    /// Calculate recall (sensitivity): TP / (TP + FN)
    pub fn recall(&self) -> f64 {
        ratio(
            self.true_positives,
            self.true_positives + self.false_negatives,
        )
    }

    /// Calculate F1 score: 2 * (precision * recall) / (precision + recall)
    pub fn f1_score(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * (p * r) / (p + r)
        }
    }

    /// Calculate specificity: TN / (TN + FP)
    pub fn specificity(&self) -> f64 {
        ratio(
            self.true_negatives,
            self.true_negatives + self.false_positives,
        )
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_basic() {
        assert_eq!(accuracy(&[1, -1, 1, -1], &[1, -1, -1, -1]), 0.75);
        assert_eq!(accuracy(&[1, 1], &[1, 1]), 1.0);
        assert_eq!(accuracy(&[1, 1], &[-1, -1]), 0.0);
    }

    #[test]
    fn test_accuracy_length_mismatch() {
        assert_eq!(accuracy(&[1, -1, 1], &[1, -1]), 0.0);
        assert_eq!(accuracy(&[], &[1]), 0.0);
    }

    #[test]
    fn test_accuracy_empty() {
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn test_accuracy_bounds() {
        let gold = [1, -1, 1, 1, -1, 3, 0];
        let predicted = [1, 1, -1, 1, -1, 1, -1];
        let acc = accuracy(&gold, &predicted);
        assert!((0.0..=1.0).contains(&acc));
        // Labels other than +1/-1 never match a prediction
        assert_eq!(acc, 3.0 / 7.0);
    }

    #[test]
    fn test_evaluation_metrics() {
        let metrics = EvaluationMetrics::new(10, 5, 2, 3);

        assert_eq!(metrics.accuracy(), 0.75); // (10+5)/(10+5+2+3)
        assert_eq!(metrics.precision(), 10.0 / 12.0); // 10/(10+2)
        assert_eq!(metrics.recall(), 10.0 / 13.0); // 10/(10+3)
        assert!(metrics.f1_score() > 0.0);
        assert_eq!(metrics.specificity(), 5.0 / 7.0); // 5/(5+2)
    }

    #[test]
    fn test_metrics_from_labels() {
        let metrics = EvaluationMetrics::from_labels(&[1, 1, -1, -1, 2], &[1, -1, -1, 1, 1]);
        assert_eq!(metrics, EvaluationMetrics::new(2, 1, 1, 1));
        assert_eq!(metrics.total(), 5);
    }

    #[test]
    fn test_metrics_zero_denominators() {
        let metrics = EvaluationMetrics::default();
        assert_eq!(metrics.accuracy(), 0.0);
        assert_eq!(metrics.precision(), 0.0);
        assert_eq!(metrics.recall(), 0.0);
        assert_eq!(metrics.f1_score(), 0.0);
        assert_eq!(metrics.specificity(), 0.0);
    }
}
