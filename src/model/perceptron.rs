//! Averaged perceptron
//!
//! Mistake-driven online learner for binary labels. Besides the raw weight
//! vector `w` the model keeps a cumulative vector `c` where every update
//! `label * v` applied at mistake counter `t` also adds `t * label * v` to
//! `c`. The averaged weights are then recovered lazily as
//!
//! ```text
//! avg[f] = w[f] - c[f] / count
//! ```
//!
//! so the average costs nothing extra per training step.

use crate::core::{Classifier, Instance, Label, OnlineLearner, Prediction, SparseVector};
use std::collections::HashMap;

/// Averaged perceptron over sparse feature ids
#[derive(Debug, Clone, PartialEq)]
pub struct AveragedPerceptron {
    weight: HashMap<usize, f64>,
    cum_weight: HashMap<usize, f64>,
    /// Mistake counter, starts at 1
    count: u64,
}

impl Default for AveragedPerceptron {
    fn default() -> Self {
        Self::new()
    }
}

impl AveragedPerceptron {
    /// Cold model: no weights and a counter of 1
    pub fn new() -> Self {
        Self {
            weight: HashMap::new(),
            cum_weight: HashMap::new(),
            count: 1,
        }
    }

    /// Score under the raw online weights
    pub fn training_score(&self, features: &SparseVector) -> f64 {
        features
            .iter()
            .map(|(f, v)| self.weight(f) * v)
            .sum()
    }

    /// Score under the averaged weights
    pub fn averaged_score(&self, features: &SparseVector) -> f64 {
        let count = self.count as f64;
        features.iter().fold(0.0, |score, (f, v)| {
            score + self.weight(f) * v - self.cum_weight(f) * v / count
        })
    }

    /// Label under the raw online weights, as used while learning
    pub fn predict_for_training(&self, features: &SparseVector) -> Label {
        Prediction::from_decision_value(self.training_score(features)).label
    }

    /// Label under the averaged weights
    pub fn predict(&self, features: &SparseVector) -> Label {
        Prediction::from_decision_value(self.averaged_score(features)).label
    }

    /// One online update; returns true when the instance was misclassified
    pub fn learn(&mut self, instance: &Instance) -> bool {
        if self.predict_for_training(&instance.features) == instance.label {
            return false;
        }

        let label = instance.label as f64;
        let count = self.count as f64;
        for (f, v) in instance.features.iter() {
            *self.weight.entry(f).or_insert(0.0) += label * v;
            *self.cum_weight.entry(f).or_insert(0.0) += count * label * v;
        }
        self.count += 1;
        true
    }

    /// Raw weight of a feature (0 if never updated)
    pub fn weight(&self, feature: usize) -> f64 {
        self.weight.get(&feature).copied().unwrap_or(0.0)
    }

    /// Cumulative weight of a feature (0 if never updated)
    pub fn cum_weight(&self, feature: usize) -> f64 {
        self.cum_weight.get(&feature).copied().unwrap_or(0.0)
    }

    /// Averaged weight of a feature
    pub fn averaged_weight(&self, feature: usize) -> f64 {
        self.weight(feature) - self.cum_weight(feature) / self.count as f64
    }

    /// Mistake counter (1 + number of updates so far)
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Number of features touched by at least one update
    pub fn n_features(&self) -> usize {
        self.weight.len()
    }
}

impl Classifier for AveragedPerceptron {
    fn decision_value(&self, features: &SparseVector) -> f64 {
        self.averaged_score(features)
    }
}

impl OnlineLearner for AveragedPerceptron {
    fn learn(&mut self, instance: &Instance) -> bool {
        AveragedPerceptron::learn(self, instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NEGATIVE, POSITIVE};
    use approx::assert_relative_eq;

    fn instance(label: Label, pairs: &[(usize, f64)]) -> Instance {
        Instance::new(label, SparseVector::from_pairs(pairs.iter().copied()))
    }

    #[test]
    fn test_cold_start_predicts_negative() {
        let model = AveragedPerceptron::new();
        let features = SparseVector::from_pairs(vec![(0, 3.0), (7, -2.0)]);

        assert_eq!(model.predict_for_training(&features), NEGATIVE);
        assert_eq!(model.predict(&features), NEGATIVE);
        assert_eq!(model.predict(&SparseVector::empty()), NEGATIVE);
        assert_eq!(model.count(), 1);
    }

    #[test]
    fn test_single_mistake_update() {
        let mut model = AveragedPerceptron::new();
        let updated = model.learn(&instance(1, &[(0, 2.0)]));

        assert!(updated);
        assert_eq!(model.weight(0), 2.0);
        assert_eq!(model.cum_weight(0), 2.0);
        assert_eq!(model.count(), 2);
        assert_eq!(model.n_features(), 1);
    }

    #[test]
    fn test_no_mistake_leaves_state_unchanged() {
        let mut model = AveragedPerceptron::new();
        model.learn(&instance(1, &[(0, 1.0), (1, 1.0)]));

        let before = model.clone();
        let updated = model.learn(&instance(1, &[(0, 1.0)]));

        assert!(!updated);
        assert_eq!(model, before);
    }

    #[test]
    fn test_negative_label_is_correct_on_cold_model() {
        let mut model = AveragedPerceptron::new();
        assert!(!model.learn(&instance(-1, &[(0, 5.0)])));
        assert_eq!(model.count(), 1);
        assert_eq!(model.n_features(), 0);
    }

    #[test]
    fn test_cumulative_weight_uses_pre_update_count() {
        let mut model = AveragedPerceptron::new();
        // count = 1: w = 1, c = 1
        model.learn(&instance(1, &[(0, 1.0)]));
        // score 1 > 0 predicts +1, mistake at count = 2: w = 0, c = 1 - 2 = -1
        model.learn(&instance(-1, &[(0, 1.0)]));

        assert_eq!(model.weight(0), 0.0);
        assert_eq!(model.cum_weight(0), -1.0);
        assert_eq!(model.count(), 3);
        assert_relative_eq!(model.averaged_weight(0), 1.0 / 3.0);
    }

    #[test]
    fn test_averaged_score_differs_from_training_score() {
        let mut model = AveragedPerceptron::new();
        model.learn(&instance(1, &[(0, 1.0)]));
        model.learn(&instance(-1, &[(0, 1.0)]));

        let features = SparseVector::from_pairs(vec![(0, 1.0)]);
        assert_eq!(model.training_score(&features), 0.0);
        assert_relative_eq!(model.averaged_score(&features), 1.0 / 3.0);

        assert_eq!(model.predict_for_training(&features), NEGATIVE);
        assert_eq!(model.predict(&features), POSITIVE);
    }

    #[test]
    fn test_averaged_score_matches_formula() {
        let mut model = AveragedPerceptron::new();
        let data = [
            instance(1, &[(0, 1.0), (1, 0.5)]),
            instance(-1, &[(1, 2.0), (2, 1.0)]),
            instance(1, &[(2, -1.0), (3, 1.5)]),
            instance(-1, &[(0, 0.5), (3, 1.0)]),
        ];
        for _ in 0..3 {
            for x in &data {
                model.learn(x);
            }
        }

        let features = SparseVector::from_pairs(vec![(0, 0.7), (2, -0.3), (3, 1.1), (9, 4.0)]);
        let count = model.count() as f64;
        let raw: f64 = features.iter().map(|(f, v)| model.weight(f) * v).sum();
        let cum: f64 = features.iter().map(|(f, v)| model.cum_weight(f) * v).sum();

        assert!(model.count() > 1);
        assert_relative_eq!(model.training_score(&features), raw, epsilon = 1e-12);
        assert_relative_eq!(
            model.averaged_score(&features),
            raw - cum / count,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_weight_and_cum_weight_share_keys() {
        let mut model = AveragedPerceptron::new();
        model.learn(&instance(1, &[(0, 1.0), (4, 0.0)]));
        model.learn(&instance(-1, &[(0, 1.0), (2, 1.0)]));

        let mut w_keys: Vec<_> = model.weight.keys().copied().collect();
        let mut c_keys: Vec<_> = model.cum_weight.keys().copied().collect();
        w_keys.sort_unstable();
        c_keys.sort_unstable();
        assert_eq!(w_keys, vec![0, 2, 4]);
        assert_eq!(w_keys, c_keys);
    }

    #[test]
    fn test_non_unit_label_scales_update() {
        let mut model = AveragedPerceptron::new();
        // A label of 2 never matches a +1/-1 prediction
        assert!(model.learn(&instance(2, &[(0, 1.0)])));
        assert!(model.learn(&instance(2, &[(0, 1.0)])));

        assert_eq!(model.weight(0), 4.0);
        assert_eq!(model.cum_weight(0), 2.0 + 4.0);
        assert_eq!(model.count(), 3);
    }

    #[test]
    fn test_classifier_trait_uses_averaged_weights() {
        let mut model = AveragedPerceptron::new();
        model.learn(&instance(1, &[(0, 1.0)]));
        model.learn(&instance(-1, &[(0, 1.0)]));

        let batch = [instance(-1, &[(0, 1.0)]), instance(1, &[(0, -1.0)])];
        let predictions = Classifier::predict_batch(&model, &batch);

        assert_eq!(predictions[0].label, POSITIVE);
        assert_relative_eq!(predictions[0].decision_value, 1.0 / 3.0);
        assert_eq!(predictions[1].label, NEGATIVE);
    }

    #[test]
    fn test_learn_pass_counts_updates() {
        let mut model = AveragedPerceptron::new();
        let data = vec![
            instance(1, &[(0, 1.0), (1, 1.0)]),
            instance(-1, &[(0, -1.0), (1, 1.0)]),
            instance(1, &[(0, 1.0), (1, 1.0)]),
        ];

        assert_eq!(model.learn_pass(&data), 1);
        assert_eq!(model.learn_pass(&data), 0);
        assert_eq!(model.count(), 2);
    }
}
