//! Core traits for perceptron training

use crate::core::{Instance, Label, Prediction, SparseVector};

/// Dataset abstraction over parsed instances
pub trait Dataset {
    /// Number of instances in the dataset
    fn len(&self) -> usize;

    /// Number of distinct features (dimensionality)
    fn dim(&self) -> usize;

    /// All instances in input order
    fn instances(&self) -> &[Instance];

    /// Get a single instance by index
    ///
    /// # Panics
    /// Panics if index >= len()
    fn get_instance(&self, i: usize) -> &Instance {
        &self.instances()[i]
    }

    /// Get all labels as a vector
    fn get_labels(&self) -> Vec<Label> {
        self.instances().iter().map(|s| s.label).collect()
    }

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A trained (or training) binary classifier
pub trait Classifier {
    /// Raw score; positive means the positive class
    fn decision_value(&self, features: &SparseVector) -> f64;

    /// Predict a single feature vector
    fn predict(&self, features: &SparseVector) -> Prediction {
        Prediction::from_decision_value(self.decision_value(features))
    }

    /// Predict multiple instances
    fn predict_batch(&self, instances: &[Instance]) -> Vec<Prediction> {
        instances
            .iter()
            .map(|s| self.predict(&s.features))
            .collect()
    }
}

/// Model updated one instance at a time
pub trait OnlineLearner {
    /// Apply one online update; returns true if the model changed
    fn learn(&mut self, instance: &Instance) -> bool;

    /// One pass over `instances` in order, returning the number of updates
    fn learn_pass(&mut self, instances: &[Instance]) -> usize {
        instances
            .iter()
            .filter(|instance| self.learn(instance))
            .count()
    }
}
