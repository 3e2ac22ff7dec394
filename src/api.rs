//! High-level training driver
//!
//! This module ties data, model and metrics together: it splits a dataset,
//! runs a fixed number of perceptron epochs and reports accuracy after each.
//!
//! # Quick Start
//!
//! ```rust
//! use rperceptron::api::Trainer;
//! use rperceptron::FeatureDataset;
//! use std::io::Cursor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = "1 a:1 b:1\n-1 a:-1 b:1\n1 a:1 b:1\n-1 a:-1 b:1\n";
//! let dataset = FeatureDataset::from_reader(Cursor::new(data));
//!
//! let report = Trainer::new()
//!     .with_epochs(5)
//!     .train(&dataset, |epoch| println!("{epoch}"))?;
//!
//! assert_eq!(report.epochs.len(), 5);
//! # Ok(())
//! # }
//! ```

use crate::core::{Dataset, Instance, Label, Result, SplitBoundary, TrainerConfig};
use crate::data::split_train_test;
use crate::metrics::{accuracy, EvaluationMetrics};
use crate::model::AveragedPerceptron;
use log::{debug, info};
use std::fmt;

/// Training driver with builder pattern
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    /// Create a trainer with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a trainer from an explicit configuration
    pub fn with_config(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Set the number of epochs
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.config.epochs = epochs;
        self
    }

    /// Set the fraction of instances used for training
    pub fn with_train_ratio(mut self, train_ratio: f64) -> Self {
        self.config.train_ratio = train_ratio;
        self
    }

    /// Set how the boundary instance between the splits is treated
    pub fn with_split_boundary(mut self, split_boundary: SplitBoundary) -> Self {
        self.config.split_boundary = split_boundary;
        self
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Split `dataset` and train on it, calling `on_epoch` after every epoch
    pub fn train<D, F>(&self, dataset: &D, on_epoch: F) -> Result<TrainingReport>
    where
        D: Dataset,
        F: FnMut(&EpochReport),
    {
        self.config.validate()?;
        let (train, test) = split_train_test(
            dataset.instances(),
            self.config.train_ratio,
            self.config.split_boundary,
        );
        self.run_epochs(train, test, on_epoch)
    }

    /// Train on `train` and evaluate on both splits after every epoch
    pub fn train_split<F>(
        &self,
        train: &[Instance],
        test: &[Instance],
        on_epoch: F,
    ) -> Result<TrainingReport>
    where
        F: FnMut(&EpochReport),
    {
        self.config.validate()?;
        self.run_epochs(train, test, on_epoch)
    }

    /// Epoch loop; the configuration has already been validated
    fn run_epochs<F>(
        &self,
        train: &[Instance],
        test: &[Instance],
        mut on_epoch: F,
    ) -> Result<TrainingReport>
    where
        F: FnMut(&EpochReport),
    {
        info!(
            "Training on {} instances, testing on {} instances, {} epochs",
            train.len(),
            test.len(),
            self.config.epochs
        );

        let train_golds = gold_labels(train);
        let test_golds = gold_labels(test);

        let mut model = AveragedPerceptron::new();
        let mut epochs = Vec::with_capacity(self.config.epochs);

        for epoch in 0..self.config.epochs {
            let mut updates = 0;
            for instance in train {
                if model.learn(instance) {
                    updates += 1;
                }
            }
            debug!("Epoch {epoch}: {updates} updates, count = {}", model.count());

            let report = EpochReport {
                epoch,
                train_accuracy: accuracy(&train_golds, &predict_all(&model, train)),
                test_accuracy: accuracy(&test_golds, &predict_all(&model, test)),
                updates,
            };
            on_epoch(&report);
            epochs.push(report);
        }

        Ok(TrainingReport {
            model,
            epochs,
            train_size: train.len(),
            test_size: test.len(),
        })
    }
}

/// Accuracy snapshot taken after one training pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochReport {
    /// Zero-based epoch index
    pub epoch: usize,
    pub train_accuracy: f64,
    pub test_accuracy: f64,
    /// Mistake-driven updates made during the pass
    pub updates: usize,
}

impl fmt::Display for EpochReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{:.3}\t{:.3}",
            self.epoch, self.train_accuracy, self.test_accuracy
        )
    }
}

/// Outcome of a training session
#[derive(Debug, Clone)]
pub struct TrainingReport {
    /// Model after the last epoch
    pub model: AveragedPerceptron,
    pub epochs: Vec<EpochReport>,
    pub train_size: usize,
    pub test_size: usize,
}

impl TrainingReport {
    /// Report of the last epoch, if any ran
    pub fn last(&self) -> Option<&EpochReport> {
        self.epochs.last()
    }
}

/// Labels of `instances` in order
pub fn gold_labels(instances: &[Instance]) -> Vec<Label> {
    instances.iter().map(|s| s.label).collect()
}

/// Averaged-weight predictions for `instances` in order
pub fn predict_all(model: &AveragedPerceptron, instances: &[Instance]) -> Vec<Label> {
    instances
        .iter()
        .map(|s| model.predict(&s.features))
        .collect()
}

/// Accuracy of `model` on `instances`
pub fn evaluate(model: &AveragedPerceptron, instances: &[Instance]) -> f64 {
    accuracy(&gold_labels(instances), &predict_all(model, instances))
}

/// Confusion counts of `model` on `instances`
pub fn evaluate_detailed(model: &AveragedPerceptron, instances: &[Instance]) -> EvaluationMetrics {
    EvaluationMetrics::from_labels(&gold_labels(instances), &predict_all(model, instances))
}
