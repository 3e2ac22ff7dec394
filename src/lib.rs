//! Averaged perceptron for binary classification of sparse feature vectors
//!
//! Instances are read from a simple text format where every feature has a
//! name; names are mapped to ids by a shared vocabulary. The model is a
//! mistake-driven perceptron evaluated with lazily averaged weights.

pub mod api;
pub mod core;
pub mod data;
pub mod metrics;
pub mod model;

// Re-export main types for convenience
pub use crate::api::{EpochReport, Trainer, TrainingReport};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{PerceptronError, Result};
pub use crate::data::{parse_line, split_train_test, FeatureDataset, Vocabulary};
pub use crate::metrics::{accuracy, EvaluationMetrics};
pub use crate::model::AveragedPerceptron;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
