//! Core type definitions for perceptron training

use crate::core::{PerceptronError, Result};

/// Class label as read from the input (conventionally +1 or -1)
pub type Label = i32;

/// Label predicted for a strictly positive score
pub const POSITIVE: Label = 1;

/// Label predicted for a zero or negative score
pub const NEGATIVE: Label = -1;

/// Prediction result containing label and decision value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted class label (+1 or -1)
    pub label: Label,
    /// Raw decision function value
    pub decision_value: f64,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(label: Label, decision_value: f64) -> Self {
        Self {
            label,
            decision_value,
        }
    }

    /// Threshold a score: positive only when strictly above zero
    pub fn from_decision_value(decision_value: f64) -> Self {
        let label = if decision_value > 0.0 {
            POSITIVE
        } else {
            NEGATIVE
        };
        Self::new(label, decision_value)
    }

    /// Get confidence as absolute value of decision value
    pub fn confidence(&self) -> f64 {
        self.decision_value.abs()
    }
}

/// Sparse vector representation with sorted, unique indices
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SparseVector {
    /// Sorted feature ids of the stored elements
    pub indices: Vec<usize>,
    /// Values corresponding to indices
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Create a new sparse vector, ensuring indices are sorted.
    ///
    /// When an index appears more than once the value given last wins.
    pub fn new(indices: Vec<usize>, values: Vec<f64>) -> Self {
        assert_eq!(
            indices.len(),
            values.len(),
            "Indices and values must have same length"
        );

        // Stable sort keeps duplicates in input order
        let mut pairs: Vec<_> = indices.into_iter().zip(values).collect();
        pairs.sort_by_key(|&(idx, _)| idx);

        let mut out = Self::empty();
        for (idx, value) in pairs {
            if out.indices.last() == Some(&idx) {
                if let Some(last) = out.values.last_mut() {
                    *last = value;
                }
            } else {
                out.indices.push(idx);
                out.values.push(value);
            }
        }
        out
    }

    /// Build from `(index, value)` pairs
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let (indices, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self::new(indices, values)
    }

    /// Create an empty sparse vector
    pub fn empty() -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Get the value at a specific index (0 if not present)
    pub fn get(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Iterate over `(index, value)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Number of stored elements
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Check if vector is empty
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// One labeled sparse feature vector parsed from an input line
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    /// Class label
    pub label: Label,
    /// Feature vector (sparse representation)
    pub features: SparseVector,
}

impl Instance {
    /// Create a new instance
    pub fn new(label: Label, features: SparseVector) -> Self {
        Self { label, features }
    }
}

/// How the instance sitting at the train/test boundary is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitBoundary {
    /// Drop the instance at index `n`: test is `data[n+1..]`
    #[default]
    SkipOne,
    /// Test starts right where train ends: `data[n..]`
    Contiguous,
}

/// Configuration for the training driver
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    /// Number of passes over the training split
    pub epochs: usize,
    /// Fraction of instances used for training
    pub train_ratio: f64,
    /// Treatment of the boundary instance
    pub split_boundary: SplitBoundary,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            epochs: 10,
            train_ratio: 0.8,
            split_boundary: SplitBoundary::SkipOne,
        }
    }
}

impl TrainerConfig {
    /// Check that the parameters describe a runnable training session
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(PerceptronError::InvalidParameter(
                "Number of epochs must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.train_ratio) {
            return Err(PerceptronError::InvalidParameter(format!(
                "Train ratio must be between 0 and 1, got: {}",
                self.train_ratio
            )));
        }
        Ok(())
    }
}
