//! Error types for perceptron training

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PerceptronError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Too few tokens: expected a label and at least one feature, got {0} token(s)")]
    TooFewTokens(usize),

    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    #[error("Invalid feature format: {0}")]
    InvalidFeature(String),

    #[error("Invalid value for feature {name}: {value}")]
    InvalidFeatureValue { name: String, value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PerceptronError {
    /// Whether the error came from a single malformed input line
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::TooFewTokens(_)
                | Self::InvalidLabel(_)
                | Self::InvalidFeature(_)
                | Self::InvalidFeatureValue { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PerceptronError>;
