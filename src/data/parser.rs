//! Line parser for the named-feature text format
//!
//! Each line holds one instance:
//! label name:value name:value ...
//!
//! Example:
//! +1 word=good:1 len:0.5
//! -1 word=bad:1 len:0.25

use crate::core::{Instance, Label, PerceptronError, Result, SparseVector};
use crate::data::Vocabulary;

/// Parse one line, resolving feature names through `vocabulary`.
///
/// Names are only registered once the whole line has parsed, so a
/// rejected line leaves the vocabulary untouched.
pub fn parse_line(line: &str, vocabulary: &mut Vocabulary) -> Result<Instance> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.len() < 2 {
        return Err(PerceptronError::TooFewTokens(parts.len()));
    }

    let label = parts[0]
        .parse::<Label>()
        .map_err(|_| PerceptronError::InvalidLabel(parts[0].to_string()))?;

    let mut named = Vec::with_capacity(parts.len() - 1);
    for feature_str in &parts[1..] {
        let (name, value) = feature_str
            .split_once(':')
            .ok_or_else(|| PerceptronError::InvalidFeature(feature_str.to_string()))?;

        let value = value
            .parse::<f64>()
            .map_err(|_| PerceptronError::InvalidFeatureValue {
                name: name.to_string(),
                value: value.to_string(),
            })?;

        named.push((name, value));
    }

    let features = SparseVector::from_pairs(
        named
            .into_iter()
            .map(|(name, value)| (vocabulary.get_id(name), value)),
    );

    Ok(Instance::new(label, features))
}
