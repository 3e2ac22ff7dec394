//! Dataset of named-feature instances
//!
//! Reads one instance per line and resolves every feature name through a
//! single [`Vocabulary`], so that train and test splits taken from the same
//! dataset agree on feature ids. Malformed lines are skipped.

use crate::core::{Dataset, Instance, Result, SplitBoundary};
use crate::data::{parse_line, Vocabulary};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Instances parsed from a line-oriented source together with their vocabulary
#[derive(Debug, Clone, Default)]
pub struct FeatureDataset {
    instances: Vec<Instance>,
    vocabulary: Vocabulary,
}

impl FeatureDataset {
    /// Load a dataset from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }

    /// Load a dataset from a reader with a fresh vocabulary
    pub fn from_reader<R: BufRead>(reader: R) -> Self {
        Self::from_reader_with_vocabulary(reader, Vocabulary::new())
    }

    /// Load a dataset from a reader, extending an existing vocabulary.
    ///
    /// Lines are decoded lossily, so bad encoding only affects the line it
    /// appears on. A read error ends the input the same way EOF does.
    pub fn from_reader_with_vocabulary<R: BufRead>(
        mut reader: R,
        vocabulary: Vocabulary,
    ) -> Self {
        let mut dataset = Self {
            instances: Vec::new(),
            vocabulary,
        };
        let mut skipped = 0usize;
        let mut buf = Vec::new();
        let mut line_num = 0usize;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => line_num += 1,
                Err(e) => {
                    warn!("Stopped reading at line {}: {e}", line_num + 1);
                    break;
                }
            }

            let line = String::from_utf8_lossy(&buf);
            match parse_line(&line, &mut dataset.vocabulary) {
                Ok(instance) => dataset.instances.push(instance),
                Err(e) => {
                    debug!("Skipping line {line_num}: {e}");
                    skipped += 1;
                }
            }
        }

        info!(
            "Loaded {} instances with {} features ({} lines skipped)",
            dataset.instances.len(),
            dataset.vocabulary.len(),
            skipped
        );

        dataset
    }

    /// Build a dataset from already parsed instances
    pub fn from_instances(instances: Vec<Instance>, vocabulary: Vocabulary) -> Self {
        Self {
            instances,
            vocabulary,
        }
    }

    /// Vocabulary shared by every instance
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Split into train and test slices, see [`split_train_test`]
    pub fn split(&self, train_ratio: f64, boundary: SplitBoundary) -> (&[Instance], &[Instance]) {
        split_train_test(&self.instances, train_ratio, boundary)
    }
}

impl Dataset for FeatureDataset {
    fn len(&self) -> usize {
        self.instances.len()
    }

    fn dim(&self) -> usize {
        self.vocabulary.len()
    }

    fn instances(&self) -> &[Instance] {
        &self.instances
    }
}

/// Sequential split: the first `floor(train_ratio * len)` instances train.
///
/// With [`SplitBoundary::SkipOne`] the instance right after the training
/// prefix belongs to neither side. The test slice is empty when the input is
/// too short to reach past the boundary.
pub fn split_train_test(
    data: &[Instance],
    train_ratio: f64,
    boundary: SplitBoundary,
) -> (&[Instance], &[Instance]) {
    let n = ((data.len() as f64 * train_ratio) as usize).min(data.len());
    let test_start = match boundary {
        SplitBoundary::SkipOne => (n + 1).min(data.len()),
        SplitBoundary::Contiguous => n,
    };
    (&data[..n], &data[test_start..])
}
