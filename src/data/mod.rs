//! Data loading for the named-feature text format
//!
//! Feature names are mapped to ids by a [`Vocabulary`], lines are turned
//! into instances by [`parse_line`], and [`FeatureDataset`] reads a whole
//! stream and splits it for training.

pub mod dataset;
pub mod parser;
pub mod vocabulary;

pub use self::dataset::*;
pub use self::parser::*;
pub use self::vocabulary::*;
