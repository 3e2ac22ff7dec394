//! Linear models trained online

pub mod perceptron;

pub use self::perceptron::*;
