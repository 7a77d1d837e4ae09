//! Online Classification Models Module
//!
//! This module provides the classifier abstraction used across the library
//! together with an online logistic regression implementation.

mod logistic;

pub use logistic::LogisticRegression;

use crate::error::Result;
use std::collections::HashMap;

/// Named feature vector for a single observation
pub type Features = HashMap<String, f64>;

/// Class label (0 = negative, 1 = positive for the binary case)
pub type Label = u8;

/// Trait for streaming classifiers
///
/// A classifier learns from one labeled observation at a time and scores
/// unlabeled observations at any point in between. Wrappers such as the
/// resamplers in [`crate::sampling`] accept any implementation of this trait.
pub trait Classifier {
    /// Learn from a single labeled observation
    fn learn_one(&mut self, x: &Features, y: Label) -> Result<()>;

    /// Probability of the positive class for an observation
    fn predict_proba(&self, x: &Features) -> f64;

    /// Hard class prediction (threshold at 0.5)
    fn predict_one(&self, x: &Features) -> Label {
        u8::from(self.predict_proba(x) >= 0.5)
    }
}
