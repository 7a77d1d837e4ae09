//! Streaming Classification Metrics Module
//!
//! Metrics that update incrementally from (label, score) pairs, so a model
//! can be evaluated while it learns.

mod roc_auc;

pub use roc_auc::RocAuc;

use crate::models::Label;

/// Trait for streaming binary classification metrics
pub trait ClassificationMetric {
    /// Update the metric with the true label and the predicted probability
    /// of the positive class
    fn update(&mut self, y_true: Label, score: f64);

    /// Current metric value
    fn get(&self) -> f64;

    /// Display name used in progress reports
    fn name(&self) -> &'static str;
}

/// Running accuracy at a 0.5 decision threshold
#[derive(Debug, Clone, Default)]
pub struct Accuracy {
    /// Correct predictions
    correct: u64,
    /// Total predictions
    total: u64,
}

impl Accuracy {
    /// Create a new accuracy metric
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClassificationMetric for Accuracy {
    fn update(&mut self, y_true: Label, score: f64) {
        let predicted = score >= 0.5;
        if predicted == (y_true == 1) {
            self.correct += 1;
        }
        self.total += 1;
    }

    fn get(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }

    fn name(&self) -> &'static str {
        "Accuracy"
    }
}
