//! Online Logistic Regression
//!
//! Implements stochastic gradient descent for binary logistic regression
//! over named feature vectors. Weights are grown lazily as new feature
//! names appear in the stream.

use super::{Classifier, Features, Label};
use crate::error::Result;
use std::collections::HashMap;

/// Online Logistic Regression with SGD
///
/// Updates weights incrementally from one observation at a time using the
/// log-loss gradient. Supports L2 regularization.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// Per-feature weights, keyed by feature name
    weights: HashMap<String, f64>,
    /// Bias term
    bias: f64,
    /// Learning rate
    learning_rate: f64,
    /// L2 regularization strength
    l2_reg: f64,
    /// Number of samples seen
    n_samples: u64,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(0.05)
    }
}

impl LogisticRegression {
    /// Create a new online logistic regression model
    ///
    /// # Arguments
    ///
    /// * `learning_rate` - Learning rate for SGD
    pub fn new(learning_rate: f64) -> Self {
        Self {
            weights: HashMap::new(),
            bias: 0.0,
            learning_rate,
            l2_reg: 0.0,
            n_samples: 0,
        }
    }

    /// Create with custom L2 regularization
    pub fn with_l2(mut self, l2_reg: f64) -> Self {
        self.l2_reg = l2_reg;
        self
    }

    /// Numerically stable sigmoid
    fn sigmoid(z: f64) -> f64 {
        if z >= 0.0 {
            1.0 / (1.0 + (-z).exp())
        } else {
            let exp_z = z.exp();
            exp_z / (1.0 + exp_z)
        }
    }

    /// Raw decision score before the sigmoid
    fn raw_score(&self, x: &Features) -> f64 {
        let mut score = self.bias;
        for (name, value) in x {
            if let Some(w) = self.weights.get(name) {
                score += w * value;
            }
        }
        score
    }

    /// Get number of samples processed
    pub fn samples_seen(&self) -> u64 {
        self.n_samples
    }

    /// Get the weight of a feature, if it has been seen
    pub fn weight(&self, name: &str) -> Option<f64> {
        self.weights.get(name).copied()
    }

    /// Get bias term
    pub fn bias(&self) -> f64 {
        self.bias
    }
}

impl Classifier for LogisticRegression {
    fn predict_proba(&self, x: &Features) -> f64 {
        Self::sigmoid(self.raw_score(x))
    }

    /// Learn from a single observation using the log-loss gradient
    fn learn_one(&mut self, x: &Features, y: Label) -> Result<()> {
        let error = self.predict_proba(x) - f64::from(y);

        for (name, value) in x {
            let w = self.weights.entry(name.clone()).or_insert(0.0);
            *w -= self.learning_rate * (error * value + self.l2_reg * *w);
        }
        self.bias -= self.learning_rate * error;

        self.n_samples += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(values: &[(&str, f64)]) -> Features {
        values
            .iter()
            .map(|(name, v)| (name.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_initial_prediction_is_uninformative() {
        let model = LogisticRegression::default();
        let p = model.predict_proba(&obs(&[("a", 1.0), ("b", -1.0)]));
        assert!((p - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_learns_separable_data() {
        let mut model = LogisticRegression::new(0.5);

        // Positive when x > 0, negative when x < 0
        for _ in 0..200 {
            model.learn_one(&obs(&[("x", 1.0)]), 1).unwrap();
            model.learn_one(&obs(&[("x", -1.0)]), 0).unwrap();
        }

        assert!(model.predict_proba(&obs(&[("x", 1.0)])) > 0.9);
        assert!(model.predict_proba(&obs(&[("x", -1.0)])) < 0.1);
        assert_eq!(model.predict_one(&obs(&[("x", 1.0)])), 1);
        assert_eq!(model.predict_one(&obs(&[("x", -1.0)])), 0);
    }

    #[test]
    fn test_unseen_features_ignored_at_prediction() {
        let mut model = LogisticRegression::new(0.1);
        model.learn_one(&obs(&[("x", 1.0)]), 1).unwrap();

        let with_unseen = model.predict_proba(&obs(&[("x", 1.0), ("never_seen", 100.0)]));
        let without = model.predict_proba(&obs(&[("x", 1.0)]));
        assert!((with_unseen - without).abs() < 1e-10);
    }

    #[test]
    fn test_samples_seen() {
        let mut model = LogisticRegression::default();
        for _ in 0..5 {
            model.learn_one(&obs(&[("x", 0.3)]), 0).unwrap();
        }
        assert_eq!(model.samples_seen(), 5);
    }
}
