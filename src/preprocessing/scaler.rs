//! Standard Scaler
//!
//! Centers and scales each feature to zero mean and unit variance using
//! running statistics, so no pass over the full dataset is needed.

use super::Transformer;
use crate::models::Features;
use std::collections::HashMap;

/// Running statistics for a single feature
#[derive(Debug, Clone, Copy, Default)]
struct RunningStats {
    /// Running mean
    mean: f64,
    /// Running variance
    var: f64,
    /// Number of values seen
    n: u64,
}

impl RunningStats {
    /// Welford's online algorithm for mean and variance
    fn update(&mut self, value: f64) {
        let n = self.n as f64;
        let delta = value - self.mean;
        self.mean += delta / (n + 1.0);
        let delta2 = value - self.mean;
        self.var += (delta * delta2 - self.var) / (n + 1.0);
        self.n += 1;
    }
}

/// Online standard scaler
///
/// Maintains per-feature running mean and variance and scales each incoming
/// value to `(x - mean) / std`. Features the scaler has not seen yet pass
/// through centered at zero.
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    /// Per-feature running statistics
    stats: HashMap<String, RunningStats>,
}

impl StandardScaler {
    /// Create a new standard scaler
    pub fn new() -> Self {
        Self::default()
    }

    /// Running mean of a feature, if seen
    pub fn mean(&self, name: &str) -> Option<f64> {
        self.stats.get(name).map(|s| s.mean)
    }

    /// Running variance of a feature, if seen
    pub fn variance(&self, name: &str) -> Option<f64> {
        self.stats.get(name).map(|s| s.var)
    }
}

impl Transformer for StandardScaler {
    fn learn_one(&mut self, x: &Features) {
        for (name, value) in x {
            self.stats.entry(name.clone()).or_default().update(*value);
        }
    }

    fn transform_one(&self, x: &Features) -> Features {
        x.iter()
            .map(|(name, value)| {
                let scaled = match self.stats.get(name) {
                    Some(s) if s.var > 1e-10 => (value - s.mean) / s.var.sqrt(),
                    Some(s) => value - s.mean,
                    None => *value,
                };
                (name.clone(), scaled)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(value: f64) -> Features {
        let mut x = Features::new();
        x.insert("amount".to_string(), value);
        x
    }

    #[test]
    fn test_running_mean_and_variance() {
        let mut scaler = StandardScaler::new();
        for v in [2.0, 4.0, 6.0, 8.0] {
            scaler.learn_one(&obs(v));
        }

        assert!((scaler.mean("amount").unwrap() - 5.0).abs() < 1e-10);
        // Population variance of [2, 4, 6, 8]
        assert!((scaler.variance("amount").unwrap() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_transform_centers_and_scales() {
        let mut scaler = StandardScaler::new();
        for v in [2.0, 4.0, 6.0, 8.0] {
            scaler.learn_one(&obs(v));
        }

        let scaled = scaler.transform_one(&obs(5.0));
        assert!(scaled["amount"].abs() < 1e-10);

        let scaled = scaler.transform_one(&obs(5.0 + 5.0_f64.sqrt()));
        assert!((scaled["amount"] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_constant_feature_is_centered_only() {
        let mut scaler = StandardScaler::new();
        for _ in 0..10 {
            scaler.learn_one(&obs(3.0));
        }

        let scaled = scaler.transform_one(&obs(4.0));
        assert!((scaled["amount"] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_unseen_feature_passes_through() {
        let scaler = StandardScaler::new();
        let scaled = scaler.transform_one(&obs(7.5));
        assert!((scaled["amount"] - 7.5).abs() < 1e-10);
    }
}
