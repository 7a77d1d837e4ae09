//! Observation Streams Module
//!
//! Sources of labeled observations: a seeded synthetic generator for
//! experiments with a controlled class imbalance, and a CSV loader for
//! labeled datasets such as credit-card transactions.

use crate::error::{Error, Result};
use crate::models::{Features, Label};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::path::Path;

/// One labeled observation from a stream
#[derive(Debug, Clone)]
pub struct Observation {
    /// Named feature vector
    pub features: Features,
    /// Class label
    pub label: Label,
}

/// Seeded synthetic stream of imbalanced binary observations
///
/// Each observation's class is drawn from a Bernoulli prior and its features
/// from a per-class Gaussian cluster: the negative class is centered at zero
/// and the positive class is shifted by `separation` on every feature. The
/// stream is infinite and lazy; reconstructing it with the same seed replays
/// the identical sequence.
#[derive(Debug)]
pub struct SyntheticStream {
    /// Seeded RNG driving both label and feature draws
    rng: StdRng,
    /// Probability of the positive class
    positive_rate: f64,
    /// Feature names, fixed at construction
    feature_names: Vec<String>,
    /// Mean shift of the positive-class cluster
    separation: f64,
}

impl SyntheticStream {
    /// Create a new synthetic stream
    ///
    /// # Arguments
    ///
    /// * `positive_rate` - Probability of the positive class, in (0, 1)
    /// * `n_features` - Number of features per observation
    /// * `seed` - Seed for the generator
    pub fn new(positive_rate: f64, n_features: usize, seed: u64) -> Result<Self> {
        if !positive_rate.is_finite() || positive_rate <= 0.0 || positive_rate >= 1.0 {
            return Err(Error::InvalidParameter(format!(
                "positive_rate must be in (0, 1), got {}",
                positive_rate
            )));
        }
        if n_features == 0 {
            return Err(Error::InvalidParameter(
                "n_features must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            positive_rate,
            feature_names: (0..n_features).map(|i| format!("f{}", i)).collect(),
            separation: 1.5,
        })
    }

    /// Set the mean shift between the two class clusters (default: 1.5)
    pub fn with_separation(mut self, separation: f64) -> Self {
        self.separation = separation;
        self
    }

    /// Feature names produced by this stream
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

impl Iterator for SyntheticStream {
    type Item = Observation;

    fn next(&mut self) -> Option<Observation> {
        let label = u8::from(self.rng.gen::<f64>() < self.positive_rate);
        let shift = if label == 1 { self.separation } else { 0.0 };

        let features = self
            .feature_names
            .iter()
            .map(|name| {
                let noise: f64 = self.rng.sample(StandardNormal);
                (name.clone(), shift + noise)
            })
            .collect();

        Some(Observation { features, label })
    }
}

/// Load labeled observations from a CSV file
///
/// Every column is parsed as a numeric feature except `label_column`, whose
/// value is thresholded at 0.5 to produce the binary label. The file must
/// have a header row.
pub fn read_csv<P: AsRef<Path>>(path: P, label_column: &str) -> Result<Vec<Observation>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let label_idx = headers
        .iter()
        .position(|h| h == label_column)
        .ok_or_else(|| {
            Error::InvalidParameter(format!("label column '{}' not found", label_column))
        })?;

    let mut observations = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let mut features = Features::new();
        let mut label = 0;

        for (idx, field) in record.iter().enumerate() {
            let value: f64 = field.trim().parse().map_err(|_| {
                Error::ParseError(format!(
                    "non-numeric value '{}' in column '{}' on row {}",
                    field,
                    &headers[idx],
                    line + 1
                ))
            })?;

            if idx == label_idx {
                label = u8::from(value >= 0.5);
            } else {
                features.insert(headers[idx].to_string(), value);
            }
        }

        observations.push(Observation { features, label });
    }

    Ok(observations)
}
