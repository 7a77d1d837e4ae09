//! Hybrid Random Sampler
//!
//! Combines under- and over-sampling behind a single wrapper. A global
//! `sampling_rate` scales how much of the stream is used for training, while
//! the desired distribution controls the class balance of what gets through.

use super::check_desired_dist;
use crate::error::{Error, Result};
use crate::models::{Classifier, Features, Label};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Poisson};
use std::collections::HashMap;

/// Online hybrid under/over-sampler
///
/// For each incoming observation of class `y`, trains the wrapped classifier
/// `Poisson(sampling_rate * desired[y] / empirical_freq[y])` times. With a
/// sampling rate below one this under-samples the whole stream; rates above
/// one lean on replaying observations.
#[derive(Debug)]
pub struct RandomSampler<C: Classifier> {
    /// Wrapped classifier
    classifier: C,
    /// Target class distribution
    desired: HashMap<Label, f64>,
    /// Fraction of the (rebalanced) stream used for training
    sampling_rate: f64,
    /// Running count of observations seen per class
    observed: HashMap<Label, u64>,
    /// Total observations seen
    n_seen: u64,
    /// Training updates performed on the wrapped classifier
    n_updates: u64,
    /// Seeded RNG for the Poisson draws
    rng: StdRng,
}

impl<C: Classifier> RandomSampler<C> {
    /// Create a new hybrid sampler
    ///
    /// # Arguments
    ///
    /// * `classifier` - Wrapped classifier receiving the rebalanced stream
    /// * `desired` - Target class distribution; proportions must sum to 1.0
    /// * `sampling_rate` - Global training-rate multiplier, must be positive
    /// * `seed` - Seed for the Poisson draws
    pub fn new(
        classifier: C,
        desired: HashMap<Label, f64>,
        sampling_rate: f64,
        seed: u64,
    ) -> Result<Self> {
        check_desired_dist(&desired)?;
        if !sampling_rate.is_finite() || sampling_rate <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "sampling_rate must be positive, got {}",
                sampling_rate
            )));
        }
        Ok(Self {
            classifier,
            desired,
            sampling_rate,
            observed: HashMap::new(),
            n_seen: 0,
            n_updates: 0,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Observations seen per class
    pub fn observed_counts(&self) -> &HashMap<Label, u64> {
        &self.observed
    }

    /// Total observations seen
    pub fn samples_seen(&self) -> u64 {
        self.n_seen
    }

    /// Training updates performed on the wrapped classifier
    pub fn n_updates(&self) -> u64 {
        self.n_updates
    }

    /// Access the wrapped classifier
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Consume the sampler, returning the wrapped classifier
    pub fn into_inner(self) -> C {
        self.classifier
    }
}

impl<C: Classifier> Classifier for RandomSampler<C> {
    fn learn_one(&mut self, x: &Features, y: Label) -> Result<()> {
        if !self.desired.contains_key(&y) {
            return Err(Error::UnknownLabel(y));
        }

        *self.observed.entry(y).or_insert(0) += 1;
        self.n_seen += 1;

        let empirical = self.observed[&y] as f64 / self.n_seen as f64;
        let rate = self.sampling_rate * self.desired[&y] / empirical;

        let replays = match Poisson::new(rate) {
            Ok(dist) => dist.sample(&mut self.rng) as u64,
            Err(_) => 0,
        };

        for _ in 0..replays {
            self.classifier.learn_one(x, y)?;
            self.n_updates += 1;
        }

        Ok(())
    }

    fn predict_proba(&self, x: &Features) -> f64 {
        self.classifier.predict_proba(x)
    }
}
