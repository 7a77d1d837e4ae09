//! Random Over-Sampler
//!
//! Rebalances a training stream by replaying observations from
//! under-represented classes. Because the stream cannot be revisited, the
//! replay count for each observation is drawn from a Poisson distribution
//! whose rate is the desired-to-observed frequency ratio of its class.

use super::check_desired_dist;
use crate::error::{Error, Result};
use crate::models::{Classifier, Features, Label};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Poisson};
use std::collections::HashMap;

/// Online random over-sampler
///
/// For each incoming observation of class `y`, trains the wrapped classifier
/// `Poisson(desired[y] / empirical_freq[y])` times. Classes observed more
/// often than desired get a rate below one and are occasionally skipped;
/// classes observed less often than desired get a rate above one and are
/// replayed.
#[derive(Debug)]
pub struct RandomOverSampler<C: Classifier> {
    /// Wrapped classifier
    classifier: C,
    /// Target class distribution
    desired: HashMap<Label, f64>,
    /// Running count of observations seen per class
    observed: HashMap<Label, u64>,
    /// Total observations seen
    n_seen: u64,
    /// Training updates performed on the wrapped classifier
    n_updates: u64,
    /// Seeded RNG for the Poisson draws
    rng: StdRng,
}

impl<C: Classifier> RandomOverSampler<C> {
    /// Create a new over-sampler
    pub fn new(classifier: C, desired: HashMap<Label, f64>, seed: u64) -> Result<Self> {
        check_desired_dist(&desired)?;
        Ok(Self {
            classifier,
            desired,
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

impl<C: Classifier> Classifier for RandomOverSampler<C> {
    fn learn_one(&mut self, x: &Features, y: Label) -> Result<()> {
        if !self.desired.contains_key(&y) {
            return Err(Error::UnknownLabel(y));
        }

        *self.observed.entry(y).or_insert(0) += 1;
        self.n_seen += 1;

        let empirical = self.observed[&y] as f64 / self.n_seen as f64;
        let rate = self.desired[&y] / empirical;

        // Poisson is undefined for a zero rate; that only happens when the
        // desired proportion for the class is zero, so never train on it
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::SyntheticStream;

    #[derive(Debug, Default)]
    struct RecordingClassifier {
        learned: Vec<Label>,
    }

    impl Classifier for RecordingClassifier {
        fn learn_one(&mut self, _x: &Features, y: Label) -> Result<()> {
            self.learned.push(y);
            Ok(())
        }

        fn predict_proba(&self, _x: &Features) -> f64 {
            0.5
        }
    }

    #[test]
    fn test_invalid_distribution_fails_construction() {
        let desired = HashMap::from([(0, 0.3), (1, 0.3)]);
        let result = RandomOverSampler::new(RecordingClassifier::default(), desired, 42);
        assert!(matches!(result, Err(Error::InvalidDistribution(_))));
    }

    #[test]
    fn test_minority_class_is_replayed() {
        let desired = HashMap::from([(0, 0.5), (1, 0.5)]);
        let mut sampler =
            RandomOverSampler::new(RecordingClassifier::default(), desired, 42).unwrap();

        // True distribution roughly 95:5, desired 50:50
        let stream = SyntheticStream::new(0.05, 2, 3).unwrap();
        for obs in stream.take(20_000) {
            sampler.learn_one(&obs.features, obs.label).unwrap();
        }

        let learned = &sampler.classifier().learned;
        let ones = learned.iter().filter(|&&y| y == 1).count() as f64;
        let share = ones / learned.len() as f64;
        assert!(
            (share - 0.5).abs() < 0.05,
            "trained positive share {} not near 0.5",
            share
        );

        // Minority observations were multiplied, not just kept
        let seen_ones = sampler.observed_counts()[&1];
        assert!(ones as u64 > seen_ones);
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let run = || {
            let desired = HashMap::from([(0, 0.5), (1, 0.5)]);
            let mut sampler =
                RandomOverSampler::new(RecordingClassifier::default(), desired, 42).unwrap();
            let stream = SyntheticStream::new(0.1, 2, 7).unwrap();
            for obs in stream.take(2_000) {
                sampler.learn_one(&obs.features, obs.label).unwrap();
            }
            sampler.into_inner().learned
        };

        assert_eq!(run(), run());
    }
}
