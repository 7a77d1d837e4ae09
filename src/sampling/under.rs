//! Random Under-Sampler
//!
//! Rebalances a training stream towards a desired class distribution by
//! probabilistically discarding observations from over-represented classes.
//!
//! Reference:
//! Wang, B. and Pineau, J., 2016. Online bagging and boosting for imbalanced
//! data streams. IEEE Transactions on Knowledge and Data Engineering, 28(12).

use super::{check_desired_dist, pivot_class};
use crate::error::{Error, Result};
use crate::models::{Classifier, Features, Label};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Online random under-sampler
///
/// Wraps a classifier and decides per incoming observation whether to forward
/// it for training, so that over time the forwarded stream approximates the
/// desired class distribution. The decision compares the desired-to-observed
/// frequency ratio of the incoming label against the pivot class (the class
/// most under-represented relative to its target, which is never discarded):
///
/// ```text
/// accept with probability  desired[y] * observed[pivot]
///                          ---------------------------
///                          desired[pivot] * observed[y]
/// ```
///
/// Observed counts grow monotonically and are never reset. Predictions are
/// always delegated to the wrapped classifier and have no effect on counts.
#[derive(Debug)]
pub struct RandomUnderSampler<C: Classifier> {
    /// Wrapped classifier
    classifier: C,
    /// Target class distribution
    desired: HashMap<Label, f64>,
    /// Running count of observations seen per class
    observed: HashMap<Label, u64>,
    /// Number of observations forwarded for training
    n_forwarded: u64,
    /// Seeded RNG for reproducible acceptance draws
    rng: StdRng,
}

impl<C: Classifier> RandomUnderSampler<C> {
    /// Create a new under-sampler
    ///
    /// # Arguments
    ///
    /// * `classifier` - Wrapped classifier receiving the rebalanced stream
    /// * `desired` - Target class distribution; proportions must sum to 1.0
    /// * `seed` - Seed for the acceptance draws
    pub fn new(classifier: C, desired: HashMap<Label, f64>, seed: u64) -> Result<Self> {
        check_desired_dist(&desired)?;
        Ok(Self {
            classifier,
            desired,
            observed: HashMap::new(),
            n_forwarded: 0,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Observations seen per class (every `learn_one` call, forwarded or not)
    pub fn observed_counts(&self) -> &HashMap<Label, u64> {
        &self.observed
    }

    /// Total observations seen
    pub fn samples_seen(&self) -> u64 {
        self.observed.values().sum()
    }

    /// Observations forwarded to the wrapped classifier
    pub fn n_forwarded(&self) -> u64 {
        self.n_forwarded
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

impl<C: Classifier> Classifier for RandomUnderSampler<C> {
    fn learn_one(&mut self, x: &Features, y: Label) -> Result<()> {
        // Reject before any state mutation so a failed update is atomic
        if !self.desired.contains_key(&y) {
            return Err(Error::UnknownLabel(y));
        }

        *self.observed.entry(y).or_insert(0) += 1;

        let pivot = match pivot_class(&self.desired, &self.observed) {
            Some(pivot) => pivot,
            None => y,
        };

        if y == pivot {
            self.n_forwarded += 1;
            return self.classifier.learn_one(x, y);
        }

        let ratio = self.desired[&y] * self.observed[&pivot] as f64
            / (self.desired[&pivot] * self.observed[&y] as f64);

        if self.rng.gen::<f64>() < ratio {
            self.n_forwarded += 1;
            self.classifier.learn_one(x, y)?;
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
    use std::cell::Cell;

    /// Test double recording every call it receives
    #[derive(Debug, Default)]
    struct RecordingClassifier {
        learned: Vec<Label>,
        predict_calls: Cell<u64>,
    }

    impl Classifier for RecordingClassifier {
        fn learn_one(&mut self, _x: &Features, y: Label) -> Result<()> {
            self.learned.push(y);
            Ok(())
        }

        fn predict_proba(&self, _x: &Features) -> f64 {
            self.predict_calls.set(self.predict_calls.get() + 1);
            0.5
        }
    }

    fn desired_80_20() -> HashMap<Label, f64> {
        HashMap::from([(0, 0.8), (1, 0.2)])
    }

    fn empty_features() -> Features {
        Features::new()
    }

    #[test]
    fn test_invalid_distribution_fails_construction() {
        let desired = HashMap::from([(0, 0.5), (1, 0.6)]);
        let result = RandomUnderSampler::new(RecordingClassifier::default(), desired, 42);
        assert!(matches!(result, Err(Error::InvalidDistribution(_))));
    }

    #[test]
    fn test_observed_counts_reflect_every_update() {
        let mut sampler =
            RandomUnderSampler::new(RecordingClassifier::default(), desired_80_20(), 42).unwrap();

        let labels = [0, 0, 0, 1, 0, 0, 1, 0, 0, 0];
        for &y in &labels {
            sampler.learn_one(&empty_features(), y).unwrap();
        }

        assert_eq!(sampler.observed_counts()[&0], 8);
        assert_eq!(sampler.observed_counts()[&1], 2);
        assert_eq!(sampler.samples_seen(), labels.len() as u64);
    }

    #[test]
    fn test_unknown_label_fails_without_mutation() {
        let mut sampler =
            RandomUnderSampler::new(RecordingClassifier::default(), desired_80_20(), 42).unwrap();
        sampler.learn_one(&empty_features(), 0).unwrap();

        let result = sampler.learn_one(&empty_features(), 7);
        assert!(matches!(result, Err(Error::UnknownLabel(7))));
        assert_eq!(sampler.samples_seen(), 1);
        assert_eq!(sampler.n_forwarded(), 1);
    }

    #[test]
    fn test_predict_always_delegates() {
        let mut sampler =
            RandomUnderSampler::new(RecordingClassifier::default(), desired_80_20(), 42).unwrap();

        for i in 0..50 {
            sampler.predict_proba(&empty_features());
            sampler.learn_one(&empty_features(), (i % 10 == 0) as u8).unwrap();
        }

        assert_eq!(sampler.classifier().predict_calls.get(), 50);
    }

    #[test]
    fn test_rarest_class_always_forwarded() {
        // Labels from the 10-example scenario: 0,0,0,0,1,0,0,0,0,1
        let labels: [Label; 10] = [0, 0, 0, 0, 1, 0, 0, 0, 0, 1];
        let mut sampler =
            RandomUnderSampler::new(RecordingClassifier::default(), desired_80_20(), 42).unwrap();

        for &y in &labels {
            sampler.learn_one(&empty_features(), y).unwrap();
        }

        let forwarded = &sampler.classifier().learned;
        let ones = forwarded.iter().filter(|&&y| y == 1).count();
        assert_eq!(ones, 2, "label-1 examples must always be forwarded");
        assert!(forwarded.iter().filter(|&&y| y == 0).count() <= 8);
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let run = |seed: u64| {
            let mut sampler =
                RandomUnderSampler::new(RecordingClassifier::default(), desired_80_20(), seed)
                    .unwrap();
            let stream = SyntheticStream::new(0.1, 2, 7).unwrap();
            for obs in stream.take(2_000) {
                sampler.learn_one(&obs.features, obs.label).unwrap();
            }
            sampler.into_inner().learned
        };

        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn test_forwarded_stream_converges_to_desired_distribution() {
        let mut sampler =
            RandomUnderSampler::new(RecordingClassifier::default(), desired_80_20(), 42).unwrap();

        // True distribution 99:1, desired 80:20
        let stream = SyntheticStream::new(0.01, 2, 1).unwrap();
        for obs in stream.take(100_000) {
            sampler.learn_one(&obs.features, obs.label).unwrap();
        }

        let forwarded = &sampler.classifier().learned;
        let ones = forwarded.iter().filter(|&&y| y == 1).count() as f64;
        let share = ones / forwarded.len() as f64;
        assert!(
            (share - 0.2).abs() < 0.02,
            "forwarded positive share {} not within 2% of 0.2",
            share
        );
    }
}
