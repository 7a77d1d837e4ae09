//! Stream Resampling Module
//!
//! Wrappers that rebalance the class distribution a classifier is trained
//! on. Each wrapper sits in front of an arbitrary [`crate::models::Classifier`]
//! and decides, per incoming labeled observation, whether (or how many times)
//! to forward it for training. Predictions are always delegated untouched.
//!
//! - [`RandomUnderSampler`] probabilistically discards over-represented
//!   classes.
//! - [`RandomOverSampler`] replays under-represented classes.
//! - [`RandomSampler`] combines both behind a global sampling rate.

mod hybrid;
mod over;
mod under;

pub use hybrid::RandomSampler;
pub use over::RandomOverSampler;
pub use under::RandomUnderSampler;

use crate::error::{Error, Result};
use crate::models::Label;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Tolerance when checking that desired proportions sum to one
const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// Validate a desired class distribution at construction time
///
/// Proportions must be non-negative and sum to 1.0 within tolerance.
pub(crate) fn check_desired_dist(desired: &HashMap<Label, f64>) -> Result<()> {
    if desired.is_empty() {
        return Err(Error::InvalidDistribution(
            "distribution is empty".to_string(),
        ));
    }

    for (label, proportion) in desired {
        if !proportion.is_finite() || *proportion < 0.0 {
            return Err(Error::InvalidDistribution(format!(
                "proportion for label {} is {}",
                label, proportion
            )));
        }
    }

    let total: f64 = desired.values().sum();
    if (total - 1.0).abs() > DISTRIBUTION_TOLERANCE {
        return Err(Error::InvalidDistribution(format!(
            "proportions sum to {}, expected 1.0",
            total
        )));
    }

    Ok(())
}

/// Class with the highest desired-to-observed frequency ratio
///
/// This is the class most under-represented relative to the target
/// distribution; the under-sampler never discards it. Ties break towards the
/// smallest label so the choice is independent of map iteration order.
pub(crate) fn pivot_class(
    desired: &HashMap<Label, f64>,
    observed: &HashMap<Label, u64>,
) -> Option<Label> {
    observed
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(label, count)| {
            let ratio = desired.get(label).copied().unwrap_or(0.0) / *count as f64;
            (*label, ratio)
        })
        .max_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then(b.0.cmp(&a.0))
        })
        .map(|(label, _)| label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_distribution() {
        let desired = HashMap::from([(0, 0.8), (1, 0.2)]);
        assert!(check_desired_dist(&desired).is_ok());
    }

    #[test]
    fn test_distribution_not_summing_to_one() {
        let desired = HashMap::from([(0, 0.5), (1, 0.6)]);
        assert!(matches!(
            check_desired_dist(&desired),
            Err(Error::InvalidDistribution(_))
        ));
    }

    #[test]
    fn test_negative_proportion() {
        let desired = HashMap::from([(0, 1.2), (1, -0.2)]);
        assert!(matches!(
            check_desired_dist(&desired),
            Err(Error::InvalidDistribution(_))
        ));
    }

    #[test]
    fn test_empty_distribution() {
        let desired = HashMap::new();
        assert!(check_desired_dist(&desired).is_err());
    }

    #[test]
    fn test_pivot_is_most_underrepresented_class() {
        let desired = HashMap::from([(0, 0.8), (1, 0.2)]);
        // Class 1 desired at 20% but observed at 1%
        let observed = HashMap::from([(0, 99), (1, 1)]);
        assert_eq!(pivot_class(&desired, &observed), Some(1));
    }

    #[test]
    fn test_pivot_with_no_observations() {
        let desired = HashMap::from([(0, 0.8), (1, 0.2)]);
        let observed = HashMap::new();
        assert_eq!(pivot_class(&desired, &observed), None);
    }

    #[test]
    fn test_pivot_tie_breaks_deterministically() {
        let desired = HashMap::from([(0, 0.5), (1, 0.5)]);
        let observed = HashMap::from([(0, 10), (1, 10)]);
        for _ in 0..20 {
            assert_eq!(pivot_class(&desired, &observed), Some(0));
        }
    }
}
