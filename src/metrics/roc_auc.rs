//! Streaming ROC AUC
//!
//! Approximates the area under the ROC curve from a stream of scored
//! observations. An exact streaming computation would need every score seen
//! so far, so the metric keeps a running confusion count per decision
//! threshold and integrates the resulting curve with the trapezoid rule.

use super::ClassificationMetric;
use crate::models::Label;

/// Running confusion counts at one decision threshold
#[derive(Debug, Clone, Copy, Default)]
struct ThresholdCounts {
    /// True positives
    tp: u64,
    /// False positives
    fp: u64,
    /// True negatives
    tn: u64,
    /// False negatives
    fn_: u64,
}

/// Streaming ROC AUC metric
///
/// The approximation sharpens as the number of thresholds grows; the default
/// of 10 evenly spaced thresholds is a good trade-off for probability scores.
#[derive(Debug, Clone)]
pub struct RocAuc {
    /// Decision thresholds, ascending
    thresholds: Vec<f64>,
    /// Confusion counts per threshold
    counts: Vec<ThresholdCounts>,
    /// Positive observations seen
    n_pos: u64,
    /// Negative observations seen
    n_neg: u64,
}

impl Default for RocAuc {
    fn default() -> Self {
        Self::new(10)
    }
}

impl RocAuc {
    /// Create a ROC AUC metric with evenly spaced thresholds over [0, 1]
    pub fn new(n_thresholds: usize) -> Self {
        let n = n_thresholds.max(2);
        let thresholds = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
        Self {
            thresholds,
            counts: vec![ThresholdCounts::default(); n],
            n_pos: 0,
            n_neg: 0,
        }
    }

    /// Total observations seen
    pub fn samples_seen(&self) -> u64 {
        self.n_pos + self.n_neg
    }
}

impl ClassificationMetric for RocAuc {
    fn update(&mut self, y_true: Label, score: f64) {
        let positive = y_true == 1;
        if positive {
            self.n_pos += 1;
        } else {
            self.n_neg += 1;
        }

        for (threshold, counts) in self.thresholds.iter().zip(self.counts.iter_mut()) {
            match (positive, score >= *threshold) {
                (true, true) => counts.tp += 1,
                (true, false) => counts.fn_ += 1,
                (false, true) => counts.fp += 1,
                (false, false) => counts.tn += 1,
            }
        }
    }

    fn get(&self) -> f64 {
        // Undefined until both classes have been seen
        if self.n_pos == 0 || self.n_neg == 0 {
            return 0.5;
        }

        let n_pos = self.n_pos as f64;
        let n_neg = self.n_neg as f64;

        // Thresholds descending give ROC points with increasing FPR
        let mut auc = 0.0;
        let mut fpr_prev = 0.0;
        let mut tpr_prev = 0.0;

        for counts in self.counts.iter().rev() {
            let tpr = counts.tp as f64 / n_pos;
            let fpr = counts.fp as f64 / n_neg;
            auc += (fpr - fpr_prev) * (tpr + tpr_prev) / 2.0;
            fpr_prev = fpr;
            tpr_prev = tpr;
        }

        // Close the curve at (1, 1)
        auc += (1.0 - fpr_prev) * (1.0 + tpr_prev) / 2.0;

        auc
    }

    fn name(&self) -> &'static str {
        "ROCAUC"
    }
}
