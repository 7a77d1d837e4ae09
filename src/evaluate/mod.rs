//! Progressive Validation Module
//!
//! Evaluates a model's prediction on each observation before using that
//! observation to update the model, simulating real-time streaming
//! evaluation. Every observation therefore serves as test data exactly once.

use crate::error::Result;
use crate::metrics::ClassificationMetric;
use crate::models::Classifier;
use crate::stream::Observation;
use tracing::info;

/// Run progressive validation over a stream of observations
///
/// For each observation: score it with the current model, feed the score to
/// the metric, then train the model on it. Returns the final metric value.
/// Errors from the model propagate unchanged.
///
/// # Arguments
///
/// * `stream` - Ordered observation stream
/// * `model` - Model under evaluation, updated in place
/// * `metric` - Metric updated with every pre-update prediction
/// * `report_every` - Log the running metric every N observations (0 disables)
pub fn progressive_val_score<I, C, M>(
    stream: I,
    model: &mut C,
    metric: &mut M,
    report_every: usize,
) -> Result<f64>
where
    I: IntoIterator<Item = Observation>,
    C: Classifier,
    M: ClassificationMetric,
{
    for (i, obs) in stream.into_iter().enumerate() {
        let score = model.predict_proba(&obs.features);
        metric.update(obs.label, score);
        model.learn_one(&obs.features, obs.label)?;

        if report_every > 0 && (i + 1) % report_every == 0 {
            info!("[{:>8}] {}: {:.6}", i + 1, metric.name(), metric.get());
        }
    }

    Ok(metric.get())
}
