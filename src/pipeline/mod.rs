//! Pipeline Module
//!
//! Chains streaming transformers with a final classifier. Each stage exposes
//! the same learn/transform capability, so stages compose by explicit
//! sequencing: every observation flows through the stages in order before it
//! reaches the classifier.

use crate::error::Result;
use crate::models::{Classifier, Features, Label};
use crate::preprocessing::Transformer;

/// Ordered sequence of transformer stages followed by a classifier
///
/// The pipeline itself implements [`Classifier`], so it can be wrapped by
/// any of the resamplers in [`crate::sampling`].
pub struct Pipeline<C: Classifier> {
    /// Transformer stages, applied in order
    stages: Vec<Box<dyn Transformer>>,
    /// Final classifier
    classifier: C,
}

impl<C: Classifier> Pipeline<C> {
    /// Create a pipeline with no transformer stages
    pub fn new(classifier: C) -> Self {
        Self {
            stages: Vec::new(),
            classifier,
        }
    }

    /// Append a transformer stage
    pub fn with_stage<T: Transformer + 'static>(mut self, stage: T) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Number of transformer stages
    pub fn n_stages(&self) -> usize {
        self.stages.len()
    }

    /// Access the final classifier
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Run an observation through all stages without updating them
    fn transform(&self, x: &Features) -> Features {
        let mut current = x.clone();
        for stage in &self.stages {
            current = stage.transform_one(&current);
        }
        current
    }
}

impl<C: Classifier> Classifier for Pipeline<C> {
    /// Update each stage with the observation as it passes through, then
    /// train the classifier on the fully transformed features
    fn learn_one(&mut self, x: &Features, y: Label) -> Result<()> {
        let mut current = x.clone();
        for stage in &mut self.stages {
            stage.learn_one(&current);
            current = stage.transform_one(&current);
        }
        self.classifier.learn_one(&current, y)
    }

    fn predict_proba(&self, x: &Features) -> f64 {
        self.classifier.predict_proba(&self.transform(x))
    }
}
