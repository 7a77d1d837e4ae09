//! Online Learning Library for Imbalanced Classification Streams
//!
//! This library provides online learning building blocks for binary
//! classification on heavily imbalanced streams, such as credit-card fraud
//! detection, where one class vastly outnumbers the other.
//!
//! # Modules
//!
//! - `models` - Classifier trait and online logistic regression
//! - `preprocessing` - Streaming feature transformers (standard scaler)
//! - `pipeline` - Composition of transformers with a final classifier
//! - `sampling` - Resampling wrappers that rebalance the training stream
//! - `metrics` - Streaming evaluation metrics (ROC AUC, accuracy)
//! - `evaluate` - Progressive validation harness
//! - `stream` - Observation sources (synthetic generator, CSV loader)
//!
//! # Example
//!
//! ```rust,no_run
//! use imbalanced_learning::evaluate::progressive_val_score;
//! use imbalanced_learning::metrics::RocAuc;
//! use imbalanced_learning::models::LogisticRegression;
//! use imbalanced_learning::pipeline::Pipeline;
//! use imbalanced_learning::preprocessing::StandardScaler;
//! use imbalanced_learning::sampling::RandomUnderSampler;
//! use imbalanced_learning::stream::SyntheticStream;
//! use std::collections::HashMap;
//!
//! fn main() -> imbalanced_learning::error::Result<()> {
//!     // A 99:1 imbalanced stream, rebalanced to 80:20 for training
//!     let stream = SyntheticStream::new(0.01, 5, 42)?;
//!     let pipeline =
//!         Pipeline::new(LogisticRegression::default()).with_stage(StandardScaler::new());
//!     let desired = HashMap::from([(0, 0.8), (1, 0.2)]);
//!     let mut model = RandomUnderSampler::new(pipeline, desired, 42)?;
//!
//!     let mut metric = RocAuc::default();
//!     let auc = progressive_val_score(stream.take(100_000), &mut model, &mut metric, 10_000)?;
//!     println!("ROC AUC: {:.4}", auc);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod evaluate;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod preprocessing;
pub mod sampling;
pub mod stream;

// Re-export commonly used types
pub use error::{Error, Result};
pub use evaluate::progressive_val_score;
pub use metrics::{Accuracy, ClassificationMetric, RocAuc};
pub use models::{Classifier, Features, Label, LogisticRegression};
pub use pipeline::Pipeline;
pub use preprocessing::{StandardScaler, Transformer};
pub use sampling::{RandomOverSampler, RandomSampler, RandomUnderSampler};
pub use stream::{Observation, SyntheticStream};
