//! Streaming Preprocessing Module
//!
//! Feature transformers that learn their statistics incrementally from the
//! stream, one observation at a time.

mod scaler;

pub use scaler::StandardScaler;

use crate::models::Features;

/// Trait for streaming feature transformers
pub trait Transformer {
    /// Update internal statistics from a single observation
    fn learn_one(&mut self, x: &Features);

    /// Transform a single observation using the current statistics
    fn transform_one(&self, x: &Features) -> Features;
}
