//! Filter implementations for the detection pipeline.
//!
//! This module contains the concrete filters that can be composed into a
//! FilterPipeline.

pub mod min_confidence;
pub mod non_food;

// Re-export for convenience
pub use min_confidence::{MinimumConfidenceFilter, DEFAULT_MIN_CONFIDENCE};
pub use non_food::{normalize_label, NonFoodFilter, DEFAULT_NON_FOOD};
