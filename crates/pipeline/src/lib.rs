//! Pipeline for filtering detections and ranking scored recipes.
//!
//! This crate provides:
//! - DetectionFilter trait and implementations for detection filtering
//! - FilterPipeline for composing filters into an ingredient extractor
//! - IngredientSet, the sorted, deduplicated output of filtering
//! - Ranking and report formatting for sentiment-scored recipes
//!
//! ## Architecture
//! The pipeline works at both ends of a run:
//! 1. Filters turn raw detections into an IngredientSet
//! 2. (recipes are retrieved and scored elsewhere)
//! 3. `rank_and_format` orders scored recipes into the final Report
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, rank_and_format};
//!
//! let ingredients = FilterPipeline::default().ingredients(detections);
//! // ... find and score recipes ...
//! let report = rank_and_format(scored);
//! println!("{}", report);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod ingredients;
pub mod ranking;

// Re-export main types
pub use traits::DetectionFilter;
pub use filter_pipeline::FilterPipeline;
pub use ingredients::IngredientSet;
pub use ranking::{rank, rank_and_format, Report, ScoredCandidate};
