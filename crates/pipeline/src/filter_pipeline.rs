//! The FilterPipeline orchestrates multiple detection filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! filters together using the builder pattern, and turns whatever survives
//! into an [`IngredientSet`].

use crate::filters::{MinimumConfidenceFilter, NonFoodFilter};
use crate::ingredients::IngredientSet;
use crate::traits::DetectionFilter;
use tracing::debug;
use vision::Detection;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(MinimumConfidenceFilter::new(0.30))
///     .add_filter(NonFoodFilter::default());
///
/// let ingredients = pipeline.ingredients(detections);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn DetectionFilter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The edible-ingredient pipeline: confidence threshold, then exclusion list.
    pub fn edible<I, S>(min_confidence: f64, non_food: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new()
            .add_filter(MinimumConfidenceFilter::new(min_confidence))
            .add_filter(NonFoodFilter::new(non_food))
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl DetectionFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence to the detections.
    pub fn apply(&self, detections: Vec<Detection>) -> Vec<Detection> {
        let mut current = detections;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current);
            debug!(
                "Filter applied: {} ({} -> {})",
                filter.name(),
                before,
                current.len()
            );
        }
        current
    }

    /// Filter the detections and collect the surviving labels.
    ///
    /// # Returns
    /// Distinct class names in sorted order; empty when nothing survived
    pub fn ingredients(&self, detections: Vec<Detection>) -> IngredientSet {
        self.apply(detections)
            .into_iter()
            .map(|d| d.class_name)
            .collect()
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::edible(
            crate::filters::DEFAULT_MIN_CONFIDENCE,
            crate::filters::DEFAULT_NON_FOOD,
        )
    }
}
