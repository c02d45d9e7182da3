//! Filter out detector classes that are never ingredients.
//!
//! The detector is a general-purpose model, so a fridge photo also yields
//! furniture, containers and the fridge itself.

use std::collections::HashSet;

use crate::traits::DetectionFilter;
use vision::Detection;

/// Classes excluded when no list is configured.
pub const DEFAULT_NON_FOOD: &[&str] = &[
    "bottle",
    "refrigerator",
    "couch",
    "bench",
    "chair",
    "dining table",
    "bowl",
    "cup",
];

/// Canonical form of a class name: trimmed and lowercased.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Removes detections whose (normalized) class name is on the exclusion list,
/// whatever their confidence.
pub struct NonFoodFilter {
    excluded: HashSet<String>,
}

impl NonFoodFilter {
    /// Build a filter from any list of class names.
    pub fn new<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            excluded: excluded
                .into_iter()
                .map(|s| normalize_label(s.as_ref()))
                .collect(),
        }
    }

    pub fn is_excluded(&self, label: &str) -> bool {
        self.excluded.contains(&normalize_label(label))
    }
}

impl Default for NonFoodFilter {
    fn default() -> Self {
        Self::new(DEFAULT_NON_FOOD)
    }
}

impl DetectionFilter for NonFoodFilter {
    fn name(&self) -> &str {
        "NonFoodFilter"
    }

    fn apply(&self, detections: Vec<Detection>) -> Vec<Detection> {
        detections
            .into_iter()
            .filter(|d| !self.is_excluded(&d.class_name))
            .collect()
    }
}
