//! Filter out low-confidence detections.

use crate::traits::DetectionFilter;
use vision::Detection;

/// Default threshold; a detection must be strictly above it to count.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.30;

/// Removes detections whose confidence is not strictly greater than the threshold.
///
/// A detection sitting exactly on the threshold is dropped.
pub struct MinimumConfidenceFilter {
    min_confidence: f64,
}

impl MinimumConfidenceFilter {
    /// Create a new MinimumConfidenceFilter.
    ///
    /// # Arguments
    /// * `min_confidence` - exclusive lower bound, in [0, 1] (typically 0.30)
    pub fn new(min_confidence: f64) -> Self {
        Self { min_confidence }
    }
}

impl Default for MinimumConfidenceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CONFIDENCE)
    }
}

impl DetectionFilter for MinimumConfidenceFilter {
    fn name(&self) -> &str {
        "MinimumConfidenceFilter"
    }

    fn apply(&self, detections: Vec<Detection>) -> Vec<Detection> {
        detections
            .into_iter()
            .filter(|d| d.confidence > self.min_confidence)
            .collect()
    }
}
