//! Core traits for the detection filtering pipeline.
//!
//! This module defines the DetectionFilter trait that allows composable,
//! extensible filters to be applied to raw detector output.

use vision::Detection;

/// Core trait for filtering detections.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows one pipeline to be shared by concurrent invocations
/// - Filters take ownership of the Vec<Detection> and return the survivors
/// - Filters never reorder; ordering is imposed once, when the ingredient
///   set is built
pub trait DetectionFilter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Keep only the detections this filter accepts.
    fn apply(&self, detections: Vec<Detection>) -> Vec<Detection>;
}
