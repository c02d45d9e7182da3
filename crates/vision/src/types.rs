//! Core types produced by the object detector.

use serde::{Deserialize, Serialize};

/// Axis-aligned box in image pixel coordinates. Missing corners read as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub x1: f64,
    #[serde(default)]
    pub y1: f64,
    #[serde(default)]
    pub x2: f64,
    #[serde(default)]
    pub y2: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        (self.x2 - self.x1).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.y2 - self.y1).max(0.0)
    }
}

/// One detected object instance.
///
/// Mirrors a single entry of the detector's `predictions` array. The box
/// coordinates are flattened on the wire, so they are pulled back into a
/// [`BoundingBox`] here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(default)]
    pub class_name: String,

    #[serde(default)]
    pub confidence: f64,

    #[serde(default)]
    pub class_id: Option<i64>,

    #[serde(flatten)]
    pub bounding_box: BoundingBox,
}

impl Detection {
    /// Build a detection with an empty bounding box (mostly for tests and fixtures)
    pub fn new(class_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            class_name: class_name.into(),
            confidence,
            class_id: None,
            bounding_box: BoundingBox::default(),
        }
    }
}

/// Body of `POST /predict`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Detection>,
}

/// Body of `GET /healthcheck`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
