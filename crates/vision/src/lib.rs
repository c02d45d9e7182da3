//! # Vision Crate
//!
//! Everything about the external object detector: the shape of what it
//! returns and how to ask it.
//!
//! ## Main Components
//!
//! - **types**: `Detection`, `BoundingBox` and the wire envelopes
//! - **parser**: strict parsing of `/predict` bodies
//! - **client**: the `Detector` port and its HTTP implementation
//! - **error**: error types for detector calls
//!
//! ## Example Usage
//!
//! ```ignore
//! use vision::{Detector, DetectorClient};
//! use std::time::Duration;
//!
//! let client = DetectorClient::new("http://localhost:8000", Duration::from_secs(30))?;
//! let detections = client.detect(image_bytes, "fridge.jpg").await?;
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod client;

pub use error::{Result, VisionError};
pub use types::{BoundingBox, Detection, HealthStatus, PredictResponse};
pub use parser::parse_predictions;
pub use client::{Detector, DetectorClient};
