//! Error types for the vision crate.

use thiserror::Error;

/// Errors that can occur while talking to the object detector
#[derive(Error, Debug)]
pub enum VisionError {
    /// The request never produced a response (connection refused, timeout, ...)
    #[error("Detector request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The detector answered with a non-success status
    #[error("Detector returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The detector answered with something that is not JSON
    #[error("Invalid JSON from detector: {body}")]
    InvalidJson { body: String },

    /// The health endpoint answered but did not report "ok"
    #[error("Detector is unhealthy: status {0:?}")]
    Unhealthy(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, VisionError>;
