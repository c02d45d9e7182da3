//! Parse raw detector responses into [`Detection`]s.
//!
//! The detector is an external service, so its payload is treated with
//! suspicion: anything that is not JSON is fatal for the invocation, while
//! merely missing fields fall back to defaults that can never pass the
//! ingredient filter.

use crate::error::{Result, VisionError};
use crate::types::{Detection, PredictResponse};

/// Parse the body of a `POST /predict` response.
///
/// # Returns
/// * `Ok(Vec<Detection>)` - possibly empty when the `predictions` key is absent
/// * `Err(VisionError::InvalidJson)` - the body is not a JSON object of the expected shape
pub fn parse_predictions(body: &[u8]) -> Result<Vec<Detection>> {
    let response: PredictResponse =
        serde_json::from_slice(body).map_err(|_| VisionError::InvalidJson {
            body: String::from_utf8_lossy(body).into_owned(),
        })?;
    Ok(response.predictions)
}
