//! HTTP client for the object-detection service.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, error, info, instrument};

use crate::error::{Result, VisionError};
use crate::parser::parse_predictions;
use crate::types::{Detection, HealthStatus};

/// Anything that can turn image bytes into detections.
pub trait Detector: Send + Sync {
    /// Run object detection over one encoded image.
    fn detect(
        &self,
        image: Bytes,
        file_name: &str,
    ) -> impl Future<Output = Result<Vec<Detection>>> + Send;
}

/// Client for a detector exposing `POST /predict` and `GET /healthcheck`.
#[derive(Debug, Clone)]
pub struct DetectorClient {
    client: Client,
    endpoint: String,
}

impl DetectorClient {
    /// Create a client for the detector at `endpoint` (e.g. "http://localhost:8000").
    ///
    /// Every request is bounded by `timeout`; expiry surfaces as
    /// [`VisionError::Request`].
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        let client = Client::builder().timeout(timeout).build()?;
        info!("Detector client configured for {}", endpoint);
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the detector whether it is up.
    pub async fn healthcheck(&self) -> Result<HealthStatus> {
        let url = format!("{}/healthcheck", self.endpoint);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VisionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let health: HealthStatus = response.json().await?;
        if !health.is_ok() {
            return Err(VisionError::Unhealthy(health.status));
        }
        Ok(health)
    }

    #[instrument(skip(self, image), fields(bytes = image.len()))]
    async fn predict(&self, image: Bytes, file_name: &str) -> Result<Vec<Detection>> {
        let url = format!("{}/predict", self.endpoint);
        let part = Part::bytes(image.to_vec()).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Detector request failed: {}", e);
                VisionError::Request(e)
            })?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            error!("Detector returned {}", status);
            return Err(VisionError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let detections = parse_predictions(&body)?;
        debug!("Detector returned {} predictions", detections.len());
        Ok(detections)
    }
}

impl Detector for DetectorClient {
    async fn detect(&self, image: Bytes, file_name: &str) -> Result<Vec<Detection>> {
        self.predict(image, file_name).await
    }
}
