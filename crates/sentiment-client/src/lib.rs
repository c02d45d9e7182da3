//! Sentiment scoring client for the document-sentiment gRPC service.
//!
//! This crate provides:
//! - The `SentimentScorer` port the pipeline scores recipe summaries through
//! - `SentimentClient`, a tonic client for the `SentimentAnalyzer` service
//!
//! Text is always submitted as a plain-text document and the document-level
//! polarity is returned untouched, including for empty text.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, error, info};

// Include the generated protobuf code
pub mod sentiment {
    tonic::include_proto!("sentiment");
}

use sentiment::{
    document::Type as DocumentType,
    sentiment_analyzer_client::SentimentAnalyzerClient as GrpcSentimentAnalyzerClient,
    AnalyzeSentimentRequest, Document,
};

/// Errors that can occur when interacting with the sentiment service
#[derive(Error, Debug)]
pub enum SentimentClientError {
    #[error("Failed to connect to sentiment service: {0}")]
    ConnectionError(String),

    #[error("Failed to analyze sentiment: {0}")]
    AnalysisError(String),

    #[error("Invalid response from sentiment service: {0}")]
    InvalidResponse(String),
}

/// Anything that can put a polarity on a piece of text.
pub trait SentimentScorer: Send + Sync {
    /// Document-level polarity of `text`, typically in [-1.0, 1.0].
    fn score(&self, text: &str) -> impl Future<Output = Result<f32, SentimentClientError>> + Send;
}

/// Client for the sentiment service.
///
/// Wraps the generated gRPC client. The underlying channel is cheap to
/// clone, so each call works on its own handle and `&self` is enough.
#[derive(Debug, Clone)]
pub struct SentimentClient {
    client: GrpcSentimentAnalyzerClient<Channel>,
    service_addr: String,
}

impl SentimentClient {
    /// Connect to the sentiment service.
    ///
    /// # Arguments
    /// * `addr` - Address of the gRPC service (e.g., "http://localhost:50051")
    /// * `timeout` - Bound applied to connecting and to every call
    pub async fn connect(
        addr: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SentimentClientError> {
        let addr = addr.into();
        info!("Connecting to sentiment service at {}", addr);

        let channel = Endpoint::from_shared(addr.clone())
            .map_err(|e| SentimentClientError::ConnectionError(e.to_string()))?
            .connect_timeout(timeout)
            .timeout(timeout)
            .connect()
            .await
            .map_err(|e| {
                error!("Could not reach sentiment service at {}: {}", addr, e);
                SentimentClientError::ConnectionError(e.to_string())
            })?;

        Ok(SentimentClient {
            client: GrpcSentimentAnalyzerClient::new(channel),
            service_addr: addr,
        })
    }

    /// Analyze one plain-text document.
    ///
    /// # Returns
    /// The document-level polarity reported by the service
    pub async fn analyze(&self, text: &str) -> Result<f32, SentimentClientError> {
        debug!("Analyzing sentiment of {} characters", text.len());
        let request = tonic::Request::new(AnalyzeSentimentRequest {
            document: Some(Document {
                r#type: DocumentType::PlainText as i32,
                content: text.to_string(),
            }),
        });

        let mut client = self.client.clone();
        let response = client.analyze_sentiment(request).await.map_err(|status| {
            error!("gRPC error while analyzing sentiment: {}", status);
            SentimentClientError::AnalysisError(status.to_string())
        })?;

        response
            .into_inner()
            .document_sentiment
            .map(|s| s.score)
            .ok_or_else(|| {
                SentimentClientError::InvalidResponse("missing document sentiment".into())
            })
    }

    /// Get the address of the sentiment service this client is connected to.
    pub fn service_address(&self) -> &str {
        &self.service_addr
    }
}

impl SentimentScorer for SentimentClient {
    async fn score(&self, text: &str) -> Result<f32, SentimentClientError> {
        self.analyze(text).await
    }
}
