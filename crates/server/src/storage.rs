//! Blob store port and adapters.
//!
//! The pipeline reads one image and writes one text artifact per run. Both
//! go through [`BlobStore`], keyed by bucket and object name.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// Errors from the blob store
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Object {bucket}/{key} not found")]
    NotFound { bucket: String, key: String },

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Object storage error: {0}")]
    Backend(String),
}

/// Port for the durable object store
pub trait BlobStore: Send + Sync {
    /// Fetch the full content of an object
    fn download(&self, bucket: &str, name: &str)
        -> impl Future<Output = Result<Bytes, StorageError>> + Send;

    /// Store a text object, replacing any previous content
    fn upload(
        &self,
        bucket: &str,
        path: &str,
        text: String,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Blob store backed by a local directory: `<root>/<bucket>/<name>`.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a bucket/key pair, refusing anything that could escape the root.
    fn resolve(&self, bucket: &str, key: &str) -> Result<PathBuf, StorageError> {
        let bucket_path = Path::new(bucket);
        let mut bucket_parts = bucket_path.components();
        if !matches!(
            (bucket_parts.next(), bucket_parts.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(StorageError::InvalidKey(bucket.to_string()));
        }

        let key_path = Path::new(key);
        let key_is_safe = !key.is_empty()
            && key_path
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !key_is_safe {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(bucket_path).join(key_path))
    }
}

impl BlobStore for LocalBlobStore {
    async fn download(&self, bucket: &str, name: &str) -> Result<Bytes, StorageError> {
        let path = self.resolve(bucket, name)?;
        match tokio::fs::read(&path).await {
            Ok(data) => {
                debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Bytes::from(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound {
                bucket: bucket.to_string(),
                key: name.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn upload(&self, bucket: &str, path: &str, text: String) -> Result<(), StorageError> {
        let target = self.resolve(bucket, path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, text.as_bytes()).await?;
        info!("Wrote {} bytes to {}", text.len(), target.display());
        Ok(())
    }
}

/// Connection settings for an S3-compatible store.
#[derive(Debug, Clone)]
pub struct ObjectStorageConfig {
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
}

/// Blob store on S3 or any S3-compatible service (MinIO, ...).
#[derive(Clone)]
pub struct S3BlobStore {
    client: Client,
}

impl S3BlobStore {
    /// Explicit endpoint and static credentials, path-style addressing.
    pub fn new(config: ObjectStorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "fridge-chef",
        );
        let endpoint = config.endpoint.trim_end_matches('/');

        info!(
            endpoint = %endpoint,
            region = %config.region,
            "Initializing S3 client"
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(endpoint)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
        }
    }

    /// Region and credentials from the standard AWS environment chain.
    pub async fn from_env() -> Self {
        let shared = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self {
            client: Client::new(&shared),
        }
    }
}

impl BlobStore for S3BlobStore {
    #[instrument(skip(self))]
    async fn download(&self, bucket: &str, name: &str) -> Result<Bytes, StorageError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(name)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    StorageError::NotFound {
                        bucket: bucket.to_string(),
                        key: name.to_string(),
                    }
                } else {
                    error!(error = %service_error, "Failed to download object");
                    StorageError::Backend(format!("Failed to download object: {service_error}"))
                }
            })?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Backend(format!("Failed to read object body: {e}")))?;
        Ok(data.into_bytes())
    }

    #[instrument(skip(self, text), fields(size = text.len()))]
    async fn upload(&self, bucket: &str, path: &str, text: String) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(path)
            .content_type("text/plain; charset=utf-8")
            .body(ByteStream::from(text.into_bytes()))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to upload object");
                StorageError::Backend(format!("Failed to upload object: {e}"))
            })?;

        info!(bucket = %bucket, key = %path, "Object uploaded successfully");
        Ok(())
    }
}
