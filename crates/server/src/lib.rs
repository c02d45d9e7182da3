//! Server crate for the fridge-to-recipe pipeline.
//!
//! This crate contains the orchestrator that reacts to storage events and
//! coordinates detection, ingredient filtering, recipe retrieval, sentiment
//! scoring and report output, plus the configuration and storage adapters it
//! runs against.

pub mod config;
pub mod event;
pub mod storage;
pub mod orchestrator;

pub use config::{ConfigError, PipelineConfig};
pub use event::StorageEvent;
pub use storage::{BlobStore, LocalBlobStore, ObjectStorageConfig, S3BlobStore, StorageError};
pub use orchestrator::{
    LiveOrchestrator, PipelineOutcome, PipelineState, RecipeOrchestrator, NO_INGREDIENTS_MESSAGE,
};
