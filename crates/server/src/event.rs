//! Trigger events from the blob store.

use serde::{Deserialize, Serialize};

/// "A new object landed in `bucket` under `name`".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEvent {
    pub bucket: String,
    pub name: String,
}

impl StorageEvent {
    pub fn new(bucket: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            name: name.into(),
        }
    }

    /// Objects under the results prefix are our own output; reacting to
    /// them would loop forever.
    pub fn is_result(&self, results_prefix: &str) -> bool {
        self.name.starts_with(results_prefix)
    }

    /// Where the report for this input is written.
    pub fn result_path(&self, results_prefix: &str) -> String {
        format!("{}{}.txt", results_prefix, self.name)
    }

    /// File name handed to the detector (last path segment of the object name).
    pub fn file_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}
