//! Store location and collection configuration.

use std::path::PathBuf;

use crate::errors::StoreError;

/// Configuration for the embedded student record store.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Filesystem path of the sled database directory.
    pub path: PathBuf,
    /// Named tree holding the student documents.
    pub collection: String,
}

impl StoreConfig {
    /// Creates a config for the given path with the default collection name.
    pub fn new_default(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            collection: "students".into(),
        }
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.path.as_os_str().is_empty() {
            return Err(StoreError::Config("store path is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(StoreError::Config("collection is empty".into()));
        }
        Ok(())
    }
}
