//! Document store abstraction
//!
//! Paths are vault-relative and `/`-separated regardless of platform.

mod fs;
#[cfg(test)]
pub(crate) mod memory;

use chrono::{DateTime, Utc};

use crate::error::StoreError;

pub(crate) use fs::FsStore;

/// One document returned by [`DocumentStore::list_all`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DocumentEntry {
    pub(crate) path: String,
    /// File name without extension
    pub(crate) name: String,
}

impl DocumentEntry {
    pub(crate) fn from_path(path: &str) -> Self {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let name = match file_name.rfind('.') {
            Some(dot) if dot > 0 => &file_name[..dot],
            _ => file_name,
        };
        Self {
            path: path.to_string(),
            name: name.to_string(),
        }
    }
}

pub(crate) trait DocumentStore {
    fn exists(&self, path: &str) -> bool;

    fn read(&self, path: &str) -> Result<String, StoreError>;

    /// Write `content`, creating the document if needed
    fn write(&self, path: &str, content: &str) -> Result<(), StoreError>;

    /// Fails with [`StoreError::AlreadyExists`] when the folder is present
    fn create_folder(&self, path: &str) -> Result<(), StoreError>;

    /// Every document in the store, in a stable enumeration order
    fn list_all(&self) -> Result<Vec<DocumentEntry>, StoreError>;

    fn modified_at(&self, path: &str) -> Result<DateTime<Utc>, StoreError>;
}
