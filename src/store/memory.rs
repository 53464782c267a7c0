//! In-memory document store for tests

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::error::StoreError;

use super::{DocumentEntry, DocumentStore};

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    documents: RefCell<BTreeMap<String, (String, DateTime<Utc>)>>,
    folders: RefCell<BTreeSet<String>>,
    /// Paths whose reads fail with an I/O error
    broken: RefCell<BTreeSet<String>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_doc(self, path: &str, content: &str) -> Self {
        self.insert(path, content, Utc::now());
        self
    }

    pub(crate) fn insert(&self, path: &str, content: &str, modified: DateTime<Utc>) {
        self.documents
            .borrow_mut()
            .insert(path.to_string(), (content.to_string(), modified));
    }

    pub(crate) fn break_path(&self, path: &str) {
        self.broken.borrow_mut().insert(path.to_string());
    }

    pub(crate) fn has_folder(&self, path: &str) -> bool {
        self.folders.borrow().contains(path)
    }

    pub(crate) fn get(&self, path: &str) -> Option<String> {
        self.documents.borrow().get(path).map(|(c, _)| c.clone())
    }

    pub(crate) fn len(&self) -> usize {
        self.documents.borrow().len()
    }
}

impl DocumentStore for MemoryStore {
    fn exists(&self, path: &str) -> bool {
        self.documents.borrow().contains_key(path)
    }

    fn read(&self, path: &str) -> Result<String, StoreError> {
        if self.broken.borrow().contains(path) {
            return Err(StoreError::Io {
                path: path.to_string(),
                source: std::io::Error::other("simulated read failure"),
            });
        }
        self.get(path).ok_or_else(|| StoreError::NotFound {
            path: path.to_string(),
        })
    }

    fn write(&self, path: &str, content: &str) -> Result<(), StoreError> {
        self.insert(path, content, Utc::now());
        Ok(())
    }

    fn create_folder(&self, path: &str) -> Result<(), StoreError> {
        if !self.folders.borrow_mut().insert(path.to_string()) {
            return Err(StoreError::AlreadyExists {
                path: path.to_string(),
            });
        }
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<DocumentEntry>, StoreError> {
        Ok(self
            .documents
            .borrow()
            .keys()
            .map(|p| DocumentEntry::from_path(p))
            .collect())
    }

    fn modified_at(&self, path: &str) -> Result<DateTime<Utc>, StoreError> {
        self.documents
            .borrow()
            .get(path)
            .map(|(_, m)| *m)
            .ok_or_else(|| StoreError::NotFound {
                path: path.to_string(),
            })
    }
}
