use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::r#trait::{DocumentStore, StoreError};

/// In-memory document store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<PathBuf, String>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document directly (e.g. a hand-written fixture).
    pub fn insert(
        &self,
        path: impl Into<PathBuf>,
        contents: impl Into<String>,
    ) -> Result<(), StoreError> {
        let path = path.into();
        let mut docs = self.documents.write().map_err(|_| poisoned(&path))?;
        docs.insert(path, contents.into());
        Ok(())
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn read_text(&self, path: &Path) -> Result<String, StoreError> {
        let docs = self.documents.read().map_err(|_| poisoned(path))?;
        docs.get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_path_buf()))
    }

    fn write_text(&self, path: &Path, contents: &str) -> Result<(), StoreError> {
        let mut docs = self.documents.write().map_err(|_| poisoned(path))?;
        docs.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

fn poisoned(path: &Path) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::other("document store lock poisoned"),
    }
}
