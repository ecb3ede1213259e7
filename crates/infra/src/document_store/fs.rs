use std::io::ErrorKind;
use std::path::Path;

use super::r#trait::{DocumentStore, StoreError};

/// UTF-8 documents on the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDocumentStore;

impl FsDocumentStore {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentStore for FsDocumentStore {
    fn read_text(&self, path: &Path) -> Result<String, StoreError> {
        std::fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
            _ => StoreError::Io {
                path: path.to_path_buf(),
                source,
            },
        })
    }

    fn write_text(&self, path: &Path, contents: &str) -> Result<(), StoreError> {
        std::fs::write(path, contents).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
