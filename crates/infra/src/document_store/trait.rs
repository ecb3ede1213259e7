use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads and writes whole text documents addressed by path.
pub trait DocumentStore: Send + Sync {
    /// Read the full document. A missing document is [`StoreError::NotFound`].
    fn read_text(&self, path: &Path) -> Result<String, StoreError>;

    /// Replace the full document.
    fn write_text(&self, path: &Path, contents: &str) -> Result<(), StoreError>;
}

impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    fn read_text(&self, path: &Path) -> Result<String, StoreError> {
        (**self).read_text(path)
    }

    fn write_text(&self, path: &Path, contents: &str) -> Result<(), StoreError> {
        (**self).write_text(path, contents)
    }
}
