//! JSON persistence for [`InventoryManager`].

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use pharmastock_core::DomainError;
use pharmastock_inventory::{InventoryManager, InventorySnapshot};

use crate::document_store::{DocumentStore, StoreError};

/// File name used when no path is configured.
pub const DEFAULT_INVENTORY_FILE: &str = "inventory.json";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("inventory file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error(transparent)]
    Store(StoreError),

    /// Not valid JSON, wrong shape, or an unparsable timestamp.
    #[error("malformed inventory document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Well-formed JSON whose contents break a domain rule (unknown category,
    /// duplicate id, negative unit price).
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<StoreError> for PersistenceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(path) => Self::MissingFile(path),
            other => Self::Store(other),
        }
    }
}

/// Saves and loads inventory documents through a [`DocumentStore`].
#[derive(Debug, Clone)]
pub struct InventoryRepository<S> {
    store: S,
}

impl<S> InventoryRepository<S>
where
    S: DocumentStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write `{products, transactions}` as pretty-printed JSON.
    pub fn save(&self, manager: &InventoryManager, path: &Path) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(&manager.snapshot())?;
        self.store.write_text(path, &json)?;
        info!(
            path = %path.display(),
            products = manager.len(),
            transactions = manager.transactions().len(),
            "inventory saved"
        );
        Ok(())
    }

    /// Read and fully validate a document into a new manager.
    pub fn load(&self, path: &Path) -> Result<InventoryManager, PersistenceError> {
        let text = self.store.read_text(path)?;
        let snapshot: InventorySnapshot = serde_json::from_str(&text)?;
        Ok(InventoryManager::from_snapshot(snapshot)?)
    }

    /// Replace `manager`'s entire state with the document at `path`.
    ///
    /// All-or-nothing: on any error `manager` is left exactly as it was.
    pub fn load_into(
        &self,
        manager: &mut InventoryManager,
        path: &Path,
    ) -> Result<(), PersistenceError> {
        match self.load(path) {
            Ok(loaded) => {
                info!(
                    path = %path.display(),
                    products = loaded.len(),
                    transactions = loaded.transactions().len(),
                    "inventory loaded"
                );
                manager.replace_with(loaded);
                Ok(())
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to load inventory");
                Err(err)
            }
        }
    }
}
