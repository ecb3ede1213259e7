//! Infrastructure layer: where inventory documents are read from and written to.

pub mod document_store;
pub mod repository;

pub use document_store::{DocumentStore, FsDocumentStore, InMemoryDocumentStore, StoreError};
pub use repository::{DEFAULT_INVENTORY_FILE, InventoryRepository, PersistenceError};
