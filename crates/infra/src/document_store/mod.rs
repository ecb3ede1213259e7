//! Whole-document text storage boundary.
//!
//! The repository only needs "read this path" and "write this path"; the
//! filesystem is one implementation, an in-memory map is another.

pub mod fs;
pub mod in_memory;
pub mod r#trait;

pub use fs::FsDocumentStore;
pub use in_memory::InMemoryDocumentStore;
pub use r#trait::{DocumentStore, StoreError};
