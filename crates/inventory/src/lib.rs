//! Inventory domain module.
//!
//! The [`InventoryManager`] owns every product and the append-only
//! transaction log. Persistence lives in `pharmastock-infra`; this crate only
//! converts to and from the [`InventorySnapshot`] document shape.

pub mod manager;
pub mod report;
pub mod snapshot;
pub mod transaction;

pub use manager::{DEFAULT_NEAR_EXPIRATION_DAYS, InventoryManager, StockUpdate};
pub use report::StockSummary;
pub use snapshot::InventorySnapshot;
pub use transaction::{Transaction, TransactionAction};
