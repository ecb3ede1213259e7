use serde::{Deserialize, Serialize};

use pharmastock_products::ProductRecord;

use crate::transaction::Transaction;

/// Persisted document: `{ "products": [...], "transactions": [...] }`.
///
/// Missing keys read as empty lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InventorySnapshot {
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}
