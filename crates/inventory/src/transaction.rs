use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of change recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionAction {
    Add,
    Remove,
    Update,
}

impl TransactionAction {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionAction::Add => "ADD",
            TransactionAction::Remove => "REMOVE",
            TransactionAction::Update => "UPDATE",
        }
    }
}

impl core::fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit record of one inventory mutation.
///
/// Immutable once appended: fields are only readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Transaction {
    #[serde(with = "pharmastock_products::timestamp")]
    timestamp: DateTime<Utc>,
    action: TransactionAction,
    product_id: String,
    quantity: i64,
    #[serde(default)]
    reason: String,
}

impl Transaction {
    pub fn new(
        timestamp: DateTime<Utc>,
        action: TransactionAction,
        product_id: impl Into<String>,
        quantity: i64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            action,
            product_id: product_id.into(),
            quantity,
            reason: reason.into(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn action(&self) -> TransactionAction {
        self.action
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Initial stock for `ADD`, signed delta for `UPDATE`, `0` for `REMOVE`.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}
