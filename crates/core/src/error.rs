//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is recoverable: the operation that produced it made no
/// change to inventory state. Infrastructure failures (I/O, parsing) live in
/// `pharmastock-infra`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A product with the same identifier is already stored.
    #[error("conflict: {0}")]
    Conflict(String),

    /// No product is stored under the given identifier.
    #[error("product not found: {0}")]
    NotFound(String),

    /// A stock movement would take the quantity below zero.
    #[error(
        "insufficient stock for {product_id} (available: {available}, requested change: {requested})"
    )]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// A category tag outside the closed set.
    #[error("unknown product category: {0:?}")]
    UnknownCategory(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn unknown_category(tag: impl Into<String>) -> Self {
        Self::UnknownCategory(tag.into())
    }
}
