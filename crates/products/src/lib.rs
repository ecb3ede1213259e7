//! Products domain module.
//!
//! Pharmacy product records and the status predicates derived from their
//! stock and expiration data. Pure domain logic (no IO, no storage).

pub mod category;
pub mod product;
pub mod timestamp;

pub use category::ProductCategory;
pub use product::{Product, ProductRecord};
