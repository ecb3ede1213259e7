use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use pharmastock_core::{DomainError, DomainResult};
use pharmastock_products::{Product, ProductCategory};

use crate::snapshot::InventorySnapshot;
use crate::transaction::{Transaction, TransactionAction};

/// Default window, in days, for near-expiration queries and reports.
pub const DEFAULT_NEAR_EXPIRATION_DAYS: i64 = 30;

/// Outcome of an accepted [`InventoryManager::update_stock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockUpdate {
    pub stock_quantity: i64,
    /// At or below the product minimum after the movement; a low-stock
    /// alert was logged.
    pub low_stock: bool,
}

/// In-memory pharmacy inventory.
///
/// Owns every [`Product`] (keyed by id, kept in insertion order) and the
/// append-only [`Transaction`] log. Callers only ever get shared references to
/// products; stock changes go through [`InventoryManager::update_stock`].
///
/// Not internally synchronised. Wrap it if it must be shared across threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryManager {
    products: Vec<Product>,
    transactions: Vec<Transaction>,
}

impl InventoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a manager from a persisted document.
    ///
    /// Builds an entirely new value; on error nothing has been observed by the
    /// caller, so swapping it in with [`InventoryManager::replace_with`] is
    /// all-or-nothing.
    pub fn from_snapshot(snapshot: InventorySnapshot) -> DomainResult<Self> {
        let mut manager = Self {
            products: Vec::with_capacity(snapshot.products.len()),
            transactions: snapshot.transactions,
        };
        for record in snapshot.products {
            let product = Product::try_from(record)?;
            if manager.position(product.id()).is_some() {
                return Err(DomainError::conflict(format!(
                    "duplicate product id {} in document",
                    product.id()
                )));
            }
            manager.products.push(product);
        }
        Ok(manager)
    }

    /// Persisted document for the current state.
    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            products: self.products.iter().map(Product::to_record).collect(),
            transactions: self.transactions.clone(),
        }
    }

    /// Replace the whole state in one step.
    pub fn replace_with(&mut self, other: InventoryManager) {
        *self = other;
    }

    /// Insert a new product and log an `ADD` with its initial stock.
    pub fn add_product(&mut self, product: Product) -> DomainResult<()> {
        if self.position(product.id()).is_some() {
            warn!(product_id = product.id(), "product already exists in inventory");
            return Err(DomainError::conflict(format!(
                "product {} already exists",
                product.id()
            )));
        }
        product.validate()?;

        self.log_transaction(
            TransactionAction::Add,
            product.id(),
            product.stock_quantity(),
            "",
        );
        info!(product_id = product.id(), name = product.name(), "product added");
        self.products.push(product);
        Ok(())
    }

    /// Remove a product and log a `REMOVE`. Returns the removed product.
    pub fn remove_product(&mut self, product_id: &str) -> DomainResult<Product> {
        let Some(idx) = self.position(product_id) else {
            warn!(product_id, "product not found");
            return Err(DomainError::not_found(product_id));
        };

        let product = self.products.remove(idx);
        self.log_transaction(TransactionAction::Remove, product_id, 0, "");
        info!(product_id, name = product.name(), "product removed from inventory");
        Ok(product)
    }

    /// Apply a signed stock movement and log an `UPDATE`.
    ///
    /// Rejected (no mutation, no transaction) when the product is unknown or the
    /// movement would take stock below zero. Emits a low-stock alert when the
    /// resulting quantity is at or below the product minimum.
    pub fn update_stock(
        &mut self,
        product_id: &str,
        quantity_change: i64,
        reason: &str,
    ) -> DomainResult<StockUpdate> {
        let Some(idx) = self.position(product_id) else {
            warn!(product_id, "product not found");
            return Err(DomainError::not_found(product_id));
        };

        let product = &mut self.products[idx];
        if let Err(err) = product.adjust_stock(quantity_change) {
            warn!(
                product_id,
                available = product.stock_quantity(),
                requested = quantity_change,
                "insufficient stock"
            );
            return Err(err);
        }

        let name = product.name().to_string();
        let stock = product.stock_quantity();
        let low = product.is_low_stock();
        let min_stock = product.min_stock();

        self.log_transaction(TransactionAction::Update, product_id, quantity_change, reason);

        if low {
            warn!(product_id, name = %name, stock, min_stock, "low stock alert");
        }
        info!(product_id, name = %name, stock, "stock updated");
        Ok(StockUpdate {
            stock_quantity: stock,
            low_stock: low,
        })
    }

    pub fn get_product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == product_id)
    }

    /// Case-insensitive substring match on name or description.
    pub fn search_products(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        let results: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| {
                p.name().to_lowercase().contains(&needle)
                    || p.description().to_lowercase().contains(&needle)
            })
            .collect();
        debug!(query, matches = results.len(), "product search");
        results
    }

    pub fn get_products_by_category(&self, category: ProductCategory) -> Vec<&Product> {
        self.matching(|p| p.category() == category)
    }

    pub fn get_low_stock_products(&self) -> Vec<&Product> {
        self.matching(Product::is_low_stock)
    }

    pub fn get_expired_products(&self) -> Vec<&Product> {
        self.get_expired_products_at(Utc::now())
    }

    pub fn get_expired_products_at(&self, now: DateTime<Utc>) -> Vec<&Product> {
        self.matching(|p| p.is_expired_at(now))
    }

    pub fn get_near_expiration_products(&self, days_threshold: i64) -> Vec<&Product> {
        self.get_near_expiration_products_at(Utc::now(), days_threshold)
    }

    pub fn get_near_expiration_products_at(
        &self,
        now: DateTime<Utc>,
        days_threshold: i64,
    ) -> Vec<&Product> {
        self.matching(|p| p.is_near_expiration_at(now, days_threshold))
    }

    /// All products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The audit log, oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Summed stock; widened so that large quantities cannot overflow.
    pub fn total_stock(&self) -> i128 {
        self.products
            .iter()
            .map(|p| i128::from(p.stock_quantity()))
            .sum()
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.products.iter().position(|p| p.id() == product_id)
    }

    fn matching(&self, pred: impl Fn(&Product) -> bool) -> Vec<&Product> {
        self.products.iter().filter(|&p| pred(p)).collect()
    }

    fn log_transaction(
        &mut self,
        action: TransactionAction,
        product_id: &str,
        quantity: i64,
        reason: &str,
    ) {
        self.transactions
            .push(Transaction::new(Utc::now(), action, product_id, quantity, reason));
    }
}
