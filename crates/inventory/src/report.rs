//! Stock summary and the human-readable report derived from it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pharmastock_products::{Product, ProductCategory};

use crate::manager::{DEFAULT_NEAR_EXPIRATION_DAYS, InventoryManager};

/// Counts and groupings behind the stock report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockSummary {
    pub total_products: usize,
    pub total_stock: i128,
    pub low_stock: usize,
    pub expired: usize,
    pub near_expiration: usize,
    pub near_expiration_days: i64,
    /// Non-empty categories only, in category declaration order.
    pub by_category: Vec<(ProductCategory, usize)>,
}

impl InventoryManager {
    pub fn summary(&self) -> StockSummary {
        self.summary_at(Utc::now(), DEFAULT_NEAR_EXPIRATION_DAYS)
    }

    pub fn summary_at(&self, now: DateTime<Utc>, near_expiration_days: i64) -> StockSummary {
        let by_category = ProductCategory::ALL
            .into_iter()
            .map(|c| (c, self.get_products_by_category(c).len()))
            .filter(|(_, count)| *count > 0)
            .collect();

        StockSummary {
            total_products: self.len(),
            total_stock: self.total_stock(),
            low_stock: self.get_low_stock_products().len(),
            expired: self.get_expired_products_at(now).len(),
            near_expiration: self
                .get_near_expiration_products_at(now, near_expiration_days)
                .len(),
            near_expiration_days,
            by_category,
        }
    }

    pub fn generate_stock_report(&self) -> String {
        self.generate_stock_report_at(Utc::now(), DEFAULT_NEAR_EXPIRATION_DAYS)
    }

    /// Render the stock report. The layout is for people, not parsers.
    pub fn generate_stock_report_at(&self, now: DateTime<Utc>, near_expiration_days: i64) -> String {
        StockReport {
            summary: self.summary_at(now, near_expiration_days),
            low_stock: self.get_low_stock_products(),
            near_expiration: self
                .get_near_expiration_products_at(now, near_expiration_days)
                .into_iter()
                .map(|p| (p, p.days_until_expiration_at(now).unwrap_or_default()))
                .collect(),
            expired: self.get_expired_products_at(now),
        }
        .to_string()
    }
}

struct StockReport<'a> {
    summary: StockSummary,
    low_stock: Vec<&'a Product>,
    near_expiration: Vec<(&'a Product, i64)>,
    expired: Vec<&'a Product>,
}

const RULE_WIDTH: usize = 64;

impl core::fmt::Display for StockReport<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = &self.summary;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "{:^width$}", "PHARMACY INVENTORY REPORT", width = RULE_WIDTH)?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f)?;
        writeln!(f, "GENERAL STATISTICS:")?;
        writeln!(f, "   - Total products: {}", s.total_products)?;
        writeln!(f, "   - Total units in stock: {}", s.total_stock)?;
        writeln!(f, "   - Low stock products: {}", s.low_stock)?;
        writeln!(f, "   - Expired products: {}", s.expired)?;
        writeln!(
            f,
            "   - Products near expiration ({} days): {}",
            s.near_expiration_days, s.near_expiration
        )?;
        writeln!(f)?;
        writeln!(f, "PRODUCTS BY CATEGORY:")?;
        for (category, count) in &s.by_category {
            writeln!(f, "   - {}: {} products", category.display_name(), count)?;
        }

        if !self.low_stock.is_empty() {
            writeln!(f)?;
            writeln!(f, "LOW STOCK ALERTS:")?;
            for p in &self.low_stock {
                writeln!(
                    f,
                    "   - {}: {} units (minimum: {})",
                    p.name(),
                    p.stock_quantity(),
                    p.min_stock()
                )?;
            }
        }

        if !self.near_expiration.is_empty() {
            writeln!(f)?;
            writeln!(f, "PRODUCTS NEAR EXPIRATION:")?;
            for (p, days) in &self.near_expiration {
                writeln!(f, "   - {}: {} days", p.name(), days)?;
            }
        }

        if !self.expired.is_empty() {
            writeln!(f)?;
            writeln!(f, "EXPIRED PRODUCTS (REMOVE FROM INVENTORY):")?;
            for p in &self.expired {
                writeln!(
                    f,
                    "   - {} - Batch: {}",
                    p.name(),
                    p.batch_number().unwrap_or("n/a")
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))
    }
}
