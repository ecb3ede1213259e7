//! `pharmastock`: load (or seed) the inventory, print the stock report, save.

mod config;
mod demo;

use anyhow::Context;
use chrono::Utc;

use pharmastock_infra::{FsDocumentStore, InventoryRepository, PersistenceError};
use pharmastock_inventory::InventoryManager;

use crate::config::AppConfig;

fn main() -> anyhow::Result<()> {
    pharmastock_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let repo = InventoryRepository::new(FsDocumentStore::new());
    let path = config.inventory_file.as_path();

    let mut inventory = InventoryManager::new();
    match repo.load_into(&mut inventory, path) {
        Ok(()) => {}
        Err(PersistenceError::MissingFile(_)) => {
            tracing::info!(path = %path.display(), "no inventory file; seeding sample data");
            demo::seed(&mut inventory, Utc::now()).context("failed to seed sample inventory")?;
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to load inventory from {}", path.display()));
        }
    }

    for product in inventory.search_products("Vitamina") {
        tracing::info!(
            product_id = product.id(),
            name = product.name(),
            stock = product.stock_quantity(),
            "search match"
        );
    }

    println!(
        "{}",
        inventory.generate_stock_report_at(Utc::now(), config.near_expiration_days)
    );

    repo.save(&inventory, path)
        .with_context(|| format!("failed to save inventory to {}", path.display()))?;
    Ok(())
}
