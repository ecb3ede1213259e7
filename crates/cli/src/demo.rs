//! Sample data used when no inventory file exists yet.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use pharmastock_core::DomainResult;
use pharmastock_inventory::InventoryManager;
use pharmastock_products::{Product, ProductCategory};

pub fn sample_products(now: DateTime<Utc>) -> Vec<Product> {
    vec![
        Product::new(
            "PROD001",
            "Vitamina C 1000mg",
            ProductCategory::Ortomolecular,
            "Ácido ascórbico de alta pureza",
            50,
            10,
            Decimal::new(2500, 0),
        )
        .with_expiration_date(now + Duration::days(180))
        .with_batch_number("VC2024-001")
        .with_supplier("Laboratorio XYZ")
        .with_storage_location("Estante A-1"),
        Product::new(
            "PROD002",
            "Crema Hidratante Personalizada",
            ProductCategory::Dermocosmetica,
            "Crema facial con ácido hialurónico",
            5,
            8,
            Decimal::new(3500, 0),
        )
        .with_expiration_date(now + Duration::days(90))
        .with_batch_number("CH2024-002")
        .with_supplier("Materia Prima ABC")
        .with_storage_location("Refrigerador B"),
        Product::new(
            "PROD003",
            "Arnica Montana 30CH",
            ProductCategory::Homeopatia,
            "Glóbulos homeopáticos",
            25,
            5,
            Decimal::new(1800, 0),
        )
        .with_expiration_date(now + Duration::days(365))
        .with_batch_number("AM2024-003"),
    ]
}

/// Add the sample products and a couple of stock movements.
pub fn seed(inventory: &mut InventoryManager, now: DateTime<Utc>) -> DomainResult<()> {
    for product in sample_products(now) {
        inventory.add_product(product)?;
    }
    inventory.update_stock("PROD001", -10, "Venta")?;
    inventory.update_stock("PROD002", 3, "Nueva elaboración")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmastock_inventory::TransactionAction;

    #[test]
    fn seed_populates_three_products_and_five_transactions() {
        let mut inv = InventoryManager::new();
        seed(&mut inv, Utc::now()).unwrap();

        assert_eq!(inv.len(), 3);
        assert_eq!(inv.get_product("PROD001").unwrap().stock_quantity(), 40);
        assert_eq!(inv.get_product("PROD002").unwrap().stock_quantity(), 8);
        assert!(inv.get_product("PROD002").unwrap().is_low_stock());
        assert_eq!(inv.transactions().len(), 5);
        assert_eq!(
            inv.transactions().last().unwrap().action(),
            TransactionAction::Update
        );
    }

    #[test]
    fn seeding_twice_fails_on_duplicates() {
        let mut inv = InventoryManager::new();
        seed(&mut inv, Utc::now()).unwrap();
        assert!(seed(&mut inv, Utc::now()).is_err());
        assert_eq!(inv.len(), 3);
    }
}
