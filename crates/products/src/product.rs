use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pharmastock_core::{DomainError, DomainResult};

use crate::category::ProductCategory;

/// A pharmacy product tracked in inventory.
///
/// Only `stock_quantity` changes after creation, and only through
/// [`Product::adjust_stock`]. Status predicates are recomputed on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: String,
    name: String,
    category: ProductCategory,
    description: String,
    stock_quantity: i64,
    min_stock: i64,
    unit_price: Decimal,
    expiration_date: Option<DateTime<Utc>>,
    batch_number: Option<String>,
    supplier: Option<String>,
    storage_location: Option<String>,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ProductCategory,
        description: impl Into<String>,
        stock_quantity: i64,
        min_stock: i64,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            description: description.into(),
            stock_quantity,
            min_stock,
            unit_price,
            expiration_date: None,
            batch_number: None,
            supplier: None,
            storage_location: None,
        }
    }

    pub fn with_expiration_date(mut self, expiration_date: DateTime<Utc>) -> Self {
        self.expiration_date = Some(expiration_date);
        self
    }

    pub fn with_batch_number(mut self, batch_number: impl Into<String>) -> Self {
        self.batch_number = Some(batch_number.into());
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn with_storage_location(mut self, storage_location: impl Into<String>) -> Self {
        self.storage_location = Some(storage_location.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> ProductCategory {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn stock_quantity(&self) -> i64 {
        self.stock_quantity
    }

    pub fn min_stock(&self) -> i64 {
        self.min_stock
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn expiration_date(&self) -> Option<DateTime<Utc>> {
        self.expiration_date
    }

    pub fn batch_number(&self) -> Option<&str> {
        self.batch_number.as_deref()
    }

    pub fn supplier(&self) -> Option<&str> {
        self.supplier.as_deref()
    }

    pub fn storage_location(&self) -> Option<&str> {
        self.storage_location.as_deref()
    }

    /// Stock at or below the configured minimum.
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.min_stock
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Strictly past the expiration date. Products without a date never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date.is_some_and(|exp| now > exp)
    }

    pub fn days_until_expiration(&self) -> Option<i64> {
        self.days_until_expiration_at(Utc::now())
    }

    /// Whole days from `now` until expiration, floored (a product that expired
    /// one hour ago reports `-1`).
    pub fn days_until_expiration_at(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expiration_date.map(|exp| floor_days(exp - now))
    }

    pub fn is_near_expiration(&self, days_threshold: i64) -> bool {
        self.is_near_expiration_at(Utc::now(), days_threshold)
    }

    pub fn is_near_expiration_at(&self, now: DateTime<Utc>, days_threshold: i64) -> bool {
        match self.days_until_expiration_at(now) {
            Some(days) => 0 < days && days <= days_threshold,
            None => false,
        }
    }

    /// Apply a signed stock movement.
    ///
    /// Fails without mutating when the result would be negative.
    pub fn adjust_stock(&mut self, delta: i64) -> DomainResult<i64> {
        let new_quantity = self
            .stock_quantity
            .checked_add(delta)
            .filter(|q| *q >= 0)
            .ok_or_else(|| DomainError::InsufficientStock {
                product_id: self.id.clone(),
                available: self.stock_quantity,
                requested: delta,
            })?;
        self.stock_quantity = new_quantity;
        Ok(new_quantity)
    }

    /// Unit prices are non-negative. Stock is only guarded by
    /// [`Product::adjust_stock`], never at construction.
    pub fn validate(&self) -> DomainResult<()> {
        if self.unit_price.is_sign_negative() && !self.unit_price.is_zero() {
            return Err(DomainError::validation(format!(
                "product {} has negative unit price ({})",
                self.id, self.unit_price
            )));
        }
        Ok(())
    }

    /// Persisted representation.
    pub fn to_record(&self) -> ProductRecord {
        ProductRecord::from(self)
    }
}

fn floor_days(delta: Duration) -> i64 {
    let days = delta.num_days();
    if delta < Duration::days(days) {
        days - 1
    } else {
        days
    }
}

/// Persisted shape of a [`Product`].
///
/// `category` stays a raw tag here so that an unknown tag surfaces as
/// [`DomainError::UnknownCategory`] during conversion instead of a generic
/// parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub stock_quantity: i64,
    pub min_stock: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(default, with = "crate::timestamp::option")]
    pub expiration_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub batch_number: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub storage_location: Option<String>,
}

impl From<&Product> for ProductRecord {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            category: p.category.as_str().to_string(),
            description: p.description.clone(),
            stock_quantity: p.stock_quantity,
            min_stock: p.min_stock,
            unit_price: p.unit_price,
            expiration_date: p.expiration_date,
            batch_number: p.batch_number.clone(),
            supplier: p.supplier.clone(),
            storage_location: p.storage_location.clone(),
        }
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = DomainError;

    fn try_from(r: ProductRecord) -> Result<Self, Self::Error> {
        let category = r.category.parse::<ProductCategory>()?;
        let product = Product {
            id: r.id,
            name: r.name,
            category,
            description: r.description,
            stock_quantity: r.stock_quantity,
            min_stock: r.min_stock,
            unit_price: r.unit_price,
            expiration_date: r.expiration_date,
            batch_number: r.batch_number,
            supplier: r.supplier,
            storage_location: r.storage_location,
        };
        product.validate()?;
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn test_product(stock: i64, min: i64) -> Product {
        Product::new(
            "PROD001",
            "Vitamina C 1000mg",
            ProductCategory::Ortomolecular,
            "Ácido ascórbico de alta pureza",
            stock,
            min,
            Decimal::new(250000, 2),
        )
    }

    #[test]
    fn low_stock_includes_the_threshold() {
        assert!(test_product(10, 10).is_low_stock());
        assert!(test_product(9, 10).is_low_stock());
        assert!(!test_product(11, 10).is_low_stock());
    }

    #[test]
    fn low_stock_is_recomputed_after_adjustment() {
        let mut product = test_product(50, 10);
        assert!(!product.is_low_stock());
        product.adjust_stock(-45).unwrap();
        assert!(product.is_low_stock());
        product.adjust_stock(45).unwrap();
        assert!(!product.is_low_stock());
    }

    #[test]
    fn no_expiration_date_means_no_expiry_status() {
        let product = test_product(5, 1);
        assert!(!product.is_expired_at(test_time()));
        assert_eq!(product.days_until_expiration_at(test_time()), None);
        assert!(!product.is_near_expiration_at(test_time(), 30));
    }

    #[test]
    fn expired_yesterday_is_expired_and_not_near_expiration() {
        let now = test_time();
        let product = test_product(5, 1).with_expiration_date(now - Duration::days(1));
        assert!(product.is_expired_at(now));
        assert_eq!(product.days_until_expiration_at(now), Some(-1));
        for threshold in [0, 1, 30, 365, i64::MAX] {
            assert!(!product.is_near_expiration_at(now, threshold));
        }
    }

    #[test]
    fn expiring_in_ten_days_is_near_for_30_but_not_5() {
        let now = test_time();
        let product = test_product(5, 1).with_expiration_date(now + Duration::days(10));
        assert!(!product.is_expired_at(now));
        assert!(product.is_near_expiration_at(now, 30));
        assert!(!product.is_near_expiration_at(now, 5));
    }

    #[test]
    fn wall_clock_predicates_agree_with_explicit_now() {
        let product = test_product(5, 1).with_expiration_date(Utc::now() + Duration::days(10));
        assert!(product.is_near_expiration(30));
        assert!(!product.is_near_expiration(5));
        assert!(!product.is_expired());
    }

    #[test]
    fn partial_days_are_floored() {
        let now = test_time();
        let later = test_product(1, 0).with_expiration_date(now + Duration::hours(36));
        assert_eq!(later.days_until_expiration_at(now), Some(1));

        let earlier = test_product(1, 0).with_expiration_date(now - Duration::hours(1));
        assert_eq!(earlier.days_until_expiration_at(now), Some(-1));
        assert!(earlier.is_expired_at(now));

        // Expires later today: zero whole days, so not "near" by the strict lower bound.
        let today = test_product(1, 0).with_expiration_date(now + Duration::hours(2));
        assert_eq!(today.days_until_expiration_at(now), Some(0));
        assert!(!today.is_near_expiration_at(now, 30));
    }

    #[test]
    fn expiration_instant_itself_is_not_expired() {
        let now = test_time();
        let product = test_product(1, 0).with_expiration_date(now);
        assert!(!product.is_expired_at(now));
    }

    #[test]
    fn adjust_stock_rejects_going_negative_without_mutation() {
        let mut product = test_product(5, 10);
        let err = product.adjust_stock(-6).unwrap_err();
        assert_eq!(
            err,
            DomainError::InsufficientStock {
                product_id: "PROD001".to_string(),
                available: 5,
                requested: -6,
            }
        );
        assert_eq!(product.stock_quantity(), 5);
    }

    #[test]
    fn adjust_stock_to_exactly_zero_succeeds() {
        let mut product = test_product(5, 10);
        assert_eq!(product.adjust_stock(-5), Ok(0));
        assert_eq!(product.stock_quantity(), 0);
    }

    #[test]
    fn adjust_stock_overflow_is_rejected() {
        let mut product = test_product(i64::MAX, 0);
        assert!(product.adjust_stock(1).is_err());
        assert_eq!(product.stock_quantity(), i64::MAX);
    }

    #[test]
    fn record_renders_category_tag_and_iso_timestamp() {
        let exp = Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap();
        let product = test_product(50, 10)
            .with_expiration_date(exp)
            .with_batch_number("VC2024-001");
        let value = serde_json::to_value(product.to_record()).unwrap();

        assert_eq!(value["category"], "ortomolecular");
        assert_eq!(value["expiration_date"], "2025-01-31T00:00:00Z");
        assert_eq!(value["unit_price"], 2500.0);
        assert_eq!(value["batch_number"], "VC2024-001");
        assert!(value["supplier"].is_null());
    }

    #[test]
    fn record_without_expiration_serialises_null() {
        let value = serde_json::to_value(test_product(1, 1).to_record()).unwrap();
        assert!(value["expiration_date"].is_null());
    }

    #[test]
    fn record_converts_back_to_identical_product() {
        let product = test_product(50, 10)
            .with_expiration_date(test_time())
            .with_batch_number("VC2024-001")
            .with_supplier("Laboratorio XYZ")
            .with_storage_location("Estante A-1");
        let json = serde_json::to_string(&product.to_record()).unwrap();
        let record: ProductRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(Product::try_from(record).unwrap(), product);
    }

    #[test]
    fn record_with_unexpected_keys_is_rejected() {
        let mut value = serde_json::to_value(test_product(1, 1).to_record()).unwrap();
        value["shelf_life_days"] = serde_json::json!(365);
        let res: Result<ProductRecord, _> = serde_json::from_value(value);
        assert!(res.unwrap_err().to_string().contains("shelf_life_days"));
    }

    #[test]
    fn unknown_category_tag_is_a_distinct_error() {
        let mut record = test_product(1, 1).to_record();
        record.category = "vitaminas".to_string();
        assert_eq!(
            Product::try_from(record),
            Err(DomainError::unknown_category("vitaminas"))
        );
    }

    #[test]
    fn construction_does_not_guard_stock() {
        let product = Product::new("", "X", ProductCategory::Otros, "", -5, 0, Decimal::ONE);
        assert_eq!(product.validate(), Ok(()));
        assert!(product.is_low_stock());
    }

    #[test]
    fn negative_price_fails_validation() {
        let product = Product::new("X", "X", ProductCategory::Otros, "", 1, 0, Decimal::new(-1, 0));
        assert!(matches!(product.validate(), Err(DomainError::Validation(_))));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: stock never goes negative, and a rejected adjustment leaves it untouched.
            #[test]
            fn stock_never_goes_negative(
                initial in 0i64..10_000,
                deltas in prop::collection::vec(-5_000i64..5_000, 0..50)
            ) {
                let mut product = test_product(initial, 10);
                for delta in deltas {
                    let before = product.stock_quantity();
                    match product.adjust_stock(delta) {
                        Ok(after) => prop_assert_eq!(after, before + delta),
                        Err(_) => {
                            prop_assert!(before + delta < 0);
                            prop_assert_eq!(product.stock_quantity(), before);
                        }
                    }
                    prop_assert!(product.stock_quantity() >= 0);
                }
            }

            /// Property: low stock is exactly `stock <= min`.
            #[test]
            fn low_stock_matches_definition(stock in 0i64..1_000, min in -10i64..1_000) {
                let product = test_product(stock, min);
                prop_assert_eq!(product.is_low_stock(), stock <= min);
            }

            /// Property: near expiration requires at least one whole future day within the threshold.
            #[test]
            fn near_expiration_matches_day_window(offset_hours in -2_000i64..2_000, threshold in 0i64..90) {
                let now = test_time();
                let product = test_product(1, 0).with_expiration_date(now + Duration::hours(offset_hours));
                let days = offset_hours.div_euclid(24);
                prop_assert_eq!(product.days_until_expiration_at(now), Some(days));
                prop_assert_eq!(product.is_near_expiration_at(now, threshold), 0 < days && days <= threshold);
            }
        }
    }
}
