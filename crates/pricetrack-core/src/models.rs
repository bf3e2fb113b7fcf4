//! Domain models for Pricetrack

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Category assigned to products created without one
pub const DEFAULT_CATEGORY: &str = "General";

/// A tracked product (an item in the user's basket)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    /// Display unit, e.g. "kg" or "loaf"
    pub unit: String,
    /// Optional photo of the product
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<u8>>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Category used for grouping, falling back to [`DEFAULT_CATEGORY`]
    pub fn category_label(&self) -> &str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() {
            DEFAULT_CATEGORY
        } else {
            trimmed
        }
    }
}

/// A single observed price for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub id: i64,
    pub product_id: i64,
    /// When the price was observed
    pub recorded_at: DateTime<Utc>,
    pub price: f64,
}

/// Input for creating a product
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub name: String,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub image: Option<Vec<u8>>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }

    /// Trimmed name, rejecting blank names
    pub fn validated_name(&self) -> Result<String> {
        validate_name(&self.name)
    }

    /// Trimmed category, defaulting blank or missing categories
    pub fn normalized_category(&self) -> String {
        normalize_category(self.category.as_deref())
    }
}

/// Partial update for an existing product; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.unit.is_none()
    }
}

/// Input for logging a price
#[derive(Debug, Clone)]
pub struct NewPriceRecord {
    pub product_id: i64,
    pub recorded_at: DateTime<Utc>,
    pub price: f64,
}

impl NewPriceRecord {
    pub fn new(product_id: i64, price: f64, recorded_at: DateTime<Utc>) -> Self {
        Self {
            product_id,
            recorded_at,
            price,
        }
    }

    /// Prices must be finite and strictly positive
    pub fn validate(&self) -> Result<()> {
        validate_price(self.price)
    }
}

pub(crate) fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidData("Product name cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Key two product names match on: trimmed, Unicode lowercase
pub(crate) fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

pub(crate) fn normalize_category(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

pub(crate) fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(Error::InvalidData(format!(
            "Price must be greater than zero (got {})",
            price
        )));
    }
    Ok(())
}

/// Store-level counts for status output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub product_count: i64,
    pub record_count: i64,
    pub first_record: Option<DateTime<Utc>>,
    pub last_record: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_defaults_when_blank() {
        let product = Product {
            id: 1,
            name: "Milk".to_string(),
            category: "   ".to_string(),
            unit: "l".to_string(),
            image: None,
            created_at: Utc::now(),
        };
        assert_eq!(product.category_label(), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_new_product_normalization() {
        let p = NewProduct::new("  Bread ").with_category(" Bakery ");
        assert_eq!(p.validated_name().unwrap(), "Bread");
        assert_eq!(p.normalized_category(), "Bakery");

        let p = NewProduct::new("Eggs");
        assert_eq!(p.normalized_category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_blank_name_rejected() {
        let p = NewProduct::new("   ");
        assert!(matches!(p.validated_name(), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_price_validation() {
        let now = Utc::now();
        assert!(NewPriceRecord::new(1, 2.5, now).validate().is_ok());
        assert!(NewPriceRecord::new(1, 0.0, now).validate().is_err());
        assert!(NewPriceRecord::new(1, -1.0, now).validate().is_err());
        assert!(NewPriceRecord::new(1, f64::NAN, now).validate().is_err());
        assert!(NewPriceRecord::new(1, f64::INFINITY, now).validate().is_err());
    }
}
