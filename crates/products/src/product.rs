use serde::Serialize;

use catalog_core::{Price, ProductId};

/// A product row as published by the sheet feed.
///
/// Immutable once built; equality is by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    sku: String,
    price: Price,
    quantity: i32,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        sku: impl Into<String>,
        price: Price,
        quantity: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            sku: sku.into(),
            price,
            quantity,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Case-insensitive substring match against name or SKU.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.sku.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product::new(ProductId::new(1), "Widget", "SKU1", Price::from_cents(999), 10)
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(widget()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "Widget",
                "sku": "SKU1",
                "price": 9.99,
                "quantity": 10,
            })
        );
    }

    #[test]
    fn matches_name_or_sku_ignoring_case() {
        let p = widget();
        assert!(p.matches("widg"));
        assert!(p.matches("sku1"));
        assert!(!p.matches("bolt"));
    }
}
