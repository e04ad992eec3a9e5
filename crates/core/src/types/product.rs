//! Product and cart-line types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::id::ProductId;

/// A catalog product.
///
/// The upstream payloads carry a grab-bag of presentation fields alongside
/// the typed ones; those are preserved in [`Product::extra`] so nothing is
/// lost on a round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identity. Equality uses the canonical string form.
    pub id: ProductId,
    /// Display name.
    #[serde(alias = "name")]
    pub title: String,
    /// Current unit price.
    pub price: Decimal,
    /// Previous price, when the product is discounted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Decimal>,
    /// Primary image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Brand name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Category name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Whether the product can currently be purchased.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Open extension fields the API may attach.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Create a minimal product with just identity, title, and price.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            old_price: None,
            image: None,
            brand: None,
            category: None,
            in_stock: true,
            extra: Map::new(),
        }
    }
}

/// A cart line: a product plus a purchase quantity.
///
/// Invariant: at most one `CartItem` per product id, and `quantity >= 1`.
/// Both are enforced by the cart store, not by this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product being purchased.
    #[serde(flatten)]
    pub product: Product,
    /// Number of units.
    pub quantity: u32,
}

impl CartItem {
    /// Create a cart line for `quantity` units of `product`.
    #[must_use]
    pub const fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// The line contribution to the cart subtotal (`quantity x price`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.product.price
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_loose_payloads() {
        // `name` instead of `title`, numeric id, unknown fields.
        let product: Product = serde_json::from_str(
            r#"{"id": 7, "name": "Oversized Tee", "price": 19.99, "imgSrc": "/img/7.jpg"}"#,
        )
        .unwrap();

        assert_eq!(product.id, ProductId::from(7));
        assert_eq!(product.title, "Oversized Tee");
        assert_eq!(product.price, Decimal::new(1999, 2));
        assert!(product.in_stock);
        assert_eq!(
            product.extra.get("imgSrc").and_then(Value::as_str),
            Some("/img/7.jpg")
        );
    }

    #[test]
    fn line_total_is_quantity_times_price() {
        let item = CartItem::new(Product::new(1, "Tee", Decimal::new(1000, 2)), 3);
        assert_eq!(item.line_total(), Decimal::new(3000, 2));
    }
}
