//! The shipped product snapshot.
//!
//! Built in code rather than parsed at runtime so the catalog can never
//! fail to load. Prices are in the store currency's standard unit.

use rust_decimal::Decimal;
use ute_shop_core::Product;

/// The bundled products, in display order.
pub(super) fn products() -> Vec<Product> {
    vec![
        entry(1, "Ribbed Tank Top", 1699, None, "tops"),
        entry(2, "Oversized Motif T-shirt", 1895, Some(2495), "tops"),
        entry(3, "Loose-fit Hoodie", 2850, None, "hoodies"),
        entry(4, "Regular-fit Denim Jacket", 4999, Some(5999), "jackets"),
        entry(5, "Slim-fit Chinos", 3450, None, "trousers"),
        entry(6, "Crew-neck Sweatshirt", 2299, None, "sweatshirts"),
        entry(7, "Relaxed Cargo Pants", 3799, Some(4299), "trousers"),
        entry(8, "Classic Canvas Sneakers", 5495, None, "shoes"),
    ]
}

fn entry(id: i64, title: &str, cents: i64, old_cents: Option<i64>, category: &str) -> Product {
    let mut product = Product::new(id, title, Decimal::new(cents, 2));
    product.old_price = old_cents.map(|c| Decimal::new(c, 2));
    product.image = Some(format!("/images/products/{id}.jpg"));
    product.brand = Some("UTE Shop".to_owned());
    product.category = Some(category.to_owned());
    product
}
