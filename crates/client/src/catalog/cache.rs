//! Cache types for remote catalog responses.

use ute_shop_core::{Product, ProductId};

/// Cache key for remote catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    Related(ProductId),
    Featured,
    Bestseller,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
}
