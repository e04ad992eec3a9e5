//! Bundled catalog snapshot and remote-fallback resolution.
//!
//! The storefront must never be left without product data: every lookup
//! goes to the backend first and silently degrades to the bundled static
//! snapshot when the backend is down, slow, or answers `success: false`.
//! The fallback is an explicit branch in [`resolve::Resolver`], not an
//! exception handler, so it is directly testable.

mod cache;
mod data;
pub mod resolve;

pub use resolve::{DataSource, ProductSource, Resolved, Resolver};

use ute_shop_core::{Product, ProductId};

/// The bundled static product snapshot.
///
/// Shipped with the client so product pages render even with no backend
/// at all. Lookup is by canonical id; insertion order matches the shipped
/// data set.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The snapshot shipped with this crate. Never empty.
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            products: data::products(),
        }
    }

    /// Build a catalog from an arbitrary product set (tests, embedders).
    #[must_use]
    pub const fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// The first entry, used as the last-resort fallback for unknown ids.
    #[must_use]
    pub fn first(&self) -> Option<&Product> {
        self.products.first()
    }

    /// All bundled products.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// The fallback product for `id`: the matching entry, or the first
    /// entry when the id is unknown.
    #[must_use]
    pub fn fallback_for(&self, id: &ProductId) -> Option<&Product> {
        self.get(id).or_else(|| self.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_is_not_empty() {
        let catalog = Catalog::bundled();
        assert!(!catalog.all().is_empty());
        assert!(catalog.first().is_some());
    }

    #[test]
    fn lookup_matches_numeric_and_string_ids() {
        let catalog = Catalog::bundled();
        let by_number = catalog.get(&ProductId::from(1));
        let by_string = catalog.get(&ProductId::from("1"));
        assert!(by_number.is_some());
        assert_eq!(by_number, by_string);
    }

    #[test]
    fn unknown_id_falls_back_to_first_entry() {
        let catalog = Catalog::bundled();
        let fallback = catalog.fallback_for(&ProductId::from("no-such-id"));
        assert_eq!(fallback, catalog.first());
    }
}
