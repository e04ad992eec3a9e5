//! Resolution-layer behavior against stub gateways: a dead backend must
//! silently yield bundled data, a live one must win.

use std::sync::Arc;

use rust_decimal::Decimal;

use ute_shop_client::api::ApiError;
use ute_shop_client::api::types::ProductQuery;
use ute_shop_client::catalog::{Catalog, DataSource, ProductSource, Resolver};
use ute_shop_core::{Product, ProductId};

/// A gateway whose every answer is `success: false`.
struct RejectingSource;

impl ProductSource for RejectingSource {
    async fn product(&self, _id: &ProductId) -> Result<Product, ApiError> {
        Err(ApiError::Rejected {
            message: "service unavailable".to_owned(),
        })
    }

    async fn related(&self, _id: &ProductId, _limit: Option<u32>) -> Result<Vec<Product>, ApiError> {
        Err(ApiError::Rejected {
            message: "service unavailable".to_owned(),
        })
    }

    async fn featured(&self, _limit: Option<u32>) -> Result<Vec<Product>, ApiError> {
        Err(ApiError::Rejected {
            message: "service unavailable".to_owned(),
        })
    }

    async fn bestsellers(&self, _limit: Option<u32>) -> Result<Vec<Product>, ApiError> {
        Err(ApiError::Rejected {
            message: "service unavailable".to_owned(),
        })
    }

    async fn list(&self, _query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        Err(ApiError::Rejected {
            message: "service unavailable".to_owned(),
        })
    }
}

/// A healthy gateway serving a single known product.
struct FixedSource(Product);

impl ProductSource for FixedSource {
    async fn product(&self, _id: &ProductId) -> Result<Product, ApiError> {
        Ok(self.0.clone())
    }

    async fn related(&self, _id: &ProductId, _limit: Option<u32>) -> Result<Vec<Product>, ApiError> {
        Ok(vec![self.0.clone()])
    }

    async fn featured(&self, _limit: Option<u32>) -> Result<Vec<Product>, ApiError> {
        Ok(vec![self.0.clone()])
    }

    async fn bestsellers(&self, _limit: Option<u32>) -> Result<Vec<Product>, ApiError> {
        Ok(vec![self.0.clone()])
    }

    async fn list(&self, _query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        Ok(vec![self.0.clone()])
    }
}

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::bundled())
}

#[tokio::test]
async fn failing_gateway_yields_the_matching_bundled_entry() {
    let catalog = catalog();
    let resolver = Resolver::new(RejectingSource, Arc::clone(&catalog));

    let resolved = resolver
        .product(&ProductId::from(7))
        .await
        .expect("fallback must resolve");

    assert_eq!(resolved.source, DataSource::Bundled);
    assert!(resolved.is_fallback());
    assert_eq!(Some(&resolved.value), catalog.get(&ProductId::from(7)));
}

#[tokio::test]
async fn unknown_id_falls_back_to_the_first_bundled_entry() {
    let catalog = catalog();
    let resolver = Resolver::new(RejectingSource, Arc::clone(&catalog));

    let resolved = resolver
        .product(&ProductId::from("definitely-not-a-sku"))
        .await
        .expect("fallback must resolve");

    assert_eq!(Some(&resolved.value), catalog.first());
}

#[tokio::test]
async fn failing_gateway_yields_the_bundled_list() {
    let catalog = catalog();
    let resolver = Resolver::new(RejectingSource, Arc::clone(&catalog));

    let featured = resolver.featured(None).await;
    assert_eq!(featured.source, DataSource::Bundled);
    assert_eq!(featured.value, catalog.all());

    let limited = resolver.bestsellers(Some(3)).await;
    assert_eq!(limited.value.len(), 3);
}

#[tokio::test]
async fn live_gateway_wins_over_the_snapshot() {
    let remote = Product::new("remote-1", "Fresh From Backend", Decimal::new(999, 2));
    let resolver = Resolver::new(FixedSource(remote.clone()), catalog());

    let resolved = resolver
        .product(&ProductId::from("remote-1"))
        .await
        .expect("remote must resolve");

    assert_eq!(resolved.source, DataSource::Remote);
    assert!(!resolved.is_fallback());
    assert_eq!(resolved.value, remote);

    let listing = resolver.list(&ProductQuery::limited(5)).await;
    assert_eq!(listing.source, DataSource::Remote);
    assert_eq!(listing.value, vec![remote]);
}

#[tokio::test]
async fn empty_fallback_list_is_still_a_resolution() {
    // Even with an empty catalog, list resolution never errors; only a
    // single-product lookup can fail, and only in this degenerate case.
    let empty = Arc::new(Catalog::from_products(Vec::new()));
    let resolver = Resolver::new(RejectingSource, Arc::clone(&empty));

    let featured = resolver.featured(None).await;
    assert_eq!(featured.source, DataSource::Bundled);
    assert!(featured.value.is_empty());

    assert!(resolver.product(&ProductId::from(1)).await.is_err());
}
