//! Remote-first product resolution with explicit bundled fallback.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, warn};

use ute_shop_core::{Product, ProductId};

use super::Catalog;
use super::cache::{CacheKey, CacheValue};
use crate::api::types::ProductQuery;
use crate::api::{ApiClient, ApiError};

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Fresh (or cached) backend data.
    Remote,
    /// The bundled static snapshot.
    Bundled,
}

/// A resolved value together with its provenance.
///
/// Callers that only care about the value read `.value`; diagnostics and
/// tests can assert on `.source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    /// The resolved data.
    pub value: T,
    /// Where it came from.
    pub source: DataSource,
}

impl<T> Resolved<T> {
    const fn remote(value: T) -> Self {
        Self {
            value,
            source: DataSource::Remote,
        }
    }

    const fn bundled(value: T) -> Self {
        Self {
            value,
            source: DataSource::Bundled,
        }
    }

    /// Whether this value came from the bundled snapshot.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.source, DataSource::Bundled)
    }
}

/// The remote side of product resolution.
///
/// Implementations return `Err` for anything that should trigger the
/// bundled fallback: transport failure, non-success status, an envelope
/// with `success: false`, or a successful envelope with no data.
#[allow(async_fn_in_trait)]
pub trait ProductSource {
    /// Fetch one product by id.
    async fn product(&self, id: &ProductId) -> Result<Product, ApiError>;

    /// Fetch products related to `id`.
    async fn related(&self, id: &ProductId, limit: Option<u32>) -> Result<Vec<Product>, ApiError>;

    /// Fetch the featured product list.
    async fn featured(&self, limit: Option<u32>) -> Result<Vec<Product>, ApiError>;

    /// Fetch the bestseller product list.
    async fn bestsellers(&self, limit: Option<u32>) -> Result<Vec<Product>, ApiError>;

    /// Fetch a filtered product listing.
    async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError>;
}

impl ProductSource for ApiClient {
    async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        Self::product(self, id).await?.ok_data()
    }

    async fn related(&self, id: &ProductId, limit: Option<u32>) -> Result<Vec<Product>, ApiError> {
        self.related_products(id, limit).await?.ok_data()
    }

    async fn featured(&self, limit: Option<u32>) -> Result<Vec<Product>, ApiError> {
        self.featured_products(limit).await?.ok_data()
    }

    async fn bestsellers(&self, limit: Option<u32>) -> Result<Vec<Product>, ApiError> {
        self.bestseller_products(limit).await?.ok_data()
    }

    async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        self.products(query).await?.ok_data()
    }
}

/// Remote-first resolver over a [`ProductSource`], falling back to the
/// bundled [`Catalog`].
///
/// Remote hits for stable reads (single products, unlimited related /
/// featured / bestseller lists) are cached for five minutes. Fallbacks are
/// never cached, so a recovering backend is picked up on the next call.
pub struct Resolver<S> {
    source: S,
    catalog: Arc<Catalog>,
    cache: Cache<CacheKey, CacheValue>,
}

/// Cached entries expire after this long.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Upper bound on cached responses.
const CACHE_CAPACITY: u64 = 1000;

impl<S: ProductSource> Resolver<S> {
    /// Create a resolver over `source` with `catalog` as the fallback.
    #[must_use]
    pub fn new(source: S, catalog: Arc<Catalog>) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            source,
            catalog,
            cache,
        }
    }

    /// The fallback catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve a single product.
    ///
    /// Remote data when the backend answers; otherwise the bundled entry
    /// with the same id, or the snapshot's first entry for unknown ids.
    ///
    /// # Errors
    ///
    /// Fails only when the backend is unreachable *and* the fallback
    /// catalog is empty, which cannot happen with [`Catalog::bundled`].
    pub async fn product(&self, id: &ProductId) -> Result<Resolved<Product>, ApiError> {
        let key = CacheKey::Product(id.clone());
        if let Some(CacheValue::Product(product)) = self.cache.get(&key).await {
            debug!(%id, "cache hit for product");
            return Ok(Resolved::remote(*product));
        }

        match self.source.product(id).await {
            Ok(product) => {
                self.cache
                    .insert(key, CacheValue::Product(Box::new(product.clone())))
                    .await;
                Ok(Resolved::remote(product))
            }
            Err(e) => {
                warn!(%id, error = %e, "product fetch failed, using bundled snapshot");
                self.catalog
                    .fallback_for(id)
                    .cloned()
                    .map(Resolved::bundled)
                    .ok_or(e)
            }
        }
    }

    /// Resolve products related to `id`. Falls back to the full snapshot.
    pub async fn related(&self, id: &ProductId, limit: Option<u32>) -> Resolved<Vec<Product>> {
        let key = (limit.is_none()).then(|| CacheKey::Related(id.clone()));
        self.resolve_list(key, self.source.related(id, limit), limit)
            .await
    }

    /// Resolve the featured list. Falls back to the full snapshot.
    pub async fn featured(&self, limit: Option<u32>) -> Resolved<Vec<Product>> {
        let key = (limit.is_none()).then_some(CacheKey::Featured);
        self.resolve_list(key, self.source.featured(limit), limit)
            .await
    }

    /// Resolve the bestseller list. Falls back to the full snapshot.
    pub async fn bestsellers(&self, limit: Option<u32>) -> Resolved<Vec<Product>> {
        let key = (limit.is_none()).then_some(CacheKey::Bestseller);
        self.resolve_list(key, self.source.bestsellers(limit), limit)
            .await
    }

    /// Resolve a filtered listing. Never cached (queries are open-ended);
    /// falls back to the snapshot truncated to the query's limit.
    pub async fn list(&self, query: &ProductQuery) -> Resolved<Vec<Product>> {
        match self.source.list(query).await {
            Ok(products) => Resolved::remote(products),
            Err(e) => {
                warn!(error = %e, "product listing failed, using bundled snapshot");
                Resolved::bundled(self.snapshot(query.limit))
            }
        }
    }

    async fn resolve_list(
        &self,
        key: Option<CacheKey>,
        fetch: impl Future<Output = Result<Vec<Product>, ApiError>>,
        limit: Option<u32>,
    ) -> Resolved<Vec<Product>> {
        if let Some(key) = &key
            && let Some(CacheValue::Products(products)) = self.cache.get(key).await
        {
            debug!("cache hit for product list");
            return Resolved::remote(products);
        }

        match fetch.await {
            Ok(products) => {
                if let Some(key) = key {
                    self.cache
                        .insert(key, CacheValue::Products(products.clone()))
                        .await;
                }
                Resolved::remote(products)
            }
            Err(e) => {
                warn!(error = %e, "product list fetch failed, using bundled snapshot");
                Resolved::bundled(self.snapshot(limit))
            }
        }
    }

    fn snapshot(&self, limit: Option<u32>) -> Vec<Product> {
        let mut products = self.catalog.all().to_vec();
        if let Some(limit) = limit {
            products.truncate(limit as usize);
        }
        products
    }
}
