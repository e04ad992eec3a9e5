//! The assembled shop state.
//!
//! One explicit object constructed at application start and passed by
//! reference to whatever needs it - no hidden global singletons, while
//! keeping the single-instance-per-session semantics UI layers expect.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::catalog::{Catalog, Resolver};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::session::SessionStore;
use crate::storage::KvStore;
use crate::store::{CartStore, CompareList, Selection, Wishlist};

/// Everything a storefront front-end needs, wired together.
///
/// Stores are independent slices: cart, wishlist, compare, session, and
/// selection share no mutable state and may be driven concurrently.
pub struct Shop {
    /// Remote-first product resolution.
    pub resolver: Resolver<ApiClient>,
    /// Session (token + user).
    pub session: SessionStore,
    /// Cart lines and subtotal.
    pub cart: CartStore,
    /// Wishlist ids.
    pub wishlist: Wishlist,
    /// Compare-list ids.
    pub compare: CompareList,
    /// Ephemeral quick-view / quick-add state.
    pub selection: Selection,
    /// The raw gateway, for callers that talk to endpoints directly
    /// (server-side cart/wishlist sync, categories, brands, health).
    pub api: ApiClient,
}

impl Shop {
    /// Assemble the shop from configuration.
    ///
    /// Hydrates every store from the configured data directory; with no
    /// data directory the shop runs ephemeral (persistence disabled).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api = ApiClient::new(config)?;
        let kv = config
            .data_dir
            .as_ref()
            .map_or_else(KvStore::disabled, KvStore::open);
        let catalog = Arc::new(Catalog::bundled());

        Ok(Self {
            resolver: Resolver::new(api.clone(), Arc::clone(&catalog)),
            session: SessionStore::new(api.clone(), kv.clone()),
            cart: CartStore::new(kv.clone(), Arc::clone(&catalog)),
            wishlist: Wishlist::new(kv.clone()),
            compare: CompareList::new(kv),
            selection: Selection::new(),
            api,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn assembles_without_a_data_dir() {
        let shop = Shop::new(&ClientConfig::default()).unwrap();
        assert!(shop.cart.is_empty());
        assert!(!shop.session.is_authenticated());
        assert!(shop.resolver.catalog().first().is_some());
    }
}
