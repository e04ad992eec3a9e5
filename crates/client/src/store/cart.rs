//! The cart store.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use ute_shop_core::{CartItem, ProductId};

use crate::catalog::Catalog;
use crate::storage::{KvStore, keys};

/// Hook invoked after a product is added to the cart, used by UI layers to
/// open a cart-confirmation surface.
pub type ConfirmHook = Box<dyn FnMut(&CartItem) + Send>;

/// In-memory authoritative cart state.
///
/// At most one line per product id; lines keep insertion order. Every
/// mutation writes a full snapshot to durable storage before returning;
/// snapshot failures are logged and never affect the in-memory state.
pub struct CartStore {
    items: Vec<CartItem>,
    kv: KvStore,
    catalog: Arc<Catalog>,
    confirm: Option<ConfirmHook>,
}

impl CartStore {
    /// Create a cart, hydrating once from durable storage.
    ///
    /// A missing or malformed snapshot yields an empty cart.
    #[must_use]
    pub fn new(kv: KvStore, catalog: Arc<Catalog>) -> Self {
        let items: Vec<CartItem> = kv.read(keys::CART).unwrap_or_default();
        debug!(lines = items.len(), "hydrated cart");
        Self {
            items,
            kv,
            catalog,
            confirm: None,
        }
    }

    /// Install the confirmation hook invoked by [`CartStore::add`].
    pub fn on_confirm(&mut self, hook: ConfirmHook) {
        self.confirm = Some(hook);
    }

    /// Whether a product is already in the cart.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product.id == id)
    }

    /// Current cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of cart lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The cart subtotal: `sum(quantity x price)` over current lines.
    ///
    /// Recomputed on every read, so it can never go stale.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Add `quantity` units of a product (default 1) and invoke the
    /// confirmation hook.
    ///
    /// Add is not an upsert: if the product is already in the cart this is
    /// a no-op and the hook does not fire. Returns whether a line was
    /// added.
    pub fn add(&mut self, id: &ProductId, quantity: Option<u32>) -> bool {
        self.insert(id, quantity, true)
    }

    /// Like [`CartStore::add`], with the confirmation hook suppressed.
    pub fn add_quiet(&mut self, id: &ProductId, quantity: Option<u32>) -> bool {
        self.insert(id, quantity, false)
    }

    fn insert(&mut self, id: &ProductId, quantity: Option<u32>, confirm: bool) -> bool {
        if self.contains(id) {
            return false;
        }

        let Some(product) = self.catalog.get(id).cloned() else {
            warn!(%id, "no catalog entry to materialize cart line from");
            return false;
        };

        let item = CartItem::new(product, quantity.unwrap_or(1).max(1));
        self.items.push(item);
        self.persist();

        if confirm
            && let Some(hook) = &mut self.confirm
            && let Some(item) = self.items.last()
        {
            hook(item);
        }
        true
    }

    /// Replace (not increment) the quantity of an existing line.
    ///
    /// A no-op when the product is not in the cart; repeated calls with
    /// the same value are idempotent. Quantity is kept at least 1.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) {
        let Some(item) = self.items.iter_mut().find(|item| &item.product.id == id) else {
            return;
        };

        item.quantity = quantity.max(1);
        self.persist();
    }

    /// Remove a line if present; a no-op otherwise.
    pub fn remove(&mut self, id: &ProductId) {
        let before = self.items.len();
        self.items.retain(|item| &item.product.id != id);
        if self.items.len() != before {
            self.persist();
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    fn persist(&self) {
        self.kv.write(keys::CART, &self.items);
    }
}
