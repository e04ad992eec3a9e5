//! Wishlist and compare-list stores.
//!
//! Both are ordered sets of product ids with one deliberate behavioral
//! difference: wishlist *add* is a toggle (adding a present id removes
//! it), while compare-list add is idempotent (adding a present id is a
//! no-op). Neither defaults to seeded content; the original frontend's
//! `[1, 2, 3]` default was a development fixture.

use tracing::debug;

use ute_shop_core::ProductId;

use crate::storage::{KvStore, keys};

/// The wishlist: an ordered id set with toggle semantics.
pub struct Wishlist {
    ids: Vec<ProductId>,
    kv: KvStore,
}

impl Wishlist {
    /// Create a wishlist, hydrating once from durable storage.
    #[must_use]
    pub fn new(kv: KvStore) -> Self {
        let ids: Vec<ProductId> = kv.read(keys::WISHLIST).unwrap_or_default();
        debug!(entries = ids.len(), "hydrated wishlist");
        Self { ids, kv }
    }

    /// Whether an id is in the wishlist.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    /// Current ids, in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Toggle an id: absent ids are added, present ids are removed.
    ///
    /// Self-inverse: toggling twice restores the prior state. Returns
    /// whether the id is present *after* the call.
    pub fn toggle(&mut self, id: &ProductId) -> bool {
        let present = if self.contains(id) {
            self.ids.retain(|existing| existing != id);
            false
        } else {
            self.ids.push(id.clone());
            true
        };
        self.persist();
        present
    }

    /// Remove an id if present; a no-op otherwise.
    pub fn remove(&mut self, id: &ProductId) {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        if self.ids.len() != before {
            self.persist();
        }
    }

    /// Empty the wishlist.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.persist();
    }

    /// Populate demo content, but only when the wishlist is empty.
    /// Existing user edits always win.
    pub fn seed_if_empty(&mut self, ids: impl IntoIterator<Item = ProductId>) {
        if !self.ids.is_empty() {
            return;
        }
        self.ids.extend(ids);
        self.persist();
    }

    fn persist(&self) {
        self.kv.write(keys::WISHLIST, &self.ids);
    }
}

/// The compare list: an ordered id set with idempotent add.
pub struct CompareList {
    ids: Vec<ProductId>,
    kv: KvStore,
}

impl CompareList {
    /// Create a compare list, hydrating once from durable storage.
    #[must_use]
    pub fn new(kv: KvStore) -> Self {
        let ids: Vec<ProductId> = kv.read(keys::COMPARE).unwrap_or_default();
        debug!(entries = ids.len(), "hydrated compare list");
        Self { ids, kv }
    }

    /// Whether an id is in the compare list.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    /// Current ids, in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Add an id. Unlike the wishlist this is not a toggle: adding a
    /// present id is a no-op. Returns whether the id was newly added.
    pub fn add(&mut self, id: &ProductId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.clone());
        self.persist();
        true
    }

    /// Remove an id if present; a no-op otherwise.
    pub fn remove(&mut self, id: &ProductId) {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        if self.ids.len() != before {
            self.persist();
        }
    }

    /// Empty the compare list.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.persist();
    }

    fn persist(&self) {
        self.kv.write(keys::COMPARE, &self.ids);
    }
}
