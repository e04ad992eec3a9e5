//! Durable key-value store.
//!
//! The Rust-native analogue of the browser's `localStorage`: a directory of
//! JSON files, one per key. Collection and session stores persist full
//! snapshots here and hydrate from it once at construction.
//!
//! The store is deliberately infallible at its API surface. In-memory state
//! is authoritative for the running session; a failed read or write is
//! logged and otherwise behaves as "absent" / no-op. A disabled store (no
//! backing directory, the headless equivalent of a non-browser render)
//! behaves the same way.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Storage keys owned by the client stores.
///
/// Each key is owned by exactly one store; nothing else writes it.
pub mod keys {
    /// Cart snapshot (array of cart items).
    pub const CART: &str = "cart";

    /// Wishlist snapshot (array of product ids).
    pub const WISHLIST: &str = "wishlist";

    /// Compare-list snapshot (array of product ids).
    pub const COMPARE: &str = "compare";

    /// Bearer token (plain JSON string).
    pub const AUTH_TOKEN: &str = "auth_token";

    /// Authenticated user snapshot (JSON object).
    pub const AUTH_USER: &str = "auth_user";
}

/// A durable key-value store backed by one JSON file per key.
///
/// Cheap to clone; clones share the same backing directory.
#[derive(Debug, Clone)]
pub struct KvStore {
    root: Option<PathBuf>,
}

impl KvStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// If the directory cannot be created the store degrades to the
    /// disabled (no-op) mode rather than failing.
    #[must_use]
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        match fs::create_dir_all(&root) {
            Ok(()) => Self { root: Some(root) },
            Err(e) => {
                warn!(path = %root.display(), error = %e, "storage unavailable, running without persistence");
                Self::disabled()
            }
        }
    }

    /// A store with no backing medium: reads are absent, writes are no-ops.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { root: None }
    }

    /// Whether the store has a backing directory.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.root.is_some()
    }

    /// Read and deserialize the value under `key`.
    ///
    /// Returns `None` for a missing key, a disabled store, or malformed
    /// JSON on disk. Never fails.
    #[must_use]
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(key, error = %e, "failed to read storage key");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                // Malformed snapshots are treated as absent so a corrupt
                // file can never wedge store hydration.
                warn!(key, error = %e, "malformed snapshot in storage, treating as absent");
                None
            }
        }
    }

    /// Serialize `value` and write it under `key`.
    ///
    /// Fire-and-forget: failures are logged, never raised.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) {
        let Some(path) = self.path_for(key) else {
            return;
        };

        let json = match serde_json::to_vec(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "failed to serialize snapshot");
                return;
            }
        };

        if let Err(e) = fs::write(&path, json) {
            warn!(key, error = %e, "failed to persist snapshot");
        } else {
            debug!(key, "persisted snapshot");
        }
    }

    /// Remove the value under `key`, if any.
    pub fn remove(&self, key: &str) {
        let Some(path) = self.path_for(key) else {
            return;
        };

        if let Err(e) = fs::remove_file(&path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!(key, error = %e, "failed to remove storage key");
        }
    }

    fn path_for(&self, key: &str) -> Option<PathBuf> {
        self.root
            .as_deref()
            .map(|root: &Path| root.join(format!("{key}.json")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_value() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvStore::open(dir.path());

        kv.write(keys::WISHLIST, &vec!["1", "2"]);
        let back: Vec<String> = kv.read(keys::WISHLIST).unwrap();
        assert_eq!(back, vec!["1", "2"]);
    }

    #[test]
    fn missing_key_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvStore::open(dir.path());
        assert_eq!(kv.read::<Vec<String>>(keys::CART), None);
    }

    #[test]
    fn malformed_json_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvStore::open(dir.path());
        fs::write(dir.path().join("cart.json"), b"{not json").unwrap();
        assert_eq!(kv.read::<Vec<String>>(keys::CART), None);
    }

    #[test]
    fn disabled_store_is_a_no_op() {
        let kv = KvStore::disabled();
        assert!(!kv.is_enabled());
        kv.write(keys::AUTH_TOKEN, &"tok");
        assert_eq!(kv.read::<String>(keys::AUTH_TOKEN), None);
        kv.remove(keys::AUTH_TOKEN);
    }

    #[test]
    fn remove_clears_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvStore::open(dir.path());
        kv.write(keys::AUTH_TOKEN, &"tok");
        assert_eq!(kv.read::<String>(keys::AUTH_TOKEN).as_deref(), Some("tok"));
        kv.remove(keys::AUTH_TOKEN);
        assert_eq!(kv.read::<String>(keys::AUTH_TOKEN), None);
    }
}
