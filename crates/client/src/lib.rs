//! UTE Shop Client - persistent storefront state with remote fallback.
//!
//! The heart of this crate is a process-wide storefront state: cart,
//! wishlist, compare list, and session, each persisted to a durable
//! key-value store and composed with a REST backend that is allowed to be
//! unreliable. Product lookups go remote-first and silently degrade to a
//! bundled catalog snapshot, so UI code is never left without data.
//!
//! # Modules
//!
//! - [`config`] - environment-driven configuration
//! - [`storage`] - durable key-value store (one JSON file per key)
//! - [`api`] - REST gateway with the uniform `{success, message, data}`
//!   envelope
//! - [`session`] - login/logout/OTP/profile and the token+user pair
//! - [`store`] - cart, wishlist, compare, and quick-view stores
//! - [`catalog`] - bundled snapshot and the remote-fallback resolver
//! - [`state`] - [`state::Shop`], everything assembled
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn demo() -> ute_shop_client::Result<()> {
//! use ute_shop_client::{ClientConfig, Shop};
//! use ute_shop_core::ProductId;
//!
//! let mut shop = Shop::new(&ClientConfig::from_env()?)?;
//!
//! // Remote when the backend answers, bundled snapshot when it doesn't.
//! let product = shop.resolver.product(&ProductId::from(7)).await?;
//!
//! shop.cart.add(&product.value.id, Some(2));
//! println!("subtotal: {}", shop.cart.subtotal());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod storage;
pub mod store;

pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use state::Shop;
