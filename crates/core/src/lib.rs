//! UTE Shop Core - Shared domain types.
//!
//! This crate provides common types used across the UTE Shop client
//! components:
//! - `client` - Session/cart/wishlist stores and the REST gateway
//! - `cli` - Command-line storefront front-end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product ids, products, users, and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
