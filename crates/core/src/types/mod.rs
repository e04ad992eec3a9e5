//! Core types for the UTE Shop client.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod product;
pub mod user;

pub use email::{Email, EmailError};
pub use id::{ProductId, UserId};
pub use product::{CartItem, Product};
pub use user::User;
