//! Subcommand implementations.

pub mod auth;
pub mod cart;
pub mod products;
pub mod wishlist;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
