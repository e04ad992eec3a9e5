//! Collection stores: cart, wishlist, compare list, and ephemeral
//! selection state.
//!
//! Each store owns its durable-storage key exclusively, hydrates from it
//! once at construction, and snapshots after every mutation. In-memory
//! state is authoritative; persistence is fire-and-forget.

mod cart;
mod selection;
mod wishlist;

pub use cart::{CartStore, ConfirmHook};
pub use selection::Selection;
pub use wishlist::{CompareList, Wishlist};
