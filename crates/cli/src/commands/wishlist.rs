//! Wishlist and compare-list management.

use clap::Subcommand;
use secrecy::ExposeSecret;

use ute_shop_client::Shop;
use ute_shop_core::ProductId;

use super::CommandResult;

#[derive(Subcommand)]
pub enum WishlistAction {
    /// Show wishlisted product ids
    Show,
    /// Toggle a product in or out of the wishlist
    Toggle {
        /// Product id
        id: String,
    },
    /// Remove a product from the wishlist
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the wishlist
    Clear,
    /// Pre-populate an empty wishlist with the given ids
    Seed {
        /// Product ids
        ids: Vec<String>,
    },
    /// Mirror the local wishlist onto the server (requires login)
    Push,
    /// Ask the server whether a product is wishlisted (requires login)
    Check {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum CompareAction {
    /// Show compared product ids
    Show,
    /// Add a product to the compare list (idempotent)
    Add {
        /// Product id
        id: String,
    },
    /// Remove a product from the compare list
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the compare list
    Clear,
}

pub async fn run_wishlist(shop: &mut Shop, action: WishlistAction) -> CommandResult {
    match action {
        WishlistAction::Show => print_ids("wishlist", shop.wishlist.ids()),
        WishlistAction::Toggle { id } => {
            let id = ProductId::from(id.as_str());
            let present = shop.wishlist.toggle(&id);
            println!(
                "{id}: {}",
                if present { "wishlisted" } else { "removed" }
            );
        }
        WishlistAction::Remove { id } => {
            shop.wishlist.remove(&ProductId::from(id.as_str()));
            print_ids("wishlist", shop.wishlist.ids());
        }
        WishlistAction::Clear => {
            shop.wishlist.clear();
            println!("wishlist cleared");
        }
        WishlistAction::Seed { ids } => {
            shop.wishlist
                .seed_if_empty(ids.iter().map(|id| ProductId::from(id.as_str())));
            print_ids("wishlist", shop.wishlist.ids());
        }
        WishlistAction::Push => push(shop).await?,
        WishlistAction::Check { id } => {
            let token = require_token(shop)?;
            let check = shop
                .api
                .check_wishlist(&ProductId::from(id.as_str()), &token)
                .await?
                .ok_data()?;
            println!(
                "{id}: {}",
                if check.is_in_wishlist {
                    "wishlisted on the server"
                } else {
                    "not wishlisted on the server"
                }
            );
        }
    }
    Ok(())
}

pub fn run_compare(shop: &mut Shop, action: CompareAction) -> CommandResult {
    match action {
        CompareAction::Show => print_ids("compare", shop.compare.ids()),
        CompareAction::Add { id } => {
            let id = ProductId::from(id.as_str());
            let added = shop.compare.add(&id);
            println!("{id}: {}", if added { "added" } else { "already listed" });
        }
        CompareAction::Remove { id } => {
            shop.compare.remove(&ProductId::from(id.as_str()));
            print_ids("compare", shop.compare.ids());
        }
        CompareAction::Clear => {
            shop.compare.clear();
            println!("compare list cleared");
        }
    }
    Ok(())
}

fn print_ids(label: &str, ids: &[ProductId]) {
    if ids.is_empty() {
        println!("{label} is empty");
        return;
    }
    for id in ids {
        println!("{id}");
    }
}

async fn push(shop: &Shop) -> CommandResult {
    let token = require_token(shop)?;

    shop.api.clear_wishlist(&token).await?.ok_data()?;
    for id in shop.wishlist.ids() {
        shop.api.add_wishlist_item(id, &token).await?.ok_data()?;
    }
    println!(
        "pushed {} wishlist entr(ies) to the server",
        shop.wishlist.ids().len()
    );
    Ok(())
}

fn require_token(shop: &Shop) -> Result<String, Box<dyn std::error::Error>> {
    shop.session
        .token()
        .map(|token| token.expose_secret().to_owned())
        .ok_or_else(|| "not logged in; run `ute-shop auth login` first".into())
}
