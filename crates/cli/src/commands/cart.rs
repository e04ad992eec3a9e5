//! Cart management, plus pushing the local cart to the backend.

use clap::Subcommand;

use ute_shop_client::Shop;
use ute_shop_core::ProductId;

use super::CommandResult;

#[derive(Subcommand)]
pub enum CartAction {
    /// Show cart lines and the subtotal
    Show,
    /// Add a product to the cart (no-op if already present)
    Add {
        /// Product id
        id: String,
        /// Units to add (defaults to 1)
        #[arg(long, default_value_t = 1)]
        qty: u32,
        /// Skip the added-to-cart confirmation
        #[arg(long)]
        quiet: bool,
    },
    /// Set the quantity of an existing cart line
    Update {
        /// Product id
        id: String,
        /// New quantity (floors at 1)
        qty: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
    /// Mirror the local cart onto the server cart (requires login)
    Push,
}

pub async fn run(shop: &mut Shop, action: CartAction) -> CommandResult {
    match action {
        CartAction::Show => show(shop),
        CartAction::Add { id, qty, quiet } => {
            let id = ProductId::from(id.as_str());
            if !quiet {
                shop.cart
                    .on_confirm(Box::new(|item| println!("added to cart: {}", item.product.title)));
            }
            let added = if quiet {
                shop.cart.add_quiet(&id, Some(qty))
            } else {
                shop.cart.add(&id, Some(qty))
            };
            if !added {
                println!("not added (unknown product, or already in cart)");
            }
        }
        CartAction::Update { id, qty } => {
            shop.cart.update_quantity(&ProductId::from(id.as_str()), qty);
            show(shop);
        }
        CartAction::Remove { id } => {
            shop.cart.remove(&ProductId::from(id.as_str()));
            show(shop);
        }
        CartAction::Clear => {
            shop.cart.clear();
            println!("cart cleared");
        }
        CartAction::Push => push(shop).await?,
    }
    Ok(())
}

fn show(shop: &Shop) {
    if shop.cart.is_empty() {
        println!("cart is empty");
        return;
    }
    for item in shop.cart.items() {
        println!(
            "{}  {}  x{}  = {}",
            item.product.id,
            item.product.title,
            item.quantity,
            item.line_total()
        );
    }
    println!("subtotal: {}", shop.cart.subtotal());
}

/// Replace the server-side cart with the local one, line by line.
async fn push(shop: &Shop) -> CommandResult {
    use secrecy::ExposeSecret;

    let Some(token) = shop.session.token() else {
        return Err("not logged in; run `ute-shop auth login` first".into());
    };
    let token = token.expose_secret();

    shop.api.clear_cart(token).await?.ok_data()?;
    for item in shop.cart.items() {
        shop.api
            .add_cart_item(&item.product.id, item.quantity, token)
            .await?
            .ok_data()?;
    }
    println!("pushed {} line(s) to the server cart", shop.cart.len());
    Ok(())
}
