//! UTE Shop CLI - a command-line storefront front-end.
//!
//! Stands in for the web UI: every library operation (catalog resolution,
//! cart, wishlist, compare, auth) is reachable from a subcommand. State is
//! persisted under `--data-dir` (or `UTE_SHOP_DATA_DIR`), so carts and
//! sessions survive between invocations just like a browser reload.
//!
//! # Usage
//!
//! ```bash
//! # Browse (falls back to the bundled catalog when the backend is down)
//! ute-shop products featured --limit 4
//! ute-shop products show 7
//!
//! # Cart
//! ute-shop cart add 3 --qty 2
//! ute-shop cart show
//!
//! # Auth
//! ute-shop auth login an@ute.edu --password secret
//! ute-shop auth profile
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ute_shop_client::{ClientConfig, Shop};

mod commands;

#[derive(Parser)]
#[command(name = "ute-shop")]
#[command(author, version, about = "Command-line storefront for UTE Shop")]
struct Cli {
    /// Backend API base URL (overrides UTE_SHOP_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Durable-storage directory (overrides UTE_SHOP_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products
    Products {
        #[command(subcommand)]
        action: commands::products::ProductsAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: commands::wishlist::WishlistAction,
    },
    /// Manage the compare list
    Compare {
        #[command(subcommand)]
        action: commands::wishlist::CompareAction,
    },
    /// Account and session
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// List categories
    Categories {
        /// Look up a single category by slug
        #[arg(long)]
        slug: Option<String>,
    },
    /// List brands
    Brands {
        /// Look up a single brand by slug
        #[arg(long)]
        slug: Option<String>,
    },
    /// Check backend health
    Health,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }

    let mut shop = Shop::new(&config)?;

    match cli.command {
        Commands::Products { action } => commands::products::run(&shop, action).await?,
        Commands::Cart { action } => commands::cart::run(&mut shop, action).await?,
        Commands::Wishlist { action } => commands::wishlist::run_wishlist(&mut shop, action).await?,
        Commands::Compare { action } => commands::wishlist::run_compare(&mut shop, action)?,
        Commands::Auth { action } => commands::auth::run(&mut shop, action).await?,
        Commands::Categories { slug } => commands::products::categories(&shop, slug).await?,
        Commands::Brands { slug } => commands::products::brands(&shop, slug).await?,
        Commands::Health => commands::products::health(&shop).await?,
    }
    Ok(())
}
