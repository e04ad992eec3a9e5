//! Product browsing: listings, single products, categories, brands.

use clap::Subcommand;

use ute_shop_client::Shop;
use ute_shop_client::api::types::ProductQuery;
use ute_shop_client::catalog::Resolved;
use ute_shop_core::{Product, ProductId};

use super::CommandResult;

#[derive(Subcommand)]
pub enum ProductsAction {
    /// List products, optionally filtered
    List {
        /// Maximum number of products
        #[arg(long)]
        limit: Option<u32>,
        /// Page number
        #[arg(long)]
        page: Option<u32>,
        /// Free-text search
        #[arg(long)]
        search: Option<String>,
        /// Filter by category slug
        #[arg(long)]
        category: Option<String>,
        /// Filter by brand slug
        #[arg(long)]
        brand: Option<String>,
    },
    /// Show one product by id
    Show {
        /// Product id
        id: String,
    },
    /// Products related to a given product
    Related {
        /// Product id
        id: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// The featured product list
    Featured {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// The bestseller product list
    Bestseller {
        #[arg(long)]
        limit: Option<u32>,
    },
}

pub async fn run(shop: &Shop, action: ProductsAction) -> CommandResult {
    match action {
        ProductsAction::List {
            limit,
            page,
            search,
            category,
            brand,
        } => {
            let query = ProductQuery {
                limit,
                page,
                search,
                category,
                brand,
            };
            print_listing(&shop.resolver.list(&query).await);
        }
        ProductsAction::Show { id } => {
            let resolved = shop.resolver.product(&ProductId::from(id.as_str())).await?;
            print_product(&resolved.value);
            note_fallback(resolved.is_fallback());
        }
        ProductsAction::Related { id, limit } => {
            let id = ProductId::from(id.as_str());
            print_listing(&shop.resolver.related(&id, limit).await);
        }
        ProductsAction::Featured { limit } => {
            print_listing(&shop.resolver.featured(limit).await);
        }
        ProductsAction::Bestseller { limit } => {
            print_listing(&shop.resolver.bestsellers(limit).await);
        }
    }
    Ok(())
}

pub async fn categories(shop: &Shop, slug: Option<String>) -> CommandResult {
    if let Some(slug) = slug {
        let category = shop.api.category_by_slug(&slug).await?.ok_data()?;
        println!("{}  {}", category.id, category.name);
    } else {
        for category in shop.api.categories().await?.ok_data()? {
            let slug = category.slug.as_deref().unwrap_or("-");
            println!("{}  {}  ({slug})", category.id, category.name);
        }
    }
    Ok(())
}

pub async fn brands(shop: &Shop, slug: Option<String>) -> CommandResult {
    if let Some(slug) = slug {
        let brand = shop.api.brand_by_slug(&slug).await?.ok_data()?;
        println!("{}  {}", brand.id, brand.name);
    } else {
        for brand in shop.api.brands().await?.ok_data()? {
            let slug = brand.slug.as_deref().unwrap_or("-");
            println!("{}  {}  ({slug})", brand.id, brand.name);
        }
    }
    Ok(())
}

pub async fn health(shop: &Shop) -> CommandResult {
    let envelope = shop.api.health().await?;
    let message = envelope.message.as_deref().unwrap_or("ok");
    println!("backend: {message}");
    Ok(())
}

fn print_listing(resolved: &Resolved<Vec<Product>>) {
    for product in &resolved.value {
        print_line(product);
    }
    note_fallback(resolved.is_fallback());
}

fn print_line(product: &Product) {
    let stock = if product.in_stock { "" } else { "  [out of stock]" };
    println!("{}  {}  {}{stock}", product.id, product.title, product.price);
}

fn print_product(product: &Product) {
    println!("{}: {}", product.id, product.title);
    println!("  price: {}", product.price);
    if let Some(old) = &product.old_price {
        println!("  was:   {old}");
    }
    if let Some(brand) = &product.brand {
        println!("  brand: {brand}");
    }
    if let Some(category) = &product.category {
        println!("  category: {category}");
    }
    if let Some(image) = &product.image {
        println!("  image: {image}");
    }
    println!("  in stock: {}", product.in_stock);
}

fn note_fallback(is_fallback: bool) {
    if is_fallback {
        eprintln!("(backend unavailable; showing bundled catalog)");
    }
}
