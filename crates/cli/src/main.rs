//! Bazaar CLI - Terminal storefront frontend.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! bazaar products
//! bazaar products --search phone
//! bazaar products --category beauty
//! bazaar categories
//!
//! # Product detail, editing, deletion
//! bazaar product show 1
//! bazaar product edit 1 --title "Renamed" --price 12.5
//! bazaar product delete 1
//!
//! # Session
//! bazaar login -u emilys -p emilyspass
//! bazaar whoami
//! bazaar logout
//!
//! # Cart (requires a session)
//! bazaar cart show
//! bazaar cart add 1
//! bazaar cart set-qty 1 3
//! bazaar cart remove 1
//! bazaar cart clear
//! ```
//!
//! The session is cached locally between invocations; the cart lives on the
//! remote API and is refetched per invocation. Checkout is unimplemented.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bazaar_core::ProductId;
use bazaar_storefront::StorefrontError;
use bazaar_storefront::api::HttpApi;
use bazaar_storefront::config::StorefrontConfig;
use bazaar_storefront::services::{CartService, CatalogService, SessionCache, SessionService};

mod commands;

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Bazaar storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        /// Server-side text search
        #[arg(short, long, conflicts_with = "category")]
        search: Option<String>,

        /// Restrict the listing to one category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Inspect, edit, or delete a single product
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// List catalog categories
    Categories,
    /// Log in to the storefront
    Login {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Log out and clear the cached session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Show a product's details
    Show { id: ProductId },
    /// Submit edited fields back to the catalog
    Edit {
        id: ProductId,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        price: Option<f64>,

        /// Discount percentage (0-100)
        #[arg(long)]
        discount: Option<f64>,

        #[arg(long)]
        stock: Option<i64>,

        /// Send the edit as a PUT replace instead of a PATCH
        #[arg(long)]
        replace: bool,
    },
    /// Delete a product from the catalog
    Delete { id: ProductId },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the current cart and its totals
    Show,
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Remove a product's line item
    Remove { product_id: ProductId },
    /// Set a line item's quantity (0 removes it)
    SetQty { product_id: ProductId, quantity: u32 },
    /// Empty the cart
    Clear,
}

/// The storefront services, wired to the real remote API.
pub(crate) struct App {
    pub(crate) session: SessionService<HttpApi>,
    pub(crate) cart: CartService<HttpApi>,
    pub(crate) catalog: CatalogService<HttpApi>,
}

impl App {
    fn new(config: &StorefrontConfig) -> Result<Self, StorefrontError> {
        let api = HttpApi::new(&config.api)?;
        let cache = SessionCache::new(config.session_cache.clone());

        Ok(Self {
            session: SessionService::new(api.clone(), cache),
            cart: CartService::new(api.clone()),
            catalog: CatalogService::new(api),
        })
    }
}

#[tokio::main]
async fn main() {
    // RUST_LOG overrides the default filter.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bazaar=warn,bazaar_storefront=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let app = App::new(&config)?;

    match cli.command {
        Commands::Products { search, category } => {
            commands::products::list(&app, search, category).await;
        }
        Commands::Product { action } => match action {
            ProductAction::Show { id } => commands::products::show(&app, id).await?,
            ProductAction::Edit {
                id,
                title,
                description,
                category,
                price,
                discount,
                stock,
                replace,
            } => {
                let patch = bazaar_core::ProductPatch {
                    title,
                    description,
                    category,
                    price,
                    discount_percentage: discount,
                    stock,
                };
                commands::products::edit(&app, id, patch, replace).await?;
            }
            ProductAction::Delete { id } => commands::products::delete(&app, id).await?,
        },
        Commands::Categories => commands::products::categories(&app).await,
        Commands::Login { username, password } => {
            commands::session::login(&app, &username, &password).await?;
        }
        Commands::Logout => commands::session::logout(&app).await,
        Commands::Whoami => commands::session::whoami(&app)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&app).await?,
            CartAction::Add { product_id } => commands::cart::add(&app, product_id).await?,
            CartAction::Remove { product_id } => commands::cart::remove(&app, product_id).await?,
            CartAction::SetQty {
                product_id,
                quantity,
            } => commands::cart::set_quantity(&app, product_id, quantity).await?,
            CartAction::Clear => commands::cart::clear(&app).await?,
        },
    }
    Ok(())
}
