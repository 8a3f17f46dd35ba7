//! Gift shop CLI - catalog listing and saved cart management.
//!
//! # Usage
//!
//! ```bash
//! # List products, optionally filtered and sorted
//! gs-cli catalog list --search bear --price 25-50 --sort price-low
//!
//! # List featured products
//! gs-cli catalog featured
//!
//! # Show, add to or clear the saved cart
//! gs-cli cart show
//! gs-cli cart add prod-rom-gift-1 --quantity 2 --wrap
//! gs-cli cart clear
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use giftshop_storefront::catalog::ListingParams;

mod commands;

#[derive(Parser)]
#[command(name = "gs-cli")]
#[command(author, version, about = "Gift shop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the saved cart
    Cart {
        /// Directory holding the cart snapshot (overrides `GIFTSHOP_DATA_DIR`)
        #[arg(long, global = true)]
        data_dir: Option<PathBuf>,

        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Case-insensitive text to find in names and descriptions
        #[arg(short, long)]
        search: Option<String>,

        /// Category ID (`all` for every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Price range: `all`, `MIN-MAX` or `MIN` (and up)
        #[arg(short, long)]
        price: Option<String>,

        /// Sort order (`name`, `price-low`, `price-high`)
        #[arg(long)]
        sort: Option<String>,
    },
    /// List featured products
    Featured,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the saved cart
    Show,
    /// Add a product to the saved cart
    Add {
        /// Product ID
        product_id: String,

        /// Number of units to add
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,

        /// Personalized message
        #[arg(short, long)]
        message: Option<String>,

        /// Gift wrap every unit
        #[arg(short, long)]
        wrap: bool,
    },
    /// Remove every line from the saved cart
    Clear,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                search,
                category,
                price,
                sort,
            } => commands::catalog::list(ListingParams {
                search,
                category,
                price,
                sort,
            })?,
            CatalogAction::Featured => commands::catalog::featured()?,
        },
        Commands::Cart { data_dir, action } => match action {
            CartAction::Show => commands::cart::show(data_dir)?,
            CartAction::Add {
                product_id,
                quantity,
                message,
                wrap,
            } => commands::cart::add(data_dir, &product_id, quantity, message, wrap)?,
            CartAction::Clear => commands::cart::clear(data_dir)?,
        },
    }
    Ok(())
}
