//! Catalog listing commands.
//!
//! # Usage
//!
//! ```bash
//! # List every product, sorted by name
//! gs-cli catalog list
//!
//! # Romantic gifts between $25 and $50, most expensive first
//! gs-cli catalog list --category cat-romantic --price 25-50 --sort price-high
//!
//! # Featured products
//! gs-cli catalog featured
//! ```

use std::io::{self, Write};

use giftshop_core::Product;
use giftshop_storefront::catalog::{Catalog, ListingParams, ProductQuery, QueryError};
use thiserror::Error;

/// Errors that can occur while listing the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// List products matching the given filters.
///
/// # Errors
///
/// Returns `CatalogError::Query` if the price range or sort order cannot be
/// parsed.
pub fn list(params: ListingParams) -> Result<(), CatalogError> {
    let query = ProductQuery::try_from(params)?;
    let catalog = Catalog::mock();
    let products = catalog.search(&query);

    tracing::debug!(?query, count = products.len(), "Catalog search");
    write_products(&mut io::stdout().lock(), &products)?;
    Ok(())
}

/// List featured products.
///
/// # Errors
///
/// Returns `CatalogError::Io` if stdout cannot be written.
pub fn featured() -> Result<(), CatalogError> {
    let catalog = Catalog::mock();
    write_products(&mut io::stdout().lock(), &catalog.featured_products())?;
    Ok(())
}

fn write_products(out: &mut impl Write, products: &[&Product]) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "No products found.");
    }

    for product in products {
        let stock = if !product.is_in_stock() {
            "out of stock".to_string()
        } else if product.is_low_stock() {
            format!("only {} left", product.stock_quantity)
        } else {
            format!("{} in stock", product.stock_quantity)
        };
        writeln!(
            out,
            "{:<20} {:>9}  {}  ({stock})",
            product.id.as_str(),
            product.unit_price().display(),
            product.name
        )?;
    }
    writeln!(out, "{} product(s)", products.len())
}
