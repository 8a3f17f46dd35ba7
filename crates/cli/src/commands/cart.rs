//! Saved cart commands.
//!
//! Operate on the same snapshot the storefront server reads and writes, so
//! run them while the server is stopped.
//!
//! # Usage
//!
//! ```bash
//! # Show the saved cart
//! gs-cli cart show
//!
//! # Add two wrapped bears with a message
//! gs-cli cart add prod-grad-teddy-1 -q 2 --wrap -m "Congrats!"
//!
//! # Empty the saved cart
//! gs-cli cart clear --data-dir /var/lib/giftshop
//! ```
//!
//! # Environment Variables
//!
//! - `GIFTSHOP_DATA_DIR` - Directory holding the cart snapshot (default: ./data)

use std::io::{self, Write};
use std::path::PathBuf;

use giftshop_core::{Price, ProductId};
use giftshop_storefront::cart::{Cart, CartStore, SnapshotPersister};
use giftshop_storefront::catalog::Catalog;
use giftshop_storefront::config::{ConfigError, StorefrontConfig};
use giftshop_storefront::storage::FileStorage;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("{name} has only {stock} in stock")]
    InsufficientStock { name: String, stock: u32 },

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Open the saved cart in `data_dir`, or the configured data directory.
fn open(data_dir: Option<PathBuf>) -> Result<CartStore, CartError> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => StorefrontConfig::from_env()?.data_dir,
    };
    tracing::debug!(dir = %dir.display(), "Opening saved cart");
    Ok(CartStore::with_persistence(SnapshotPersister::new(
        FileStorage::new(dir),
    )))
}

/// Print the saved cart.
///
/// # Errors
///
/// Returns an error if configuration is invalid or stdout cannot be written.
pub fn show(data_dir: Option<PathBuf>) -> Result<(), CartError> {
    let store = open(data_dir)?;
    write_cart(&mut io::stdout().lock(), store.cart())?;
    Ok(())
}

/// Add a catalog product to the saved cart.
///
/// # Errors
///
/// Returns `CartError::UnknownProduct` if the product is not in the catalog
/// and `CartError::InsufficientStock` if `quantity` exceeds its stock.
pub fn add(
    data_dir: Option<PathBuf>,
    product_id: &str,
    quantity: u32,
    message: Option<String>,
    wrap: bool,
) -> Result<(), CartError> {
    let catalog = Catalog::mock();
    let product = catalog
        .product(&ProductId::new(product_id))
        .ok_or_else(|| CartError::UnknownProduct(product_id.to_owned()))?;
    if quantity > product.stock_quantity {
        return Err(CartError::InsufficientStock {
            name: product.name.clone(),
            stock: product.stock_quantity,
        });
    }

    let mut store = open(data_dir)?;
    let message = message.filter(|m| !m.is_empty());
    let cart = store.add(product.clone(), quantity, message, wrap.then_some(true));

    tracing::info!(product_id, quantity, "Added to saved cart");
    write_cart(&mut io::stdout().lock(), cart)?;
    Ok(())
}

/// Empty the saved cart.
///
/// # Errors
///
/// Returns an error if configuration is invalid.
pub fn clear(data_dir: Option<PathBuf>) -> Result<(), CartError> {
    let mut store = open(data_dir)?;
    let removed = store.item_count();
    store.clear();

    tracing::info!(removed, "Saved cart cleared");
    Ok(())
}

fn write_cart(out: &mut impl Write, cart: &Cart) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Cart is empty.");
    }

    for line in cart.lines() {
        write!(
            out,
            "{:>3} x {:<40} {:>9}",
            line.quantity,
            line.product.name,
            Price::usd(line.total()).display()
        )?;
        if line.is_gift_wrapped() {
            write!(out, "  [gift wrapped]")?;
        }
        if let Some(message) = &line.custom_message {
            write!(out, "  \"{message}\"")?;
        }
        writeln!(out)?;
    }
    writeln!(
        out,
        "{} item(s), total {}",
        cart.item_count(),
        Price::usd(cart.total_price()).display()
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_write_cart() {
        let catalog = Catalog::mock();
        let bear = catalog
            .product(&ProductId::new("prod-grad-teddy-1"))
            .unwrap()
            .clone();

        let mut cart = Cart::new();
        cart.add(bear, 2, Some("Congrats!".to_string()), Some(true));

        let mut out = Vec::new();
        write_cart(&mut out, &cart).unwrap();
        let text = String::from_utf8(out).unwrap();

        // 2 x 24.99 + 2 x 5.99
        assert!(text.contains("$61.96"));
        assert!(text.contains("[gift wrapped]"));
        assert!(text.contains("\"Congrats!\""));
        assert!(text.ends_with("2 item(s), total $61.96\n"));
    }

    #[test]
    fn test_write_empty_cart() {
        let mut out = Vec::new();
        write_cart(&mut out, &Cart::new()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Cart is empty.\n");
    }
}
