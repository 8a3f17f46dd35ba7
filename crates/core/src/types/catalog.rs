//! Catalog records: products and the categories they belong to.
//!
//! Both are immutable values supplied by a read-only catalog. Carts embed a
//! full copy of a [`Product`] rather than a reference, so the serialized form
//! here is also the form found inside saved cart snapshots.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::price::Price;

/// Stock levels below this (and above zero) are shown as "only N left".
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// A product offered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price in the store currency. Never negative.
    pub price: Decimal,
    pub image_url: String,
    pub category_id: CategoryId,
    pub stock_quantity: u32,
    pub is_featured: bool,
}

impl Product {
    /// Unit price as a displayable [`Price`].
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }

    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.stock_quantity > 0 && self.stock_quantity < LOW_STOCK_THRESHOLD
    }
}

/// A browsable product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
