//! Shopping cart model.
//!
//! # Line identity
//!
//! A cart line is identified by the triple (product id, custom message,
//! gift-wrapping flag). Adding with an identical triple merges by summing
//! quantities; any difference produces a separate line, even for the same
//! product. Absence is a value of its own: a line added without a gift-wrap
//! flag is not the same line as one added with `Some(false)`.
//!
//! # Invariants
//!
//! - Every line present has a quantity of at least one.
//! - No two lines share an identity triple.
//!
//! [`Cart`] is plain state with no side effects. [`CartStore`] wraps it and
//! notifies subscribers after each mutation; [`SnapshotPersister`] is the
//! subscriber that writes the cart to local storage.

mod snapshot;
mod store;

pub use snapshot::{
    CART_STORAGE_KEY, CartDiagnostics, SnapshotError, SnapshotPersister, TracingDiagnostics,
    decode_snapshot, encode_snapshot,
};
pub use store::{CartStore, CartSubscriber};

use giftshop_core::{Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-unit surcharge for gift wrapping.
pub const WRAP_FEE: Decimal = Decimal::from_parts(599, 0, 0, false, 2);

/// One entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Snapshot of the product at the time it was added.
    pub product: Product,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gift_wrapping: Option<bool>,
}

impl CartLine {
    /// Whether this line has the identity described by `key`.
    #[must_use]
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product.id == key.product_id
            && self.custom_message == key.custom_message
            && self.gift_wrapping == key.gift_wrapping
    }

    /// The identity triple of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product.id.clone(),
            custom_message: self.custom_message.clone(),
            gift_wrapping: self.gift_wrapping,
        }
    }

    #[must_use]
    pub fn is_gift_wrapped(&self) -> bool {
        self.gift_wrapping == Some(true)
    }

    /// Price of this line: unit price plus wrap fee (when wrapped), times quantity.
    ///
    /// Saturates at the bounds of `Decimal` instead of overflowing.
    #[must_use]
    pub fn total(&self) -> Decimal {
        let quantity = Decimal::from(self.quantity);
        let base = self.product.price.saturating_mul(quantity);
        if self.is_gift_wrapped() {
            base.saturating_add(WRAP_FEE.saturating_mul(quantity))
        } else {
            base
        }
    }
}

/// Identity triple used to find, merge and remove cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub custom_message: Option<String>,
    pub gift_wrapping: Option<bool>,
}

impl LineKey {
    /// Key for a plain line: no message, no gift-wrap flag.
    #[must_use]
    pub fn new(product_id: impl Into<ProductId>) -> Self {
        Self {
            product_id: product_id.into(),
            custom_message: None,
            gift_wrapping: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.custom_message = Some(message.into());
        self
    }

    #[must_use]
    pub const fn with_gift_wrapping(mut self, wrapped: bool) -> Self {
        self.gift_wrapping = Some(wrapped);
        self
    }
}

/// The cart's line items and the totals derived from them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from lines already known to satisfy the invariants.
    pub(crate) const fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find the line with the given identity.
    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.matches(key))
    }

    /// Add `quantity` units of `product`.
    ///
    /// Merges into an existing line with the same identity triple, otherwise
    /// appends a new line. Stock is not checked here; callers bound the
    /// requested quantity. Adding zero units does nothing.
    ///
    /// Returns `true` if the cart changed.
    pub fn add(
        &mut self,
        product: Product,
        quantity: u32,
        custom_message: Option<String>,
        gift_wrapping: Option<bool>,
    ) -> bool {
        if quantity == 0 {
            return false;
        }

        let existing = self.lines.iter_mut().find(|line| {
            line.product.id == product.id
                && line.custom_message == custom_message
                && line.gift_wrapping == gift_wrapping
        });

        match existing {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine {
                product,
                quantity,
                custom_message,
                gift_wrapping,
            }),
        }
        true
    }

    /// Remove the line matching `key` exactly. Missing lines are ignored.
    ///
    /// Returns `true` if a line was removed.
    pub fn remove(&mut self, key: &LineKey) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| !line.matches(key));
        self.lines.len() != before
    }

    /// Set the quantity of the line matching `key`.
    ///
    /// A quantity of zero or less removes the line. The value is absolute,
    /// not an increment. Missing lines are ignored.
    ///
    /// Returns `true` if the cart changed.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(key);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.lines.iter_mut().find(|line| line.matches(key)) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove every line.
    ///
    /// Returns `true` if the cart had any lines.
    pub fn clear(&mut self) -> bool {
        let had_lines = !self.lines.is_empty();
        self.lines.clear();
        had_lines
    }

    /// Sum of line totals, including gift-wrap fees. Not rounded.
    ///
    /// Saturates at the bounds of `Decimal` instead of overflowing.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
