//! Checkout: order totals, shipping details and order placement.
//!
//! Pricing rules on top of the cart total:
//! - Shipping is free when the subtotal is strictly above
//!   [`FREE_SHIPPING_THRESHOLD`], otherwise [`FLAT_SHIPPING_FEE`].
//! - Tax is [`TAX_RATE`] of the subtotal.
//!
//! Placing an order validates the form, records the totals and empties the
//! cart. No payment is taken and nothing is persisted beyond the cart.

use chrono::{DateTime, Utc};
use giftshop_core::Email;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, CartLine, CartStore};

/// Subtotal above which shipping is free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Shipping charged at or below the free-shipping threshold.
pub const FLAT_SHIPPING_FEE: Decimal = Decimal::from_parts(999, 0, 0, false, 2);

/// Sales tax rate applied to the subtotal.
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Reasons an order cannot be placed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("terms and conditions must be accepted")]
    TermsNotAccepted,
}

/// Totals for a cart at checkout. Values are unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub item_count: u64,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    #[must_use]
    pub fn for_cart(cart: &Cart) -> Self {
        let subtotal = cart.total_price();
        let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
            Decimal::ZERO
        } else {
            FLAT_SHIPPING_FEE
        };
        let tax = subtotal * TAX_RATE;

        Self {
            item_count: cart.item_count(),
            subtotal,
            shipping,
            tax,
            total: subtotal.saturating_add(shipping).saturating_add(tax),
        }
    }

    #[must_use]
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

fn default_country() -> String {
    "US".to_string()
}

/// Where the order is shipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address_line_1: String,
    #[serde(default)]
    pub address_line_2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    #[serde(default = "default_country")]
    pub country: String,
}

impl ShippingAddress {
    fn required_fields(&self) -> [(&'static str, &str); 7] {
        [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("address_line_1", self.address_line_1.as_str()),
            ("city", self.city.as_str()),
            ("state", self.state.as_str()),
            ("postal_code", self.postal_code.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Paypal,
    Apple,
}

/// Everything the shopper submits at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub order_notes: Option<String>,
    #[serde(default)]
    pub agree_to_terms: bool,
}

impl CheckoutForm {
    /// Check that required fields are filled in and terms are accepted.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, in form order.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        for (field, value) in self.shipping_address.required_fields() {
            if value.trim().is_empty() {
                return Err(CheckoutError::MissingField(field));
            }
        }

        Email::parse(&self.shipping_address.email)
            .map_err(|e| CheckoutError::InvalidEmail(e.to_string()))?;

        if !self.agree_to_terms {
            return Err(CheckoutError::TermsNotAccepted);
        }
        Ok(())
    }
}

/// Record of a placed order, returned to the shopper.
#[derive(Debug, Clone, Serialize)]
pub struct OrderConfirmation {
    pub summary: OrderSummary,
    pub lines: Vec<CartLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub order_notes: Option<String>,
    pub placed_at: DateTime<Utc>,
}

/// Place an order for the current cart contents and empty the cart.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] when there is nothing to order, or a
/// validation error from [`CheckoutForm::validate`]. The cart is untouched
/// on error.
pub fn place_order(
    store: &mut CartStore,
    form: &CheckoutForm,
) -> Result<OrderConfirmation, CheckoutError> {
    if store.cart().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    form.validate()?;

    let summary = OrderSummary::for_cart(store.cart());
    let lines = store.cart().lines().to_vec();
    store.clear();

    tracing::info!(
        items = summary.item_count,
        total = %summary.total,
        payment_method = ?form.payment_method,
        "Order placed"
    );

    Ok(OrderConfirmation {
        summary,
        lines,
        shipping_address: form.shipping_address.clone(),
        payment_method: form.payment_method,
        order_notes: form
            .order_notes
            .as_ref()
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty()),
        placed_at: Utc::now(),
    })
}
