//! Checkout route handlers.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use super::cart::CartLineView;
use super::format_price;
use crate::checkout::{
    CheckoutError, CheckoutForm, OrderSummary, PaymentMethod, ShippingAddress, place_order,
};
use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Order totals display data.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummaryView {
    pub item_count: u64,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
    pub free_shipping: bool,
}

impl From<&OrderSummary> for OrderSummaryView {
    fn from(summary: &OrderSummary) -> Self {
        Self {
            item_count: summary.item_count,
            subtotal: format_price(summary.subtotal),
            shipping: format_price(summary.shipping),
            tax: format_price(summary.tax),
            total: format_price(summary.total),
            free_shipping: summary.has_free_shipping(),
        }
    }
}

/// Placed order display data.
#[derive(Debug, Clone, Serialize)]
pub struct OrderConfirmationView {
    pub summary: OrderSummaryView,
    pub lines: Vec<CartLineView>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_notes: Option<String>,
    pub placed_at: DateTime<Utc>,
}

/// Show the totals for the current cart.
#[instrument(skip(state))]
pub async fn summary(State(state): State<AppState>) -> Result<Json<OrderSummaryView>> {
    let store = state.cart().await;
    if store.cart().is_empty() {
        return Err(CheckoutError::EmptyCart.into());
    }
    Ok(Json(OrderSummaryView::from(&OrderSummary::for_cart(
        store.cart(),
    ))))
}

/// Place the order for the current cart.
#[instrument(skip(state, form), fields(payment_method = ?form.payment_method))]
pub async fn place(
    State(state): State<AppState>,
    Json(form): Json<CheckoutForm>,
) -> Result<(StatusCode, Json<OrderConfirmationView>)> {
    add_breadcrumb("checkout", "Order submitted", None);

    let mut store = state.cart().await;
    let confirmation = place_order(&mut store, &form)?;

    Ok((
        StatusCode::CREATED,
        Json(OrderConfirmationView {
            summary: OrderSummaryView::from(&confirmation.summary),
            lines: confirmation.lines.iter().map(CartLineView::from).collect(),
            shipping_address: confirmation.shipping_address,
            payment_method: confirmation.payment_method,
            order_notes: confirmation.order_notes,
            placed_at: confirmation.placed_at,
        }),
    ))
}
