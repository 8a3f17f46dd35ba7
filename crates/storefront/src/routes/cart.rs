//! Cart route handlers.
//!
//! The server holds a single shared cart. Every mutation goes through the
//! [`CartStore`](crate::cart::CartStore), which saves a snapshot after each
//! change, and responds with the updated cart.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use giftshop_core::ProductId;

use super::format_price;
use crate::cart::{Cart, CartLine, LineKey};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub image_url: String,
    pub unit_price: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_wrapping: Option<bool>,
    pub line_total: String,
    pub max_quantity: u32,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product.id.to_string(),
            name: line.product.name.clone(),
            image_url: line.product.image_url.clone(),
            unit_price: format_price(line.product.price),
            quantity: line.quantity,
            custom_message: line.custom_message.clone(),
            gift_wrapping: line.gift_wrapping,
            line_total: format_price(line.total()),
            max_quantity: line.product.stock_quantity,
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u64,
    pub total: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            item_count: cart.item_count(),
            total: format_price(cart.total_price()),
        }
    }
}

/// Cart count badge.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CartCountView {
    pub count: u64,
}

// =============================================================================
// Request Types
// =============================================================================

/// Add to cart request.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub custom_message: Option<String>,
    #[serde(default)]
    pub gift_wrapping: Option<bool>,
}

const fn default_quantity() -> u32 {
    1
}

/// Identifies one cart line.
#[derive(Debug, Deserialize)]
pub struct LineRequest {
    pub product_id: String,
    #[serde(default)]
    pub custom_message: Option<String>,
    #[serde(default)]
    pub gift_wrapping: Option<bool>,
}

impl LineRequest {
    fn key(&self) -> LineKey {
        LineKey {
            product_id: ProductId::new(self.product_id.as_str()),
            custom_message: normalize_message(self.custom_message.as_deref()),
            gift_wrapping: self.gift_wrapping,
        }
    }
}

/// Update cart line quantity request.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    #[serde(flatten)]
    pub line: LineRequest,
    pub quantity: i64,
}

/// An empty message is treated as no message at all. Whitespace is kept
/// as typed and forms its own line identity.
fn normalize_message(message: Option<&str>) -> Option<String> {
    message.filter(|m| !m.is_empty()).map(str::to_owned)
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let store = state.cart().await;
    Json(CartView::from(store.cart()))
}

/// Add a product to the cart.
///
/// The requested quantity must lie between 1 and the product's stock.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let product_id = ProductId::new(request.product_id);
    let product = state
        .catalog()
        .product(&product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    if !product.is_in_stock() {
        return Err(AppError::BadRequest(format!(
            "{} is out of stock",
            product.name
        )));
    }
    if request.quantity == 0 || request.quantity > product.stock_quantity {
        return Err(AppError::BadRequest(format!(
            "quantity must be between 1 and {}",
            product.stock_quantity
        )));
    }

    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));

    let mut store = state.cart().await;
    let cart = store.add(
        product.clone(),
        request.quantity,
        normalize_message(request.custom_message.as_deref()),
        request.gift_wrapping,
    );

    tracing::info!(
        product_id = %product_id,
        quantity = request.quantity,
        items = cart.item_count(),
        "Added to cart"
    );

    Ok(Json(CartView::from(cart)))
}

/// Set the quantity of a cart line. Zero or less removes the line.
///
/// Unknown lines are left alone and the unchanged cart is returned.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    let key = request.line.key();

    if let Some(product) = state.catalog().product(&key.product_id)
        && request.quantity > i64::from(product.stock_quantity)
    {
        return Err(AppError::BadRequest(format!(
            "quantity must not exceed {}",
            product.stock_quantity
        )));
    }

    let mut store = state.cart().await;
    let cart = store.update_quantity(&key, request.quantity);
    Ok(Json(CartView::from(cart)))
}

/// Remove a line from the cart.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<LineRequest>,
) -> Json<CartView> {
    let key = request.key();
    add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", key.product_id.as_str())]));

    let mut store = state.cart().await;
    Json(CartView::from(store.remove(&key)))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    let mut store = state.cart().await;
    Json(CartView::from(store.clear()))
}

/// Get the cart item count (for the header badge).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCountView> {
    let store = state.cart().await;
    Json(CartCountView {
        count: store.item_count(),
    })
}
