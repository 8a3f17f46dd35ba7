//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Health check
//!
//! # Catalog
//! GET  /api/categories              - Category listing
//! GET  /api/categories/{id}         - Category with its products
//! GET  /api/products                - Product listing (search, category, price, sort)
//! GET  /api/products/featured       - Featured products
//! GET  /api/products/{id}           - Product detail
//!
//! # Cart
//! GET  /api/cart                    - Cart contents and totals
//! POST /api/cart/add                - Add a line (merges on identical options)
//! POST /api/cart/update             - Set a line's quantity (<= 0 removes)
//! POST /api/cart/remove             - Remove a line
//! POST /api/cart/clear              - Empty the cart
//! GET  /api/cart/count              - Cart count badge
//!
//! # Checkout
//! GET  /api/checkout/summary        - Subtotal, shipping, tax and total
//! POST /api/checkout                - Place the order and empty the cart
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;

use axum::{
    Router,
    extract::Request,
    middleware,
    routing::{get, post},
};
use rust_decimal::Decimal;
use tower_http::trace::TraceLayer;

use giftshop_core::Price;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::categories))
        .route("/{id}", get(catalog::category))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/featured", get(catalog::featured))
        .route("/{id}", get(catalog::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::place))
        .route("/summary", get(checkout::summary))
}

/// Create all API routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/categories", category_routes())
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/checkout", checkout_routes())
}

/// Build the complete application router with tracing and request IDs.
///
/// Sentry layers are added by the binary so tests can run without a client.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Format an amount as a USD display string.
fn format_price(amount: Decimal) -> String {
    Price::usd(amount).display()
}
