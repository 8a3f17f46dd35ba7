//! Integration tests for the gift shop storefront.
//!
//! Requests are driven through the full router (middleware included) with
//! `tower::ServiceExt::oneshot`, so no server or network is needed. Each
//! [`TestContext`] owns its own in-memory storage.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p giftshop-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use giftshop_storefront::{
    cart::{CART_STORAGE_KEY, Cart, SnapshotPersister},
    catalog::Catalog,
    config::StorefrontConfig,
    routes,
    state::AppState,
    storage::{KeyValueStorage, MemoryStorage},
};
use serde_json::Value;
use tower::ServiceExt;

/// Router plus the storage backing its cart.
pub struct TestContext {
    pub app: Router,
    pub storage: MemoryStorage,
}

impl TestContext {
    /// Fresh storefront with an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage(MemoryStorage::new())
    }

    /// Storefront whose cart is hydrated from `storage`.
    #[must_use]
    pub fn with_storage(storage: MemoryStorage) -> Self {
        let state = AppState::with_storage(
            StorefrontConfig::default(),
            Catalog::mock(),
            storage.clone(),
        );
        Self {
            app: routes::app(state),
            storage,
        }
    }

    /// Restart the storefront against the same storage.
    #[must_use]
    pub fn restart(&self) -> Self {
        Self::with_storage(self.storage.clone())
    }

    /// The raw snapshot currently saved, if any.
    #[must_use]
    pub fn saved_snapshot(&self) -> Option<String> {
        self.storage.get(CART_STORAGE_KEY).unwrap()
    }

    /// The cart as it would be restored from storage.
    #[must_use]
    pub fn saved_cart(&self) -> Cart {
        SnapshotPersister::new(self.storage.clone()).load()
    }

    /// Send a request and return the status and JSON body (`Null` if empty).
    pub async fn send(&self, method: Method, uri: &str, body: Option<&Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
