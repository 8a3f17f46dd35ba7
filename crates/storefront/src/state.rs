//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::cart::{CartStore, SnapshotPersister};
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::storage::{FileStorage, KeyValueStorage};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog is immutable; the
/// cart store is the single mutable object and is accessed one request at a
/// time through a mutex.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: Mutex<CartStore>,
}

impl AppState {
    /// Create application state from explicit parts.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog, cart: CartStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(cart),
            }),
        }
    }

    /// Create application state whose cart is hydrated from, and saved to,
    /// `storage`.
    #[must_use]
    pub fn with_storage<S>(config: StorefrontConfig, catalog: Catalog, storage: S) -> Self
    where
        S: KeyValueStorage + 'static,
    {
        let cart = CartStore::with_persistence(SnapshotPersister::new(storage));
        tracing::info!(
            lines = cart.cart().lines().len(),
            items = cart.item_count(),
            "Cart hydrated"
        );
        Self::new(config, catalog, cart)
    }

    /// Create application state backed by files in the configured data directory.
    #[must_use]
    pub fn from_config(config: StorefrontConfig) -> Self {
        let storage = FileStorage::new(&config.data_dir);
        Self::with_storage(config, Catalog::mock(), storage)
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Lock the cart store for the duration of one operation.
    ///
    /// Each mutation writes the cart snapshot synchronously while the lock is
    /// held; with [`FileStorage`] that is a blocking write and rename of one
    /// small file on the calling worker thread. Holding the lock across the
    /// write keeps snapshots in mutation order.
    pub async fn cart(&self) -> MutexGuard<'_, CartStore> {
        self.inner.cart.lock().await
    }
}
