//! Cart snapshot persistence.
//!
//! The whole cart is stored as a JSON array of lines under a single fixed
//! key. There is no schema version: anything that does not decode into a
//! valid cart is discarded on load and the shopper starts with an empty cart.

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use super::{Cart, CartLine, CartSubscriber};
use crate::storage::{KeyValueStorage, StorageError};

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "gift-shop-cart";

/// Reasons a snapshot could not be read or written.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("line {index} has zero quantity")]
    ZeroQuantity { index: usize },

    #[error("line {index} duplicates an earlier line")]
    DuplicateLine { index: usize },

    #[error("line {index} has a negative price")]
    NegativePrice { index: usize },
}

/// Observability hook for snapshot problems that are recovered from silently.
pub trait CartDiagnostics: Send + Sync {
    /// A saved snapshot was unreadable and has been replaced by an empty cart.
    fn snapshot_discarded(&self, key: &str, error: &SnapshotError);

    /// Writing the snapshot failed; the in-memory cart is unaffected.
    fn snapshot_write_failed(&self, key: &str, error: &SnapshotError);
}

/// Reports snapshot problems through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl CartDiagnostics for TracingDiagnostics {
    fn snapshot_discarded(&self, key: &str, error: &SnapshotError) {
        tracing::warn!(key, error = %error, "Discarding unreadable cart snapshot");
    }

    fn snapshot_write_failed(&self, key: &str, error: &SnapshotError) {
        tracing::error!(key, error = %error, "Failed to write cart snapshot");
    }
}

/// Serialize a cart to its snapshot form.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_snapshot(cart: &Cart) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(cart)?)
}

/// Decode and validate a snapshot.
///
/// # Errors
///
/// Returns an error if the value is not a JSON array of lines, or if the
/// lines break the cart invariants (zero quantities, negative prices,
/// duplicate identities).
pub fn decode_snapshot(raw: &str) -> Result<Cart, SnapshotError> {
    let lines: Vec<CartLine> = serde_json::from_str(raw)?;

    for (index, line) in lines.iter().enumerate() {
        if line.quantity == 0 {
            return Err(SnapshotError::ZeroQuantity { index });
        }
        if line.product.price < Decimal::ZERO {
            return Err(SnapshotError::NegativePrice { index });
        }
        let key = line.key();
        if lines.iter().take(index).any(|earlier| earlier.matches(&key)) {
            return Err(SnapshotError::DuplicateLine { index });
        }
    }

    Ok(Cart::from_lines(lines))
}

/// Cart subscriber that mirrors the cart into local storage.
pub struct SnapshotPersister<S> {
    storage: S,
    diagnostics: Arc<dyn CartDiagnostics>,
}

impl<S> std::fmt::Debug for SnapshotPersister<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotPersister")
            .field("key", &CART_STORAGE_KEY)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStorage> SnapshotPersister<S> {
    /// Persist to `storage`, reporting problems through `tracing`.
    pub fn new(storage: S) -> Self {
        Self::with_diagnostics(storage, Arc::new(TracingDiagnostics))
    }

    /// Persist to `storage`, reporting problems to `diagnostics`.
    pub fn with_diagnostics(storage: S, diagnostics: Arc<dyn CartDiagnostics>) -> Self {
        Self {
            storage,
            diagnostics,
        }
    }

    /// Read the saved cart, if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails or the snapshot is invalid.
    pub fn try_load(&self) -> Result<Option<Cart>, SnapshotError> {
        self.storage
            .get(CART_STORAGE_KEY)?
            .map(|raw| decode_snapshot(&raw))
            .transpose()
    }

    /// Read the saved cart, falling back to an empty cart.
    ///
    /// An invalid snapshot is reported to diagnostics, never to the caller.
    pub fn load(&self) -> Cart {
        match self.try_load() {
            Ok(cart) => {
                let cart = cart.unwrap_or_default();
                tracing::debug!(lines = cart.lines().len(), "Loaded cart snapshot");
                cart
            }
            Err(e) => {
                self.diagnostics.snapshot_discarded(CART_STORAGE_KEY, &e);
                Cart::new()
            }
        }
    }

    /// Write `cart` to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails.
    pub fn save(&self, cart: &Cart) -> Result<(), SnapshotError> {
        let raw = encode_snapshot(cart)?;
        self.storage.set(CART_STORAGE_KEY, &raw)?;
        Ok(())
    }
}

impl<S: KeyValueStorage> CartSubscriber for SnapshotPersister<S> {
    fn cart_changed(&mut self, cart: &Cart) {
        if let Err(e) = self.save(cart) {
            self.diagnostics.snapshot_write_failed(CART_STORAGE_KEY, &e);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::cart::tests::product;
    use crate::cart::{CartStore, LineKey};
    use crate::storage::MemoryStorage;

    #[derive(Default)]
    struct RecordingDiagnostics {
        discarded: Mutex<Vec<String>>,
        write_failures: Mutex<Vec<String>>,
    }

    impl CartDiagnostics for RecordingDiagnostics {
        fn snapshot_discarded(&self, key: &str, error: &SnapshotError) {
            self.discarded
                .lock()
                .unwrap()
                .push(format!("{key}: {error}"));
        }

        fn snapshot_write_failed(&self, key: &str, error: &SnapshotError) {
            self.write_failures
                .lock()
                .unwrap()
                .push(format!("{key}: {error}"));
        }
    }

    /// Storage whose writes always fail.
    struct ReadOnlyStorage;

    impl KeyValueStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey(key.to_owned()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn persister_with(
        storage: &MemoryStorage,
    ) -> (SnapshotPersister<MemoryStorage>, Arc<RecordingDiagnostics>) {
        let diagnostics = Arc::new(RecordingDiagnostics::default());
        let persister = SnapshotPersister::with_diagnostics(
            storage.clone(),
            Arc::clone(&diagnostics) as Arc<dyn CartDiagnostics>,
        );
        (persister, diagnostics)
    }

    #[test]
    fn test_roundtrip_preserves_lines() {
        let mut cart = Cart::new();
        cart.add(product("a", 2499), 2, None, None);
        cart.add(product("a", 2499), 1, Some("Happy Birthday".to_string()), Some(true));
        cart.add(product("b", 4999), 3, None, Some(false));

        let restored = decode_snapshot(&encode_snapshot(&cart).unwrap()).unwrap();

        assert_eq!(restored, cart);
        let keys: Vec<_> = restored.lines().iter().map(CartLine::key).collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(restored.item_count(), 6);
    }

    #[test]
    fn test_snapshot_layout() {
        let mut cart = Cart::new();
        cart.add(product("a", 1000), 2, Some("Hi".to_string()), Some(true));
        cart.add(product("b", 1000), 1, None, None);

        let value: serde_json::Value =
            serde_json::from_str(&encode_snapshot(&cart).unwrap()).unwrap();

        assert_eq!(value[0]["quantity"], 2);
        assert_eq!(value[0]["customMessage"], "Hi");
        assert_eq!(value[0]["giftWrapping"], true);
        assert_eq!(value[0]["product"]["id"], "a");
        assert!(value[1].get("customMessage").is_none());
        assert!(value[1].get("giftWrapping").is_none());
    }

    #[test]
    fn test_decode_rejects_invalid_snapshots() {
        assert!(matches!(
            decode_snapshot("not json"),
            Err(SnapshotError::Malformed(_))
        ));
        assert!(matches!(
            decode_snapshot(r#"{"items": []}"#),
            Err(SnapshotError::Malformed(_))
        ));
        assert!(matches!(
            decode_snapshot(r#"[{"quantity": 1}]"#),
            Err(SnapshotError::Malformed(_))
        ));

        let mut line = serde_json::to_value(CartLine {
            product: product("a", 100),
            quantity: 0,
            custom_message: None,
            gift_wrapping: None,
        })
        .unwrap();
        let zero = serde_json::Value::Array(vec![line.clone()]).to_string();
        assert!(matches!(
            decode_snapshot(&zero),
            Err(SnapshotError::ZeroQuantity { index: 0 })
        ));

        line["quantity"] = 1.into();
        let dup = serde_json::Value::Array(vec![line.clone(), line]).to_string();
        assert!(matches!(
            decode_snapshot(&dup),
            Err(SnapshotError::DuplicateLine { index: 1 })
        ));
    }

    #[test]
    fn test_decode_rejects_negative_price() {
        let mut line = serde_json::to_value(CartLine {
            product: product("a", 100),
            quantity: 2,
            custom_message: None,
            gift_wrapping: None,
        })
        .unwrap();
        line["product"]["price"] = "-10.00".into();
        let raw = serde_json::Value::Array(vec![line]).to_string();

        assert!(matches!(
            decode_snapshot(&raw),
            Err(SnapshotError::NegativePrice { index: 0 })
        ));
    }

    #[test]
    fn test_decode_extreme_price_total_saturates() {
        let mut line = serde_json::to_value(CartLine {
            product: product("a", 100),
            quantity: 2,
            custom_message: None,
            gift_wrapping: Some(true),
        })
        .unwrap();
        line["product"]["price"] = "79228162514264337593543950335".into();
        let raw = serde_json::Value::Array(vec![line]).to_string();

        let cart = decode_snapshot(&raw).unwrap();
        assert_eq!(cart.total_price(), Decimal::MAX);
    }

    #[test]
    fn test_load_negative_price_snapshot_is_empty_and_reported() {
        let storage = MemoryStorage::new();
        let mut cart = Cart::new();
        let mut bad = product("a", 100);
        bad.price = Decimal::new(-1000, 2);
        cart.add(bad, 1, None, None);
        storage
            .set(CART_STORAGE_KEY, &encode_snapshot(&cart).unwrap())
            .unwrap();
        let (persister, diagnostics) = persister_with(&storage);

        assert!(persister.load().is_empty());
        let discarded = diagnostics.discarded.lock().unwrap();
        assert_eq!(discarded.len(), 1);
        assert!(discarded[0].ends_with("line 0 has a negative price"));
    }

    #[test]
    fn test_load_missing_snapshot_is_empty_without_diagnostic() {
        let storage = MemoryStorage::new();
        let (persister, diagnostics) = persister_with(&storage);

        assert!(persister.load().is_empty());
        assert!(diagnostics.discarded.lock().unwrap().is_empty());
    }

    #[test]
    fn test_load_corrupt_snapshot_is_empty_and_reported() {
        let storage = MemoryStorage::new();
        storage.set(CART_STORAGE_KEY, "[{\"product\":").unwrap();
        let (persister, diagnostics) = persister_with(&storage);

        let cart = persister.load();

        assert!(cart.is_empty());
        let discarded = diagnostics.discarded.lock().unwrap();
        assert_eq!(discarded.len(), 1);
        assert!(discarded[0].starts_with("gift-shop-cart: malformed snapshot"));
    }

    #[test]
    fn test_store_writes_after_every_mutation_and_rehydrates() {
        let storage = MemoryStorage::new();
        let (persister, _) = persister_with(&storage);
        let mut store = CartStore::with_persistence(persister);

        store.add(product("a", 1000), 2, None, Some(true));
        let saved = storage.get(CART_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(decode_snapshot(&saved).unwrap().item_count(), 2);

        store.add(product("b", 500), 1, None, None);
        store.update_quantity(&LineKey::new("a").with_gift_wrapping(true), 5);

        let (persister, _) = persister_with(&storage);
        let reopened = CartStore::with_persistence(persister);
        assert_eq!(reopened.cart(), store.cart());
        assert_eq!(reopened.item_count(), 6);

        store.clear();
        assert_eq!(storage.get(CART_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_write_failure_is_reported_not_raised() {
        let diagnostics = Arc::new(RecordingDiagnostics::default());
        let persister = SnapshotPersister::with_diagnostics(
            ReadOnlyStorage,
            Arc::clone(&diagnostics) as Arc<dyn CartDiagnostics>,
        );
        let mut store = CartStore::with_persistence(persister);

        let cart = store.add(product("a", 1000), 1, None, None);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(diagnostics.write_failures.lock().unwrap().len(), 1);
    }
}
