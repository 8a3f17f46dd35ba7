//! Owned cart state container with change subscribers.

use giftshop_core::Product;
use rust_decimal::Decimal;

use super::{Cart, LineKey, SnapshotPersister};
use crate::storage::KeyValueStorage;

/// Receives the new cart state after every mutation.
pub trait CartSubscriber: Send {
    fn cart_changed(&mut self, cart: &Cart);
}

impl<F> CartSubscriber for F
where
    F: FnMut(&Cart) + Send,
{
    fn cart_changed(&mut self, cart: &Cart) {
        self(cart);
    }
}

/// The cart store: owns the cart and fans out changes to subscribers.
///
/// Lifecycle is `init -> mutate* -> teardown`. Every mutating call notifies
/// subscribers with the resulting state, whether or not anything changed,
/// and returns that state to the caller.
#[derive(Default)]
pub struct CartStore {
    cart: Cart,
    subscribers: Vec<Box<dyn CartSubscriber>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl CartStore {
    /// Create a store holding `cart`, with no subscribers.
    #[must_use]
    pub fn new(cart: Cart) -> Self {
        Self {
            cart,
            subscribers: Vec::new(),
        }
    }

    /// Hydrate a store from a saved snapshot and keep the snapshot current.
    ///
    /// A missing or unreadable snapshot yields an empty cart.
    #[must_use]
    pub fn with_persistence<S>(persister: SnapshotPersister<S>) -> Self
    where
        S: KeyValueStorage + 'static,
    {
        let mut store = Self::new(persister.load());
        store.subscribe(persister);
        store
    }

    /// Register a subscriber for subsequent mutations.
    pub fn subscribe(&mut self, subscriber: impl CartSubscriber + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Current cart state.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn add(
        &mut self,
        product: Product,
        quantity: u32,
        custom_message: Option<String>,
        gift_wrapping: Option<bool>,
    ) -> &Cart {
        self.cart.add(product, quantity, custom_message, gift_wrapping);
        self.publish()
    }

    pub fn remove(&mut self, key: &LineKey) -> &Cart {
        self.cart.remove(key);
        self.publish()
    }

    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> &Cart {
        self.cart.update_quantity(key, quantity);
        self.publish()
    }

    pub fn clear(&mut self) -> &Cart {
        self.cart.clear();
        self.publish()
    }

    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.cart.total_price()
    }

    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Detach all subscribers and hand back the final cart.
    #[must_use]
    pub fn teardown(self) -> Cart {
        self.cart
    }

    fn publish(&mut self) -> &Cart {
        for subscriber in &mut self.subscribers {
            subscriber.cart_changed(&self.cart);
        }
        &self.cart
    }
}
