//! Cart persistence.
//!
//! The cart is a JSON array of cart lines under a single storage key. Reads
//! never fail: anything unreadable is treated as an empty cart.

use std::rc::Rc;

use lip_glaze_core::{Cart, Catalog, ProductId};
use tracing::instrument;

use super::Listeners;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Persisted cart plus its subscribers.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    catalog: Rc<Catalog>,
    listeners: Listeners<Cart>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store over `storage` using `key`, resolving products in `catalog`.
    pub fn new(storage: S, key: impl Into<String>, catalog: Rc<Catalog>) -> Self {
        Self {
            storage,
            key: key.into(),
            catalog,
            listeners: Listeners::new(),
        }
    }

    /// Register a view to redraw whenever the cart changes.
    pub fn subscribe(&self, listener: impl Fn(&Cart) + 'static) {
        self.listeners.subscribe(listener);
    }

    /// Current cart. Missing, unreadable or malformed data yields an empty cart.
    #[must_use]
    pub fn get(&self) -> Cart {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::default(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Cart storage unreadable, using empty cart");
                return Cart::default();
            }
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => cart,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Malformed cart data, using empty cart");
                Cart::default()
            }
        }
    }

    /// Overwrite the persisted cart and notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be encoded or stored. Subscribers
    /// are not notified in that case.
    pub fn set(&self, cart: &Cart) -> Result<()> {
        let raw = serde_json::to_string(cart)?;
        self.storage.set(&self.key, &raw)?;
        self.listeners.notify(cart);
        Ok(())
    }

    /// Add one unit of the product with `id`.
    ///
    /// Unknown ids are ignored. Returns whether the cart changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be stored.
    #[instrument(skip(self))]
    pub fn add(&self, id: ProductId) -> Result<bool> {
        let Some(product) = self.catalog.find(id) else {
            tracing::debug!("Ignoring add for unknown product");
            return Ok(false);
        };

        let mut cart = self.get();
        cart.add(product);
        self.set(&cart)?;
        tracing::debug!(items = cart.item_count(), "Added to cart");
        Ok(true)
    }

    /// Set the quantity of the line for `id` (raised to at least one).
    ///
    /// Nothing is stored or notified when the cart has no such line. Returns
    /// whether the cart changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be stored.
    #[instrument(skip(self))]
    pub fn update_quantity(&self, id: ProductId, quantity: u32) -> Result<bool> {
        let mut cart = self.get();
        if !cart.set_quantity(id, quantity) {
            tracing::debug!("Ignoring quantity update for absent line");
            return Ok(false);
        }
        self.set(&cart)?;
        Ok(true)
    }

    /// Remove the line for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be stored.
    #[instrument(skip(self))]
    pub fn remove(&self, id: ProductId) -> Result<()> {
        let mut cart = self.get();
        cart.remove(id);
        self.set(&cart)
    }

    /// Delete the persisted cart entirely (checkout).
    ///
    /// # Errors
    ///
    /// Returns an error if the storage key cannot be deleted.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(&self.key)?;
        tracing::info!(key = %self.key, "Cart cleared");
        self.listeners.notify(&Cart::default());
        Ok(())
    }
}
