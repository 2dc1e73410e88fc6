//! Cart store.

use std::sync::Arc;

use tokio::sync::broadcast;
use volt_commerce::{Cart, CartLine, Money, Product, ProductId};

use crate::backend::StorageBackend;
use crate::core::{StoreChanged, StoreCore};

/// Persisted, observable shopping cart.
///
/// Mutations are synchronous and visible to readers the moment they return;
/// the serialized cart follows on the store's background worker.
pub struct CartStore {
    core: StoreCore<Cart>,
}

impl CartStore {
    /// Fixed storage key for the serialized cart lines.
    pub const STORAGE_KEY: &'static str = "cart.store.items";

    /// Load the persisted cart (or start empty) and spawn the store's
    /// persistence worker.
    pub async fn open(backend: Arc<dyn StorageBackend>) -> Arc<Self> {
        Arc::new(Self {
            core: StoreCore::open(Self::STORAGE_KEY, backend).await,
        })
    }

    /// Add a product, merging into the existing line for the same product id.
    pub fn add(&self, product: &Product, quantity: i64) -> bool {
        self.core.mutate_if(|cart| cart.add(product, quantity))
    }

    /// Remove the line holding a product.
    pub fn remove(&self, product_id: &ProductId) -> bool {
        self.core.mutate_if(|cart| cart.remove(product_id))
    }

    /// Set a line's quantity; <= 0 removes the line.
    pub fn set_quantity(&self, product_id: &ProductId, quantity: i64) -> bool {
        self.core
            .mutate_if(|cart| cart.set_quantity(product_id, quantity))
    }

    /// Empty the cart.
    pub fn clear(&self) -> bool {
        self.core.mutate_if(Cart::clear)
    }

    /// Quantity held for a product, 0 if absent.
    pub fn quantity(&self, product_id: &ProductId) -> i64 {
        self.core.read(|cart| cart.quantity(product_id))
    }

    /// Snapshot of the current lines, in insertion order.
    pub fn lines(&self) -> Vec<CartLine> {
        self.core.read(|cart| cart.lines().to_vec())
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.core.read(Cart::is_empty)
    }

    /// Total unit count across all lines.
    pub fn item_count(&self) -> i64 {
        self.core.read(Cart::item_count)
    }

    /// Derived cart total, recomputed on every call.
    pub fn total_price(&self) -> Money {
        self.core.read(Cart::total_price)
    }

    /// Subscribe to change events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChanged> {
        self.core.subscribe()
    }

    /// Wait for queued writes to drain (tests and shutdown).
    pub async fn flush(&self) {
        self.core.flush().await;
    }
}
