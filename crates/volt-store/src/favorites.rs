//! Favorites store.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::broadcast;
use volt_commerce::{Catalog, Product, ProductId};

use crate::backend::StorageBackend;
use crate::core::{StoreChanged, StoreCore};

/// Persisted, observable set of favorited product ids.
///
/// The catalog is the join table: [`FavoritesStore::favorite_products`] filters
/// it against the id set, so an id whose product left the catalog silently
/// drops out of the derived view.
pub struct FavoritesStore {
    core: StoreCore<HashSet<ProductId>>,
    catalog: Arc<Catalog>,
}

impl FavoritesStore {
    /// Fixed storage key for the serialized id set.
    pub const STORAGE_KEY: &'static str = "favorites.store.bikeIds";

    /// Load the persisted id set (or start empty) and spawn the store's
    /// persistence worker.
    pub async fn open(backend: Arc<dyn StorageBackend>, catalog: Arc<Catalog>) -> Arc<Self> {
        Arc::new(Self {
            core: StoreCore::open(Self::STORAGE_KEY, backend).await,
            catalog,
        })
    }

    /// Mark a product as favorite. Idempotent.
    pub fn add(&self, product_id: &ProductId) -> bool {
        self.core.mutate_if(|ids| ids.insert(product_id.clone()))
    }

    /// Unmark a product. Idempotent.
    pub fn remove(&self, product_id: &ProductId) -> bool {
        self.core.mutate_if(|ids| ids.remove(product_id))
    }

    /// Flip a product's favorite state; returns the new state.
    pub fn toggle(&self, product_id: &ProductId) -> bool {
        self.core.mutate(|ids| {
            if ids.remove(product_id) {
                false
            } else {
                ids.insert(product_id.clone());
                true
            }
        })
    }

    /// Drop all favorites.
    pub fn clear(&self) -> bool {
        self.core.mutate_if(|ids| {
            if ids.is_empty() {
                return false;
            }
            ids.clear();
            true
        })
    }

    /// Membership test.
    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.core.read(|ids| ids.contains(product_id))
    }

    /// Snapshot of the favorited ids.
    pub fn ids(&self) -> HashSet<ProductId> {
        self.core.read(|ids| ids.clone())
    }

    /// Favorited products, in catalog order. Stale ids are skipped.
    pub fn favorite_products(&self) -> Vec<Product> {
        self.core.read(|ids| {
            self.catalog
                .products()
                .iter()
                .filter(|p| ids.contains(&p.id))
                .cloned()
                .collect()
        })
    }

    /// Number of favorited ids.
    pub fn count(&self) -> usize {
        self.core.read(HashSet::len)
    }

    /// Check if nothing is favorited.
    pub fn is_empty(&self) -> bool {
        self.core.read(HashSet::is_empty)
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
