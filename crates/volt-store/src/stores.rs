//! Application store wiring.

use std::sync::Arc;

use volt_commerce::Catalog;

use crate::backend::StorageBackend;
use crate::cart::CartStore;
use crate::favorites::FavoritesStore;
use crate::orders::OrdersStore;

/// The application's stores, constructed once at startup and handed to
/// whoever needs them.
///
/// Single-instance semantics come from construction, not from globals: open
/// one `Stores` per process and share the `Arc`s.
pub struct Stores {
    /// The fixed product catalog.
    pub catalog: Arc<Catalog>,
    /// Shopping cart.
    pub cart: Arc<CartStore>,
    /// Favorited product ids.
    pub favorites: Arc<FavoritesStore>,
    /// Order history.
    pub orders: Arc<OrdersStore>,
}

impl Stores {
    /// Open all three stores against one backend.
    pub async fn open(backend: Arc<dyn StorageBackend>, catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            cart: CartStore::open(backend.clone()).await,
            favorites: FavoritesStore::open(backend.clone(), catalog.clone()).await,
            orders: OrdersStore::open(backend).await,
            catalog,
        }
    }

    /// Drain every store's queued writes (tests and shutdown).
    pub async fn flush(&self) {
        self.cart.flush().await;
        self.favorites.flush().await;
        self.orders.flush().await;
    }
}
