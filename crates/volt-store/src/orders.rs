//! Orders store.

use std::sync::Arc;

use tokio::sync::broadcast;
use volt_commerce::{CartLine, Order, OrderId, OrderStatus};

use crate::backend::StorageBackend;
use crate::core::{StoreChanged, StoreCore};

/// Persisted, observable order history.
///
/// Orders are appended by [`OrdersStore::place_order`] and never rewritten
/// afterwards except for their status. The line list passed in is taken as
/// given; the checkout coordinator is responsible for handing over the lines
/// it captured when the flow started.
pub struct OrdersStore {
    core: StoreCore<Vec<Order>>,
}

impl OrdersStore {
    /// Fixed storage key for the serialized order list.
    pub const STORAGE_KEY: &'static str = "orders.store.items";

    /// Load the persisted orders (or start empty) and spawn the store's
    /// persistence worker.
    pub async fn open(backend: Arc<dyn StorageBackend>) -> Arc<Self> {
        Arc::new(Self {
            core: StoreCore::open(Self::STORAGE_KEY, backend).await,
        })
    }

    /// Build an order snapshot from the given lines, append it, and return it.
    pub fn place_order(&self, lines: &[CartLine]) -> Order {
        let order = Order::from_cart_lines(lines);
        self.core.mutate(|orders| orders.push(order.clone()));
        order
    }

    /// Append an existing order.
    pub fn add(&self, order: Order) {
        self.core.mutate(|orders| orders.push(order));
    }

    /// Update an order's status. Unknown ids are a no-op.
    pub fn update_status(&self, order_id: &OrderId, status: OrderStatus) -> bool {
        self.core.mutate_if(|orders| {
            match orders
                .iter_mut()
                .find(|o| &o.id == order_id)
                .filter(|o| o.status != status)
            {
                Some(order) => {
                    order.set_status(status);
                    true
                }
                None => false,
            }
        })
    }

    /// Cancel an order: sugar for updating its status to `Cancelled`.
    pub fn cancel(&self, order_id: &OrderId) -> bool {
        self.update_status(order_id, OrderStatus::Cancelled)
    }

    /// Delete an order outright.
    pub fn remove(&self, order_id: &OrderId) -> bool {
        self.core.mutate_if(|orders| {
            let before = orders.len();
            orders.retain(|o| &o.id != order_id);
            orders.len() < before
        })
    }

    /// Delete the whole history.
    pub fn clear(&self) -> bool {
        self.core.mutate_if(|orders| {
            if orders.is_empty() {
                return false;
            }
            orders.clear();
            true
        })
    }

    /// Look up an order by id.
    pub fn order(&self, order_id: &OrderId) -> Option<Order> {
        self.core
            .read(|orders| orders.iter().find(|o| &o.id == order_id).cloned())
    }

    /// All orders, in placement order.
    pub fn all(&self) -> Vec<Order> {
        self.core.read(|orders| orders.clone())
    }

    /// Orders sorted by placement time, newest first. The sort is stable, so
    /// equal timestamps keep their insertion order.
    pub fn recent_orders(&self) -> Vec<Order> {
        let mut orders = self.all();
        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        orders
    }

    /// Number of orders.
    pub fn count(&self) -> usize {
        self.core.read(Vec::len)
    }

    /// Check if the history is empty.
    pub fn is_empty(&self) -> bool {
        self.core.read(Vec::is_empty)
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
