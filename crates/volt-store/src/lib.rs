//! Persisted, observable entity stores for Volt Cycles.
//!
//! Three stores own the application state: [`CartStore`], [`FavoritesStore`],
//! and [`OrdersStore`]. Each one keeps its collection in memory, mirrors it to
//! a [`StorageBackend`] under a fixed key, and broadcasts a payload-free
//! change event after every successful write. Mutations are synchronous;
//! persistence runs on a per-store background worker, so callers never wait
//! on I/O.
//!
//! Stores are constructed explicitly (no globals). [`Stores::open`] is the
//! usual entry point and wires all three against one backend:
//!
//! ```rust,ignore
//! let backend = Arc::new(FileBackend::new("/var/lib/volt"));
//! let stores = Stores::open(backend, Catalog::builtin()).await;
//!
//! stores.cart.add(&bike, 1);
//! let mut events = stores.cart.subscribe();
//! ```

mod backend;
mod cart;
mod core;
mod error;
mod favorites;
mod file;
mod orders;
mod stores;

pub use backend::{MemoryBackend, StorageBackend};
pub use cart::CartStore;
pub use crate::core::StoreChanged;
pub use error::StorageError;
pub use favorites::FavoritesStore;
pub use file::FileBackend;
pub use orders::OrdersStore;
pub use stores::Stores;
