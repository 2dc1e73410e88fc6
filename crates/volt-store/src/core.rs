//! Generic persisted-store core.
//!
//! [`StoreCore`] implements the pattern shared by all three stores: an
//! in-memory collection behind a lock, a fixed storage key, a background
//! worker that mirrors every mutation to the backend, and a broadcast channel
//! that announces each successful write.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::backend::StorageBackend;

/// Payload-free change event. Observers re-read the store; there is no diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreChanged;

/// Capacity of the change-event channel. Slow observers that fall further
/// behind than this see a lag error on their receiver and simply re-read.
const EVENT_CAPACITY: usize = 16;

enum PersistJob {
    Write(Vec<u8>),
    Flush(oneshot::Sender<()>),
}

/// Shared core of a persisted store.
///
/// Mutations update the in-memory collection synchronously and queue a JSON
/// snapshot onto the store's worker. The worker writes snapshots strictly in
/// order and broadcasts [`StoreChanged`] after each successful write; a failed
/// write is logged and dropped (best-effort persistence, the in-memory state
/// stays authoritative).
pub(crate) struct StoreCore<T> {
    key: &'static str,
    state: RwLock<T>,
    jobs: mpsc::UnboundedSender<PersistJob>,
    events: broadcast::Sender<StoreChanged>,
}

impl<T> StoreCore<T>
where
    T: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static,
{
    /// Load the persisted collection (absent or malformed data yields the
    /// default) and spawn the store's persistence worker.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) async fn open(key: &'static str, backend: Arc<dyn StorageBackend>) -> Self {
        let state = match backend.read(key).await {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(key, %err, "discarding malformed persisted data");
                    T::default()
                }
            },
            Ok(None) => T::default(),
            Err(err) => {
                tracing::warn!(key, %err, "failed to read persisted data");
                T::default()
            }
        };

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (jobs, rx) = mpsc::unbounded_channel();
        tokio::spawn(persist_loop(key, backend, rx, events.clone()));

        Self {
            key,
            state: RwLock::new(state),
            jobs,
            events,
        }
    }

    /// Read through the current in-memory collection.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.read())
    }

    /// Apply a mutation and queue a save.
    pub(crate) fn mutate<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let (out, snapshot) = {
            let mut state = self.state.write();
            let out = f(&mut state);
            (out, state.clone())
        };
        self.queue_save(snapshot);
        out
    }

    /// Apply a mutation that reports whether anything changed; a save is
    /// queued only when it did.
    pub(crate) fn mutate_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let (changed, snapshot) = {
            let mut state = self.state.write();
            let changed = f(&mut state);
            (changed, changed.then(|| state.clone()))
        };
        if let Some(snapshot) = snapshot {
            self.queue_save(snapshot);
        }
        changed
    }

    /// Subscribe to change events.
    pub(crate) fn subscribe(&self) -> broadcast::Receiver<StoreChanged> {
        self.events.subscribe()
    }

    /// Wait until every queued write has been handed to the backend.
    pub(crate) async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.jobs.send(PersistJob::Flush(tx)).is_ok() {
            let _ = rx.await;
        }
    }

    fn queue_save(&self, snapshot: T) {
        match serde_json::to_vec_pretty(&snapshot) {
            Ok(bytes) => {
                // The worker outlives every sender, so this only fails during
                // teardown, when dropping the write is the right call anyway.
                let _ = self.jobs.send(PersistJob::Write(bytes));
            }
            Err(err) => {
                tracing::warn!(key = self.key, %err, "failed to serialize store snapshot");
            }
        }
    }
}

async fn persist_loop(
    key: &'static str,
    backend: Arc<dyn StorageBackend>,
    mut jobs: mpsc::UnboundedReceiver<PersistJob>,
    events: broadcast::Sender<StoreChanged>,
) {
    while let Some(job) = jobs.recv().await {
        match job {
            PersistJob::Write(bytes) => match backend.write(key, bytes).await {
                Ok(()) => {
                    tracing::debug!(key, "store snapshot persisted");
                    let _ = events.send(StoreChanged);
                }
                Err(err) => {
                    tracing::warn!(key, %err, "dropping failed store write");
                }
            },
            PersistJob::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}
