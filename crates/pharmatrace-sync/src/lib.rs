//! Realtime tamper-alert sync for the PharmaTrace store.
//!
//! An external feed may push insert/update/delete notifications for the
//! tamper-alert collection (the only collection wired to external sync).
//! This crate bridges such a feed onto a shared [`SupplyStore`]: a
//! long-lived task drains a channel of [`AlertChange`]s and merges each one
//! into the store keyed by alert id, last write wins.
//!
//! The core never depends on the feed succeeding. Every inbound
//! notification is treated as an untrusted merge operation; failures
//! (poisoned lock, closed feed) are logged and swallowed, leaving the store
//! on its last-known state. Teardown is explicit: [`SyncHandle::shutdown`]
//! stops the task and releases the channel.

use std::sync::{Arc, RwLock};

use pharmatrace_core::{SupplyStore, TamperAlert};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A store shared between the UI thread and the sync task.
pub type SharedStore = Arc<RwLock<SupplyStore>>;

/// Operation carried by a change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOp {
    Insert,
    Update,
    Delete,
}

/// One change notification from the external feed: the operation and the
/// affected alert record. For deletes only the record's id is meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertChange {
    pub op: ChangeOp,
    pub alert: TamperAlert,
}

/// Errors surfaced by the sync bridge.
///
/// Merge failures are not errors: the bridge swallows them by design so the
/// core keeps operating on in-memory state.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The shared store's lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// The sync task panicked or was cancelled before shutting down.
    #[error("sync task did not shut down cleanly: {0}")]
    Shutdown(String),
}

/// Replaces the store's alert collection with an initial snapshot fetched
/// from the external feed, before streaming changes begin.
///
/// # Errors
///
/// Returns [`SyncError::LockPoisoned`] if the store lock is poisoned.
pub fn load_snapshot(store: &SharedStore, alerts: Vec<TamperAlert>) -> Result<(), SyncError> {
    let mut guard = store.write().map_err(|_| SyncError::LockPoisoned)?;
    debug!(count = alerts.len(), "loaded alert snapshot");
    guard.replace_tamper_alerts(alerts);
    Ok(())
}

/// Handle to a running sync task. Dropping the handle leaves the task
/// running until its feed closes; call [`shutdown`](Self::shutdown) for an
/// orderly stop.
#[derive(Debug)]
pub struct SyncHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Stops the sync task and waits for it to finish. The channel receiver
    /// is dropped with the task, unsubscribing from the feed.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Shutdown`] if the task panicked.
    pub async fn shutdown(self) -> Result<(), SyncError> {
        // The task may already have exited on a closed feed.
        let _ = self.stop.send(true);
        self.task
            .await
            .map_err(|err| SyncError::Shutdown(err.to_string()))
    }
}

/// Spawns the sync task draining `changes` into `store`.
///
/// Must be called within a tokio runtime. Each notification is merged by
/// alert id: inserts and updates upsert (last write wins), deletes remove.
/// The task ends when the feed closes or the handle is shut down.
#[must_use]
pub fn spawn_alert_sync(
    store: SharedStore,
    mut changes: mpsc::Receiver<AlertChange>,
) -> SyncHandle {
    let (stop, mut stopped) = watch::channel(false);
    let task = tokio::spawn(async move {
        // Cleared when the handle is dropped without a shutdown call; the
        // task then keeps draining the feed until it closes.
        let mut handle_alive = true;
        loop {
            tokio::select! {
                changed = stopped.changed(), if handle_alive => {
                    if changed.is_ok() {
                        debug!("alert sync shutdown requested");
                        break;
                    }
                    debug!("sync handle dropped; continuing until the feed closes");
                    handle_alive = false;
                }
                notice = changes.recv() => {
                    match notice {
                        Some(change) => apply_change(&store, change),
                        None => {
                            debug!("alert feed closed");
                            break;
                        }
                    }
                }
            }
        }
    });
    SyncHandle { stop, task }
}

fn apply_change(store: &SharedStore, change: AlertChange) {
    let Ok(mut guard) = store.write() else {
        warn!(alert_id = %change.alert.id, "store lock poisoned; dropping alert change");
        return;
    };
    debug!(alert_id = %change.alert.id, op = ?change.op, "merging alert change");
    match change.op {
        ChangeOp::Insert | ChangeOp::Update => guard.merge_alert_upsert(change.alert),
        ChangeOp::Delete => guard.merge_alert_remove(&change.alert.id),
    }
}
