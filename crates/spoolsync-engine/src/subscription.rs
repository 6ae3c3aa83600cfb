//! Snapshot subscription channels
//!
//! Models the cloud live-query: every push delivers the complete current
//! record set for a category. There are no delta semantics; a snapshot
//! fully replaces its predecessor.

use tokio::sync::mpsc;

/// Sending half of a snapshot subscription
#[derive(Debug, Clone)]
pub struct SnapshotSender<R> {
    tx: mpsc::UnboundedSender<Vec<R>>,
}

impl<R> SnapshotSender<R> {
    /// Publish a complete replacement snapshot
    ///
    /// Returns `false` when the subscriber is gone.
    pub fn publish(&self, records: Vec<R>) -> bool {
        self.tx.send(records).is_ok()
    }
}

/// Receiving half of a snapshot subscription
#[derive(Debug)]
pub struct ProfileSubscription<R> {
    rx: mpsc::UnboundedReceiver<Vec<R>>,
}

impl<R> ProfileSubscription<R> {
    /// Receive the next snapshot; `None` when the sender is gone
    pub async fn recv(&mut self) -> Option<Vec<R>> {
        self.rx.recv().await
    }
}

/// Create a subscription channel for one record category
pub fn channel<R>() -> (SnapshotSender<R>, ProfileSubscription<R>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SnapshotSender { tx }, ProfileSubscription { rx })
}
