//! # Document Store
//!
//! The realtime document store is an external collaborator: a JSON tree
//! addressed by slash-separated paths, with keyed `read`, `write` and a
//! `subscribe` that always yields the latest full snapshot of a path.
//!
//! Implementations:
//! - [`MemoryStore`]: in-process tree, used by the demo and the tests
//! - [`RestStore`]: realtime-database REST protocol over `reqwest`
//! - [`mock::MockStore`]: scripted write outcomes for failure tests

mod memory;
pub mod mock;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use crate::error::ErrorKind;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Shared handle injected into actors and feeds.
pub type StoreHandle = Arc<dyn DocumentStore>;

/// One delivery of a subscription: the value at the path (`None` when the
/// path holds nothing), or the error that ended the subscription.
pub type Snapshot = Result<Option<Value>, StoreError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Store request failed: {0}")]
    Request(String),

    #[error("Store response error: {0}")]
    Response(String),

    #[error("Store rejected the operation: {0}")]
    Rejected(String),

    #[error("Store subscription closed")]
    Closed,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Collaborator
    }
}

/// Slash-separated location in the document tree. Empty segments are dropped,
/// so `"/products/"` and `"products"` are the same path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StorePath {
    segments: Vec<String>,
}

impl StorePath {
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn root() -> Self {
        Self::default()
    }

    /// Where the catalog lives.
    pub fn products() -> Self {
        Self::parse("products")
    }

    /// `accounts/{account_id}/bills/{timestamp}`
    pub fn bill(account_id: &str, timestamp: i64) -> Self {
        Self::parse("accounts")
            .child(account_id)
            .child("bills")
            .child(&timestamp.to_string())
    }

    /// `accounts/{account_id}/orders/{order_id}`
    pub fn order(account_id: &str, order_id: u32) -> Self {
        Self::parse("accounts")
            .child(account_id)
            .child("orders")
            .child(&order_id.to_string())
    }

    pub fn child(mut self, segment: &str) -> Self {
        self.segments
            .extend(segment.split('/').filter(|s| !s.is_empty()).map(str::to_string));
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when one path is a prefix of the other, i.e. a write to one can
    /// change the snapshot of the other.
    pub fn overlaps(&self, other: &StorePath) -> bool {
        self.segments
            .iter()
            .zip(other.segments.iter())
            .all(|(a, b)| a == b)
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl From<&str> for StorePath {
    fn from(path: &str) -> Self {
        StorePath::parse(path)
    }
}

/// Keyed JSON document interface of the realtime store.
///
/// Last write wins. A write either completes or fails; there is no partial
/// cancellation.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Replaces the value at `path`. Writing `Value::Null` deletes it.
    async fn write(&self, path: &StorePath, value: Value) -> Result<(), StoreError>;

    async fn read(&self, path: &StorePath) -> Result<Option<Value>, StoreError>;

    /// Latest-snapshot stream for `path`. The first snapshot is the current
    /// value. Dropping the [`Subscription`] cancels it.
    async fn subscribe(&self, path: &StorePath) -> Result<Subscription, StoreError>;
}

/// Receiving end of a store subscription.
///
/// Backed by a `watch` channel: a slow reader skips intermediate snapshots and
/// only ever sees the newest one.
pub struct Subscription {
    receiver: watch::Receiver<Option<Snapshot>>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Creates the sending half and a subscription reading from it.
    pub fn channel() -> (watch::Sender<Option<Snapshot>>, Self) {
        let (sender, receiver) = watch::channel(None);
        (
            sender,
            Self {
                receiver,
                task: None,
            },
        )
    }

    /// Ties a producer task to this subscription; it is aborted on drop.
    pub fn with_task(mut self, task: JoinHandle<()>) -> Self {
        self.task = Some(task);
        self
    }

    /// Waits for the next snapshot. `None` once the producer is gone.
    pub async fn next(&mut self) -> Option<Snapshot> {
        loop {
            self.receiver.changed().await.ok()?;
            if let Some(snapshot) = self.receiver.borrow_and_update().clone() {
                return Some(snapshot);
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Value at `path` inside `root`, if any.
pub(crate) fn value_at<'a>(root: &'a Value, path: &StorePath) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(root, |node, segment| node.get(segment))
        .filter(|value| !value.is_null())
}

/// Writes `value` at `path`, creating intermediate objects. A `Null` value
/// removes the key.
pub(crate) fn set_value_at(root: &mut Value, path: &StorePath, value: Value) {
    let Some((last, parents)) = path.segments().split_last() else {
        *root = value;
        return;
    };
    let mut node = root;
    for segment in parents {
        if !node.is_object() {
            *node = Value::Object(Default::default());
        }
        let Value::Object(map) = node else { return };
        node = map
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Default::default()));
    }
    if !node.is_object() {
        *node = Value::Object(Default::default());
    }
    if let Value::Object(map) = node {
        if value.is_null() {
            map.remove(last);
        } else {
            map.insert(last.clone(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paths_normalize_and_build() {
        assert_eq!(StorePath::parse("/products/"), StorePath::products());
        assert_eq!(
            StorePath::bill("farmer123", 42).to_string(),
            "accounts/farmer123/bills/42"
        );
        assert_eq!(StorePath::order("c1", 7).to_string(), "accounts/c1/orders/7");
        assert!(StorePath::root().is_root());
    }

    #[test]
    fn overlap_is_prefix_in_either_direction() {
        let products = StorePath::products();
        assert!(products.overlaps(&"products/p1".into()));
        assert!(StorePath::from("products/p1").overlaps(&products));
        assert!(StorePath::root().overlaps(&products));
        assert!(!products.overlaps(&"accounts".into()));
    }

    #[test]
    fn tree_set_and_get() {
        let mut root = Value::Null;
        set_value_at(&mut root, &"accounts/a/bills/1".into(), json!({"x": 1}));
        assert_eq!(
            value_at(&root, &"accounts/a/bills/1/x".into()),
            Some(&json!(1))
        );
        set_value_at(&mut root, &"accounts/a/bills/1".into(), Value::Null);
        assert_eq!(value_at(&root, &"accounts/a/bills/1".into()), None);
        assert_eq!(value_at(&root, &"nowhere".into()), None);
    }
}
