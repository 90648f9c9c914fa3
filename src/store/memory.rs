//! In-process document tree.

use super::{set_value_at, value_at, DocumentStore, Snapshot, StoreError, StorePath, Subscription};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::debug;

struct Watcher {
    path: StorePath,
    sender: watch::Sender<Option<Snapshot>>,
}

#[derive(Default)]
struct Tree {
    root: Value,
    watchers: Vec<Watcher>,
}

/// A [`DocumentStore`] kept in memory. Clones share the same tree.
///
/// Every write re-publishes the snapshot of each subscribed path it overlaps;
/// subscribers whose [`Subscription`] was dropped are pruned on the way.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tree: Arc<Mutex<Tree>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with `root` as its whole tree.
    pub fn with_root(root: Value) -> Self {
        Self {
            tree: Arc::new(Mutex::new(Tree {
                root,
                watchers: Vec::new(),
            })),
        }
    }

    /// Copy of the whole tree, for assertions.
    pub async fn dump(&self) -> Value {
        self.tree.lock().await.root.clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn write(&self, path: &StorePath, value: Value) -> Result<(), StoreError> {
        let mut tree = self.tree.lock().await;
        set_value_at(&mut tree.root, path, value);
        debug!(%path, "Memory store write");

        let Tree { root, watchers } = &mut *tree;
        watchers.retain(|watcher| !watcher.sender.is_closed());
        for watcher in watchers.iter().filter(|w| w.path.overlaps(path)) {
            let snapshot = value_at(root, &watcher.path).cloned();
            watcher.sender.send_replace(Some(Ok(snapshot)));
        }
        Ok(())
    }

    async fn read(&self, path: &StorePath) -> Result<Option<Value>, StoreError> {
        let tree = self.tree.lock().await;
        Ok(value_at(&tree.root, path).cloned())
    }

    async fn subscribe(&self, path: &StorePath) -> Result<Subscription, StoreError> {
        let mut tree = self.tree.lock().await;
        let (sender, subscription) = Subscription::channel();
        sender.send_replace(Some(Ok(value_at(&tree.root, path).cloned())));
        tree.watchers.push(Watcher {
            path: path.clone(),
            sender,
        });
        debug!(%path, watchers = tree.watchers.len(), "Memory store subscribe");
        Ok(subscription)
    }
}
