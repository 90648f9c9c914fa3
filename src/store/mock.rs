//! # Mock Store
//!
//! A [`DocumentStore`] for tests that need to script collaborator outcomes.
//! Reads and subscriptions are served by an inner [`MemoryStore`]; every
//! write must have been announced with [`MockStore::expect_write`].

use super::{DocumentStore, MemoryStore, StoreError, StorePath, Subscription};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct Script {
    writes: VecDeque<Result<(), StoreError>>,
    subscribe_error: Option<StoreError>,
    written: Vec<(StorePath, Value)>,
    unexpected: Vec<StorePath>,
}

/// Scripted store.
///
/// # Example
/// ```ignore
/// let store = MockStore::new();
/// store.expect_write().return_err(StoreError::Request("offline".into()));
/// // ... submit a bill, assert it is still there ...
/// store.verify();
/// ```
///
/// A write with no expectation left is refused with
/// `StoreError::Rejected` and recorded, so [`verify`](MockStore::verify)
/// reports it.
#[derive(Clone, Default)]
pub struct MockStore {
    memory: MemoryStore,
    script: Arc<Mutex<Script>>,
}

fn lock(script: &Mutex<Script>) -> MutexGuard<'_, Script> {
    script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve reads from `root`.
    pub fn with_root(root: Value) -> Self {
        Self {
            memory: MemoryStore::with_root(root),
            script: Arc::default(),
        }
    }

    pub fn expect_write(&self) -> WriteExpectation {
        WriteExpectation {
            script: self.script.clone(),
        }
    }

    /// Makes the next `subscribe` call fail.
    pub fn fail_next_subscribe(&self, error: StoreError) {
        lock(&self.script).subscribe_error = Some(error);
    }

    /// Successful writes, in order.
    pub fn writes(&self) -> Vec<(StorePath, Value)> {
        lock(&self.script).written.clone()
    }

    /// Inner tree, for seeding data and inspecting successful writes.
    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Panics if an expected write never happened or an unexpected one did.
    pub fn verify(&self) {
        let script = lock(&self.script);
        if !script.unexpected.is_empty() {
            panic!("Unexpected store writes: {:?}", script.unexpected);
        }
        if !script.writes.is_empty() {
            panic!(
                "Not all store expectations were met. {} remaining",
                script.writes.len()
            );
        }
    }
}

/// Outcome of one expected write.
pub struct WriteExpectation {
    script: Arc<Mutex<Script>>,
}

impl WriteExpectation {
    pub fn return_ok(self) {
        lock(&self.script).writes.push_back(Ok(()));
    }

    pub fn return_err(self, error: StoreError) {
        lock(&self.script).writes.push_back(Err(error));
    }
}

#[async_trait]
impl DocumentStore for MockStore {
    async fn write(&self, path: &StorePath, value: Value) -> Result<(), StoreError> {
        let outcome = {
            let mut script = lock(&self.script);
            match script.writes.pop_front() {
                Some(outcome) => outcome,
                None => {
                    script.unexpected.push(path.clone());
                    return Err(StoreError::Rejected(format!("unexpected write to {}", path)));
                }
            }
        };
        outcome?;
        lock(&self.script).written.push((path.clone(), value.clone()));
        self.memory.write(path, value).await
    }

    async fn read(&self, path: &StorePath) -> Result<Option<Value>, StoreError> {
        self.memory.read(path).await
    }

    async fn subscribe(&self, path: &StorePath) -> Result<Subscription, StoreError> {
        let scripted = lock(&self.script).subscribe_error.take();
        if let Some(error) = scripted {
            return Err(error);
        }
        self.memory.subscribe(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn scripted_outcomes_apply_in_order() {
        let store = MockStore::new();
        store.expect_write().return_err(StoreError::Request("offline".into()));
        store.expect_write().return_ok();

        let path = StorePath::from("accounts/a/bills/1");
        assert!(store.write(&path, json!({"n": 1})).await.is_err());
        assert!(store.write(&path, json!({"n": 2})).await.is_ok());

        assert_eq!(store.writes().len(), 1);
        assert_eq!(store.read(&path).await.unwrap(), Some(json!({"n": 2})));
        store.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected store writes")]
    async fn unscripted_write_fails_verification() {
        let store = MockStore::new();
        let _ = store.write(&"x".into(), json!(1)).await;
        store.verify();
    }
}
