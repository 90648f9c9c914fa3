//! Live catalog: a store subscription turned into normalized products.

use super::normalize::normalize_catalog;
use super::query::CatalogQuery;
use crate::model::Product;
use crate::store::{StoreHandle, StorePath};
use crate::view::Notices;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CatalogState {
    /// No snapshot yet.
    #[default]
    Loading,
    Ready(Vec<Product>),
    /// The subscription failed. The view is blocked until a reload.
    Failed(String),
}

impl CatalogState {
    pub fn products(&self) -> &[Product] {
        match self {
            CatalogState::Ready(products) => products,
            _ => &[],
        }
    }
}

/// Keeps [`CatalogState`] current for one store path.
///
/// Dropping the feed cancels the subscription.
pub struct CatalogFeed {
    store: StoreHandle,
    path: StorePath,
    notices: Notices,
    state: Arc<watch::Sender<CatalogState>>,
    task: JoinHandle<()>,
}

impl CatalogFeed {
    pub fn start(store: StoreHandle, path: StorePath, notices: Notices) -> Self {
        let (state, _) = watch::channel(CatalogState::Loading);
        let state = Arc::new(state);
        let task = tokio::spawn(pump(
            store.clone(),
            path.clone(),
            notices.clone(),
            state.clone(),
        ));
        Self {
            store,
            path,
            notices,
            state,
            task,
        }
    }

    pub fn state(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    /// Waits for the first state other than `Loading`.
    pub async fn settled(&self) -> CatalogState {
        let mut receiver = self.state.subscribe();
        let settled = match receiver
            .wait_for(|state| !matches!(state, CatalogState::Loading))
            .await
        {
            Ok(state) => state.clone(),
            Err(_) => CatalogState::Failed("catalog feed closed".to_string()),
        };
        settled
    }

    pub fn is_blocked(&self) -> bool {
        matches!(*self.state.borrow(), CatalogState::Failed(_))
    }

    /// Visible products for `query` over the current snapshot.
    pub fn visible(&self, query: &CatalogQuery) -> Vec<Product> {
        query.visible(self.state.borrow().products())
    }

    /// Manual reload: drop the current subscription and subscribe again.
    pub fn reload(&mut self) {
        info!(path = %self.path, "Reloading catalog");
        self.task.abort();
        self.state.send_replace(CatalogState::Loading);
        self.task = tokio::spawn(pump(
            self.store.clone(),
            self.path.clone(),
            self.notices.clone(),
            self.state.clone(),
        ));
    }
}

impl Drop for CatalogFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn pump(
    store: StoreHandle,
    path: StorePath,
    notices: Notices,
    state: Arc<watch::Sender<CatalogState>>,
) {
    let mut subscription = match store.subscribe(&path).await {
        Ok(subscription) => subscription,
        Err(e) => {
            warn!(%path, error = %e, "Catalog subscription failed");
            notices.error(format!("Failed to load products: {}", e));
            state.send_replace(CatalogState::Failed(e.to_string()));
            return;
        }
    };

    while let Some(snapshot) = subscription.next().await {
        match snapshot {
            Ok(value) => {
                let products = normalize_catalog(value.as_ref());
                if products.is_empty() {
                    notices.warning("No products found in the catalog");
                }
                info!(%path, count = products.len(), "Catalog snapshot");
                state.send_replace(CatalogState::Ready(products));
            }
            Err(e) => {
                warn!(%path, error = %e, "Catalog subscription failed");
                notices.error(format!("Failed to load products: {}", e));
                state.send_replace(CatalogState::Failed(e.to_string()));
                return;
            }
        }
    }
}
