//! Realtime-database REST protocol: `GET`/`PUT`/`DELETE {base}/{path}.json`.

use super::{DocumentStore, StoreError, StorePath, Subscription};
use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, instrument, warn};

/// Shortest subscription poll interval; shorter ones, including zero, are
/// raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// HTTP-backed [`DocumentStore`].
///
/// The REST protocol has no push channel here, so `subscribe` polls the path
/// every `poll_interval` and publishes a snapshot only when it changed.
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    auth: Option<SecretString>,
    poll_interval: Duration,
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth.as_ref().map(|_| "[REDACTED]"))
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

impl RestStore {
    #[must_use]
    pub fn new(base_url: impl Into<String>, auth: Option<SecretString>, poll_interval: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
            poll_interval: poll_interval.max(MIN_POLL_INTERVAL),
        }
    }

    /// `{base}/{path}.json` with every path segment percent-encoded.
    fn url(&self, path: &StorePath) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| StoreError::Request(e.to_string()))?;
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                StoreError::Request(format!("{} cannot be a base URL", self.base_url))
            })?;
            segments.pop_if_empty();
            match path.segments().split_last() {
                Some((last, parents)) => {
                    segments.extend(parents);
                    segments.push(&format!("{}.json", last));
                }
                None => {
                    segments.push(".json");
                }
            }
        }
        Ok(url)
    }

    fn request(
        &self,
        method: reqwest::Method,
        path: &StorePath,
    ) -> Result<reqwest::RequestBuilder, StoreError> {
        let builder = self.client.request(method, self.url(path)?);
        Ok(match &self.auth {
            Some(token) => builder.query(&[("auth", token.expose_secret())]),
            None => builder,
        })
    }

    async fn fetch(&self, path: &StorePath) -> Result<Option<Value>, StoreError> {
        let response = self
            .request(reqwest::Method::GET, path)?
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| StoreError::Rejected(e.to_string()))?;

        let value: Value = response
            .json()
            .await
            .map_err(|e| StoreError::Response(e.to_string()))?;
        Ok((!value.is_null()).then_some(value))
    }
}

#[async_trait]
impl DocumentStore for RestStore {
    #[instrument(skip(self, value), fields(path = %path))]
    async fn write(&self, path: &StorePath, value: Value) -> Result<(), StoreError> {
        let request = if value.is_null() {
            self.request(reqwest::Method::DELETE, path)?
        } else {
            self.request(reqwest::Method::PUT, path)?.json(&value)
        };

        request
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| StoreError::Rejected(e.to_string()))?;

        debug!("Document written");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %path))]
    async fn read(&self, path: &StorePath) -> Result<Option<Value>, StoreError> {
        self.fetch(path).await
    }

    #[instrument(skip(self), fields(path = %path))]
    async fn subscribe(&self, path: &StorePath) -> Result<Subscription, StoreError> {
        let (sender, subscription) = Subscription::channel();
        let store = self.clone();
        let path = path.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(store.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last: Option<Option<Value>> = None;

            loop {
                ticker.tick().await;
                if sender.is_closed() {
                    break;
                }
                match store.fetch(&path).await {
                    Ok(snapshot) => {
                        if last.as_ref() != Some(&snapshot) {
                            debug!(%path, "Snapshot changed");
                            last = Some(snapshot.clone());
                            sender.send_replace(Some(Ok(snapshot)));
                        }
                    }
                    Err(e) => {
                        warn!(%path, error = %e, "Subscription poll failed");
                        sender.send_replace(Some(Err(e)));
                        break;
                    }
                }
            }
        });

        Ok(subscription.with_task(task))
    }
}
