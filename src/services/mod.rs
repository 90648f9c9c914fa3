//! # Dashboard Services
//!
//! HTTP collaborators behind the farmer dashboard: weather, currency
//! conversion, and the rotating news/video feeds.
//!
//! Each panel keeps its state in a [`GuardedState`]. Every fetch takes a
//! ticket before it starts; its result is applied only when that ticket is
//! newer than the last one applied, so a slow early response can never
//! overwrite a faster later one.

pub mod currency;
pub mod feeds;
pub mod weather;

use crate::error::ErrorKind;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::debug;

/// Errors that can occur when talking to a dashboard API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    /// HTTP request failed.
    #[error("Service request failed: {0}")]
    Request(String),

    /// Failed to parse response.
    #[error("Service response error: {0}")]
    Response(String),

    /// The API answered with an error status.
    #[error("Service API error: {0}")]
    Api(String),

    /// A device capability (geolocation) is not available.
    #[error("{0} is not supported on this device")]
    Unsupported(&'static str),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Unsupported(_) => ErrorKind::Unsupported,
            _ => ErrorKind::Collaborator,
        }
    }
}

/// `GET url?query` and decode the JSON body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, ServiceError> {
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| ServiceError::Request(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ServiceError::Api(format!("{} returned {}", url, status)));
    }

    response
        .json()
        .await
        .map_err(|e| ServiceError::Response(e.to_string()))
}

/// Ticket handed out when a fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Clone)]
struct Stamped<S> {
    ticket: u64,
    value: S,
}

/// Panel state with a latest-wins guard.
pub struct GuardedState<S> {
    issued: AtomicU64,
    state: watch::Sender<Stamped<S>>,
}

impl<S: Clone + Send + Sync> GuardedState<S> {
    pub fn new(initial: S) -> Self {
        let (state, _) = watch::channel(Stamped {
            ticket: 0,
            value: initial,
        });
        Self {
            issued: AtomicU64::new(0),
            state,
        }
    }

    /// Takes the next ticket. Call before starting a fetch.
    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Applies `value` if `ticket` is newer than the last applied one.
    /// Returns whether it was applied.
    pub fn finish(&self, ticket: Ticket, value: S) -> bool {
        let applied = self.state.send_if_modified(|current| {
            if ticket.0 > current.ticket {
                current.ticket = ticket.0;
                current.value = value;
                true
            } else {
                false
            }
        });
        if !applied {
            debug!(ticket = ticket.0, "Discarding stale response");
        }
        applied
    }

    pub fn get(&self) -> S {
        self.state.borrow().value.clone()
    }
}
