//! Error types for the Order actor.

use crate::error::ErrorKind;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The order has no items.
    #[error("{0}")]
    Validation(String),

    /// The order could not be persisted.
    #[error("Order could not be saved: {0}")]
    Collaborator(String),

    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::Validation(_) => ErrorKind::Validation,
            _ => ErrorKind::Collaborator,
        }
    }
}
