//! Error types for the Bill actor.

use super::BillKind;
use crate::error::ErrorKind;
use crate::order_actor::OrderError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BillError {
    /// Rejected locally; the bill is unchanged.
    #[error("{0}")]
    Validation(String),

    /// The operation does not exist for this kind of bill.
    #[error("{action} is not available on a {kind}")]
    WrongKind { action: &'static str, kind: BillKind },

    /// Store or order book failed; the bill is unchanged.
    #[error("Bill collaborator failure: {0}")]
    Collaborator(String),

    #[error("Bill not found: {0}")]
    NotFound(String),

    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl BillError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BillError::Validation(_) | BillError::WrongKind { .. } => ErrorKind::Validation,
            _ => ErrorKind::Collaborator,
        }
    }
}

impl From<OrderError> for BillError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::Validation(msg) => BillError::Validation(msg),
            OrderError::ActorCommunication(msg) => BillError::ActorCommunication(msg),
            other => BillError::Collaborator(other.to_string()),
        }
    }
}
