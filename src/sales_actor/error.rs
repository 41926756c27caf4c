//! Error types for the sales actor.

use crate::model::SaleId;
use thiserror::Error;

/// Errors that can occur while appending or reading sale records.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SaleError {
    /// The requested record was not found.
    #[error("Sale record not found: {0}")]
    NotFound(SaleId),

    /// The record payload is malformed.
    #[error("Sale record validation error: {0}")]
    Validation(String),

    /// Records are never updated or deleted.
    #[error("Sale record {0} is append-only")]
    AppendOnly(SaleId),

    /// The store could not be reached or its mailbox stayed full; the request was never
    /// delivered.
    #[error("Sale record store unavailable: {0}")]
    Unavailable(String),

    /// The store received the request and refused it.
    #[error("Sale record rejected: {0}")]
    Rejected(String),

    /// The request may or may not have been applied (lost reply, timeout).
    #[error("Sale record outcome unknown: {0}")]
    OutcomeUnknown(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl SaleError {
    /// True when the record definitely was not written.
    pub fn is_definite(&self) -> bool {
        matches!(
            self,
            SaleError::Validation(_) | SaleError::Unavailable(_) | SaleError::Rejected(_)
        )
    }
}

impl From<String> for SaleError {
    fn from(msg: String) -> Self {
        SaleError::ActorCommunicationError(msg)
    }
}
