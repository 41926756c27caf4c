//! Error types for the catalog actor.

use crate::model::ItemId;
use thiserror::Error;

/// Errors that can occur during catalog and sale operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The referenced item does not exist.
    #[error("Item not found: {0}")]
    NotFound(ItemId),

    /// The item has no stock left.
    #[error("Item {id} is already sold (remaining {remaining})")]
    AlreadySold { id: ItemId, remaining: u32 },

    /// The item is on sale but cannot cover the requested quantity.
    #[error("Insufficient stock for {id}: requested {requested}, remaining {remaining}")]
    StockInsufficient {
        id: ItemId,
        requested: u32,
        remaining: u32,
    },

    /// Malformed input, rejected before the ledger is touched.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Stock was decremented but the sale record could not be confirmed.
    ///
    /// `rolled_back` tells whether the decrement was undone. When it is `false` the sale
    /// record may or may not exist and the item needs an audit.
    #[error("Durability failure selling {quantity} of {id} (rolled back: {rolled_back}): {reason}")]
    DurabilityFailure {
        id: ItemId,
        quantity: u32,
        rolled_back: bool,
        reason: String,
    },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),

    /// The request reached the catalog but its reply was lost, so it may have been applied.
    #[error("Catalog outcome unknown: {0}")]
    OutcomeUnknown(String),
}

impl CatalogError {
    /// Remaining stock reported by a sale conflict.
    pub fn remaining_stock(&self) -> Option<u32> {
        match self {
            CatalogError::AlreadySold { remaining, .. }
            | CatalogError::StockInsufficient { remaining, .. } => Some(*remaining),
            _ => None,
        }
    }

    /// Business-rule conflict the shopper can act on (retry with less, or give up).
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            CatalogError::AlreadySold { .. } | CatalogError::StockInsufficient { .. }
        )
    }
}

impl CatalogError {
    /// True when a sale may have been committed even though it was not confirmed.
    /// Retrying such a sale can sell the same units twice.
    pub fn is_ambiguous(&self) -> bool {
        matches!(
            self,
            CatalogError::OutcomeUnknown(_)
                | CatalogError::DurabilityFailure {
                    rolled_back: false,
                    ..
                }
        )
    }
}

impl From<String> for CatalogError {
    fn from(msg: String) -> Self {
        CatalogError::ActorCommunicationError(msg)
    }
}
