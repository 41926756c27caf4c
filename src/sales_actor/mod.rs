//! # Sales Actor
//!
//! The append-only sale record store. One [`SaleRecord`] is appended per committed sale;
//! reporting reads fold over the stored records.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`SaleRecord`]
//! - [`error`] - [`SaleError`], including the definite/ambiguous split the commit
//!   protocol relies on
//! - [`new()`] - Factory function that creates the actor and client
//!
//! Records are not serialized against each other beyond the actor's natural ordering;
//! completeness is what matters, not order.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::SalesClient;
use crate::model::SaleRecord;
use actor_framework::ResourceActor;

/// Sale records have no custom actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleRecordAction {}

/// Creates a new sales actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<SaleRecord>, SalesClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, SalesClient::new(generic_client))
}
