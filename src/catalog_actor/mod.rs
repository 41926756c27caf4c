//! # Catalog Actor
//!
//! The stock ledger: one actor owns every [`CatalogItem`] and applies requests to them one
//! at a time, which linearizes concurrent sales of the same item. The sale commit protocol
//! runs inside that actor as the [`CatalogAction::Sell`] action.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation and commit protocol
//! - [`ledger`] - stock rules (`decrement`, `restore`, `set_stock`) and input validation
//! - [`error`] - [`CatalogError`], with remaining stock on every conflict
//! - [`actions`] - [`CatalogAction`] / [`CatalogActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use stockroom::catalog_actor::{self, CommitContext};
//! use stockroom::model::CatalogItemCreate;
//! use stockroom::sales_actor;
//! use rust_decimal::Decimal;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (sales_actor, sales) = sales_actor::new(32);
//!     let (catalog_actor, catalog) = catalog_actor::new(32);
//!
//!     tokio::spawn(sales_actor.run(()));
//!     tokio::spawn(catalog_actor.run(CommitContext::new(sales, Duration::from_secs(2))));
//!
//!     let id = catalog
//!         .create_item(CatalogItemCreate::unique("Oak chest", Decimal::new(450, 0)))
//!         .await?;
//!     let receipt = catalog.sell(id, 1).await?;
//!     assert!(receipt.item.is_sold());
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;
pub mod ledger;

pub use actions::*;
pub use error::*;
pub use ledger::validate_quantity;

use crate::clients::{CatalogClient, SalesClient};
use crate::model::CatalogItem;
use actor_framework::ResourceActor;
use std::time::Duration;

/// Dependencies injected into the catalog actor at `run()`.
#[derive(Clone)]
pub struct CommitContext {
    /// Where committed sales are recorded.
    pub sales: SalesClient,
    /// Bounds every wait on the sale record store. A record delivered but not answered
    /// within it has an unknown outcome.
    pub append_timeout: Duration,
}

impl CommitContext {
    pub fn new(sales: SalesClient, append_timeout: Duration) -> Self {
        Self {
            sales,
            append_timeout,
        }
    }
}

/// Creates a new catalog actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<CatalogItem>, CatalogClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CatalogClient::new(generic_client))
}
