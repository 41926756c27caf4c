//! # Actor Framework
//!
//! Resource-oriented actors on Tokio. Each [`ResourceActor`] owns one collection of
//! entities in a single task and applies requests to it one at a time; a cloneable
//! [`ResourceClient`] sends typed CRUD, `List` and `Action` requests and awaits the reply.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the business rules, written as plain synchronous-looking
//!    hooks over `&mut self`.
//! 2. **Runtime** ([`ResourceActor`]): the message loop, id allocation and structured logging.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed requests and error mapping.
//!
//! ## Concurrency Model
//!
//! - One task per actor; requests are processed sequentially, so a check-then-act inside a
//!   hook cannot race with another request.
//! - Hooks may await other actors through the injected `Context`. The entity stays
//!   exclusively borrowed across those awaits.
//! - Actors run in parallel with each other; there is no shared mutable state.
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Shelf { id: u32, units: u32 }
//!
//! #[derive(Debug)] struct ShelfCreate { units: u32 }
//! #[derive(Debug)] struct ShelfUpdate;
//! #[derive(Debug)] enum ShelfAction { Take(u32) }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("only {0} left")]
//! struct OnlyLeft(u32);
//!
//! #[async_trait]
//! impl ActorEntity for Shelf {
//!     type Id = u32;
//!     type Create = ShelfCreate;
//!     type Update = ShelfUpdate;
//!     type Action = ShelfAction;
//!     type ActionResult = u32;
//!     type Context = ();
//!     type Error = OnlyLeft;
//!
//!     fn from_create_params(id: u32, params: ShelfCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, units: params.units })
//!     }
//!
//!     async fn on_update(&mut self, _: ShelfUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!
//!     async fn handle_action(&mut self, action: ShelfAction, _: &()) -> Result<u32, Self::Error> {
//!         match action {
//!             ShelfAction::Take(n) if n <= self.units => {
//!                 self.units -= n;
//!                 Ok(self.units)
//!             }
//!             ShelfAction::Take(_) => Err(OnlyLeft(self.units)),
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Shelf>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(ShelfCreate { units: 2 }).await.unwrap();
//!     assert_eq!(client.perform_action(id, ShelfAction::Take(2)).await.unwrap(), 0);
//!
//!     let err = client.perform_action(id, ShelfAction::Take(1)).await.unwrap_err();
//!     let OnlyLeft(left) = err.into_entity_error::<OnlyLeft>().unwrap();
//!     assert_eq!(left, 0);
//! }
//! ```
//!
//! ## Testing
//!
//! The [`mock`] module replaces a dependency actor with scripted replies, including
//! failures that are hard to produce with a real actor (closed channel, dropped reply,
//! a reply that never comes).

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::{PendingReply, ResourceClient};
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
