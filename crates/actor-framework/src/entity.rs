//! # ActorEntity Trait
//!
//! The contract a resource type implements to be owned by a [`ResourceActor`](crate::ResourceActor).
//!
//! Associated types pin down the id, the DTOs for create/update, the custom action enum
//! and the injected context, so every request is checked at compile time. The lifecycle
//! hooks `on_create` and `on_delete` have default no-op implementations; override them to
//! validate or refuse.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so a handler may await other actors (a catalog item awaiting the sale
/// record store, for instance). The `Context` is handed to `run()` rather than `new()`,
/// so actors can be created first and wired afterwards.
///
/// # Exclusive access
/// Every hook receives the entity while the actor is processing exactly one request.
/// Whatever a hook does to `self`, including across `.await` points, is invisible to other
/// requests until the hook returns. Whatever `self` holds at that point is kept, whether the
/// hook succeeded or failed. A failing hook should leave `self` unchanged unless its error
/// documents a partial effect (a sale whose record may exist keeps its decrement, for
/// instance).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum per entity, shared by every hook.
    ///
    /// Clients recover it from [`FrameworkError::EntityError`](crate::FrameworkError::EntityError)
    /// with [`FrameworkError::into_entity_error`](crate::FrameworkError::into_entity_error).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction and before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the entity is removed. Returning an error keeps it stored.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
