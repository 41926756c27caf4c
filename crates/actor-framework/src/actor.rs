//! # Generic Actor Server
//!
//! The `ResourceActor` owns a collection of entities and processes requests for it one at
//! a time. Sequential processing is what linearizes state changes: two requests against
//! the same entity can never interleave, so a read-check-write inside a hook is atomic.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This is the server half: it owns the `store` and the receiving end of the channel.
/// No `Mutex` guards the store because only this task ever touches it.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new(buffer)` returns the actor and a client.
/// 2. **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3. **Run**: spawn the run loop on Tokio; drop every client to stop it.
///
/// # Operations
///
/// * **Create**: allocates the next `u32` id, builds the entity with
///   `from_create_params`, runs `on_create`, then stores it.
/// * **Get** / **List**: clone out of the store.
/// * **Update**: runs `on_update` against the stored entity in place.
/// * **Delete**: runs `on_delete`; the entity is removed only if the hook agrees.
/// * **Action**: runs `handle_action` against the stored entity in place.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mpsc capacity; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// `context` is lent to every hook for the lifetime of the loop.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = entity_type::<T>();
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    reply(respond_to, self.create(params, &context).await);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    reply(respond_to, Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    reply(respond_to, Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    reply(respond_to, self.update(id, update, &context).await);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    reply(respond_to, self.delete(id, &context).await);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    reply(respond_to, self.action(id, action, &context).await);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// The id is only consumed when the entity is actually stored.
    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let entity_type = entity_type::<T>();
        let id = T::Id::from(self.next_id);

        let mut item = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(entity_type, error = %e, "Create failed");
            entity_error(e)
        })?;
        item.on_create(context).await.map_err(|e| {
            warn!(entity_type, error = %e, "on_create failed");
            entity_error(e)
        })?;

        self.next_id += 1;
        self.store.insert(id.clone(), item);
        info!(entity_type, %id, size = self.store.len(), "Created");
        Ok(id)
    }

    async fn update(
        &mut self,
        id: T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let entity_type = entity_type::<T>();
        let item = self.store.get_mut(&id).ok_or_else(|| not_found::<T>(&id))?;
        item.on_update(update, context).await.map_err(|e| {
            warn!(entity_type, %id, error = %e, "Update failed");
            entity_error(e)
        })?;
        info!(entity_type, %id, "Updated");
        Ok(item.clone())
    }

    async fn delete(&mut self, id: T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        let entity_type = entity_type::<T>();
        let item = self.store.get(&id).ok_or_else(|| not_found::<T>(&id))?;
        item.on_delete(context).await.map_err(|e| {
            warn!(entity_type, %id, error = %e, "on_delete refused");
            entity_error(e)
        })?;
        self.store.remove(&id);
        info!(entity_type, %id, size = self.store.len(), "Deleted");
        Ok(())
    }

    async fn action(
        &mut self,
        id: T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let entity_type = entity_type::<T>();
        let item = self.store.get_mut(&id).ok_or_else(|| not_found::<T>(&id))?;
        match item.handle_action(action, context).await {
            Ok(result) => {
                info!(entity_type, %id, "Action ok");
                Ok(result)
            }
            Err(e) => {
                warn!(entity_type, %id, error = %e, "Action failed");
                Err(entity_error(e))
            }
        }
    }
}

/// Short type name used as the `entity_type` log field.
fn entity_type<T>() -> &'static str {
    std::any::type_name::<T>()
        .rsplit("::")
        .next()
        .unwrap_or("Unknown")
}

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}

fn not_found<T: ActorEntity>(id: &T::Id) -> FrameworkError {
    warn!(entity_type = entity_type::<T>(), %id, "Not found");
    FrameworkError::NotFound(id.to_string())
}

/// A caller that gave up waiting has dropped its receiver; nothing to do then.
fn reply<R>(respond_to: Response<R>, result: Result<R, FrameworkError>) {
    let _ = respond_to.send(result);
}
