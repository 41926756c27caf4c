//! # Generic Client
//!
//! The sending half of a resource actor.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// A type-safe handle for sending requests to a [`ResourceActor`](crate::ResourceActor).
///
/// Holds only the channel sender, so cloning is cheap and clones can be handed to
/// any number of concurrent tasks. Each call waits for the actor's reply on a
/// dedicated oneshot channel.
///
/// A failed send yields [`FrameworkError::ActorClosed`]: the actor never saw the
/// request. A reply channel dropped after a successful send yields
/// [`FrameworkError::ActorDropped`], and the request may or may not have been applied.
///
/// Callers that bound the round-trip with a deadline should use
/// [`submit_create`](ResourceClient::submit_create) instead of wrapping a whole call in
/// a timeout: only a reply that is late after delivery is ambiguous.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Delivers a create request, waiting at most `send_within` for mailbox space, and
    /// returns without waiting for the reply.
    ///
    /// # Errors
    /// [`FrameworkError::MailboxFull`] when no slot freed up in time and
    /// [`FrameworkError::ActorClosed`] when the actor is gone. In both cases the request
    /// was never enqueued.
    pub async fn submit_create(
        &self,
        params: T::Create,
        send_within: Duration,
    ) -> Result<PendingReply<T::Id>, FrameworkError> {
        let permit = match tokio::time::timeout(send_within, self.sender.reserve()).await {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) => return Err(FrameworkError::ActorClosed),
            Err(_) => return Err(FrameworkError::MailboxFull),
        };
        let (respond_to, response) = oneshot::channel();
        permit.send(ResourceRequest::Create { params, respond_to });
        Ok(PendingReply { response })
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}

/// A request already sitting in the actor's mailbox.
#[derive(Debug)]
pub struct PendingReply<R> {
    response: oneshot::Receiver<Result<R, FrameworkError>>,
}

impl<R> PendingReply<R> {
    /// Waits for the actor's answer. A dropped reply channel is
    /// [`FrameworkError::ActorDropped`].
    pub async fn wait(self) -> Result<R, FrameworkError> {
        self.response
            .await
            .map_err(|_| FrameworkError::ActorDropped)?
    }
}
