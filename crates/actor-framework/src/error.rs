//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself, plus the boxed wrapper that carries an
//! entity's own error type back across the channel.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    /// The request never reached the actor: its channel is closed.
    #[error("Actor closed")]
    ActorClosed,
    /// The request was delivered but the reply channel was dropped before answering.
    #[error("Actor dropped response channel")]
    ActorDropped,
    /// The actor's mailbox stayed full for the caller's whole send window; nothing was enqueued.
    #[error("Actor mailbox full")]
    MailboxFull,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's typed error from an [`FrameworkError::EntityError`].
    ///
    /// Returns `Err(self)` unchanged when this is a plumbing error or when the boxed
    /// error is of a different type.
    pub fn into_entity_error<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(boxed) => boxed
                .downcast::<E>()
                .map(|e| *e)
                .map_err(FrameworkError::EntityError),
            other => Err(other),
        }
    }

    /// True when the actor may have processed the request even though no reply arrived.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, FrameworkError::ActorDropped)
    }
}
