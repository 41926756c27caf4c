//! # Sales Client
//!
//! Appends sale records and serves the reporting reads (history and aggregate).
use crate::model::{SaleHistory, SaleId, SaleRecord, SaleRecordCreate, SalesSummary};
use crate::sales_actor::SaleError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for interacting with the sales actor.
#[derive(Clone)]
pub struct SalesClient {
    inner: ResourceClient<SaleRecord>,
}

impl SalesClient {
    pub fn new(inner: ResourceClient<SaleRecord>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<SaleRecord> for SalesClient {
    type Error = SaleError;

    fn inner(&self) -> &ResourceClient<SaleRecord> {
        &self.inner
    }

    /// Keeps the delivered/not-delivered distinction the commit protocol needs.
    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => SaleError::ActorCommunicationError(id),
            e @ FrameworkError::EntityError(_) => e
                .into_entity_error::<SaleError>()
                .unwrap_or_else(|other| SaleError::Rejected(other.to_string())),
            e if e.is_ambiguous() => SaleError::OutcomeUnknown(e.to_string()),
            e => SaleError::Unavailable(e.to_string()),
        }
    }
}

impl SalesClient {
    /// Appends one record. Never rejects on business grounds.
    #[instrument(skip(self))]
    pub async fn append(&self, record: SaleRecordCreate) -> Result<SaleId, SaleError> {
        debug!("Sending request");
        self.inner.create(record).await.map_err(Self::map_error)
    }

    /// Appends one record with two separate bounds, each `within` long.
    ///
    /// A mailbox that stays full means the record was never delivered, which is
    /// [`SaleError::Unavailable`]. Once delivered, a reply that does not arrive in time is
    /// [`SaleError::OutcomeUnknown`].
    #[instrument(skip(self))]
    pub async fn append_within(
        &self,
        record: SaleRecordCreate,
        within: Duration,
    ) -> Result<SaleId, SaleError> {
        debug!("Sending request");
        let pending = self
            .inner
            .submit_create(record, within)
            .await
            .map_err(Self::map_error)?;
        match tokio::time::timeout(within, pending.wait()).await {
            Ok(result) => result.map_err(Self::map_error),
            Err(_) => Err(SaleError::OutcomeUnknown(format!(
                "no reply within {within:?}"
            ))),
        }
    }

    #[instrument(skip(self))]
    pub async fn record(&self, id: SaleId) -> Result<SaleRecord, SaleError> {
        self.get(id).await?.ok_or(SaleError::NotFound(id))
    }

    /// Every record, newest first.
    #[instrument(skip(self))]
    pub async fn history(&self) -> Result<SaleHistory, SaleError> {
        Ok(SaleHistory::new(self.list().await?))
    }

    /// Transactions, units and revenue over the whole store.
    #[instrument(skip(self))]
    pub async fn summary(&self) -> Result<SalesSummary, SaleError> {
        Ok(self.history().await?.summary())
    }

    /// Attempts a delete so the store can refuse it; records are append-only.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: SaleId) -> Result<(), SaleError> {
        self.delete(id).await
    }
}
