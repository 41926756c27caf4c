//! # Catalog Client
//!
//! High-level API for the catalog actor: item administration, stock reads and the
//! sale commit. Input is validated here before anything reaches the actor.
use crate::audit::AuditReport;
use crate::catalog_actor::{
    validate_quantity, CatalogAction, CatalogActionResult, CatalogError, SaleReceipt,
};
use crate::model::{CatalogItem, CatalogItemCreate, CatalogItemUpdate, ItemId};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<CatalogItem>,
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<CatalogItem>) -> Self {
        Self { inner }
    }

    /// Like [`ActorClient::map_error`], but a missing entity becomes a typed `NotFound`.
    fn map_item_error(id: ItemId) -> impl Fn(FrameworkError) -> CatalogError {
        move |e| match e {
            FrameworkError::NotFound(_) => CatalogError::NotFound(id),
            other => Self::map_error(other),
        }
    }
}

#[async_trait]
impl ActorClient<CatalogItem> for CatalogClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<CatalogItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            e @ FrameworkError::EntityError(_) => e
                .into_entity_error::<CatalogError>()
                .unwrap_or_else(|other| CatalogError::ActorCommunicationError(other.to_string())),
            e if e.is_ambiguous() => CatalogError::OutcomeUnknown(e.to_string()),
            other => CatalogError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CatalogClient {
    #[instrument(skip(self))]
    pub async fn create_item(&self, params: CatalogItemCreate) -> Result<ItemId, CatalogError> {
        params.validate()?;
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Fetches one item, failing with `NotFound` when it does not exist.
    #[instrument(skip(self))]
    pub async fn item(&self, id: ItemId) -> Result<CatalogItem, CatalogError> {
        self.get(id).await?.ok_or(CatalogError::NotFound(id))
    }

    /// Every item, ordered by id.
    #[instrument(skip(self))]
    pub async fn items(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let mut items = self.list().await?;
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        id: ItemId,
        update: CatalogItemUpdate,
    ) -> Result<CatalogItem, CatalogError> {
        update.validate()?;
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(Self::map_item_error(id))
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, id: ItemId) -> Result<(), CatalogError> {
        debug!("Sending request");
        self.inner.delete(id).await.map_err(Self::map_item_error(id))
    }

    /// Current stock level for an item.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ItemId) -> Result<u32, CatalogError> {
        match self.action(id, CatalogAction::CheckStock).await? {
            CatalogActionResult::CheckStock(stock) => Ok(stock),
            _ => unreachable!("CheckStock action must return CheckStock result"),
        }
    }

    /// Commits a sale of `quantity` units.
    ///
    /// On a conflict the error carries the stock that remained. On
    /// [`CatalogError::DurabilityFailure`] check `rolled_back` to know whether stock moved.
    #[instrument(skip(self))]
    pub async fn sell(&self, id: ItemId, quantity: u32) -> Result<SaleReceipt, CatalogError> {
        validate_quantity(quantity)?;
        debug!("Committing sale of {} units of {}", quantity, id);
        match self.action(id, CatalogAction::Sell(quantity)).await? {
            CatalogActionResult::Sell(receipt) => Ok(receipt),
            _ => unreachable!("Sell action must return Sell result"),
        }
    }

    /// Re-lists an item with stock 1. Safe to repeat.
    #[instrument(skip(self))]
    pub async fn restore(&self, id: ItemId) -> Result<CatalogItem, CatalogError> {
        match self.action(id, CatalogAction::Restore).await? {
            CatalogActionResult::Restore(item) => Ok(item),
            _ => unreachable!("Restore action must return Restore result"),
        }
    }

    /// Sets stock to an absolute level.
    #[instrument(skip(self))]
    pub async fn set_stock(&self, id: ItemId, stock: u32) -> Result<CatalogItem, CatalogError> {
        match self.action(id, CatalogAction::SetStock(stock)).await? {
            CatalogActionResult::SetStock(item) => Ok(item),
            _ => unreachable!("SetStock action must return SetStock result"),
        }
    }

    /// Unit accounting for one item, taken atomically with respect to its sales.
    #[instrument(skip(self))]
    pub async fn audit(&self, id: ItemId) -> Result<AuditReport, CatalogError> {
        match self.action(id, CatalogAction::Audit).await? {
            CatalogActionResult::Audit(report) => Ok(report),
            _ => unreachable!("Audit action must return Audit result"),
        }
    }

    async fn action(
        &self,
        id: ItemId,
        action: CatalogAction,
    ) -> Result<CatalogActionResult, CatalogError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_item_error(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_action};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_check_stock_returns_level() {
        let (client, mut receiver) = create_mock_client::<CatalogItem>(10);
        let catalog = CatalogClient::new(client);

        let check_task = tokio::spawn(async move { catalog.check_stock(ItemId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ItemId(1));
        assert!(matches!(action, CatalogAction::CheckStock));
        responder.send(Ok(CatalogActionResult::CheckStock(4))).unwrap();

        assert_eq!(check_task.await.unwrap().unwrap(), 4);
    }

    #[tokio::test]
    async fn test_sell_surfaces_typed_conflict() {
        let (client, mut receiver) = create_mock_client::<CatalogItem>(10);
        let catalog = CatalogClient::new(client);

        let sell_task = tokio::spawn(async move { catalog.sell(ItemId(2), 3).await });

        let (_, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert!(matches!(action, CatalogAction::Sell(3)));
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                CatalogError::StockInsufficient {
                    id: ItemId(2),
                    requested: 3,
                    remaining: 1,
                },
            ))))
            .unwrap();

        let err = sell_task.await.unwrap().unwrap_err();
        assert_eq!(err.remaining_stock(), Some(1));
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_missing_item_maps_to_not_found() {
        let (client, mut receiver) = create_mock_client::<CatalogItem>(10);
        let catalog = CatalogClient::new(client);

        let restore_task = tokio::spawn(async move { catalog.restore(ItemId(9)).await });

        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        responder
            .send(Err(FrameworkError::NotFound("item_9".into())))
            .unwrap();

        assert_eq!(
            restore_task.await.unwrap().unwrap_err(),
            CatalogError::NotFound(ItemId(9))
        );
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_the_actor() {
        let (client, mut receiver) = create_mock_client::<CatalogItem>(10);
        let catalog = CatalogClient::new(client);

        let err = catalog.sell(ItemId(1), 0).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        let err = catalog
            .create_item(CatalogItemCreate::unique("", dec!(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        drop(catalog);
        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_stopped_actor_is_a_communication_error() {
        let (client, receiver) = create_mock_client::<CatalogItem>(10);
        drop(receiver);

        let err = CatalogClient::new(client)
            .check_stock(ItemId(1))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::ActorCommunicationError(_)));
        assert!(!err.is_ambiguous());
    }

    #[tokio::test]
    async fn test_lost_sell_reply_is_ambiguous() {
        let (client, mut receiver) = create_mock_client::<CatalogItem>(10);
        let catalog = CatalogClient::new(client);

        let sell_task = tokio::spawn(async move { catalog.sell(ItemId(2), 1).await });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert!(matches!(action, CatalogAction::Sell(1)));
        drop(responder);

        let err = sell_task.await.unwrap().unwrap_err();
        assert!(matches!(err, CatalogError::OutcomeUnknown(_)));
        assert!(err.is_ambiguous());
    }
}
