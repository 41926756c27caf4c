//! # Availability Oracle
//!
//! Read-only purchasability queries. Nothing here mutates the ledger, so every answer is
//! a point-in-time observation; the authoritative check happens again at commit.

use crate::catalog_actor::{validate_quantity, CatalogError};
use crate::clients::CatalogClient;
use crate::model::{CatalogItem, ItemId};
use tracing::{debug, instrument};

/// Result of [`AvailabilityOracle::check_batch`], partitioned in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchAvailability {
    pub available: Vec<ItemId>,
    pub unavailable: Vec<ItemId>,
}

impl BatchAvailability {
    pub fn all_available(&self) -> bool {
        self.unavailable.is_empty()
    }
}

/// Answers "can `quantity` units of this item be bought right now?".
#[derive(Clone)]
pub struct AvailabilityOracle {
    catalog: CatalogClient,
}

impl AvailabilityOracle {
    pub fn new(catalog: CatalogClient) -> Self {
        Self { catalog }
    }

    /// True iff the item exists, is not sold and has at least `quantity` in stock.
    ///
    /// A missing item is simply unavailable. A zero quantity is a validation error.
    #[instrument(skip(self))]
    pub async fn is_available(&self, id: ItemId, quantity: u32) -> Result<bool, CatalogError> {
        validate_quantity(quantity)?;
        match self.catalog.item(id).await {
            Ok(item) => Ok(item.can_supply(quantity)),
            Err(CatalogError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Evaluates every line on its own against the current ledger.
    ///
    /// Duplicate ids are not combined: two lines asking for 1 unit of an item with stock 1
    /// are both reported available. Aggregate first if that matters.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn check_batch(
        &self,
        lines: &[(ItemId, u32)],
    ) -> Result<BatchAvailability, CatalogError> {
        let mut batch = BatchAvailability::default();
        for &(id, quantity) in lines {
            if self.is_available(id, quantity).await? {
                batch.available.push(id);
            } else {
                batch.unavailable.push(id);
            }
        }
        debug!(
            available = batch.available.len(),
            unavailable = batch.unavailable.len(),
            "Batch checked"
        );
        Ok(batch)
    }

    /// Items on sale, ordered by id.
    #[instrument(skip(self))]
    pub async fn list_available(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let mut items = self.catalog.items().await?;
        items.retain(CatalogItem::is_listed);
        Ok(items)
    }
}
