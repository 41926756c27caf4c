//! ActorEntity implementation for [`CatalogItem`]: the stock ledger and the sale commit.
//!
//! # Commit protocol
//!
//! `Sell(n)` runs while the catalog actor holds the item exclusively:
//!
//! 1. capture the name/category/price snapshot and decrement stock (or fail with a
//!    conflict, touching nothing);
//! 2. append a sale record. Delivery and the reply are each bounded by `append_timeout`;
//! 3. on success, return the updated item and the sale id.
//!
//! If the store definitely did not write the record (it never received it, or refused it),
//! the decrement is undone before the actor moves on, so no other request ever sees the
//! intermediate stock. If the outcome is unknown, the decrement stays and the failure is logged for reconciliation; retrying
//! here could sell the same unit twice.

use super::{CatalogAction, CatalogActionResult, CatalogError, CommitContext, SaleReceipt};
use crate::audit::AuditReport;
use crate::model::{CatalogItem, CatalogItemCreate, CatalogItemUpdate, ItemId, SaleRecordCreate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use tracing::{error, info};

#[async_trait]
impl ActorEntity for CatalogItem {
    type Id = ItemId;
    type Create = CatalogItemCreate;
    type Update = CatalogItemUpdate;
    type Action = CatalogAction;
    type ActionResult = CatalogActionResult;
    type Context = CommitContext;
    type Error = CatalogError;

    fn from_create_params(id: ItemId, params: CatalogItemCreate) -> Result<Self, Self::Error> {
        params.validate()?;
        Ok(Self::new(id, params))
    }

    /// Administrative edit. `stock`, when given, wins over `sold`.
    async fn on_update(
        &mut self,
        update: CatalogItemUpdate,
        _ctx: &CommitContext,
    ) -> Result<(), Self::Error> {
        self.apply_update(update)
    }

    async fn handle_action(
        &mut self,
        action: CatalogAction,
        ctx: &CommitContext,
    ) -> Result<CatalogActionResult, Self::Error> {
        match action {
            CatalogAction::CheckStock => Ok(CatalogActionResult::CheckStock(self.stock)),
            CatalogAction::Sell(quantity) => self
                .commit_sale(quantity, ctx)
                .await
                .map(CatalogActionResult::Sell),
            CatalogAction::Restore => {
                self.restore()?;
                Ok(CatalogActionResult::Restore(self.clone()))
            }
            CatalogAction::SetStock(stock) => {
                self.set_stock(stock)?;
                Ok(CatalogActionResult::SetStock(self.clone()))
            }
            CatalogAction::Audit => self.audit(ctx).await.map(CatalogActionResult::Audit),
        }
    }
}

impl CatalogItem {
    /// Reads the sale records while this actor holds the item, so no sale of it can commit
    /// in between. A record whose append outcome was unknown may still land afterwards.
    async fn audit(&self, ctx: &CommitContext) -> Result<AuditReport, CatalogError> {
        let history = match tokio::time::timeout(ctx.append_timeout, ctx.sales.history()).await {
            Ok(Ok(history)) => history,
            Ok(Err(e)) => {
                return Err(CatalogError::ActorCommunicationError(format!(
                    "sale history unavailable: {e}"
                )))
            }
            Err(_) => {
                return Err(CatalogError::ActorCommunicationError(format!(
                    "sale history: no reply within {:?}",
                    ctx.append_timeout
                )))
            }
        };
        Ok(AuditReport::compute(self, &history))
    }

    async fn commit_sale(
        &mut self,
        quantity: u32,
        ctx: &CommitContext,
    ) -> Result<SaleReceipt, CatalogError> {
        let record = SaleRecordCreate::from_item(self, quantity);
        self.decrement(quantity)?;

        let appended = ctx
            .sales
            .append_within(record, ctx.append_timeout)
            .await;

        match appended {
            Ok(sale_id) => {
                info!(item_id = %self.id, %sale_id, quantity, remaining = self.stock, "Sale committed");
                Ok(SaleReceipt {
                    item: self.clone(),
                    sale_id,
                    quantity,
                })
            }
            Err(e) if e.is_definite() => {
                self.reinstate(quantity);
                error!(
                    item_id = %self.id,
                    quantity,
                    error = %e,
                    rolled_back = true,
                    "Sale record append failed, stock restored"
                );
                Err(CatalogError::DurabilityFailure {
                    id: self.id,
                    quantity,
                    rolled_back: true,
                    reason: e.to_string(),
                })
            }
            Err(e) => {
                error!(
                    item_id = %self.id,
                    quantity,
                    error = %e,
                    rolled_back = false,
                    reconciliation_required = true,
                    "Sale record outcome unknown, keeping decrement"
                );
                Err(CatalogError::DurabilityFailure {
                    id: self.id,
                    quantity,
                    rolled_back: false,
                    reason: e.to_string(),
                })
            }
        }
    }
}
