//! ActorEntity implementation for [`SaleRecord`].
//!
//! Records are validated on append, stamped with the current time, and never change
//! afterwards: the update payload is uninhabited and `on_delete` always refuses.

use super::{SaleError, SaleRecordAction};
use crate::model::{SaleId, SaleRecord, SaleRecordCreate, SaleRecordUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl ActorEntity for SaleRecord {
    type Id = SaleId;
    type Create = SaleRecordCreate;
    type Update = SaleRecordUpdate;
    type Action = SaleRecordAction;
    type ActionResult = ();
    type Context = ();
    type Error = SaleError;

    fn from_create_params(id: SaleId, params: SaleRecordCreate) -> Result<Self, Self::Error> {
        if params.quantity == 0 {
            return Err(SaleError::Validation(
                "quantity must be at least 1".to_string(),
            ));
        }
        if params.unit_price.is_sign_negative() && !params.unit_price.is_zero() {
            return Err(SaleError::Validation(format!(
                "unit price must not be negative, got {}",
                params.unit_price
            )));
        }
        Ok(Self {
            id,
            created_at: Utc::now(),
            item_id: params.item_id,
            name: params.name,
            category: params.category,
            unit_price: params.unit_price,
            quantity: params.quantity,
        })
    }

    async fn on_update(&mut self, update: SaleRecordUpdate, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        Err(SaleError::AppendOnly(self.id))
    }

    async fn handle_action(
        &mut self,
        action: SaleRecordAction,
        _ctx: &(),
    ) -> Result<(), Self::Error> {
        match action {}
    }
}
