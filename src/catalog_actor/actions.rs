//! Custom actions for the catalog actor.
//!
//! These are the stock-changing operations beyond plain CRUD. They are handled by
//! [`ActorEntity::handle_action`](actor_framework::ActorEntity::handle_action) for
//! [`CatalogItem`](crate::model::CatalogItem).

use crate::audit::AuditReport;
use crate::model::{CatalogItem, SaleId};

/// Custom actions for catalog items.
#[derive(Debug, Clone)]
pub enum CatalogAction {
    /// Reads the current stock level.
    CheckStock,
    /// Commits a sale: decrements stock and appends a sale record as one unit.
    ///
    /// # Errors
    /// Fails with a conflict carrying the remaining stock when the item cannot cover the
    /// quantity, and with a durability failure when the record cannot be confirmed.
    Sell(u32),
    /// Re-lists the item with stock 1. Idempotent.
    Restore,
    /// Sets stock to an absolute value; `sold` follows.
    SetStock(u32),
    /// Reconciles the item's counters against its sale records while no sale of it can
    /// commit.
    Audit,
}

/// Results from CatalogActions - variants match 1:1 with CatalogAction
#[derive(Debug, Clone)]
pub enum CatalogActionResult {
    CheckStock(u32),
    Sell(SaleReceipt),
    Restore(CatalogItem),
    SetStock(CatalogItem),
    Audit(AuditReport),
}

/// Outcome of a committed sale.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleReceipt {
    /// The item after the decrement.
    pub item: CatalogItem,
    pub sale_id: SaleId,
    pub quantity: u32,
}
