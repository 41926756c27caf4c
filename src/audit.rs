//! Unit accounting per item: every issued unit is either in stock, sold, or written off.

use crate::model::{CatalogItem, ItemId, SaleHistory};
use serde::Serialize;
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub item_id: ItemId,
    pub issued: u64,
    pub stock: u64,
    pub written_off: u64,
    /// Units across all sale records for the item.
    pub sold_units: u64,
}

impl AuditReport {
    pub fn compute(item: &CatalogItem, history: &SaleHistory) -> Self {
        Self {
            item_id: item.id,
            issued: item.issued(),
            stock: item.stock().into(),
            written_off: item.written_off(),
            sold_units: history
                .for_item(item.id)
                .map(|r| u64::from(r.quantity))
                .sum(),
        }
    }

    /// `sold_units + stock + written_off == issued`.
    pub fn is_balanced(&self) -> bool {
        self.sold_units + self.stock + self.written_off == self.issued
    }

    /// Positive when more units are accounted for than were issued (a lost rollback or
    /// duplicate record), negative when units are missing (a decrement with no record).
    pub fn discrepancy(&self) -> i128 {
        i128::from(self.sold_units + self.stock + self.written_off) - i128::from(self.issued)
    }
}

impl Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: issued {} = sold {} + stock {} + written off {}{}",
            self.item_id,
            self.issued,
            self.sold_units,
            self.stock,
            self.written_off,
            if self.is_balanced() { "" } else { " (UNBALANCED)" }
        )
    }
}
