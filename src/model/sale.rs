use crate::model::{CatalogItem, ItemId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for sale records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SaleId(pub u32);

impl From<u32> for SaleId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for SaleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sale_{}", self.0)
    }
}

/// One committed sale: an immutable entry in the sale record store.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait.
/// It has no update payload ([`SaleRecordUpdate`] is uninhabited) and its delete hook
/// always refuses, so once appended a record can only be read.
///
/// Name, category and unit price are copied from the catalog item at the moment of sale;
/// later price edits do not rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: SaleId,
    pub created_at: DateTime<Utc>,
    pub item_id: ItemId,
    pub name: String,
    pub category: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl SaleRecord {
    pub fn revenue(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Payload for appending a sale record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecordCreate {
    pub item_id: ItemId,
    pub name: String,
    pub category: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl SaleRecordCreate {
    /// Captures the item's name, category and price as they are right now.
    pub fn from_item(item: &CatalogItem, quantity: u32) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            category: item.category.clone(),
            unit_price: item.price,
            quantity,
        }
    }
}

/// Sale records are never updated; this type has no values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleRecordUpdate {}

/// Every sale record, newest first.
///
/// An owned snapshot: iterating it does not consume it, so it can be walked any number of
/// times and always yields the same finite sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SaleHistory {
    records: Vec<SaleRecord>,
}

impl SaleHistory {
    /// Orders `records` newest first. Ties on timestamp fall back to the later id.
    pub fn new(mut records: Vec<SaleRecord>) -> Self {
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Self { records }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SaleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn for_item(&self, item_id: ItemId) -> impl Iterator<Item = &SaleRecord> {
        self.records.iter().filter(move |r| r.item_id == item_id)
    }

    pub fn summary(&self) -> SalesSummary {
        SalesSummary::from_records(self.iter())
    }
}

impl<'a> IntoIterator for &'a SaleHistory {
    type Item = &'a SaleRecord;
    type IntoIter = std::slice::Iter<'a, SaleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Reporting totals, always computed as a fold over sale records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    pub total_transactions: u64,
    pub total_units: u64,
    pub total_revenue: Decimal,
}

impl SalesSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a SaleRecord>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |acc, record| Self {
                total_transactions: acc.total_transactions + 1,
                total_units: acc.total_units + u64::from(record.quantity),
                total_revenue: acc.total_revenue + record.revenue(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn record(id: u32, secs: i64, price: Decimal, quantity: u32) -> SaleRecord {
        SaleRecord {
            id: SaleId(id),
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
            item_id: ItemId(id),
            name: format!("lot {id}"),
            category: "prints".into(),
            unit_price: price,
            quantity,
        }
    }

    #[test]
    fn history_is_newest_first_and_restartable() {
        let history = SaleHistory::new(vec![
            record(1, 100, dec!(5), 1),
            record(3, 300, dec!(5), 1),
            record(2, 300, dec!(5), 1),
        ]);

        let first: Vec<SaleId> = history.iter().map(|r| r.id).collect();
        let second: Vec<SaleId> = (&history).into_iter().map(|r| r.id).collect();
        assert_eq!(first, vec![SaleId(3), SaleId(2), SaleId(1)]);
        assert_eq!(first, second);
    }

    #[test]
    fn summary_of_empty_store_is_zero() {
        assert_eq!(SaleHistory::default().summary(), SalesSummary::default());
    }

    #[test]
    fn revenue_uses_captured_unit_price() {
        let summary = SalesSummary::from_records(&[
            record(1, 1, dec!(12.50), 2),
            record(2, 2, dec!(80), 1),
        ]);
        assert_eq!(summary.total_transactions, 2);
        assert_eq!(summary.total_units, 3);
        assert_eq!(summary.total_revenue, dec!(105.00));
    }

    proptest! {
        #[test]
        fn summary_matches_manual_fold(
            lines in prop::collection::vec((0u32..100_000, 1u32..50), 0..40)
        ) {
            let records: Vec<SaleRecord> = lines
                .iter()
                .enumerate()
                .map(|(i, (cents, qty))| record(i as u32 + 1, i as i64, Decimal::new(i64::from(*cents), 2), *qty))
                .collect();

            let summary = SaleHistory::new(records.clone()).summary();

            let units: u64 = records.iter().map(|r| u64::from(r.quantity)).sum();
            let revenue: Decimal = records.iter().map(|r| r.unit_price * Decimal::from(r.quantity)).sum();
            prop_assert_eq!(summary.total_transactions, records.len() as u64);
            prop_assert_eq!(summary.total_units, units);
            prop_assert_eq!(summary.total_revenue, revenue);
        }
    }
}
