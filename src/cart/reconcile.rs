//! Brings a cart back in line with the ledger.
//!
//! Reconciliation is advisory smoothing. It never errors; lines that cannot be bought
//! are dropped and oversized lines are clamped, and the caller gets a report to show
//! the shopper.

use super::{Cart, CartLine, ItemSnapshot};
use crate::model::{CatalogItem, ItemId};
use std::collections::HashMap;
use tracing::debug;

/// What reconciliation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Number of lines dropped.
    pub removed: usize,
    /// Number of lines whose quantity was lowered.
    pub adjusted: usize,
    pub removed_items: Vec<ItemId>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.removed == 0 && self.adjusted == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub cart: Cart,
    pub report: ReconcileReport,
}

/// Reconciles `cart` against `available`, normally the output of
/// [`AvailabilityOracle::list_available`](crate::availability::AvailabilityOracle::list_available).
///
/// A line survives only if its item is present, not sold and in stock; its quantity
/// becomes `min(requested, stock)` and its snapshot is refreshed.
pub fn reconcile(cart: &Cart, available: &[CatalogItem]) -> Reconciliation {
    let by_id: HashMap<ItemId, &CatalogItem> = available.iter().map(|i| (i.id, i)).collect();
    let mut report = ReconcileReport::default();
    let mut lines = Vec::with_capacity(cart.len());

    for line in cart.lines() {
        let item = match by_id.get(&line.item_id) {
            Some(item) if item.is_listed() => item,
            _ => {
                report.removed += 1;
                report.removed_items.push(line.item_id);
                continue;
            }
        };

        let quantity = line.quantity.min(item.stock());
        if quantity == 0 {
            report.removed += 1;
            report.removed_items.push(line.item_id);
            continue;
        }
        if quantity < line.quantity {
            report.adjusted += 1;
        }

        lines.push(CartLine {
            item_id: line.item_id,
            quantity,
            snapshot: ItemSnapshot::from(*item),
        });
    }

    if !report.is_clean() {
        debug!(
            removed = report.removed,
            adjusted = report.adjusted,
            "Cart reconciled"
        );
    }

    Reconciliation {
        cart: Cart::from_lines(lines),
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CatalogItemCreate;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn item(id: u32, stock: u32) -> CatalogItem {
        CatalogItem::new(
            ItemId(id),
            CatalogItemCreate::unique(format!("lot {id}"), dec!(8)).with_stock(stock),
        )
    }

    fn line(id: u32, quantity: u32) -> CartLine {
        CartLine {
            item_id: ItemId(id),
            quantity,
            snapshot: ItemSnapshot {
                name: format!("lot {id}"),
                price: dec!(8),
                stock: quantity,
            },
        }
    }

    #[test]
    fn oversized_line_is_clamped() {
        let cart = Cart::from_lines(vec![line(1, 5)]);
        let result = reconcile(&cart, &[item(1, 2)]);

        assert_eq!(result.cart.lines()[0].quantity, 2);
        assert_eq!(result.cart.lines()[0].snapshot.stock, 2);
        assert_eq!(result.report.adjusted, 1);
        assert_eq!(result.report.removed, 0);
    }

    #[test]
    fn sold_out_line_is_dropped() {
        let cart = Cart::from_lines(vec![line(1, 1), line(2, 1)]);
        let result = reconcile(&cart, &[item(1, 0), item(2, 1)]);

        assert_eq!(result.cart.len(), 1);
        assert_eq!(result.report.removed, 1);
        assert_eq!(result.report.removed_items, vec![ItemId(1)]);
    }

    #[test]
    fn missing_item_is_dropped() {
        let cart = Cart::from_lines(vec![line(9, 1)]);
        let result = reconcile(&cart, &[]);

        assert!(result.cart.is_empty());
        assert_eq!(result.report.removed, 1);
    }

    #[test]
    fn price_edits_refresh_the_snapshot() {
        let cart = Cart::from_lines(vec![line(1, 1)]);
        let mut repriced = item(1, 1);
        repriced.price = dec!(11);

        let result = reconcile(&cart, &[repriced]);
        assert_eq!(result.cart.lines()[0].snapshot.price, dec!(11));
        assert!(result.report.is_clean());
    }

    proptest! {
        #[test]
        fn never_grows_and_never_keeps_unavailable_lines(
            requested in prop::collection::vec(1u32..10, 0..8),
            stocks in prop::collection::vec(0u32..10, 0..8),
        ) {
            let cart = Cart::from_lines(
                requested.iter().enumerate().map(|(i, &q)| line(i as u32, q)).collect(),
            );
            let ledger: Vec<_> = stocks
                .iter()
                .enumerate()
                .map(|(i, &s)| item(i as u32, s))
                .collect();

            let result = reconcile(&cart, &ledger);

            prop_assert_eq!(result.cart.len() + result.report.removed, cart.len());
            for kept in result.cart.lines() {
                let before = cart.line(kept.item_id).unwrap();
                let stock = stocks[kept.item_id.0 as usize];
                prop_assert!(kept.quantity <= before.quantity);
                prop_assert!(kept.quantity >= 1 && kept.quantity <= stock);
            }
        }
    }
}
