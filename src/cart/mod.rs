//! # Cart
//!
//! Client-held purchase intent. A cart has no authority: its snapshots are stale as soon
//! as they are read, and it is reconciled against the ledger at every checkpoint
//! (see [`session::ShopperSession`]).

pub mod reconcile;
pub mod session;

pub use reconcile::*;
pub use session::*;

use crate::checkout::CheckoutLine;
use crate::model::{CatalogItem, ItemId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Last-known item details, for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

impl From<&CatalogItem> for ItemSnapshot {
    fn from(item: &CatalogItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price,
            stock: item.stock(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: ItemId,
    pub quantity: u32,
    pub snapshot: ItemSnapshot,
}

/// A shopper's cart, one line per item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, item_id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item_id == item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Adds `quantity` units, merging with an existing line and clamping to the item's
    /// stock as last seen. Returns the line's quantity afterwards (0 if nothing could be
    /// added).
    pub fn add(&mut self, item: &CatalogItem, quantity: u32) -> u32 {
        if quantity == 0 || !item.is_listed() {
            return self.line(item.id).map_or(0, |l| l.quantity);
        }

        let snapshot = ItemSnapshot::from(item);
        match self.lines.iter_mut().find(|l| l.item_id == item.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(quantity).min(item.stock());
                line.snapshot = snapshot;
                line.quantity
            }
            None => {
                let quantity = quantity.min(item.stock());
                self.lines.push(CartLine {
                    item_id: item.id,
                    quantity,
                    snapshot,
                });
                quantity
            }
        }
    }

    /// Sets a line's quantity; 0 removes it. Returns false if the item is not in the cart.
    pub fn set_quantity(&mut self, item_id: ItemId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(item_id);
        }
        match self.lines.iter_mut().find(|l| l.item_id == item_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, item_id: ItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.item_id != item_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Display total from the snapshots. Never used to price a sale.
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(|l| l.snapshot.price * Decimal::from(l.quantity))
            .sum()
    }

    pub fn checkout_lines(&self) -> Vec<CheckoutLine> {
        self.lines
            .iter()
            .map(|l| CheckoutLine::new(l.item_id, l.quantity))
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Restores a persisted cart. Unreadable data yields an empty cart.
    pub fn from_json(data: &str) -> Self {
        if data.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str(data) {
            Ok(cart) => cart,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable persisted cart");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CatalogItemCreate;
    use rust_decimal_macros::dec;

    fn item(id: u32, price: Decimal, stock: u32) -> CatalogItem {
        CatalogItem::new(
            ItemId(id),
            CatalogItemCreate::unique(format!("lot {id}"), price).with_stock(stock),
        )
    }

    #[test]
    fn adding_twice_merges_and_clamps() {
        let mut cart = Cart::new();
        let vase = item(1, dec!(40), 3);

        assert_eq!(cart.add(&vase, 2), 2);
        assert_eq!(cart.add(&vase, 2), 3);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn sold_items_cannot_be_added() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(&item(1, dec!(40), 0), 1), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn zero_quantity_removes_the_line() {
        let mut cart = Cart::new();
        cart.add(&item(1, dec!(40), 1), 1);

        assert!(cart.set_quantity(ItemId(1), 0));
        assert!(cart.is_empty());
        assert!(!cart.set_quantity(ItemId(1), 2));
    }

    #[test]
    fn total_uses_snapshot_prices() {
        let mut cart = Cart::new();
        cart.add(&item(1, dec!(12.50), 2), 2);
        cart.add(&item(2, dec!(3), 1), 1);

        assert_eq!(cart.total(), dec!(28.00));
        assert_eq!(
            cart.checkout_lines(),
            vec![CheckoutLine::new(ItemId(1), 2), CheckoutLine::new(ItemId(2), 1)]
        );
    }

    #[test]
    fn persisted_cart_survives_a_reload() {
        let mut cart = Cart::new();
        cart.add(&item(7, dec!(19.99), 1), 1);

        let json = cart.to_json().unwrap();
        assert_eq!(Cart::from_json(&json), cart);
    }

    #[test]
    fn corrupt_persisted_cart_starts_empty() {
        assert!(Cart::from_json("{\"lines\": [oops").is_empty());
        assert!(Cart::from_json("").is_empty());
    }
}
