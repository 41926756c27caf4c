//! Stock ledger rules for a single catalog item.
//!
//! Every mutation ends in `settle()`, which recomputes `sold` from `stock`. The
//! `issued`/`written_off` counters keep the item auditable:
//! `units sold + stock + written_off == issued` at all times.

use super::CatalogError;
use crate::model::{CatalogItem, CatalogItemCreate, CatalogItemUpdate};
use rust_decimal::Decimal;

impl CatalogItem {
    /// Removes `quantity` units, or fails without touching anything.
    pub fn decrement(&mut self, quantity: u32) -> Result<(), CatalogError> {
        validate_quantity(quantity)?;
        if self.sold {
            return Err(CatalogError::AlreadySold {
                id: self.id,
                remaining: self.stock,
            });
        }
        if self.stock < quantity {
            return Err(CatalogError::StockInsufficient {
                id: self.id,
                requested: quantity,
                remaining: self.stock,
            });
        }
        self.stock -= quantity;
        self.settle();
        Ok(())
    }

    /// Undoes a decrement that could not be recorded.
    pub(crate) fn reinstate(&mut self, quantity: u32) {
        self.stock += quantity;
        self.settle();
    }

    /// Re-lists the item as a single available unit.
    pub fn restore(&mut self) -> Result<(), CatalogError> {
        self.set_stock(1)
    }

    /// Administrative absolute stock edit. Increases count as newly issued units,
    /// decreases as write-offs.
    ///
    /// # Errors
    /// `Validation` when a counter would overflow; the item is left unchanged.
    pub fn set_stock(&mut self, stock: u32) -> Result<(), CatalogError> {
        let (issued, written_off) = if stock > self.stock {
            let added = u64::from(stock - self.stock);
            (self.issued.checked_add(added), Some(self.written_off))
        } else {
            let removed = u64::from(self.stock - stock);
            (Some(self.issued), self.written_off.checked_add(removed))
        };
        let (Some(issued), Some(written_off)) = (issued, written_off) else {
            return Err(CatalogError::Validation(format!(
                "setting stock to {stock} overflows the unit counters of {}",
                self.id
            )));
        };
        self.issued = issued;
        self.written_off = written_off;
        self.stock = stock;
        self.settle();
        Ok(())
    }

    /// Applies an administrative edit after validating it as a whole.
    pub fn apply_update(&mut self, update: CatalogItemUpdate) -> Result<(), CatalogError> {
        update.validate()?;

        // Stock first: it is the only step that can still fail.
        match (update.stock, update.sold) {
            (Some(stock), _) => self.set_stock(stock)?,
            (None, Some(true)) => self.set_stock(0)?,
            (None, Some(false)) if self.stock == 0 => self.set_stock(1)?,
            _ => {}
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(media) = update.media {
            self.media = media;
        }
        Ok(())
    }

    fn settle(&mut self) {
        self.sold = self.stock == 0;
        debug_assert!(self.invariant_holds());
    }
}

fn validate_price(price: Decimal) -> Result<(), CatalogError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(CatalogError::Validation(format!(
            "price must not be negative, got {price}"
        )));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::Validation("name must not be empty".to_string()));
    }
    Ok(())
}

impl CatalogItemCreate {
    pub fn validate(&self) -> Result<(), CatalogError> {
        validate_name(&self.name)?;
        validate_price(self.price)
    }
}

impl CatalogItemUpdate {
    pub fn validate(&self) -> Result<(), CatalogError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

/// Rejects a sale quantity before any request is sent.
pub fn validate_quantity(quantity: u32) -> Result<(), CatalogError> {
    if quantity == 0 {
        return Err(CatalogError::Validation(
            "quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;
    use rust_decimal_macros::dec;

    fn item(stock: u32) -> CatalogItem {
        CatalogItem::new(
            ItemId(1),
            CatalogItemCreate::unique("Walnut stool", dec!(140)).with_stock(stock),
        )
    }

    fn audit_balance(item: &CatalogItem, sold_units: u32) -> bool {
        u64::from(sold_units) + u64::from(item.stock()) + item.written_off() == item.issued()
    }

    #[test]
    fn create_defaults_to_one_unit() {
        let item = CatalogItem::new(ItemId(1), CatalogItemCreate::unique("Lamp", dec!(30)));
        assert_eq!(item.stock(), 1);
        assert!(!item.is_sold());
        assert_eq!(item.issued(), 1);
    }

    #[test]
    fn create_pre_sold_forces_zero_stock() {
        let params = CatalogItemCreate {
            sold: true,
            ..CatalogItemCreate::unique("Vase", dec!(55)).with_stock(4)
        };
        let item = CatalogItem::new(ItemId(1), params);
        assert_eq!(item.stock(), 0);
        assert!(item.is_sold());
        assert!(item.invariant_holds());
    }

    #[test]
    fn create_with_zero_stock_is_sold() {
        let item = item(0);
        assert!(item.is_sold());
    }

    #[test]
    fn decrement_to_zero_flips_sold() {
        let mut item = item(2);
        item.decrement(1).unwrap();
        assert_eq!(item.stock(), 1);
        assert!(!item.is_sold());
        item.decrement(1).unwrap();
        assert_eq!(item.stock(), 0);
        assert!(item.is_sold());
        assert!(audit_balance(&item, 2));
    }

    #[test]
    fn decrement_conflicts_report_remaining_stock() {
        let mut item = item(2);
        assert_eq!(
            item.decrement(3),
            Err(CatalogError::StockInsufficient {
                id: ItemId(1),
                requested: 3,
                remaining: 2
            })
        );
        assert_eq!(item.stock(), 2);

        item.decrement(2).unwrap();
        let err = item.decrement(1).unwrap_err();
        assert_eq!(err, CatalogError::AlreadySold { id: ItemId(1), remaining: 0 });
        assert_eq!(err.remaining_stock(), Some(0));
        assert!(err.is_conflict());
    }

    #[test]
    fn decrement_of_zero_is_a_validation_error() {
        let mut item = item(1);
        assert!(matches!(item.decrement(0), Err(CatalogError::Validation(_))));
        assert_eq!(item.stock(), 1);
    }

    #[test]
    fn restore_is_idempotent() {
        let mut item = item(1);
        item.decrement(1).unwrap();

        item.restore().unwrap();
        let once = item.clone();
        item.restore().unwrap();

        assert_eq!(item, once);
        assert_eq!(item.stock(), 1);
        assert!(!item.is_sold());
        assert!(audit_balance(&item, 1));
    }

    #[test]
    fn set_stock_tracks_issue_and_write_off() {
        let mut item = item(3);
        item.set_stock(5).unwrap();
        assert_eq!(item.issued(), 5);
        item.set_stock(0).unwrap();
        assert!(item.is_sold());
        assert_eq!(item.written_off(), 5);
        assert!(audit_balance(&item, 0));
    }

    #[test]
    fn repeated_maximal_restock_stays_balanced() {
        let mut item = item(1);
        item.set_stock(u32::MAX).unwrap();
        item.decrement(1).unwrap();
        item.set_stock(u32::MAX).unwrap();

        assert_eq!(item.issued(), u64::from(u32::MAX) + 1);
        assert!(audit_balance(&item, 1));
    }

    #[test]
    fn counter_overflow_is_refused_without_mutation() {
        let mut item = item(1);
        item.issued = u64::MAX;
        let before = item.clone();

        let err = item.set_stock(2).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(item, before);

        let err = item
            .apply_update(CatalogItemUpdate {
                name: Some("Renamed".into()),
                stock: Some(5),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(item, before);
    }

    #[test]
    fn update_stock_is_authoritative_over_sold() {
        let mut item = item(1);
        item.apply_update(CatalogItemUpdate {
            stock: Some(3),
            sold: Some(true),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(item.stock(), 3);
        assert!(!item.is_sold());
    }

    #[test]
    fn update_sold_toggle_uses_zero_or_one() {
        let mut item = item(4);
        item.apply_update(CatalogItemUpdate {
            sold: Some(true),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(item.stock(), 0);

        item.apply_update(CatalogItemUpdate {
            sold: Some(false),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(item.stock(), 1);
        assert!(item.invariant_holds());

        // Unselling an item that still has stock leaves the count alone.
        let mut plenty = self::item(4);
        plenty
            .apply_update(CatalogItemUpdate {
                sold: Some(false),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(plenty.stock(), 4);
    }

    #[test]
    fn invalid_update_changes_nothing() {
        let mut item = item(1);
        let before = item.clone();
        let err = item
            .apply_update(CatalogItemUpdate {
                description: Some("new copy".into()),
                price: Some(dec!(-1)),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(item, before);
    }

    #[test]
    fn create_validation() {
        assert!(CatalogItemCreate::unique("Rug", dec!(0)).validate().is_ok());
        assert!(CatalogItemCreate::unique(" ", dec!(10)).validate().is_err());
        assert!(CatalogItemCreate::unique("Rug", dec!(-0.01)).validate().is_err());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(1).is_ok());
    }
}
