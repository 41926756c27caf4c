//! A shopper's session: the cart plus the three reconciliation checkpoints.
//!
//! - on load, after restoring a persisted cart;
//! - when the cart view is opened;
//! - immediately before checkout submission.

use super::{reconcile, Cart, ReconcileReport};
use crate::availability::AvailabilityOracle;
use crate::catalog_actor::CatalogError;
use crate::checkout::{Checkout, CheckoutReport, LineOutcome};
use crate::model::{CatalogItem, ItemId};
use std::collections::HashSet;
use tracing::{info, instrument, warn};

/// Result of [`ShopperSession::checkout`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionCheckout {
    /// Changes made by the pre-checkout reconciliation.
    pub reconciliation: ReconcileReport,
    pub report: CheckoutReport,
    /// Lines whose sale may or may not have gone through. They are taken out of the cart
    /// and need an audit, not a retry.
    pub unresolved: Vec<ItemId>,
}

pub struct ShopperSession {
    cart: Cart,
    oracle: AvailabilityOracle,
    checkout: Checkout,
}

impl ShopperSession {
    /// Restores a persisted cart and reconciles it (first checkpoint).
    ///
    /// Unreadable `persisted` data starts an empty cart.
    pub async fn load(
        persisted: &str,
        oracle: AvailabilityOracle,
        checkout: Checkout,
    ) -> Result<(Self, ReconcileReport), CatalogError> {
        let mut session = Self {
            cart: Cart::from_json(persisted),
            oracle,
            checkout,
        };
        let report = session.refresh().await?;
        Ok((session, report))
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Adds an item as the shopper currently sees it.
    pub fn add(&mut self, item: &CatalogItem, quantity: u32) -> u32 {
        self.cart.add(item, quantity)
    }

    /// Reconciles before the cart is shown (second checkpoint).
    pub async fn open_cart(&mut self) -> Result<ReconcileReport, CatalogError> {
        self.refresh().await
    }

    /// Reconciles, then submits every remaining line (third checkpoint).
    ///
    /// Committed lines and lines rejected on business grounds leave the cart. Lines that
    /// failed definitely (nothing was sold) stay so the shopper can retry them. Lines whose
    /// outcome is unknown leave the cart and are listed in
    /// [`SessionCheckout::unresolved`].
    #[instrument(skip(self), fields(lines = self.cart.len()))]
    pub async fn checkout(&mut self) -> Result<SessionCheckout, CatalogError> {
        let reconciliation = self.refresh().await?;
        let report = self.checkout.submit(&self.cart.checkout_lines()).await;

        let mut unresolved = Vec::new();
        let mut settled = HashSet::new();
        for result in &report.lines {
            match &result.outcome {
                LineOutcome::Failed(e) if e.is_ambiguous() => {
                    unresolved.push(result.line.item_id);
                    settled.insert(result.line.item_id);
                }
                LineOutcome::Failed(_) => {}
                LineOutcome::Committed(_) | LineOutcome::Rejected(_) => {
                    settled.insert(result.line.item_id);
                }
            }
        }
        for id in settled {
            self.cart.remove(id);
        }

        if !unresolved.is_empty() {
            warn!(
                items = ?unresolved,
                reconciliation_required = true,
                "Checkout left sales with unknown outcome"
            );
        }
        info!(
            committed = report.committed_count(),
            left_in_cart = self.cart.len(),
            "Session checkout finished"
        );
        Ok(SessionCheckout {
            reconciliation,
            report,
            unresolved,
        })
    }

    /// Serialized cart for the client to keep between visits.
    pub fn persist(&self) -> serde_json::Result<String> {
        self.cart.to_json()
    }

    async fn refresh(&mut self) -> Result<ReconcileReport, CatalogError> {
        let available = self.oracle.list_available().await?;
        let reconciled = reconcile(&self.cart, &available);
        self.cart = reconciled.cart;
        Ok(reconciled.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_actor::{CatalogActionResult, SaleReceipt};
    use crate::clients::CatalogClient;
    use crate::model::{CatalogItemCreate, SaleId};
    use actor_framework::mock::MockClient;
    use actor_framework::FrameworkError;
    use rust_decimal_macros::dec;

    fn item(id: u32, stock: u32) -> CatalogItem {
        CatalogItem::new(
            ItemId(id),
            CatalogItemCreate::unique(format!("lot {id}"), dec!(25)).with_stock(stock),
        )
    }

    fn entity_error(e: CatalogError) -> FrameworkError {
        FrameworkError::EntityError(Box::new(e))
    }

    async fn session_over(mock: &MockClient<CatalogItem>) -> ShopperSession {
        let catalog = CatalogClient::new(mock.client());
        let (session, report) = ShopperSession::load(
            "",
            AvailabilityOracle::new(catalog.clone()),
            Checkout::new(catalog),
        )
        .await
        .unwrap();
        assert!(report.is_clean());
        session
    }

    #[tokio::test]
    async fn checkout_prunes_by_outcome() {
        let (sold_out, closed, lost, fine) = (item(1, 1), item(2, 1), item(3, 2), item(4, 1));
        let listed = vec![sold_out.clone(), closed.clone(), lost.clone(), fine.clone()];

        let mut mock = MockClient::<CatalogItem>::new();
        mock.expect_list().return_ok(listed.clone());
        let mut session = session_over(&mock).await;
        for item in &listed {
            session.add(item, 1);
        }

        // Pre-checkout reconciliation, then one Sell per line in cart order.
        mock.expect_list().return_ok(listed);
        mock.expect_action(sold_out.id)
            .return_err(entity_error(CatalogError::AlreadySold {
                id: sold_out.id,
                remaining: 0,
            }));
        mock.expect_action(closed.id)
            .return_err(entity_error(CatalogError::DurabilityFailure {
                id: closed.id,
                quantity: 1,
                rolled_back: true,
                reason: "sale record store closed".into(),
            }));
        mock.expect_action(lost.id)
            .return_err(entity_error(CatalogError::DurabilityFailure {
                id: lost.id,
                quantity: 1,
                rolled_back: false,
                reason: "no reply".into(),
            }));
        let mut after = fine.clone();
        after.decrement(1).unwrap();
        mock.expect_action(fine.id)
            .return_ok(CatalogActionResult::Sell(SaleReceipt {
                item: after,
                sale_id: SaleId(1),
                quantity: 1,
            }));

        let result = session.checkout().await.unwrap();
        mock.verify();

        assert_eq!(result.report.committed_count(), 1);
        assert_eq!(result.report.rejected().count(), 1);
        assert_eq!(result.unresolved, vec![lost.id]);

        let remaining: Vec<_> = session.cart().lines().iter().map(|l| l.item_id).collect();
        assert_eq!(remaining, vec![closed.id]);
    }

    #[tokio::test]
    async fn lost_catalog_reply_is_not_retried() {
        let lamp = item(7, 3);

        let mut mock = MockClient::<CatalogItem>::new();
        mock.expect_list().return_ok(vec![lamp.clone()]);
        let mut session = session_over(&mock).await;
        session.add(&lamp, 2);

        mock.expect_list().return_ok(vec![lamp.clone()]);
        mock.expect_action(lamp.id)
            .return_err(FrameworkError::ActorDropped);

        let result = session.checkout().await.unwrap();
        assert_eq!(result.unresolved, vec![lamp.id]);
        assert!(session.cart().is_empty());
    }
}
