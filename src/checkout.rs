//! # Checkout
//!
//! Submits a multi-line cart as independent commits. A failure on one line never aborts
//! or undoes the others; the report says what happened to each line.

use crate::catalog_actor::{CatalogError, SaleReceipt};
use crate::clients::CatalogClient;
use crate::model::ItemId;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use tracing::{info, instrument, warn};

/// One line submitted for checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub item_id: ItemId,
    pub quantity: u32,
}

impl CheckoutLine {
    pub fn new(item_id: ItemId, quantity: u32) -> Self {
        Self { item_id, quantity }
    }
}

/// Why a line was definitively refused. The shopper can act on every variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    SoldOut,
    InsufficientStock { requested: u32, remaining: u32 },
    NotFound,
    Invalid(String),
}

impl Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::SoldOut => write!(f, "sold out"),
            RejectReason::InsufficientStock { remaining, .. } => {
                write!(f, "only {remaining} left in stock")
            }
            RejectReason::NotFound => write!(f, "no longer in the catalog"),
            RejectReason::Invalid(msg) => write!(f, "invalid request: {msg}"),
        }
    }
}

impl RejectReason {
    /// Splits business and input errors from operational ones.
    fn classify(error: &CatalogError) -> Option<Self> {
        match error {
            CatalogError::AlreadySold { .. } => Some(RejectReason::SoldOut),
            CatalogError::StockInsufficient {
                requested,
                remaining,
                ..
            } => Some(RejectReason::InsufficientStock {
                requested: *requested,
                remaining: *remaining,
            }),
            CatalogError::NotFound(_) => Some(RejectReason::NotFound),
            CatalogError::Validation(msg) => Some(RejectReason::Invalid(msg.clone())),
            CatalogError::DurabilityFailure { .. }
            | CatalogError::ActorCommunicationError(_)
            | CatalogError::OutcomeUnknown(_) => None,
        }
    }
}

/// What happened to one line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Stock decremented and sale recorded.
    Committed(SaleReceipt),
    /// Refused on business grounds; nothing changed.
    Rejected(RejectReason),
    /// Operational failure. For a durability failure that was not rolled back the
    /// stock may have moved.
    Failed(CatalogError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineResult {
    pub line: CheckoutLine,
    pub outcome: LineOutcome,
}

/// Per-line results, in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutReport {
    pub lines: Vec<LineResult>,
}

impl CheckoutReport {
    pub fn receipts(&self) -> impl Iterator<Item = &SaleReceipt> {
        self.lines.iter().filter_map(|r| match &r.outcome {
            LineOutcome::Committed(receipt) => Some(receipt),
            _ => None,
        })
    }

    pub fn rejected(&self) -> impl Iterator<Item = (&CheckoutLine, &RejectReason)> {
        self.lines.iter().filter_map(|r| match &r.outcome {
            LineOutcome::Rejected(reason) => Some((&r.line, reason)),
            _ => None,
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = (&CheckoutLine, &CatalogError)> {
        self.lines.iter().filter_map(|r| match &r.outcome {
            LineOutcome::Failed(e) => Some((&r.line, e)),
            _ => None,
        })
    }

    pub fn committed_count(&self) -> usize {
        self.receipts().count()
    }

    pub fn is_complete(&self) -> bool {
        self.committed_count() == self.lines.len()
    }
}

/// Runs checkouts against the catalog.
#[derive(Clone)]
pub struct Checkout {
    catalog: CatalogClient,
}

impl Checkout {
    pub fn new(catalog: CatalogClient) -> Self {
        Self { catalog }
    }

    /// Commits each line in order. Always returns a report; per-line errors live inside it.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn submit(&self, lines: &[CheckoutLine]) -> CheckoutReport {
        let mut report = CheckoutReport::default();

        for &line in lines {
            let outcome = match self.catalog.sell(line.item_id, line.quantity).await {
                Ok(receipt) => LineOutcome::Committed(receipt),
                Err(e) => match RejectReason::classify(&e) {
                    Some(reason) => {
                        warn!(item_id = %line.item_id, requested = line.quantity, %reason, "Checkout line rejected");
                        LineOutcome::Rejected(reason)
                    }
                    None => {
                        warn!(item_id = %line.item_id, error = %e, "Checkout line failed");
                        LineOutcome::Failed(e)
                    }
                },
            };
            report.lines.push(LineResult { line, outcome });
        }

        info!(
            committed = report.committed_count(),
            total = report.lines.len(),
            "Checkout finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_become_user_facing_reasons() {
        let sold = CatalogError::AlreadySold {
            id: ItemId(1),
            remaining: 0,
        };
        assert_eq!(RejectReason::classify(&sold), Some(RejectReason::SoldOut));

        let short = CatalogError::StockInsufficient {
            id: ItemId(1),
            requested: 4,
            remaining: 2,
        };
        let reason = RejectReason::classify(&short).unwrap();
        assert_eq!(reason.to_string(), "only 2 left in stock");
    }

    #[test]
    fn operational_errors_are_not_rejections() {
        let durability = CatalogError::DurabilityFailure {
            id: ItemId(1),
            quantity: 1,
            rolled_back: false,
            reason: "timeout".into(),
        };
        assert_eq!(RejectReason::classify(&durability), None);
        assert_eq!(
            RejectReason::classify(&CatalogError::ActorCommunicationError("closed".into())),
            None
        );
        assert_eq!(
            RejectReason::classify(&CatalogError::OutcomeUnknown("reply lost".into())),
            None
        );
    }

    #[test]
    fn empty_report_is_complete() {
        let report = CheckoutReport::default();
        assert!(report.is_complete());
        assert_eq!(report.committed_count(), 0);
    }
}
