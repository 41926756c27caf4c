use crate::audit::AuditReport;
use crate::availability::AvailabilityOracle;
use crate::cart::{ReconcileReport, ShopperSession};
use crate::catalog_actor::{self, CatalogError, CommitContext};
use crate::checkout::Checkout;
use crate::clients::{CatalogClient, SalesClient};
use crate::config::StockroomConfig;
use crate::error::StockroomError;
use crate::model::ItemId;
use crate::sales_actor;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// A running stockroom: the catalog actor (stock ledger and commit protocol) and the
/// sales actor (sale record store), wired together.
///
/// The catalog actor's context holds a [`SalesClient`], so every committed sale is
/// appended to the store before the catalog moves on to its next request.
///
/// # Example
///
/// ```rust
/// use stockroom::config::StockroomConfig;
/// use stockroom::lifecycle::Stockroom;
/// use stockroom::model::CatalogItemCreate;
/// use rust_decimal::Decimal;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let stockroom = Stockroom::new(&StockroomConfig::default());
///
///     let id = stockroom
///         .catalog
///         .create_item(CatalogItemCreate::unique("Walnut stool", Decimal::new(120, 0)))
///         .await?;
///     stockroom.catalog.sell(id, 1).await?;
///
///     assert_eq!(stockroom.sales.summary().await?.total_units, 1);
///     assert!(stockroom.audit(id).await?.is_balanced());
///
///     stockroom.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct Stockroom {
    /// Client for the catalog actor.
    pub catalog: CatalogClient,

    /// Client for the sales actor.
    pub sales: SalesClient,

    /// Catalog first: its context owns a sales client, so the sales actor only stops
    /// after the catalog actor has.
    handles: Vec<JoinHandle<()>>,
}

impl Stockroom {
    /// Spawns both actors. Must be called inside a Tokio runtime.
    pub fn new(config: &StockroomConfig) -> Self {
        let (sales_actor, sales) = sales_actor::new(config.actors.sales_buffer);
        let (catalog_actor, catalog) = catalog_actor::new(config.actors.catalog_buffer);

        let sales_handle = tokio::spawn(sales_actor.run(()));
        let catalog_handle = tokio::spawn(catalog_actor.run(CommitContext::new(
            sales.clone(),
            config.commit.append_timeout(),
        )));

        info!(
            append_timeout_ms = config.commit.append_timeout_ms,
            "Stockroom started"
        );

        Self {
            catalog,
            sales,
            handles: vec![catalog_handle, sales_handle],
        }
    }

    pub fn oracle(&self) -> AvailabilityOracle {
        AvailabilityOracle::new(self.catalog.clone())
    }

    pub fn checkout(&self) -> Checkout {
        Checkout::new(self.catalog.clone())
    }

    /// Opens a shopper session from a persisted cart (reconciled on load).
    pub async fn session(
        &self,
        persisted: &str,
    ) -> Result<(ShopperSession, ReconcileReport), CatalogError> {
        ShopperSession::load(persisted, self.oracle(), self.checkout()).await
    }

    /// Checks that every issued unit of an item is accounted for.
    pub async fn audit(&self, id: ItemId) -> Result<AuditReport, StockroomError> {
        let report = self.catalog.audit(id).await?;
        if !report.is_balanced() {
            warn!(item_id = %id, discrepancy = report.discrepancy(), "Audit unbalanced");
        }
        Ok(report)
    }

    /// Drops both clients and waits for the actors to drain and stop.
    ///
    /// Clones of the clients held elsewhere keep their actor alive; drop them first.
    pub async fn shutdown(self) -> Result<(), StockroomError> {
        info!("Shutting down stockroom...");
        drop(self.catalog);
        drop(self.sales);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("Stockroom shutdown complete.");
        Ok(())
    }
}
