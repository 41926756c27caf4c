//! # Stockroom demo
//!
//! Stocks a few items, races concurrent buyers for a unique piece, reloads a cart saved
//! before the rush, checks it out, and prints the sales aggregate and per-item audit.

use rust_decimal::Decimal;
use stockroom::cart::Cart;
use stockroom::checkout::LineOutcome;
use stockroom::config::StockroomConfig;
use stockroom::error::StockroomError;
use stockroom::lifecycle::{setup_tracing, Stockroom};
use stockroom::model::CatalogItemCreate;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), StockroomError> {
    let config = match std::env::var("STOCKROOM_CONFIG") {
        Ok(path) => StockroomConfig::load(path)?,
        Err(_) => StockroomConfig::default(),
    };
    setup_tracing(&config.logging);

    info!("Starting stockroom demo");
    let stockroom = Stockroom::new(&config);

    let painting = stockroom
        .catalog
        .create_item(
            CatalogItemCreate::unique("Harbour at dusk, oil on board", Decimal::new(48000, 2))
                .with_category("paintings"),
        )
        .await?;
    let prints = stockroom
        .catalog
        .create_item(
            CatalogItemCreate::unique("Harbour at dusk, giclee print", Decimal::new(4500, 2))
                .with_category("prints")
                .with_stock(3),
        )
        .await?;

    // A shopper fills a cart and leaves; the client keeps it.
    let mut cart = Cart::new();
    cart.add(&stockroom.catalog.item(painting).await?, 1);
    cart.add(&stockroom.catalog.item(prints).await?, 5);
    let persisted = cart.to_json()?;
    info!(lines = cart.len(), total = %cart.total(), "Cart saved");

    // Five buyers, one painting.
    let span = tracing::info_span!("rush");
    let buyers: Vec<_> = (1..=5)
        .map(|buyer| {
            let catalog = stockroom.catalog.clone();
            tokio::spawn(
                async move { (buyer, catalog.sell(painting, 1).await) }.instrument(span.clone()),
            )
        })
        .collect();
    for buyer in buyers {
        match buyer.await {
            Ok((buyer, Ok(receipt))) => {
                info!(buyer, sale_id = %receipt.sale_id, "Bought the painting")
            }
            Ok((buyer, Err(e))) => warn!(buyer, error = %e, "Missed the painting"),
            Err(e) => warn!(error = %e, "Buyer task failed"),
        }
    }

    // The shopper comes back.
    let (mut session, on_load) = stockroom.session(&persisted).await?;
    info!(
        removed = on_load.removed,
        adjusted = on_load.adjusted,
        "Saved cart reconciled"
    );

    let span = tracing::info_span!("checkout");
    let result = async { session.checkout().await }.instrument(span).await?;
    for line in &result.report.lines {
        let item_id = line.line.item_id;
        match &line.outcome {
            LineOutcome::Committed(receipt) => {
                info!(%item_id, remaining = receipt.item.stock(), "Line committed")
            }
            LineOutcome::Rejected(reason) => info!(%item_id, %reason, "Line rejected"),
            LineOutcome::Failed(e) => warn!(%item_id, error = %e, "Line failed"),
        }
    }

    let summary = stockroom.sales.summary().await?;
    info!(
        transactions = summary.total_transactions,
        units = summary.total_units,
        revenue = %summary.total_revenue,
        "Sales aggregate"
    );
    for id in [painting, prints] {
        info!(audit = %stockroom.audit(id).await?, "Audit");
    }

    drop(session);
    stockroom.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}
