//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a global `tracing-subscriber` for the whole process.
//!
//! `RUST_LOG` wins when set; otherwise the configured level is used as the filter.
//!
//! ```bash
//! # Per-sale detail, including every request sent to an actor
//! RUST_LOG=debug cargo run
//!
//! # Only the commit protocol and durability alerts
//! RUST_LOG=stockroom::catalog_actor=info,warn cargo run
//! ```
//!
//! The `pretty` format is compact and hides module paths (`with_target(false)`); spans show
//! inline, so a sale reads as `checkout:sell: Sale committed item_id=item_1 sale_id=sale_3`.
//! The `json` format emits one object per event for log shippers. Durability failures carry
//! `reconciliation_required=true` in both.

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. A second call is a no-op, so tests can call it freely.
pub fn setup_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init(),
    };

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
