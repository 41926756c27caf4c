//! Crate-level error types.
//!
//! Each actor has its own error enum ([`CatalogError`], [`SaleError`]); this module adds
//! configuration errors and the top-level [`StockroomError`] used at wiring time.

use crate::catalog_actor::CatalogError;
use crate::sales_actor::SaleError;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Top-level error for starting, operating and stopping a [`Stockroom`](crate::lifecycle::Stockroom).
#[derive(Error, Debug)]
pub enum StockroomError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Sales(#[from] SaleError),

    #[error("cart persistence error: {0}")]
    Persist(#[from] serde_json::Error),

    #[error("actor task failed during shutdown: {0}")]
    Shutdown(#[from] tokio::task::JoinError),
}

/// Result type alias using [`StockroomError`].
pub type Result<T> = std::result::Result<T, StockroomError>;
