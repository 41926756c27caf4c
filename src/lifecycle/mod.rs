//! Wiring, shutdown and observability for a running stockroom.

pub mod stockroom;
pub mod tracing;

pub use stockroom::Stockroom;
pub use self::tracing::setup_tracing;
