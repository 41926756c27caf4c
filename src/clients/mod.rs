//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each client validates input before anything is sent and maps
//! [`FrameworkError`](actor_framework::FrameworkError) into its actor's own error type.

pub mod catalog_client;
pub mod sales_client;

pub use catalog_client::*;
pub use sales_client::*;
