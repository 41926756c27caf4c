#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Stockroom
//!
//! > **Inventory consistency and sale commits for one-of-a-kind stock.**
//!
//! Many shoppers may try to buy the same unique item at the same moment. This crate keeps
//! stock from ever going negative, records every committed unit exactly once, and keeps
//! client-held carts from drifting away from what can actually be bought.
//!
//! ## 🏗️ Design
//!
//! ### One actor per resource collection
//! Built on [`actor_framework`]: each collection is owned by a `ResourceActor` running in
//! its own Tokio task and processing requests one at a time.
//! - The **catalog actor** owns every [`CatalogItem`](model::CatalogItem). Sequential
//!   processing linearizes concurrent sales of the same item; there is no check-then-act
//!   window between reading stock and decrementing it.
//! - The **sales actor** owns the append-only [`SaleRecord`](model::SaleRecord) log.
//!
//! ### The commit is an action
//! [`CatalogClient::sell`](clients::CatalogClient::sell) sends a `Sell` action. The catalog
//! actor decrements stock and appends the sale record (through the [`SalesClient`](clients::SalesClient)
//! injected as its context) before it handles anything else. If the append definitely
//! failed, the decrement is undone. If its outcome is unknown, the decrement is kept and
//! an `error!` event flags the item for reconciliation.
//!
//! ### `sold` is derived
//! `sold == (stock == 0)` after every mutation. No update path accepts `sold` as an
//! independent fact.
//!
//! ### Carts are advisory
//! A [`Cart`](cart::Cart) is reconciled against [`listAvailable`](availability::AvailabilityOracle::list_available)
//! on load, when opened, and right before checkout. Checkout commits each line on its own
//! and reports per line.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`] - items, sale records, ids and DTOs
//! - [`catalog_actor`] - stock ledger and commit protocol
//! - [`sales_actor`] - sale record store
//! - [`clients`] - typed clients for both actors
//! - [`availability`] - single, batch and listing availability queries
//! - [`checkout`] - per-line checkout
//! - [`cart`] - cart, reconciliation and shopper sessions
//! - [`audit`] - unit accounting per item
//! - [`config`], [`error`], [`lifecycle`] - settings, error types, wiring and tracing
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # With a config file
//! STOCKROOM_CONFIG=stockroom.toml cargo run
//! ```

pub mod audit;
pub mod availability;
pub mod cart;
pub mod catalog_actor;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod sales_actor;
