//! Plain data carried by the actors: catalog items and sale records, plus their DTOs.

pub mod item;
pub mod sale;

pub use item::*;
pub use sale::*;
