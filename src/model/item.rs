use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for catalog items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

/// A one-of-a-kind (or few-of-a-kind) entry in the catalog.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
///
/// See [`impl ActorEntity for CatalogItem`](#impl-ActorEntity-for-CatalogItem) for details on:
/// - Creation parameters ([`CatalogItemCreate`])
/// - Update parameters ([`CatalogItemUpdate`])
/// - Custom actions ([`CatalogAction`](crate::catalog_actor::CatalogAction))
///
/// # Stock and sold
/// `stock` is the only mutable quantity. `sold` is never set on its own: every mutation
/// path recomputes it as `stock == 0`. Both fields are therefore read-only outside the
/// crate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    /// Opaque references to stored images.
    pub media: Vec<String>,
    pub(crate) stock: u32,
    pub(crate) sold: bool,
    /// Every unit ever put on sale, including re-listings.
    pub(crate) issued: u64,
    /// Units removed by an administrator rather than sold.
    pub(crate) written_off: u64,
}

impl CatalogItem {
    /// Builds an item from its creation payload.
    ///
    /// Stock defaults to 1. An item created already sold starts with stock 0.
    pub fn new(id: ItemId, params: CatalogItemCreate) -> Self {
        let stock = if params.sold {
            0
        } else {
            params.stock.unwrap_or(1)
        };
        Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            category: params.category,
            media: params.media,
            stock,
            sold: stock == 0,
            issued: u64::from(stock),
            written_off: 0,
        }
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn is_sold(&self) -> bool {
        self.sold
    }

    pub fn issued(&self) -> u64 {
        self.issued
    }

    pub fn written_off(&self) -> u64 {
        self.written_off
    }

    /// True iff `quantity` units could be sold right now.
    pub fn can_supply(&self, quantity: u32) -> bool {
        !self.sold && self.stock >= quantity
    }

    /// True iff the item should appear in the storefront.
    pub fn is_listed(&self) -> bool {
        !self.sold && self.stock > 0
    }

    /// `sold == (stock == 0)`.
    pub fn invariant_holds(&self) -> bool {
        self.sold == (self.stock == 0)
    }
}

/// Payload for creating a new catalog item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogItemCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub media: Vec<String>,
    /// Initial stock; `None` means a unique item (1).
    #[serde(default)]
    pub stock: Option<u32>,
    /// Shorthand for creating an item that is already gone. Forces stock to 0.
    #[serde(default)]
    pub sold: bool,
}

impl CatalogItemCreate {
    /// A unique item with stock 1.
    pub fn unique(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Payload for an administrative edit. Absent fields are left untouched.
///
/// When `stock` is present it is authoritative and `sold` is ignored. When only `sold` is
/// present, `true` sets stock to 0 and `false` re-lists a sold-out item with stock 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub media: Option<Vec<String>>,
    pub stock: Option<u32>,
    pub sold: Option<bool>,
}
