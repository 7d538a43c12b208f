//! Catalog product and cart line shapes.
//!
//! `CartItem` snapshots the full product rather than referencing it by ID:
//! the persisted bag must survive catalog changes between sessions, and the
//! checkout summary renders from the snapshot alone.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A catalog product.
///
/// Catalog data is static and read-only; the order lifecycle never mutates
/// a `Product`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name (e.g., "Crystal Dew").
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Merchandising category (e.g., "Tinted", "Glitter").
    pub category: String,
    /// Shade name (e.g., "Soft Pink").
    pub shade: String,
    /// Marketing description.
    pub description: String,
    /// Product image URI.
    pub image: String,
    /// Ordered ingredient list.
    pub ingredients: Vec<String>,
}

/// A line in the shopper's bag: a product snapshot plus a quantity.
///
/// Invariant: `quantity >= 1`. Quantity-delta operations clamp at 1;
/// removal is always an explicit action, never a decrement to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Snapshot of the product at the time it was added.
    #[serde(flatten)]
    pub product: Product,
    /// Units of this product in the bag.
    pub quantity: u32,
}

impl CartItem {
    /// Create a new line for a product with quantity 1.
    #[must_use]
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// The product ID this line refers to.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}
