//! Product catalog types.

use cartwheel_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product.
///
/// Immutable once fetched; owned by catalog access and read-only to every
/// other component. Documents missing fields deserialize with defaults, so
/// partially-written records never fail a whole listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Non-negative price in the shop currency.
    pub price: Decimal,
    pub rating: Rating,
}

impl Product {
    /// The zero-valued stand-in returned where a product id does not
    /// resolve. Callers treat the empty id as the "not found" signal;
    /// there is deliberately no error path for a missing product.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Whether this is the not-found stand-in.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.id.is_blank()
    }
}

/// Aggregate product rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rating {
    pub rate: Decimal,
    pub count: u32,
}
