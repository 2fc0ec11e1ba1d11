//! Cart records and the merged cart view.

use cartwheel_core::{ProductId, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Product;

/// A per-user cart record.
///
/// One record per (user, product) pair, keyed by product id within the
/// user's cart collection. Created on first add-to-cart, mutated by
/// increment/decrement, destroyed on removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub quantity: Quantity,
}

impl CartItem {
    /// A fresh cart record with quantity one.
    #[must_use]
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            quantity: Quantity::ONE,
        }
    }
}

/// A derived, non-persisted pairing of a product with its cart record.
///
/// Invariant: `product.id == item.product_id`. Recomputed whenever either
/// source list changes; never written back to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedCartEntry {
    pub product: Product,
    pub item: CartItem,
}

impl MergedCartEntry {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.item.quantity.get())
    }
}

/// Materialize the merged cart view.
///
/// For each product, emit a pair with the cart record whose product id
/// matches. Products without a matching cart record are excluded - they are
/// not zero-quantity entries (defined policy, not a bug).
#[must_use]
pub fn merge(products: &[Product], items: &[CartItem]) -> Vec<MergedCartEntry> {
    products
        .iter()
        .filter_map(|product| {
            items
                .iter()
                .find(|item| item.product_id == product.id)
                .map(|item| MergedCartEntry {
                    product: product.clone(),
                    item: item.clone(),
                })
        })
        .collect()
}

/// Sum of `price * quantity` over a merged view.
#[must_use]
pub fn total_cost(entries: &[MergedCartEntry]) -> Decimal {
    entries.iter().map(MergedCartEntry::line_total).sum()
}
