//! Cart screen state: the reconciliation engine.
//!
//! Maintains a consistent merged view of a user's cart and exposes
//! mutation operations that apply locally first and persist through an
//! explicit pending-write log. The log is replayed in order at the start
//! of every [`CartState::refresh`] (or via [`CartState::flush`]), so
//! local/remote divergence is bounded by the log and observable through
//! [`CartState::pending_writes`] rather than silent.

use std::collections::{HashSet, VecDeque};

use cartwheel_core::{ProductId, UserId};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::models::cart::{merge, total_cost};
use crate::models::{CartItem, MergedCartEntry, Product};
use crate::repo::{CatalogRepository, RepositoryError, UserRepository};

use super::FetchState;

/// A locally applied cart mutation awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingWrite {
    /// Overwrite the cart record with a pre-computed quantity.
    SetQuantity(CartItem),
}

/// State holder for the cart screen.
pub struct CartState {
    users: UserRepository,
    catalog: CatalogRepository,
    state: FetchState,
    products: Vec<Product>,
    items: Vec<CartItem>,
    merged: Vec<MergedCartEntry>,
    total: Decimal,
    pending: VecDeque<PendingWrite>,
    removed_notice: bool,
}

impl CartState {
    /// Create a cart state holder.
    #[must_use]
    pub fn new(users: UserRepository, catalog: CatalogRepository) -> Self {
        Self {
            users,
            catalog,
            state: FetchState::Idle,
            products: Vec::new(),
            items: Vec::new(),
            merged: Vec::new(),
            total: Decimal::ZERO,
            pending: VecDeque::new(),
            removed_notice: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current fetch status.
    #[must_use]
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// The merged cart view: one entry per product with a cart record.
    #[must_use]
    pub fn merged(&self) -> &[MergedCartEntry] {
        &self.merged
    }

    /// Sum of `price * quantity` over the merged view.
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        self.total
    }

    /// Number of local mutations not yet persisted.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    /// One-shot flag raised after a removal completes.
    #[must_use]
    pub fn removed_notice(&self) -> bool {
        self.removed_notice
    }

    /// Consume the removal notice.
    pub fn acknowledge_removed(&mut self) {
        self.removed_notice = false;
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Reload both source lists and recompute the merged view.
    ///
    /// Fails fast with no remote call when the user id is blank. Replays
    /// the pending-write log first, then fetches the cart records and the
    /// catalog concurrently, keeping only products with a cart record.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self, user_id: &UserId) {
        if user_id.is_blank() {
            self.state = FetchState::Error("User ID not available".to_string());
            return;
        }
        self.state = FetchState::Loading;

        if let Err(e) = self.flush(user_id).await {
            self.state = FetchState::Error(e.to_string());
            return;
        }

        let (items, products) = tokio::join!(
            self.users.cart_items(user_id),
            self.catalog.all_products()
        );

        match (items, products) {
            (Ok(items), Ok(all_products)) => {
                let in_cart: HashSet<&ProductId> =
                    items.iter().map(|item| &item.product_id).collect();
                self.products = all_products
                    .into_iter()
                    .filter(|product| in_cart.contains(&product.id))
                    .collect();
                self.items = items;
                self.recompute();
                self.state = FetchState::Success;
            }
            (Err(e), _) | (_, Err(e)) => self.state = FetchState::Error(e.to_string()),
        }
    }

    /// Add one to a cart line.
    ///
    /// No-op when the product has no local cart record - adding to the
    /// cart is a separate explicit operation. The merged view updates
    /// immediately; persistence goes through the pending-write log.
    pub fn increment(&mut self, product_id: &ProductId) {
        let Some(item) = self
            .items
            .iter_mut()
            .find(|item| &item.product_id == product_id)
        else {
            return;
        };
        item.quantity = item.quantity.increment();
        let updated = item.clone();
        self.pending.push_back(PendingWrite::SetQuantity(updated));
        self.recompute();
    }

    /// Take one from a cart line.
    ///
    /// Only applies above quantity one - a line never reaches zero through
    /// decrement; removal is a separate explicit operation.
    pub fn decrement(&mut self, product_id: &ProductId) {
        let Some(item) = self
            .items
            .iter_mut()
            .find(|item| &item.product_id == product_id)
        else {
            return;
        };
        let Some(next) = item.quantity.decrement() else {
            return;
        };
        item.quantity = next;
        let updated = item.clone();
        self.pending.push_back(PendingWrite::SetQuantity(updated));
        self.recompute();
    }

    /// Replay the pending-write log against the store, oldest first.
    ///
    /// # Errors
    ///
    /// Stops at the first failing write and returns its error; the failed
    /// write and everything behind it stay queued for the next replay.
    #[instrument(skip(self), fields(pending = self.pending.len()))]
    pub async fn flush(&mut self, user_id: &UserId) -> Result<(), RepositoryError> {
        while let Some(write) = self.pending.front() {
            match write {
                PendingWrite::SetQuantity(item) => {
                    self.users.set_cart_quantity(user_id, item).await?;
                }
            }
            self.pending.pop_front();
        }
        Ok(())
    }

    /// Remove a product from the cart.
    ///
    /// Deletes the remote record (idempotent: an absent record deletes
    /// successfully), refreshes, and raises the one-shot removal notice
    /// for the presentation layer to consume via
    /// [`CartState::acknowledge_removed`].
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&mut self, user_id: &UserId, product_id: &ProductId) {
        self.state = FetchState::Loading;

        if let Err(e) = self.users.remove_from_cart(user_id, product_id).await {
            self.state = FetchState::Error(e.to_string());
            return;
        }

        self.refresh(user_id).await;
        self.removed_notice = true;
    }

    fn recompute(&mut self) {
        self.merged = merge(&self.products, &self.items);
        self.total = total_cost(&self.merged);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use cartwheel_core::Quantity;
    use serde_json::json;

    use crate::store::{DocumentStore, MemoryStore, paths};

    use super::*;

    fn user() -> UserId {
        UserId::new("u-1")
    }

    async fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        for (id, price) in [("p-1", "10"), ("p-2", "5"), ("p-3", "2.50")] {
            store
                .seed(
                    paths::PRODUCTS,
                    id,
                    &json!({"id": id, "title": format!("Product {id}"), "price": price}),
                )
                .await
                .unwrap();
        }
        store
    }

    fn cart_state(store: &Arc<MemoryStore>) -> CartState {
        let store: Arc<dyn DocumentStore> = store.clone();
        CartState::new(
            UserRepository::new(Arc::clone(&store)),
            CatalogRepository::new(store),
        )
    }

    async fn seed_cart(store: &MemoryStore, product_id: &str, quantity: u32) {
        store
            .seed(
                &paths::cart(&user()),
                product_id,
                &json!({"productId": product_id, "quantity": quantity}),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_refresh_blank_user_makes_no_remote_calls() {
        let store = seeded_store().await;
        let mut cart = cart_state(&store);

        cart.refresh(&UserId::default()).await;

        assert_eq!(
            cart.state(),
            &FetchState::Error("User ID not available".to_string())
        );
        assert_eq!(store.remote_calls(), 0);
    }

    #[tokio::test]
    async fn test_refresh_merges_and_totals() {
        let store = seeded_store().await;
        seed_cart(&store, "p-1", 2).await;
        seed_cart(&store, "p-2", 3).await;

        let mut cart = cart_state(&store);
        cart.refresh(&user()).await;

        assert!(cart.state().is_success());
        assert_eq!(cart.merged().len(), 2);
        assert_eq!(cart.total_cost(), Decimal::from(35));
    }

    #[tokio::test]
    async fn test_refresh_drops_cart_records_without_product() {
        let store = seeded_store().await;
        seed_cart(&store, "p-1", 1).await;
        seed_cart(&store, "p-gone", 4).await;

        let mut cart = cart_state(&store);
        cart.refresh(&user()).await;

        assert_eq!(cart.merged().len(), 1);
        assert_eq!(
            cart.merged().first().unwrap().product.id,
            ProductId::new("p-1")
        );
    }

    #[tokio::test]
    async fn test_refresh_surfaces_store_failure() {
        let store = seeded_store().await;
        seed_cart(&store, "p-1", 1).await;
        store.fail_with("connection refused");

        let mut cart = cart_state(&store);
        cart.refresh(&user()).await;

        assert_eq!(
            cart.state(),
            &FetchState::Error("store unavailable: connection refused".to_string())
        );
    }

    #[tokio::test]
    async fn test_increment_then_decrement_restores_quantity() {
        let store = seeded_store().await;
        seed_cart(&store, "p-1", 2).await;

        let mut cart = cart_state(&store);
        cart.refresh(&user()).await;

        let product_id = ProductId::new("p-1");
        cart.increment(&product_id);
        cart.decrement(&product_id);

        let entry = cart.merged().first().unwrap();
        assert_eq!(entry.item.quantity, Quantity::new(2).unwrap());
        // Both mutations are queued for replay.
        assert_eq!(cart.pending_writes(), 2);
    }

    #[tokio::test]
    async fn test_increment_without_record_is_noop() {
        let store = seeded_store().await;
        seed_cart(&store, "p-1", 1).await;

        let mut cart = cart_state(&store);
        cart.refresh(&user()).await;

        cart.increment(&ProductId::new("p-9"));
        assert_eq!(cart.pending_writes(), 0);
        assert_eq!(cart.merged().len(), 1);
    }

    #[tokio::test]
    async fn test_decrement_never_reaches_zero() {
        let store = seeded_store().await;
        seed_cart(&store, "p-1", 1).await;

        let mut cart = cart_state(&store);
        cart.refresh(&user()).await;

        cart.decrement(&ProductId::new("p-1"));
        assert_eq!(cart.pending_writes(), 0);
        assert_eq!(
            cart.merged().first().unwrap().item.quantity,
            Quantity::ONE
        );
    }

    #[tokio::test]
    async fn test_flush_replays_log_in_order() {
        let store = seeded_store().await;
        seed_cart(&store, "p-1", 1).await;

        let mut cart = cart_state(&store);
        cart.refresh(&user()).await;

        let product_id = ProductId::new("p-1");
        cart.increment(&product_id);
        cart.increment(&product_id);
        cart.flush(&user()).await.unwrap();

        assert_eq!(cart.pending_writes(), 0);
        let record = store.peek(&paths::cart(&user()), "p-1").await.unwrap();
        assert_eq!(record["quantity"], 3);
    }

    #[tokio::test]
    async fn test_flush_failure_keeps_log_queued() {
        let store = seeded_store().await;
        seed_cart(&store, "p-1", 1).await;

        let mut cart = cart_state(&store);
        cart.refresh(&user()).await;

        cart.increment(&ProductId::new("p-1"));
        store.fail_with("timeout");
        assert!(cart.flush(&user()).await.is_err());
        assert_eq!(cart.pending_writes(), 1);

        store.clear_failure();
        cart.flush(&user()).await.unwrap();
        assert_eq!(cart.pending_writes(), 0);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent_and_raises_notice_once() {
        let store = seeded_store().await;
        seed_cart(&store, "p-1", 1).await;

        let mut cart = cart_state(&store);
        cart.refresh(&user()).await;

        let product_id = ProductId::new("p-1");
        cart.remove_from_cart(&user(), &product_id).await;
        assert!(cart.merged().is_empty());
        assert!(cart.removed_notice());

        cart.acknowledge_removed();
        assert!(!cart.removed_notice());

        // Second removal of an already-absent record: same state, no crash.
        cart.remove_from_cart(&user(), &product_id).await;
        assert!(cart.state().is_success());
        assert!(cart.merged().is_empty());
    }
}
