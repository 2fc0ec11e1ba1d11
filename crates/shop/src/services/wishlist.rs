//! Wishlist screen state.
//!
//! Liked products are marker records: presence means "liked". Toggles are
//! optimistic - the local flag flips first and the marker write lands in a
//! pending log replayed on the owning screen's next load (see
//! [`super::details::ProductDetailsState`] for the toggle itself).

use std::collections::{HashSet, VecDeque};

use cartwheel_core::{ProductId, UserId};
use tracing::instrument;

use crate::models::Product;
use crate::repo::{CatalogRepository, RepositoryError, UserRepository};

use super::FetchState;

/// A locally applied wishlist mutation awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikedWrite {
    /// Place the liked marker.
    Like(ProductId),
    /// Remove the liked marker.
    Unlike(ProductId),
}

/// Replay a pending marker log against the store, oldest first.
///
/// Stops at the first failing write and returns its error; the failed
/// write and everything behind it stay queued for the next replay.
///
/// # Errors
///
/// Returns the first failing write's `RepositoryError`.
pub(crate) async fn replay_liked(
    users: &UserRepository,
    user_id: &UserId,
    pending: &mut VecDeque<LikedWrite>,
) -> Result<(), RepositoryError> {
    while let Some(write) = pending.front() {
        match write {
            LikedWrite::Like(product_id) => users.add_liked(user_id, product_id).await?,
            LikedWrite::Unlike(product_id) => users.remove_liked(user_id, product_id).await?,
        }
        pending.pop_front();
    }
    Ok(())
}

/// State holder for the wishlist screen.
pub struct WishlistState {
    users: UserRepository,
    catalog: CatalogRepository,
    state: FetchState,
    liked: Vec<Product>,
    added_notice: bool,
}

impl WishlistState {
    /// Create a wishlist state holder.
    #[must_use]
    pub fn new(users: UserRepository, catalog: CatalogRepository) -> Self {
        Self {
            users,
            catalog,
            state: FetchState::Idle,
            liked: Vec::new(),
            added_notice: false,
        }
    }

    /// Current fetch status.
    #[must_use]
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Products with a liked marker, as of the last fetch.
    #[must_use]
    pub fn liked_products(&self) -> &[Product] {
        &self.liked
    }

    /// One-shot flag raised after an add-to-cart completes.
    #[must_use]
    pub fn added_notice(&self) -> bool {
        self.added_notice
    }

    /// Consume the added notice.
    pub fn acknowledge_added(&mut self) {
        self.added_notice = false;
    }

    /// Reload the liked product list.
    ///
    /// Lists the marker collection and the catalog concurrently and
    /// resolves liked products by id set in one pass - no per-id fetches.
    #[instrument(skip(self))]
    pub async fn fetch_liked(&mut self, user_id: &UserId) {
        self.state = FetchState::Loading;

        let (ids, products) = tokio::join!(
            self.users.liked_ids(user_id),
            self.catalog.all_products()
        );

        match (ids, products) {
            (Ok(ids), Ok(all_products)) => {
                let liked_ids: HashSet<ProductId> = ids.into_iter().collect();
                self.liked = all_products
                    .into_iter()
                    .filter(|product| liked_ids.contains(&product.id))
                    .collect();
                self.state = FetchState::Success;
            }
            (Err(e), _) | (_, Err(e)) => self.state = FetchState::Error(e.to_string()),
        }
    }

    /// Put a liked product into the cart.
    ///
    /// Creates the cart record if absent and raises the one-shot added
    /// notice; the cart screen picks the record up on its next refresh.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&mut self, user_id: &UserId, product_id: &ProductId) {
        self.state = FetchState::Loading;
        match self.users.add_to_cart(user_id, product_id).await {
            Ok(()) => {
                self.state = FetchState::Success;
                self.added_notice = true;
            }
            Err(e) => self.state = FetchState::Error(e.to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::store::{DocumentStore, MemoryStore, paths};

    use super::*;

    fn user() -> UserId {
        UserId::new("u-1")
    }

    async fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        for id in ["p-1", "p-2", "p-3"] {
            store
                .seed(paths::PRODUCTS, id, &json!({"id": id, "title": id}))
                .await
                .unwrap();
        }
        store
    }

    fn wishlist(store: &Arc<MemoryStore>) -> WishlistState {
        let store: Arc<dyn DocumentStore> = store.clone();
        WishlistState::new(
            UserRepository::new(Arc::clone(&store)),
            CatalogRepository::new(store),
        )
    }

    #[tokio::test]
    async fn test_fetch_liked_resolves_markers_without_per_id_fetches() {
        let store = seeded_store().await;
        for id in ["p-1", "p-3"] {
            store
                .seed(&paths::liked(&user()), id, &json!({"productId": id}))
                .await
                .unwrap();
        }

        let mut state = wishlist(&store);
        state.fetch_liked(&user()).await;

        assert!(state.state().is_success());
        let titles: Vec<&str> = state
            .liked_products()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(titles, vec!["p-1", "p-3"]);
        // One marker listing plus one catalog listing - nothing per-id.
        assert_eq!(store.remote_calls(), 2);
    }

    #[tokio::test]
    async fn test_fetch_liked_surfaces_failure() {
        let store = seeded_store().await;
        store.fail_with("connection refused");

        let mut state = wishlist(&store);
        state.fetch_liked(&user()).await;

        assert!(matches!(state.state(), FetchState::Error(_)));
    }

    #[tokio::test]
    async fn test_add_to_cart_raises_notice_once() {
        let store = seeded_store().await;
        let mut state = wishlist(&store);

        state.add_to_cart(&user(), &ProductId::new("p-2")).await;
        assert!(state.state().is_success());
        assert!(state.added_notice());

        state.acknowledge_added();
        assert!(!state.added_notice());

        assert!(
            store
                .peek(&paths::cart(&user()), "p-2")
                .await
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_replay_liked_applies_in_order() {
        let store = seeded_store().await;
        let shared: Arc<dyn DocumentStore> = store.clone();
        let users = UserRepository::new(shared);

        let product_id = ProductId::new("p-1");
        let mut pending = VecDeque::from([
            LikedWrite::Like(product_id.clone()),
            LikedWrite::Unlike(product_id.clone()),
            LikedWrite::Like(product_id.clone()),
        ]);

        replay_liked(&users, &user(), &mut pending).await.unwrap();
        assert!(pending.is_empty());
        assert!(users.is_liked(&user(), &product_id).await.unwrap());
    }
}
