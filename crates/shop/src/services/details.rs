//! Product details screen state.
//!
//! Composes catalog access (the product itself, placeholder when missing)
//! with the per-user liked and in-cart flags. The liked toggle is
//! optimistic: the flag flips locally and the marker write joins a pending
//! log replayed on the next load or explicit flush.

use std::collections::VecDeque;

use cartwheel_core::{ProductId, UserId};
use tracing::instrument;

use crate::models::Product;
use crate::repo::{CatalogRepository, RepositoryError, UserRepository};

use super::FetchState;
use super::wishlist::{LikedWrite, replay_liked};

/// State holder for the product details screen.
pub struct ProductDetailsState {
    users: UserRepository,
    catalog: CatalogRepository,
    state: FetchState,
    product: Product,
    liked: bool,
    in_cart: bool,
    added_notice: bool,
    pending: VecDeque<LikedWrite>,
}

impl ProductDetailsState {
    /// Create a details state holder.
    #[must_use]
    pub fn new(users: UserRepository, catalog: CatalogRepository) -> Self {
        Self {
            users,
            catalog,
            state: FetchState::Idle,
            product: Product::placeholder(),
            liked: false,
            in_cart: false,
            added_notice: false,
            pending: VecDeque::new(),
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

    /// The displayed product; a placeholder (empty id) when the id did not
    /// resolve.
    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Whether the user has liked this product (optimistic local value).
    #[must_use]
    pub fn is_liked(&self) -> bool {
        self.liked
    }

    /// Whether a cart record exists for this product.
    #[must_use]
    pub fn in_cart(&self) -> bool {
        self.in_cart
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

    /// Number of local liked toggles not yet persisted.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Load the product and its per-user flags.
    ///
    /// Replays pending liked toggles first so the flags read back what the
    /// user last chose.
    #[instrument(skip(self))]
    pub async fn load(&mut self, user_id: &UserId, product_id: &ProductId) {
        self.state = FetchState::Loading;
        match self.load_inner(user_id, product_id).await {
            Ok(()) => self.state = FetchState::Success,
            Err(e) => self.state = FetchState::Error(e.to_string()),
        }
    }

    async fn load_inner(
        &mut self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<(), RepositoryError> {
        replay_liked(&self.users, user_id, &mut self.pending).await?;
        self.product = self.catalog.product_by_id(product_id).await?;
        self.liked = self.users.is_liked(user_id, product_id).await?;
        self.in_cart = self.users.is_in_cart(user_id, product_id).await?;
        Ok(())
    }

    /// Flip the liked flag.
    ///
    /// The flip is local and immediate; the marker write is queued and
    /// replayed on the next [`ProductDetailsState::load`] or
    /// [`ProductDetailsState::flush_liked`].
    pub fn toggle_liked(&mut self, product_id: &ProductId) {
        self.liked = !self.liked;
        let write = if self.liked {
            LikedWrite::Like(product_id.clone())
        } else {
            LikedWrite::Unlike(product_id.clone())
        };
        self.pending.push_back(write);
    }

    /// Replay pending liked toggles against the store.
    ///
    /// # Errors
    ///
    /// Stops at the first failing write and returns its error; the failed
    /// write and everything behind it stay queued.
    pub async fn flush_liked(&mut self, user_id: &UserId) -> Result<(), RepositoryError> {
        replay_liked(&self.users, user_id, &mut self.pending).await
    }

    /// Put the product into the cart.
    ///
    /// Creates the cart record if absent, marks the product as in-cart,
    /// and raises the one-shot added notice.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&mut self, user_id: &UserId, product_id: &ProductId) {
        self.state = FetchState::Loading;
        match self.users.add_to_cart(user_id, product_id).await {
            Ok(()) => {
                self.in_cart = true;
                self.state = FetchState::Success;
                self.added_notice = true;
            }
            Err(e) => self.state = FetchState::Error(e.to_string()),
        }
    }
}
