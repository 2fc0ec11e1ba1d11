//! User repository: profile, wishlist markers, and cart records.

use std::sync::Arc;

use cartwheel_core::{ProductId, UserId};
use tracing::instrument;

use crate::models::{CartItem, LikedItem, UserProfile};
use crate::store::{DocumentStore, paths};

use super::RepositoryError;

/// Repository for per-user document operations.
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Fetch a user's profile, or the default profile if none exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the fetch fails.
    #[instrument(skip(self))]
    pub async fn profile(&self, user_id: &UserId) -> Result<UserProfile, RepositoryError> {
        let Some(document) = self.store.get(paths::USERS, user_id.as_str()).await? else {
            return Ok(UserProfile::default());
        };

        Ok(serde_json::from_value(document).unwrap_or_else(|e| {
            tracing::warn!(%user_id, error = %e, "undeserializable profile document");
            UserProfile::default()
        }))
    }

    /// Create or overwrite a profile document (last write wins).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the write fails.
    #[instrument(skip(self, profile), fields(user_id = %profile.id))]
    pub async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
        let document = serde_json::to_value(profile)?;
        self.store
            .set(paths::USERS, profile.id.as_str(), document)
            .await?;
        Ok(())
    }

    // =========================================================================
    // Wishlist markers
    // =========================================================================

    /// List the product ids with a liked marker.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the listing fails.
    #[instrument(skip(self))]
    pub async fn liked_ids(&self, user_id: &UserId) -> Result<Vec<ProductId>, RepositoryError> {
        let documents = self.store.list_all(&paths::liked(user_id)).await?;
        Ok(documents
            .into_iter()
            .filter_map(
                |document| match serde_json::from_value::<LikedItem>(document) {
                    Ok(marker) => Some(marker.product_id),
                    Err(e) => {
                        tracing::warn!(%user_id, error = %e, "skipping undeserializable liked marker");
                        None
                    }
                },
            )
            .collect())
    }

    /// Place a liked marker.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the write fails.
    #[instrument(skip(self))]
    pub async fn add_liked(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<(), RepositoryError> {
        let marker = serde_json::to_value(LikedItem::new(product_id.clone()))?;
        self.store
            .set(&paths::liked(user_id), product_id.as_str(), marker)
            .await?;
        Ok(())
    }

    /// Remove a liked marker; removing an absent marker succeeds.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the delete fails.
    #[instrument(skip(self))]
    pub async fn remove_liked(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<(), RepositoryError> {
        self.store
            .delete(&paths::liked(user_id), product_id.as_str())
            .await?;
        Ok(())
    }

    /// Whether a liked marker exists.
    ///
    /// A blank product id is `false` immediately, with no remote call.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the existence check fails.
    #[instrument(skip(self))]
    pub async fn is_liked(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<bool, RepositoryError> {
        if product_id.is_blank() {
            return Ok(false);
        }
        let document = self
            .store
            .get(&paths::liked(user_id), product_id.as_str())
            .await?;
        Ok(document.is_some())
    }

    // =========================================================================
    // Cart records
    // =========================================================================

    /// List a user's cart records.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the listing fails.
    #[instrument(skip(self))]
    pub async fn cart_items(&self, user_id: &UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let documents = self.store.list_all(&paths::cart(user_id)).await?;
        Ok(documents
            .into_iter()
            .filter_map(
                |document| match serde_json::from_value::<CartItem>(document) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        tracing::warn!(%user_id, error = %e, "skipping undeserializable cart record");
                        None
                    }
                },
            )
            .collect())
    }

    /// Whether a cart record exists for a product.
    ///
    /// A blank product id is `false` immediately, with no remote call.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the existence check fails.
    #[instrument(skip(self))]
    pub async fn is_in_cart(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<bool, RepositoryError> {
        if product_id.is_blank() {
            return Ok(false);
        }
        let document = self
            .store
            .get(&paths::cart(user_id), product_id.as_str())
            .await?;
        Ok(document.is_some())
    }

    /// Create a cart record with quantity one if none exists.
    ///
    /// Re-adding a product already in the cart leaves its quantity alone;
    /// the local merged view only picks the record up on the next refresh.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the check or write fails.
    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<(), RepositoryError> {
        if self.is_in_cart(user_id, product_id).await? {
            return Ok(());
        }
        let record = serde_json::to_value(CartItem::new(product_id.clone()))?;
        self.store
            .set(&paths::cart(user_id), product_id.as_str(), record)
            .await?;
        Ok(())
    }

    /// Delete a cart record; deleting an absent record succeeds.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the delete fails.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<(), RepositoryError> {
        self.store
            .delete(&paths::cart(user_id), product_id.as_str())
            .await?;
        Ok(())
    }

    /// Overwrite a cart record with a pre-computed quantity.
    ///
    /// The single remote primitive behind both increment and decrement:
    /// the state holder owns the arithmetic, the store only sees the
    /// resulting record (last write wins).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the write fails.
    #[instrument(skip(self, item), fields(product_id = %item.product_id, quantity = %item.quantity))]
    pub async fn set_cart_quantity(
        &self,
        user_id: &UserId,
        item: &CartItem,
    ) -> Result<(), RepositoryError> {
        let record = serde_json::to_value(item)?;
        self.store
            .set(&paths::cart(user_id), item.product_id.as_str(), record)
            .await?;
        Ok(())
    }
}
