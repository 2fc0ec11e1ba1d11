//! User profile and wishlist marker types.

use cartwheel_core::{ProductId, UserId};
use serde::{Deserialize, Serialize};

/// A user's profile document at `users/{uid}`.
///
/// Owned by the authenticated user and mutated only through explicit
/// profile-update calls. Provisioned with id, email, and username at
/// sign-up; the remaining fields start empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_no: String,
    pub address: String,
    pub profile_picture_url: Option<String>,
}

/// A wishlist marker at `users/{uid}/liked/{pid}`.
///
/// The document's mere existence signals "liked"; it carries no other
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedItem {
    pub product_id: ProductId,
}

impl LikedItem {
    #[must_use]
    pub fn new(product_id: ProductId) -> Self {
        Self { product_id }
    }
}
