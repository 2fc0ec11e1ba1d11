//! Document store contract and clients.
//!
//! # Architecture
//!
//! The remote document database is the source of truth for users, products,
//! liked markers, and cart records. It exposes collection/document CRUD
//! with async round-trips and message-only errors - there is no
//! transient/permanent classification, no retries, and no partial-success
//! semantics at this layer.
//!
//! # Collections
//!
//! - `products/{productId}` - catalog, read-only to this crate
//! - `users/{userId}` - profile documents
//! - `users/{userId}/cart/{productId}` - cart records keyed by product id
//! - `users/{userId}/liked/{productId}` - wishlist markers

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestDocumentStore;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with an unexpected status.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The store is unreachable (used by fakes for failure injection).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous CRUD over JSON documents grouped in named collections.
///
/// Implementations must treat `delete` of an absent document as success;
/// cart removal relies on that for idempotence. `get` of an absent
/// document is `Ok(None)`, never an error.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a single document, `None` if absent.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Create or overwrite a document (last write wins).
    async fn set(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError>;

    /// Delete a document; absent documents delete successfully.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// List every document in a collection.
    async fn list_all(&self, collection: &str) -> Result<Vec<Value>, StoreError>;
}

/// Collection path builders.
///
/// Paths mirror the remote layout; per-user collections are nested under
/// the user document.
pub mod paths {
    use cartwheel_core::UserId;

    /// The product catalog collection.
    pub const PRODUCTS: &str = "products";

    /// The user profile collection.
    pub const USERS: &str = "users";

    /// A user's cart collection.
    #[must_use]
    pub fn cart(user_id: &UserId) -> String {
        format!("{USERS}/{user_id}/cart")
    }

    /// A user's wishlist marker collection.
    #[must_use]
    pub fn liked(user_id: &UserId) -> String {
        format!("{USERS}/{user_id}/liked")
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_per_user_paths() {
            let user_id = UserId::new("u-1");
            assert_eq!(cart(&user_id), "users/u-1/cart");
            assert_eq!(liked(&user_id), "users/u-1/liked");
        }
    }
}
