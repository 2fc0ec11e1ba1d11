//! Typed repositories over the document store.
//!
//! Services never touch raw JSON documents; these repositories decode
//! store payloads into domain models. Documents that fail to decode are
//! skipped with a log rather than failing the whole listing - the store is
//! remote and a single bad record must not take down a screen.

mod catalog;
mod users;

pub use catalog::CatalogRepository;
pub use users::UserRepository;

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Document store operation failed.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// A document could not be serialized for writing.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
