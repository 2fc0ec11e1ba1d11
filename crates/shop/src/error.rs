//! Unified error handling for the shop services.
//!
//! Provides a unified `AppError` type for bootstrap code and embedding
//! applications. Screen-scoped state holders do not return these errors;
//! they surface failures as `Error(message)` state variants (the remote
//! error taxonomy is message-only).

use thiserror::Error;

use crate::config::ConfigError;
use crate::repo::RepositoryError;
use crate::services::auth::ProviderError;
use crate::store::StoreError;

/// Application-level error type for the shop.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Document store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Auth provider operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] ProviderError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
