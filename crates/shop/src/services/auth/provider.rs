//! Auth provider contract.

use async_trait::async_trait;
use cartwheel_core::UserId;
use thiserror::Error;

/// A remote auth-provider failure.
///
/// Message-only: the provider contract models no structured error codes
/// and no transient/permanent classification.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    /// Create an error from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The raw provider message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// The remote identity provider.
///
/// Credential storage and verification are delegated entirely to the
/// provider; this crate only sees opaque user ids. `current_user` and
/// `sign_out` operate on the locally cached session and never make a
/// remote round-trip.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The signed-in user, if any. Synchronous local read.
    fn current_user(&self) -> Option<UserId>;

    /// Sign in with existing credentials; establishes the local session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserId, ProviderError>;

    /// Create credentials for a new account; establishes the local session.
    async fn create_user(&self, email: &str, password: &str) -> Result<UserId, ProviderError>;

    /// Clear the local session.
    fn sign_out(&self);
}
