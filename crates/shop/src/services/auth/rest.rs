//! REST auth provider client.
//!
//! Exchanges credentials with the identity provider over HTTP and caches
//! the signed-in user id locally so `current_user` stays a synchronous
//! read (the session lives for the process lifetime, like the rest of the
//! in-memory view state).

use std::sync::{Arc, Mutex};

use cartwheel_core::UserId;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use async_trait::async_trait;

use crate::config::AuthProviderConfig;

use super::provider::{AuthProvider, ProviderError};

/// Client for the auth provider REST API.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct RestAuthProvider {
    inner: Arc<RestAuthProviderInner>,
}

struct RestAuthProviderInner {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    current: Mutex<Option<UserId>>,
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct SessionResponse {
    #[serde(rename = "userId")]
    user_id: String,
}

impl RestAuthProvider {
    /// Create a new auth provider client.
    #[must_use]
    pub fn new(config: &AuthProviderConfig) -> Self {
        Self {
            inner: Arc::new(RestAuthProviderInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
                api_key: config.api_key.clone(),
                current: Mutex::new(None),
            }),
        }
    }

    /// Post credentials to an endpoint and read back the user id.
    async fn exchange(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId, ProviderError> {
        let response = self
            .inner
            .client
            .post(format!("{}/{endpoint}", self.inner.base_url))
            .bearer_auth(self.inner.api_key.expose_secret())
            .json(&CredentialsBody { email, password })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(endpoint, status = %status, "auth provider returned non-success status");
            return Err(ProviderError::new(format!(
                "HTTP {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let session: SessionResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::new(format!("invalid provider response: {e}")))?;

        let user_id = UserId::new(session.user_id);
        *self.lock_current() = Some(user_id.clone());
        Ok(user_id)
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, Option<UserId>> {
        self.inner
            .current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl AuthProvider for RestAuthProvider {
    fn current_user(&self) -> Option<UserId> {
        self.lock_current().clone()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserId, ProviderError> {
        self.exchange("sessions", email, password).await
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<UserId, ProviderError> {
        self.exchange("accounts", email, password).await
    }

    fn sign_out(&self) {
        *self.lock_current() = None;
    }
}
