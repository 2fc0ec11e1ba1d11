//! Session gate: the single authority over authentication state.
//!
//! The gate is the only component permitted to create or destroy a
//! session. Every other service receives the current [`UserId`] as an
//! explicit argument; nothing else reads the provider directly.

mod memory;
mod provider;
mod rest;

pub use memory::MemoryAuthProvider;
pub use provider::{AuthProvider, ProviderError};
pub use rest::RestAuthProvider;

use std::sync::{Arc, Mutex};

use cartwheel_core::{Email, UserId};
use tracing::instrument;

use crate::models::UserProfile;
use crate::repo::UserRepository;
use crate::store::DocumentStore;

/// Process-wide authentication state.
///
/// Transitions only through the [`SessionGate`]: `Loading` leads to any of
/// the other three; `Error` and `Unauthenticated` are retry-capable;
/// `Authenticated` holds until an explicit sign-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Authenticated,
    Unauthenticated,
    Error(String),
}

/// The session gate.
///
/// Tracks whether there is a logged-in user and gates which navigation
/// flow the presentation layer may enter. Shared process-wide; state reads
/// go through [`SessionGate::state`].
pub struct SessionGate {
    provider: Arc<dyn AuthProvider>,
    store: Arc<dyn DocumentStore>,
    state: Mutex<SessionState>,
}

impl SessionGate {
    /// Create a gate and resolve the initial state from the local session.
    #[must_use]
    pub fn new(provider: Arc<dyn AuthProvider>, store: Arc<dyn DocumentStore>) -> Self {
        let gate = Self {
            provider,
            store,
            state: Mutex::new(SessionState::Loading),
        };
        gate.check_status();
        gate
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.lock_state().clone()
    }

    /// The signed-in user id, if any.
    pub fn current_user(&self) -> Option<UserId> {
        self.provider.current_user()
    }

    /// Re-read the local session.
    ///
    /// Synchronous local check; there is no error path.
    pub fn check_status(&self) {
        let next = if self.provider.current_user().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        };
        self.set_state(next);
    }

    /// Sign in with existing credentials.
    ///
    /// Validates non-empty email and password locally (no format or
    /// strength checks for login); a validation failure short-circuits
    /// with no remote call.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) {
        self.set_state(SessionState::Loading);

        if let Err(message) = validate_login(email, password) {
            self.set_state(SessionState::Error(message));
            return;
        }

        match self.provider.sign_in(email, password).await {
            Ok(_) => self.set_state(SessionState::Authenticated),
            Err(e) => self.set_state(SessionState::Error(format!("Sign-in failed: {e}"))),
        }
    }

    /// Create an account and open a session.
    ///
    /// The first validation failure short-circuits with no remote call.
    /// On credential creation the gate transitions to `Authenticated`
    /// immediately; the profile document is provisioned in the background
    /// and is not guaranteed durable when the state flips.
    #[instrument(skip(self, password))]
    pub async fn sign_up(&self, email: &str, password: &str, username: &str) {
        self.set_state(SessionState::Loading);

        if let Err(message) = validate_sign_up(email, password, username) {
            self.set_state(SessionState::Error(message));
            return;
        }

        match self.provider.create_user(email, password).await {
            Ok(user_id) => {
                self.provision_profile(user_id, email, username);
                self.set_state(SessionState::Authenticated);
            }
            Err(e) => self.set_state(SessionState::Error(format!("Sign-up failed: {e}"))),
        }
    }

    /// Close the session.
    ///
    /// Passes through `Loading` so observers can react, then lands in
    /// `Unauthenticated`.
    pub fn sign_out(&self) {
        self.set_state(SessionState::Loading);
        self.provider.sign_out();
        self.set_state(SessionState::Unauthenticated);
    }

    /// Write the initial profile document for a fresh account.
    ///
    /// Fire-and-forget relative to the state transition: the UI unblocks
    /// before the write is durable. Failures are logged, not surfaced.
    fn provision_profile(&self, user_id: UserId, email: &str, username: &str) {
        let users = UserRepository::new(Arc::clone(&self.store));
        let profile = UserProfile {
            id: user_id,
            email: email.to_string(),
            username: username.to_string(),
            ..UserProfile::default()
        };
        tokio::spawn(async move {
            if let Err(e) = users.upsert_profile(&profile).await {
                tracing::warn!(user_id = %profile.id, error = %e, "profile provisioning failed");
            }
        });
    }

    fn set_state(&self, next: SessionState) {
        *self.lock_state() = next;
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Validate login fields. Non-empty checks only.
fn validate_login(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Email can't be empty".to_string());
    }
    if password.trim().is_empty() {
        return Err("Password can't be empty".to_string());
    }
    Ok(())
}

/// Validate sign-up fields, first failure wins.
fn validate_sign_up(email: &str, password: &str, username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username can't be empty".to_string());
    }
    if email.trim().is_empty() {
        return Err("Email can't be empty".to_string());
    }
    if Email::parse(email).is_err() {
        return Err("Invalid email format".to_string());
    }
    if password.trim().is_empty() {
        return Err("Password can't be empty".to_string());
    }
    if password.len() < 6 {
        return Err("Password must be at least 6 characters long".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit".to_string());
    }
    if !password.chars().any(char::is_alphabetic) {
        return Err("Password must contain at least one letter".to_string());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sign_up_order_and_messages() {
        assert_eq!(
            validate_sign_up("a@b.com", "abc123", " "),
            Err("Username can't be empty".to_string())
        );
        assert_eq!(
            validate_sign_up("", "abc123", "bob"),
            Err("Email can't be empty".to_string())
        );
        assert_eq!(
            validate_sign_up("not-an-email", "abc123", "bob"),
            Err("Invalid email format".to_string())
        );
        assert_eq!(
            validate_sign_up("a@b.com", "", "bob"),
            Err("Password can't be empty".to_string())
        );
        assert_eq!(
            validate_sign_up("a@b.com", "abc", "bob"),
            Err("Password must be at least 6 characters long".to_string())
        );
        assert_eq!(
            validate_sign_up("a@b.com", "abcdef", "bob"),
            Err("Password must contain at least one digit".to_string())
        );
        assert_eq!(
            validate_sign_up("a@b.com", "123456", "bob"),
            Err("Password must contain at least one letter".to_string())
        );
        assert_eq!(validate_sign_up("a@b.com", "abc123", "bob"), Ok(()));
    }

    #[test]
    fn test_validate_login_checks_presence_only() {
        assert_eq!(
            validate_login("", "abc123"),
            Err("Email can't be empty".to_string())
        );
        assert_eq!(
            validate_login("a@b.com", "  "),
            Err("Password can't be empty".to_string())
        );
        // No format or strength checks for login.
        assert_eq!(validate_login("not-an-email", "x"), Ok(()));
    }
}
