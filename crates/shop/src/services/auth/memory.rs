//! In-memory auth provider for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use cartwheel_core::UserId;
use uuid::Uuid;

use async_trait::async_trait;

use super::provider::{AuthProvider, ProviderError};

struct Account {
    password: String,
    user_id: UserId,
}

/// In-memory [`AuthProvider`] with call counters and failure injection.
#[derive(Default)]
pub struct MemoryAuthProvider {
    accounts: Mutex<HashMap<String, Account>>,
    current: Mutex<Option<UserId>>,
    /// Remote `sign_in` round-trips.
    pub sign_in_calls: AtomicU64,
    /// Remote `create_user` round-trips.
    pub create_calls: AtomicU64,
    failure: Mutex<Option<String>>,
    delay: Mutex<Option<Duration>>,
}

impl MemoryAuthProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register an account without a remote round-trip; returns its id.
    pub fn register(&self, email: &str, password: &str) -> UserId {
        let user_id = UserId::new(Uuid::new_v4().to_string());
        lock(&self.accounts).insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user_id: user_id.clone(),
            },
        );
        user_id
    }

    /// Total remote round-trips.
    pub fn remote_calls(&self) -> u64 {
        self.sign_in_calls.load(Ordering::Relaxed) + self.create_calls.load(Ordering::Relaxed)
    }

    /// Make every subsequent remote operation fail with the given message.
    pub fn fail_with(&self, message: impl Into<String>) {
        *lock(&self.failure) = Some(message.into());
    }

    /// Clear a previously injected failure.
    pub fn clear_failure(&self) {
        *lock(&self.failure) = None;
    }

    /// Make every subsequent remote operation stall for the given duration
    /// before answering.
    pub fn stall_for(&self, delay: Duration) {
        *lock(&self.delay) = Some(delay);
    }

    async fn maybe_stall(&self) {
        let delay = *lock(&self.delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn check_failure(&self) -> Result<(), ProviderError> {
        match lock(&self.failure).as_ref() {
            Some(message) => Err(ProviderError::new(message.clone())),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    fn current_user(&self) -> Option<UserId> {
        lock(&self.current).clone()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserId, ProviderError> {
        self.sign_in_calls.fetch_add(1, Ordering::Relaxed);
        self.maybe_stall().await;
        self.check_failure()?;

        let user_id = {
            let accounts = lock(&self.accounts);
            let account = accounts
                .get(email)
                .filter(|account| account.password == password)
                .ok_or_else(|| ProviderError::new("invalid email or password"))?;
            account.user_id.clone()
        };

        *lock(&self.current) = Some(user_id.clone());
        Ok(user_id)
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<UserId, ProviderError> {
        self.create_calls.fetch_add(1, Ordering::Relaxed);
        self.maybe_stall().await;
        self.check_failure()?;

        {
            let accounts = lock(&self.accounts);
            if accounts.contains_key(email) {
                return Err(ProviderError::new("email address is already in use"));
            }
        }

        let user_id = self.register(email, password);
        *lock(&self.current) = Some(user_id.clone());
        Ok(user_id)
    }

    fn sign_out(&self) {
        *lock(&self.current) = None;
    }
}
