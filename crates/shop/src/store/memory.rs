//! In-memory document store for tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tokio::sync::Mutex;

use async_trait::async_trait;

use super::{DocumentStore, StoreError};

/// In-memory [`DocumentStore`] with call counters and failure injection.
///
/// Counters track remote round-trips so tests can assert that an operation
/// made zero calls. Seeding via [`MemoryStore::seed`] bypasses the
/// counters.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, BTreeMap<String, Value>>>,
    /// Remote `get` round-trips.
    pub get_calls: AtomicU64,
    /// Remote `set` round-trips.
    pub set_calls: AtomicU64,
    /// Remote `delete` round-trips.
    pub delete_calls: AtomicU64,
    /// Remote `list_all` round-trips.
    pub list_calls: AtomicU64,
    failure: std::sync::Mutex<Option<String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total remote round-trips across every operation.
    pub fn remote_calls(&self) -> u64 {
        self.get_calls.load(Ordering::Relaxed)
            + self.set_calls.load(Ordering::Relaxed)
            + self.delete_calls.load(Ordering::Relaxed)
            + self.list_calls.load(Ordering::Relaxed)
    }

    /// Make every subsequent operation fail with the given message.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.lock_failure() = Some(message.into());
    }

    /// Clear a previously injected failure.
    pub fn clear_failure(&self) {
        *self.lock_failure() = None;
    }

    fn lock_failure(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.failure
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match self.lock_failure().as_ref() {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }

    /// Insert a document without counting a remote round-trip.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Parse` if the value cannot be serialized.
    pub async fn seed<T: serde::Serialize>(
        &self,
        collection: &str,
        id: &str,
        document: &T,
    ) -> Result<(), StoreError> {
        let value = serde_json::to_value(document)?;
        self.collections
            .lock()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), value);
        Ok(())
    }

    /// Number of documents currently in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    /// Fetch a document without counting a remote round-trip.
    pub async fn peek(&self, collection: &str, id: &str) -> Option<Value> {
        self.collections
            .lock()
            .await
            .get(collection)
            .and_then(|documents| documents.get(id))
            .cloned()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        self.get_calls.fetch_add(1, Ordering::Relaxed);
        self.check_failure()?;
        Ok(self.peek(collection, id).await)
    }

    async fn set(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError> {
        self.set_calls.fetch_add(1, Ordering::Relaxed);
        self.check_failure()?;
        self.collections
            .lock()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.delete_calls.fetch_add(1, Ordering::Relaxed);
        self.check_failure()?;
        if let Some(documents) = self.collections.lock().await.get_mut(collection) {
            // Absent documents delete successfully.
            documents.remove(id);
        }
        Ok(())
    }

    async fn list_all(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::Relaxed);
        self.check_failure()?;
        Ok(self
            .collections
            .lock()
            .await
            .get(collection)
            .map(|documents| documents.values().cloned().collect())
            .unwrap_or_default())
    }
}
