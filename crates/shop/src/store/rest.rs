//! REST document store client.
//!
//! Talks to the document database over plain HTTP: one URL per document
//! (`{base}/{collection}/{id}`) and one per collection listing. Responses
//! are read as text first so parse failures can be logged with the body.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use async_trait::async_trait;

use crate::config::DocumentStoreConfig;

use super::{DocumentStore, StoreError};

/// Client for the document store REST API.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct RestDocumentStore {
    inner: Arc<RestDocumentStoreInner>,
}

struct RestDocumentStoreInner {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl RestDocumentStore {
    /// Create a new document store client.
    #[must_use]
    pub fn new(config: &DocumentStoreConfig) -> Self {
        Self {
            inner: Arc::new(RestDocumentStoreInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
                api_key: config.api_key.clone(),
            }),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{collection}", self.inner.base_url)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{collection}/{id}", self.inner.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.bearer_auth(self.inner.api_key.expose_secret())
    }

    /// Read a response body, mapping unexpected statuses to `StoreError`.
    async fn read_body(response: reqwest::Response) -> Result<String, StoreError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %truncate(&body),
                "document store returned non-success status"
            );
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                body: truncate(&body),
            });
        }

        Ok(body)
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let response = self
            .authorize(self.inner.client.get(self.document_url(collection, id)))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = Self::read_body(response).await?;
        let document = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(collection, id, error = %e, "failed to parse document");
            StoreError::Parse(e)
        })?;
        Ok(Some(document))
    }

    async fn set(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError> {
        let response = self
            .authorize(self.inner.client.put(self.document_url(collection, id)))
            .json(&document)
            .send()
            .await?;

        Self::read_body(response).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let response = self
            .authorize(self.inner.client.delete(self.document_url(collection, id)))
            .send()
            .await?;

        // Deleting an absent document is a successful no-op.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }

        Self::read_body(response).await?;
        Ok(())
    }

    async fn list_all(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let response = self
            .authorize(self.inner.client.get(self.collection_url(collection)))
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        let documents = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(collection, error = %e, "failed to parse collection listing");
            StoreError::Parse(e)
        })?;
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RestDocumentStore {
        RestDocumentStore::new(&DocumentStoreConfig {
            base_url: "https://docstore.example.com/v1/".to_string(),
            api_key: SecretString::from("key"),
        })
    }

    #[test]
    fn test_url_construction() {
        let store = client();
        assert_eq!(
            store.document_url("users/u-1/cart", "p-2"),
            "https://docstore.example.com/v1/users/u-1/cart/p-2"
        );
        assert_eq!(
            store.collection_url("products"),
            "https://docstore.example.com/v1/products"
        );
    }

    #[test]
    fn test_truncate_caps_body() {
        let long = "x".repeat(500);
        assert_eq!(truncate(&long).len(), 200);
    }
}
