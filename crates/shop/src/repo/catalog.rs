//! Catalog repository: read-only product access.

use std::sync::Arc;

use cartwheel_core::ProductId;
use tracing::instrument;

use crate::models::Product;
use crate::store::{DocumentStore, paths};

use super::RepositoryError;

/// Repository for catalog reads.
pub struct CatalogRepository {
    store: Arc<dyn DocumentStore>,
}

impl CatalogRepository {
    /// Create a new catalog repository.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch the full product list.
    ///
    /// Undeserializable documents are skipped with a log.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the listing fails.
    #[instrument(skip(self))]
    pub async fn all_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let documents = self.store.list_all(paths::PRODUCTS).await?;
        Ok(documents
            .into_iter()
            .filter_map(|document| match serde_json::from_value(document) {
                Ok(product) => Some(product),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping undeserializable product document");
                    None
                }
            })
            .collect())
    }

    /// Fetch a single product by id.
    ///
    /// Returns [`Product::placeholder`] when the id does not resolve or the
    /// document fails to decode - callers treat the placeholder's empty id
    /// as the "not found" signal rather than relying on an error path.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the fetch itself fails.
    #[instrument(skip(self))]
    pub async fn product_by_id(&self, product_id: &ProductId) -> Result<Product, RepositoryError> {
        let Some(document) = self
            .store
            .get(paths::PRODUCTS, product_id.as_str())
            .await?
        else {
            tracing::debug!(%product_id, "no product document");
            return Ok(Product::placeholder());
        };

        Ok(serde_json::from_value(document).unwrap_or_else(|e| {
            tracing::warn!(%product_id, error = %e, "undeserializable product document");
            Product::placeholder()
        }))
    }

    /// Fetch the category list.
    ///
    /// Defined contract with no data source behind it yet; always empty.
    ///
    /// # Errors
    ///
    /// Infallible today; the signature matches the other catalog reads so
    /// callers are ready when a source exists.
    #[allow(clippy::unused_async)]
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(Vec::new())
    }
}
