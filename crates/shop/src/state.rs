//! Application state shared across screens.

use std::sync::Arc;

use crate::config::ShopConfig;
use crate::error::AppError;
use crate::repo::{CatalogRepository, UserRepository};
use crate::services::auth::{AuthProvider, RestAuthProvider, SessionGate};
use crate::services::{
    CartState, CatalogState, ProductDetailsState, ProfileState, WishlistState,
};
use crate::store::{DocumentStore, RestDocumentStore};

/// Application state shared across all screens.
///
/// Cheaply cloneable via `Arc`; owns the store and auth-provider handles
/// and the process-wide [`SessionGate`]. Screen state holders are built
/// fresh per screen from the factory methods and discarded on navigation
/// away.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ShopConfig,
    store: Arc<dyn DocumentStore>,
    session: SessionGate,
}

impl AppState {
    /// Create application state from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if required variables are missing or
    /// invalid.
    pub fn from_env() -> Result<Self, AppError> {
        let config = ShopConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Create application state with the REST backends from configuration.
    #[must_use]
    pub fn new(config: ShopConfig) -> Self {
        let store: Arc<dyn DocumentStore> =
            Arc::new(RestDocumentStore::new(&config.document_store));
        let provider: Arc<dyn AuthProvider> =
            Arc::new(RestAuthProvider::new(&config.auth_provider));
        Self::with_backends(config, store, provider)
    }

    /// Create application state over explicit backends.
    ///
    /// Used by tests to run against the in-memory store and auth provider.
    #[must_use]
    pub fn with_backends(
        config: ShopConfig,
        store: Arc<dyn DocumentStore>,
        provider: Arc<dyn AuthProvider>,
    ) -> Self {
        let session = SessionGate::new(provider, Arc::clone(&store));
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                session,
            }),
        }
    }

    /// Get a reference to the shop configuration.
    #[must_use]
    pub fn config(&self) -> &ShopConfig {
        &self.inner.config
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.inner.store
    }

    /// Get a reference to the session gate.
    #[must_use]
    pub fn session(&self) -> &SessionGate {
        &self.inner.session
    }

    // =========================================================================
    // Screen state factories
    // =========================================================================

    /// Fresh state holder for the cart screen.
    #[must_use]
    pub fn cart_state(&self) -> CartState {
        CartState::new(self.user_repo(), self.catalog_repo())
    }

    /// Fresh state holder for the home screen.
    #[must_use]
    pub fn catalog_state(&self) -> CatalogState {
        CatalogState::new(self.catalog_repo(), self.user_repo())
    }

    /// Fresh state holder for the product details screen.
    #[must_use]
    pub fn details_state(&self) -> ProductDetailsState {
        ProductDetailsState::new(self.user_repo(), self.catalog_repo())
    }

    /// Fresh state holder for the wishlist screen.
    #[must_use]
    pub fn wishlist_state(&self) -> WishlistState {
        WishlistState::new(self.user_repo(), self.catalog_repo())
    }

    /// Fresh state holder for the profile screen.
    #[must_use]
    pub fn profile_state(&self) -> ProfileState {
        ProfileState::new(self.user_repo())
    }

    fn user_repo(&self) -> UserRepository {
        UserRepository::new(Arc::clone(&self.inner.store))
    }

    fn catalog_repo(&self) -> CatalogRepository {
        CatalogRepository::new(Arc::clone(&self.inner.store))
    }
}
