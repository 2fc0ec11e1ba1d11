//! Shared fixtures for Cartwheel integration tests.
//!
//! Flows run against the in-memory document store and auth provider; the
//! fixtures seed a small catalog and hand back the fakes so tests can
//! assert on call counters and stored documents.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rust_decimal::Decimal;
use secrecy::SecretString;

use cartwheel_core::ProductId;
use cartwheel_shop::config::{AuthProviderConfig, DocumentStoreConfig, ShopConfig};
use cartwheel_shop::models::{Product, Rating};
use cartwheel_shop::services::auth::{AuthProvider, MemoryAuthProvider};
use cartwheel_shop::state::AppState;
use cartwheel_shop::store::{DocumentStore, MemoryStore, paths};

/// A configuration pointing at nothing; the fakes never dial out.
#[must_use]
pub fn test_config() -> ShopConfig {
    ShopConfig {
        document_store: DocumentStoreConfig {
            base_url: "https://docstore.invalid".to_string(),
            api_key: SecretString::from("test-key"),
        },
        auth_provider: AuthProviderConfig {
            base_url: "https://auth.invalid".to_string(),
            api_key: SecretString::from("test-key"),
        },
    }
}

/// A small catalog with known prices.
#[must_use]
pub fn sample_products() -> Vec<Product> {
    vec![
        product("p-mug", "Enamel Mug", "10", 4),
        product("p-cap", "Canvas Cap", "5", 12),
        product("p-tee", "Logo Tee", "19.99", 31),
        product("p-pin", "Pin Set", "2.50", 7),
    ]
}

fn product(id: &str, title: &str, price: &str, rating_count: u32) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        description: format!("{title} from the sample catalog"),
        category: "merch".to_string(),
        image: format!("https://cdn.invalid/{id}.png"),
        price: price.parse::<Decimal>().unwrap(),
        rating: Rating {
            rate: "4.1".parse().unwrap(),
            count: rating_count,
        },
    }
}

/// App state over a seeded in-memory store and a fresh auth provider.
///
/// Returns the fakes alongside the state so tests can reach counters,
/// failure injection, and raw documents.
pub async fn seeded_state() -> (AppState, Arc<MemoryStore>, Arc<MemoryAuthProvider>) {
    let store = Arc::new(MemoryStore::new());
    for product in sample_products() {
        store
            .seed(paths::PRODUCTS, product.id.as_str(), &product)
            .await
            .unwrap();
    }

    let provider = Arc::new(MemoryAuthProvider::new());
    let shared_store: Arc<dyn DocumentStore> = store.clone();
    let shared_provider: Arc<dyn AuthProvider> = provider.clone();
    let state = AppState::with_backends(test_config(), shared_store, shared_provider);

    (state, store, provider)
}
