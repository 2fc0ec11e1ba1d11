//! Catalog and profile flows: listings, placeholder semantics, and
//! profile round-trips.

#![allow(clippy::unwrap_used)]

use cartwheel_core::{ProductId, UserId};
use cartwheel_integration_tests::{sample_products, seeded_state};
use cartwheel_shop::models::UserProfile;
use cartwheel_shop::repo::CatalogRepository;
use cartwheel_shop::services::{FetchState, SessionState};

#[tokio::test]
async fn home_load_lists_catalog_and_derives_selections() {
    let (state, _store, _provider) = seeded_state().await;

    let mut home = state.catalog_state();
    home.load().await;

    assert!(home.state().is_success());
    assert_eq!(home.products().len(), sample_products().len());
    // Selections cap at the catalog size.
    assert_eq!(home.popular_products().len(), sample_products().len());
    assert_eq!(home.image_slider().len(), sample_products().len());
    // The category contract returns an empty list - no data source yet.
    assert!(home.categories().is_empty());
}

#[tokio::test]
async fn unknown_product_id_resolves_to_placeholder() {
    let (state, _store, _provider) = seeded_state().await;
    let catalog = CatalogRepository::new(std::sync::Arc::clone(state.store()));

    let product = catalog
        .product_by_id(&ProductId::new("p-unknown"))
        .await
        .unwrap();

    // The empty id is the "not found" signal; there is no error path.
    assert!(product.is_placeholder());
}

#[tokio::test]
async fn undeserializable_product_resolves_to_placeholder() {
    let (state, store, _provider) = seeded_state().await;
    store
        .seed(
            cartwheel_shop::store::paths::PRODUCTS,
            "p-bad",
            &serde_json::json!({"id": "p-bad", "price": "not-a-number"}),
        )
        .await
        .unwrap();

    let catalog = CatalogRepository::new(std::sync::Arc::clone(state.store()));
    let product = catalog.product_by_id(&ProductId::new("p-bad")).await.unwrap();
    assert!(product.is_placeholder());
}

#[tokio::test]
async fn profile_round_trip_after_sign_up() {
    let (state, _store, _provider) = seeded_state().await;

    state.session().sign_up("bob@example.com", "abc123", "bob").await;
    assert_eq!(state.session().state(), SessionState::Authenticated);
    let user_id = state.session().current_user().unwrap();

    // The provisioning write is fire-and-forget; wait for it.
    let mut profile = state.profile_state();
    for _ in 0..100 {
        profile.fetch(&user_id).await;
        if !profile.profile().email.is_empty() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert_eq!(profile.profile().email, "bob@example.com");
    assert_eq!(profile.profile().username, "bob");

    // Explicit profile update, then read back.
    let updated = UserProfile {
        first_name: "Bob".to_string(),
        phone_no: "555-0100".to_string(),
        ..profile.profile().clone()
    };
    profile.update(&updated).await;
    assert!(profile.saved_notice());
    profile.acknowledge_saved();

    profile.fetch(&user_id).await;
    assert_eq!(profile.profile(), &updated);
}

#[tokio::test]
async fn profile_fetch_without_session_fails_fast() {
    let (state, store, _provider) = seeded_state().await;

    // Unauthenticated sessions carry a blank user id.
    let user_id = state.session().current_user().unwrap_or_default();
    assert!(user_id.is_blank());

    let mut profile = state.profile_state();
    profile.fetch(&user_id).await;

    assert_eq!(
        profile.state(),
        &FetchState::Error("User ID not available".to_string())
    );
    assert_eq!(store.remote_calls(), 0);
}

#[tokio::test]
async fn home_fetch_profile_fills_greeting_header() {
    let (state, store, _provider) = seeded_state().await;

    let user_id = UserId::new("u-9");
    store
        .seed(
            cartwheel_shop::store::paths::USERS,
            "u-9",
            &serde_json::json!({"id": "u-9", "username": "jo", "email": "jo@example.com"}),
        )
        .await
        .unwrap();

    let mut home = state.catalog_state();
    home.fetch_profile(&user_id).await;

    assert_eq!(home.profile().username, "jo");
    assert_eq!(home.profile().email, "jo@example.com");
}
