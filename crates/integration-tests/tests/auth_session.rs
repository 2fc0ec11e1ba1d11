//! Session gate flows: validation gating, state transitions, and
//! background profile provisioning.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use cartwheel_integration_tests::seeded_state;
use cartwheel_shop::services::SessionState;
use cartwheel_shop::store::{MemoryStore, paths};

/// Wait for the fire-and-forget profile write to land.
async fn wait_for_profile(store: &MemoryStore, user_id: &str) -> serde_json::Value {
    for _ in 0..100 {
        if let Some(document) = store.peek(paths::USERS, user_id).await {
            return document;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("profile document for {user_id} never appeared");
}

#[tokio::test]
async fn starts_unauthenticated() {
    let (state, _store, _provider) = seeded_state().await;
    assert_eq!(state.session().state(), SessionState::Unauthenticated);
    assert!(state.session().current_user().is_none());
}

#[tokio::test]
async fn check_status_reflects_provider_session() {
    let (state, _store, provider) = seeded_state().await;

    provider.register("a@b.com", "abc123");
    state.session().login("a@b.com", "abc123").await;
    assert_eq!(state.session().state(), SessionState::Authenticated);

    state.session().check_status();
    assert_eq!(state.session().state(), SessionState::Authenticated);
}

#[tokio::test]
async fn login_rejects_empty_fields_without_remote_call() {
    let (state, _store, provider) = seeded_state().await;

    state.session().login("", "abc123").await;
    assert_eq!(
        state.session().state(),
        SessionState::Error("Email can't be empty".to_string())
    );

    state.session().login("a@b.com", "").await;
    assert_eq!(
        state.session().state(),
        SessionState::Error("Password can't be empty".to_string())
    );

    assert_eq!(provider.remote_calls(), 0);
}

#[tokio::test]
async fn login_failure_carries_provider_message() {
    let (state, _store, provider) = seeded_state().await;
    provider.register("a@b.com", "abc123");

    state.session().login("a@b.com", "wrong1").await;
    assert_eq!(
        state.session().state(),
        SessionState::Error("Sign-in failed: invalid email or password".to_string())
    );

    // Error is retry-capable.
    state.session().login("a@b.com", "abc123").await;
    assert_eq!(state.session().state(), SessionState::Authenticated);
}

#[tokio::test]
async fn sign_up_validation_short_circuits_without_remote_call() {
    let (state, _store, provider) = seeded_state().await;
    let session = state.session();

    let cases = [
        (("", "abc123", "bob"), "Email can't be empty"),
        (("a@b.com", "abc", "bob"), "Password must be at least 6 characters long"),
        (("a@b.com", "abcdef", "bob"), "Password must contain at least one digit"),
        (("a@b.com", "123456", "bob"), "Password must contain at least one letter"),
        (("a@b.com", "abc123", "  "), "Username can't be empty"),
        (("not-an-email", "abc123", "bob"), "Invalid email format"),
    ];

    for ((email, password, username), message) in cases {
        session.sign_up(email, password, username).await;
        assert_eq!(
            session.state(),
            SessionState::Error(message.to_string()),
            "for sign_up({email:?}, {password:?}, {username:?})"
        );
    }

    assert_eq!(provider.remote_calls(), 0);
}

#[tokio::test]
async fn sign_up_authenticates_and_provisions_profile() {
    let (state, store, provider) = seeded_state().await;

    state.session().sign_up("a@b.com", "abc123", "bob").await;
    assert_eq!(state.session().state(), SessionState::Authenticated);
    assert_eq!(provider.create_calls.load(std::sync::atomic::Ordering::Relaxed), 1);

    let user_id = state.session().current_user().unwrap();
    let document = wait_for_profile(&store, user_id.as_str()).await;
    assert_eq!(document["email"], "a@b.com");
    assert_eq!(document["username"], "bob");
    assert_eq!(document["id"], user_id.as_str());
}

#[tokio::test]
async fn sign_up_duplicate_email_surfaces_provider_message() {
    let (state, _store, provider) = seeded_state().await;
    provider.register("a@b.com", "abc123");

    state.session().sign_up("a@b.com", "xyz123", "bob").await;
    assert_eq!(
        state.session().state(),
        SessionState::Error("Sign-up failed: email address is already in use".to_string())
    );
}

#[tokio::test]
async fn stalled_provider_leaves_session_loading() {
    let (state, _store, provider) = seeded_state().await;
    provider.register("a@b.com", "abc123");
    provider.stall_for(Duration::from_millis(500));

    let background = state.clone();
    let login = tokio::spawn(async move {
        background.session().login("a@b.com", "abc123").await;
    });

    // No timeout is modeled: while the provider stalls, observers see
    // Loading for as long as it takes.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(state.session().state(), SessionState::Loading);

    login.await.unwrap();
    assert_eq!(state.session().state(), SessionState::Authenticated);
}

#[tokio::test]
async fn sign_out_clears_session() {
    let (state, _store, provider) = seeded_state().await;
    provider.register("a@b.com", "abc123");

    state.session().login("a@b.com", "abc123").await;
    assert!(state.session().current_user().is_some());

    state.session().sign_out();
    assert_eq!(state.session().state(), SessionState::Unauthenticated);
    assert!(state.session().current_user().is_none());
}
