//! Snapshot persistence against a real session store.
//!
//! Uses the same in-memory tower-sessions store the service runs with, so
//! the load/save/clear seam is exercised end to end.

use std::sync::Arc;

use everintent_checkout::checkout::{
    BuyerField, CheckoutSnapshot, CheckoutState, SessionCheckoutStore, Step,
};
use everintent_core::{AddonId, TierId};
use tower_sessions::{MemoryStore, Session};

fn fresh_session() -> Session {
    Session::new(None, Arc::new(MemoryStore::default()), None)
}

#[tokio::test]
async fn test_save_then_load_round_trips() {
    let session = fresh_session();
    let store = SessionCheckoutStore::new(&session);

    let mut state = CheckoutState::new(TierId::Capture);
    let _ = state.toggle_addon(AddonId::AiVoiceChat);
    state.update_field(BuyerField::Email, "ada@example.com");

    store
        .save(&CheckoutSnapshot::now(state.clone(), Step::Details))
        .await;

    let loaded = store.load().await.expect("snapshot should be present");
    assert_eq!(loaded.state, state);
    assert_eq!(loaded.step, Step::Details);
}

#[tokio::test]
async fn test_load_on_empty_session_is_none() {
    let session = fresh_session();
    let store = SessionCheckoutStore::new(&session);
    assert!(store.load().await.is_none());
}

#[tokio::test]
async fn test_clear_removes_the_snapshot() {
    // Successful submission clears local persistence: afterwards no
    // decodable snapshot remains in the session.
    let session = fresh_session();
    let store = SessionCheckoutStore::new(&session);

    let state = CheckoutState::new(TierId::Scale);
    store.save(&CheckoutSnapshot::now(state, Step::Review)).await;
    assert!(store.load().await.is_some());

    store.clear().await;
    assert!(store.load().await.is_none());
}

#[tokio::test]
async fn test_save_overwrites_previous_snapshot() {
    // Last write wins; there is no cross-write coordination.
    let session = fresh_session();
    let store = SessionCheckoutStore::new(&session);

    let first = CheckoutState::new(TierId::Launch);
    store.save(&CheckoutSnapshot::now(first, Step::Selection)).await;

    let mut second = CheckoutState::new(TierId::Convert);
    let _ = second.toggle_addon(AddonId::SocialPoster);
    store
        .save(&CheckoutSnapshot::now(second.clone(), Step::Review))
        .await;

    let loaded = store.load().await.expect("snapshot should be present");
    assert_eq!(loaded.state, second);
    assert_eq!(loaded.step, Step::Review);
}
