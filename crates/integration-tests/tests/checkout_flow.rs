//! Full checkout flow scenarios.
//!
//! These tests exercise the state container, step sequencer, and hydration
//! together, the way the route layer drives them.

use everintent_checkout::checkout::{hydrate, CheckoutSnapshot, CheckoutState, Step, UtmParams};
use everintent_checkout::services::backend::{BackendError, OrderRecord};
use everintent_core::{AddonId, TierId};
use rust_decimal::Decimal;

fn pending_record(tier: Option<&str>, addon_slugs: &[&str]) -> OrderRecord {
    serde_json::from_value(serde_json::json!({
        "id": "ord_flow",
        "status": "pending",
        "selected_tier": tier,
        "addons": addon_slugs.iter().map(|s| serde_json::json!({"slug": s})).collect::<Vec<_>>(),
    }))
    .expect("record should deserialize")
}

// =============================================================================
// Fresh Checkout
// =============================================================================

#[test]
fn test_fresh_checkout_at_capture() {
    // Mount at /checkout/capture with no resume param and no snapshot.
    let hydration = hydrate::defaults(TierId::Capture, UtmParams::default());
    let mut state = hydration.state;

    assert_eq!(state.tier, TierId::Capture);
    assert!(state.addons.is_empty());
    assert_eq!(hydration.step, Step::Selection);

    // Select ai-voice-chat ($79/mo) on capture ($97/mo + $249 setup).
    let _ = state.toggle_addon(AddonId::AiVoiceChat);
    assert_eq!(state.monthly_total(), Decimal::from(176));
    assert_eq!(state.setup_total(), Decimal::from(249));

    // Switching tiers clears the selection.
    let _ = state.set_tier(TierId::Launch);
    assert!(state.addons.is_empty());
    assert_eq!(state.monthly_total(), Decimal::from(49));
}

#[test]
fn test_steps_walk_the_full_flow() {
    let mut step = Step::Selection;
    step = step.next();
    assert_eq!(step, Step::Details);
    step = step.next();
    assert_eq!(step, Step::Review);

    // Clamped at review; submit is the terminal action, not a fourth step.
    assert_eq!(step.next(), Step::Review);

    // Review's edit affordance jumps backward arbitrarily.
    assert_eq!(step.back(), Step::Details);
}

#[test]
fn test_utm_captured_at_mount() {
    let utm = UtmParams {
        utm_source: Some("google".to_string()),
        utm_medium: Some("cpc".to_string()),
        utm_campaign: Some("spring-plumbers".to_string()),
    };
    let hydration = hydrate::defaults(TierId::Convert, utm.clone());
    assert_eq!(hydration.state.utm, utm);
}

// =============================================================================
// Resume
// =============================================================================

#[test]
fn test_resume_pending_record_forces_review() {
    let record = pending_record(Some("convert"), &["ai-voice-chat"]);
    let hydration = hydrate::resolve_resume(Ok(record), TierId::Capture, UtmParams::default());

    assert_eq!(hydration.step, Step::Review);
    assert_eq!(hydration.state.tier, TierId::Convert);
    assert!(hydration.state.addons.contains(&AddonId::AiVoiceChat));
    assert!(hydration.warning.is_none());
}

#[test]
fn test_resume_drops_addons_missing_from_catalog() {
    let record = pending_record(Some("capture"), &["ai-voice-chat", "retired-bundle"]);
    let hydration = hydrate::resolve_resume(Ok(record), TierId::Capture, UtmParams::default());

    assert_eq!(hydration.state.addons.len(), 1);
    assert!(hydration.state.addons.contains(&AddonId::AiVoiceChat));
}

#[test]
fn test_resume_non_pending_falls_back_to_url_tier_defaults() {
    let mut record = pending_record(Some("scale"), &["social-poster"]);
    record.status = serde_json::from_value(serde_json::json!("completed")).expect("status");

    let hydration = hydrate::resolve_resume(Ok(record), TierId::Capture, UtmParams::default());
    assert_eq!(hydration.step, Step::Selection);
    assert_eq!(hydration.state, CheckoutState::new(TierId::Capture));
    assert!(hydration.warning.is_some(), "buyer should see a warning");
}

#[test]
fn test_resume_fetch_failure_falls_back_to_url_tier_defaults() {
    let fetch = Err(BackendError::Parse("connection reset".to_string()));
    let hydration = hydrate::resolve_resume(fetch, TierId::Launch, UtmParams::default());

    assert_eq!(hydration.step, Step::Selection);
    assert_eq!(hydration.state, CheckoutState::new(TierId::Launch));
    assert!(hydration.warning.is_some());
}

// =============================================================================
// Snapshot Hydration
// =============================================================================

#[test]
fn test_snapshot_restores_state_at_selection_step() {
    let mut state = CheckoutState::new(TierId::Scale);
    let _ = state.toggle_addon(AddonId::ReputationManager);
    let snapshot = CheckoutSnapshot::now(state.clone(), Step::Review);

    let hydration = hydrate::from_snapshot(snapshot);
    assert_eq!(hydration.state, state);
    // Only a resume forces review; reload restarts at selection.
    assert_eq!(hydration.step, Step::Selection);
}

#[test]
fn test_snapshot_with_unknown_tier_is_rejected() {
    // A tier that has left the catalog fails typed decoding, so the mount
    // falls through to URL-tier defaults.
    let json = serde_json::json!({
        "state": { "tier": "nonexistent-tier", "addons": [] },
        "step": "details",
        "saved_at": "2026-02-11T09:30:00Z",
    });
    assert!(serde_json::from_value::<CheckoutSnapshot>(json).is_err());

    let hydration = hydrate::defaults(TierId::Capture, UtmParams::default());
    assert_eq!(hydration.state, CheckoutState::new(TierId::Capture));
}

#[test]
fn test_snapshot_round_trips_through_json() {
    let mut state = CheckoutState::new(TierId::Convert);
    let _ = state.toggle_addon(AddonId::MissedCallTextback);
    state.utm.utm_source = Some("newsletter".to_string());
    let snapshot = CheckoutSnapshot::now(state, Step::Details);

    let json = serde_json::to_string(&snapshot).expect("serialize");
    let restored: CheckoutSnapshot = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored.state, snapshot.state);
    assert_eq!(restored.step, Step::Details);
}
