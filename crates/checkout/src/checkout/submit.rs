//! Submission gateway.
//!
//! Validates the finished checkout, assembles the order-creation payload,
//! and interprets the backend's answer. The network call itself lives in
//! [`BackendClient`](crate::services::BackendClient); everything here is
//! synchronous and pure so the gating rules are testable in isolation.
//!
//! There is no automatic retry and no idempotency key: a buyer who
//! resubmits after a lost success response may create a duplicate backend
//! order. The backend owns deduplication if it wants it.

use thiserror::Error;

use crate::catalog;
use crate::checkout::state::CheckoutState;
use crate::services::backend::{BackendError, OrderCreationResponse, OrderPayload, PayloadAddon};
use crate::services::AnalyticsEvent;

/// Where the buyer lands when the backend confirms but names no redirect.
const FALLBACK_REDIRECT: &str = "/thank-you";

/// Generic validation message; requirements are deliberately not itemized
/// per field.
const VALIDATION_MESSAGE: &str =
    "Please provide your first name and email, and accept the contact consent.";

/// Submission failures, all surfaced on the review step.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// A synchronous precondition failed; no network call was made.
    #[error("{VALIDATION_MESSAGE}")]
    Validation,

    /// The backend answered `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// The call itself failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Check the submission preconditions.
///
/// First name present, email present, consent given. Checked before any
/// network activity; a violation yields the single generic
/// [`SubmitError::Validation`].
///
/// # Errors
///
/// Returns [`SubmitError::Validation`] when any precondition fails.
pub fn validate(state: &CheckoutState) -> Result<(), SubmitError> {
    let ok = !state.first_name.trim().is_empty()
        && !state.email.trim().is_empty()
        && state.tcpa_consent;
    if ok { Ok(()) } else { Err(SubmitError::Validation) }
}

/// Assemble the order-creation payload from a validated checkout.
#[must_use]
pub fn build_payload(state: &CheckoutState, source_page: &str, user_agent: &str) -> OrderPayload {
    let addons = state
        .addons
        .iter()
        .map(|&id| {
            let addon = catalog::addon(id);
            PayloadAddon {
                slug: addon.id.as_slug().to_string(),
                name: addon.display_name.to_string(),
                monthly_price: addon.monthly_price,
                ghl_tag: addon.ghl_tag.to_string(),
            }
        })
        .collect();

    OrderPayload {
        first_name: state.first_name.clone(),
        last_name: state.last_name.clone(),
        email: state.email.clone(),
        phone: state.phone.clone(),
        business_name: state.business_name.clone(),
        has_domain: state.has_domain,
        domain_name: state.domain_name.clone(),
        message: state.message.clone(),
        selected_tier: state.tier.as_slug().to_string(),
        addons,
        monthly_total: state.monthly_total(),
        setup_total: state.setup_total(),
        tcpa_consent: state.tcpa_consent,
        utm_source: state.utm.utm_source.clone(),
        utm_medium: state.utm.utm_medium.clone(),
        utm_campaign: state.utm.utm_campaign.clone(),
        source_page: source_page.to_string(),
        user_agent: user_agent.to_string(),
    }
}

/// The analytics event for a submission that passed preconditions.
#[must_use]
pub fn submitted_event(state: &CheckoutState) -> AnalyticsEvent {
    AnalyticsEvent::CheckoutSubmitted {
        tier: state.tier,
        monthly_total: state.monthly_total(),
        setup_total: state.setup_total(),
        addon_count: state.addons.len(),
    }
}

/// Interpret the backend's response into a redirect URL.
///
/// # Errors
///
/// Returns [`SubmitError::Rejected`] with the backend's message (or a
/// generic one) when `success` is false.
pub fn interpret(response: OrderCreationResponse) -> Result<String, SubmitError> {
    if response.success {
        Ok(response
            .redirect_url
            .unwrap_or_else(|| FALLBACK_REDIRECT.to_string()))
    } else {
        Err(SubmitError::Rejected(response.error.unwrap_or_else(|| {
            "We couldn't complete your order. Please try again.".to_string()
        })))
    }
}
