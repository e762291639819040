//! Checkout hydration.
//!
//! A checkout "mounts" on `GET /checkout/{tier}` and resolves its starting
//! state in priority order:
//!
//! 1. A resume token in the URL: the backend order record is fetched and
//!    mapped field-by-field, and the flow is forced to the review step.
//!    Any failure (transport, not found, non-pending status) degrades to a
//!    fresh checkout at the URL tier with a user-visible warning. No retry.
//! 2. A session snapshot from an earlier visit: the saved state is restored
//!    but the flow restarts at selection.
//! 3. Defaults for the URL tier, with UTM attribution captured from the
//!    query string.
//!
//! Everything here is pure: the route layer performs the fetch and feeds
//! the result in, which is what makes the resume mapping testable without a
//! backend.

use std::str::FromStr;

use everintent_core::{AddonId, TierId};

use crate::checkout::state::{CheckoutState, UtmParams};
use crate::checkout::step::Step;
use crate::checkout::store::CheckoutSnapshot;
use crate::services::backend::{BackendError, OrderRecord};

/// The resolved starting point of a checkout.
#[derive(Debug, Clone)]
pub struct Hydration {
    pub state: CheckoutState,
    pub step: Step,
    /// User-visible warning when a resume attempt degraded to a fresh start.
    pub warning: Option<String>,
}

/// Fresh checkout for the URL tier.
#[must_use]
pub fn defaults(url_tier: TierId, utm: UtmParams) -> Hydration {
    let mut state = CheckoutState::new(url_tier);
    state.utm = utm;
    Hydration {
        state,
        step: Step::Selection,
        warning: None,
    }
}

/// Restore a session snapshot.
///
/// The saved state wins over the URL tier, but the flow restarts at the
/// selection step; only a resume forces review. Snapshots with tiers no
/// longer in the catalog never reach here - they fail typed decoding in the
/// session store and fall through to [`defaults`].
#[must_use]
pub fn from_snapshot(snapshot: CheckoutSnapshot) -> Hydration {
    Hydration {
        state: snapshot.state,
        step: Step::Selection,
        warning: None,
    }
}

/// Resolve a resume fetch into a starting point.
///
/// A `pending` record is mapped into state and forced to review. Everything
/// else - fetch errors, missing records, records in any other status -
/// degrades to [`defaults`] with a warning for the buyer.
#[must_use]
pub fn resolve_resume(
    fetch: Result<OrderRecord, BackendError>,
    url_tier: TierId,
    utm: UtmParams,
) -> Hydration {
    match fetch {
        Ok(record) if record.status.is_resumable() => Hydration {
            state: map_record(record, url_tier, utm),
            step: Step::Review,
            warning: None,
        },
        Ok(record) => {
            tracing::info!(
                order_id = %record.id,
                status = ?record.status,
                "resume token points at a non-pending order"
            );
            degraded(url_tier, utm)
        }
        Err(e) => {
            tracing::warn!("resume fetch failed: {e}");
            degraded(url_tier, utm)
        }
    }
}

fn degraded(url_tier: TierId, utm: UtmParams) -> Hydration {
    let mut hydration = defaults(url_tier, utm);
    hydration.warning = Some(
        "We couldn't restore your saved checkout, so we've started a fresh one.".to_string(),
    );
    hydration
}

/// Map a backend order record into checkout state, field by field.
///
/// The record's tier falls back to the URL tier when absent or unknown.
/// Add-on slugs are filtered against the static catalog; unknown slugs are
/// dropped silently (the catalog may have shrunk since the record was
/// saved). Attribution prefers the record's values, per-field.
fn map_record(record: OrderRecord, url_tier: TierId, url_utm: UtmParams) -> CheckoutState {
    let tier = record
        .selected_tier
        .as_deref()
        .and_then(|slug| TierId::from_str(slug).ok())
        .unwrap_or(url_tier);

    let mut state = CheckoutState::new(tier);
    state.addons = record
        .addons
        .iter()
        .filter_map(|a| AddonId::from_str(&a.slug).ok())
        .collect();

    state.first_name = record.first_name.unwrap_or_default();
    state.last_name = record.last_name.unwrap_or_default();
    state.email = record.email.unwrap_or_default();
    state.phone = record.phone.unwrap_or_default();
    state.business_name = record.business_name.unwrap_or_default();
    state.has_domain = record.has_domain.unwrap_or_default();
    state.domain_name = record.domain_name.unwrap_or_default();
    state.message = record.message.unwrap_or_default();
    state.tcpa_consent = record.tcpa_consent.unwrap_or_default();
    state.utm = UtmParams {
        utm_source: record.utm_source.or(url_utm.utm_source),
        utm_medium: record.utm_medium.or(url_utm.utm_medium),
        utm_campaign: record.utm_campaign.or(url_utm.utm_campaign),
    };

    state
}
