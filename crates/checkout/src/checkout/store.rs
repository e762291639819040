//! Session-backed checkout persistence.
//!
//! The in-progress checkout is mirrored into the visitor's session after
//! every change so it survives page reloads for the lifetime of the browser
//! session. Persistence is best-effort: a failed write logs a warning and
//! the checkout carries on unsaved. The snapshot is cleared exactly once,
//! on confirmed successful submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::checkout::state::CheckoutState;
use crate::checkout::step::Step;
use crate::models::session_keys;

/// A persisted point-in-time copy of the checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSnapshot {
    pub state: CheckoutState,
    pub step: Step,
    pub saved_at: DateTime<Utc>,
}

impl CheckoutSnapshot {
    /// Snapshot the current state and step.
    #[must_use]
    pub fn now(state: CheckoutState, step: Step) -> Self {
        Self {
            state,
            step,
            saved_at: Utc::now(),
        }
    }
}

/// Load/save/clear seam over the session store.
///
/// Handlers go through this adapter rather than touching session keys
/// directly, so hydration logic stays testable against plain snapshots.
pub struct SessionCheckoutStore<'a> {
    session: &'a Session,
}

impl<'a> SessionCheckoutStore<'a> {
    /// Wrap a request session.
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Read the stored snapshot, if any.
    ///
    /// A snapshot that fails to decode is treated as absent; stale formats
    /// from older deploys degrade to a fresh checkout instead of an error.
    pub async fn load(&self) -> Option<CheckoutSnapshot> {
        match self
            .session
            .get::<CheckoutSnapshot>(session_keys::CHECKOUT_SNAPSHOT)
            .await
        {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::debug!("discarding undecodable checkout snapshot: {e}");
                None
            }
        }
    }

    /// Persist a snapshot, best-effort.
    pub async fn save(&self, snapshot: &CheckoutSnapshot) {
        if let Err(e) = self
            .session
            .insert(session_keys::CHECKOUT_SNAPSHOT, snapshot)
            .await
        {
            tracing::warn!("failed to persist checkout snapshot: {e}");
        }
    }

    /// Remove the snapshot. Called only after a confirmed submission.
    pub async fn clear(&self) {
        if let Err(e) = self
            .session
            .remove::<CheckoutSnapshot>(session_keys::CHECKOUT_SNAPSHOT)
            .await
        {
            tracing::warn!("failed to clear checkout snapshot: {e}");
        }
    }
}
