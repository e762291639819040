//! Analytics event emission.
//!
//! The checkout flow names its transition points (tier change, add-on
//! toggle, details completed, submission, redirect) as [`AnalyticsEvent`]
//! values. State-container mutations return the event they correspond to and
//! the route layer dispatches it through an [`AnalyticsSink`], keeping the
//! state machine itself free of side effects.
//!
//! Emission is fire-and-forget: no sink response is ever consumed, and a
//! failing sink never fails a request.

use everintent_core::{AddonId, TierId};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// A checkout-flow analytics event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    /// Tier changed on the selection step.
    TierChanged { from: TierId, to: TierId },
    /// Add-on membership flipped.
    AddonToggled {
        addon: AddonId,
        selected: bool,
        tier: TierId,
    },
    /// Buyer advanced past the details step.
    DetailsCompleted { tier: TierId },
    /// Submission passed preconditions and was sent to the backend.
    CheckoutSubmitted {
        tier: TierId,
        monthly_total: Decimal,
        setup_total: Decimal,
        addon_count: usize,
    },
    /// Backend accepted the order; buyer is being redirected.
    CheckoutRedirected { tier: TierId },
    /// A resume token could not be turned into a checkout.
    ResumeFailed { reason: String },
}

impl AnalyticsEvent {
    /// Event name as it appears on the wire.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TierChanged { .. } => "tier_changed",
            Self::AddonToggled { .. } => "addon_toggled",
            Self::DetailsCompleted { .. } => "details_completed",
            Self::CheckoutSubmitted { .. } => "checkout_submitted",
            Self::CheckoutRedirected { .. } => "checkout_redirected",
            Self::ResumeFailed { .. } => "resume_failed",
        }
    }
}

/// Destination for checkout analytics events.
///
/// Implementations must not block: `track` is called inline from request
/// handlers.
pub trait AnalyticsSink: Send + Sync {
    /// Record one event. Failures are the sink's problem, not the caller's.
    fn track(&self, event: AnalyticsEvent);
}

/// Sink that logs events as structured tracing records.
///
/// The default when no collector endpoint is configured; keeps the event
/// stream visible in service logs.
#[derive(Debug, Default, Clone)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn track(&self, event: AnalyticsEvent) {
        tracing::info!(event = event.name(), payload = ?event, "analytics event");
    }
}

/// Sink that POSTs events to an HTTP collector.
///
/// Each event is wrapped in an envelope with a fresh event id and sent from
/// a spawned task so the request handler never waits on the collector.
#[derive(Clone)]
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: String,
}

/// Wire envelope for [`HttpSink`] events.
#[derive(Debug, Serialize)]
struct EventEnvelope {
    event_id: Uuid,
    #[serde(flatten)]
    event: AnalyticsEvent,
}

impl HttpSink {
    /// Create a sink posting to `endpoint`.
    #[must_use]
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

impl AnalyticsSink for HttpSink {
    fn track(&self, event: AnalyticsEvent) {
        let envelope = EventEnvelope {
            event_id: Uuid::new_v4(),
            event,
        };
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();

        tokio::spawn(async move {
            if let Err(e) = client.post(&endpoint).json(&envelope).send().await {
                // Analytics loss is acceptable; never escalate.
                tracing::debug!("analytics delivery failed: {e}");
            }
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_shape() {
        let event = AnalyticsEvent::AddonToggled {
            addon: AddonId::AiVoiceChat,
            selected: true,
            tier: TierId::Capture,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "addon_toggled");
        assert_eq!(json["addon"], "ai-voice-chat");
        assert_eq!(json["selected"], true);
        assert_eq!(json["tier"], "capture");
    }

    #[test]
    fn test_event_names() {
        let event = AnalyticsEvent::TierChanged {
            from: TierId::Launch,
            to: TierId::Scale,
        };
        assert_eq!(event.name(), "tier_changed");
    }

    #[test]
    fn test_submitted_totals_serialize_as_strings() {
        let event = AnalyticsEvent::CheckoutSubmitted {
            tier: TierId::Capture,
            monthly_total: Decimal::from(176),
            setup_total: Decimal::from(249),
            addon_count: 1,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["monthly_total"], "176");
    }
}
