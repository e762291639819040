//! The checkout state container.
//!
//! [`CheckoutState`] is the single mutable aggregate for an in-progress
//! order. Mutations are pure with respect to the outside world: the ones
//! that correspond to an analytics transition return the
//! [`AnalyticsEvent`] for the caller to dispatch.

use std::collections::BTreeSet;

use everintent_core::{AddonId, TierId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::services::AnalyticsEvent;

/// UTM attribution parameters, captured once at hydration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UtmParams {
    #[serde(default)]
    pub utm_source: Option<String>,
    #[serde(default)]
    pub utm_medium: Option<String>,
    #[serde(default)]
    pub utm_campaign: Option<String>,
}

/// Buyer/consent fields addressable by the generic field setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyerField {
    FirstName,
    LastName,
    Email,
    Phone,
    BusinessName,
    HasDomain,
    DomainName,
    Message,
    TcpaConsent,
}

/// The in-progress order.
///
/// Buyer fields are plain strings with required-ness enforced only at
/// submission time. Add-ons are kept in a `BTreeSet` so the selection
/// serializes in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutState {
    pub tier: TierId,
    #[serde(default)]
    pub addons: BTreeSet<AddonId>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub has_domain: bool,
    #[serde(default)]
    pub domain_name: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub tcpa_consent: bool,
    #[serde(flatten)]
    pub utm: UtmParams,
}

impl CheckoutState {
    /// Fresh state for a tier, everything else empty.
    #[must_use]
    pub fn new(tier: TierId) -> Self {
        Self {
            tier,
            addons: BTreeSet::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            business_name: String::new(),
            has_domain: false,
            domain_name: String::new(),
            message: String::new(),
            tcpa_consent: false,
            utm: UtmParams::default(),
        }
    }

    /// Replace the tier.
    ///
    /// Add-on selections are tier-scoped, so switching tiers unconditionally
    /// empties the selection even when the new tier would accept them.
    #[must_use = "dispatch the returned analytics event"]
    pub fn set_tier(&mut self, new_tier: TierId) -> AnalyticsEvent {
        let old_tier = self.tier;
        self.tier = new_tier;
        self.addons.clear();
        AnalyticsEvent::TierChanged {
            from: old_tier,
            to: new_tier,
        }
    }

    /// Flip membership of an add-on in the selection.
    #[must_use = "dispatch the returned analytics event"]
    pub fn toggle_addon(&mut self, addon: AddonId) -> AnalyticsEvent {
        let selected = if self.addons.remove(&addon) {
            false
        } else {
            self.addons.insert(addon);
            true
        };
        AnalyticsEvent::AddonToggled {
            addon,
            selected,
            tier: self.tier,
        }
    }

    /// Generic single-field setter for buyer/consent fields.
    ///
    /// No per-field validation happens here; the submission gateway is the
    /// only gate. Boolean fields accept the usual form-encoded truthy
    /// spellings (`true`, `on`, `1`).
    pub fn update_field(&mut self, field: BuyerField, value: &str) {
        match field {
            BuyerField::FirstName => self.first_name = value.to_string(),
            BuyerField::LastName => self.last_name = value.to_string(),
            BuyerField::Email => self.email = value.to_string(),
            BuyerField::Phone => self.phone = value.to_string(),
            BuyerField::BusinessName => self.business_name = value.to_string(),
            BuyerField::HasDomain => self.has_domain = parse_bool(value),
            BuyerField::DomainName => self.domain_name = value.to_string(),
            BuyerField::Message => self.message = value.to_string(),
            BuyerField::TcpaConsent => self.tcpa_consent = parse_bool(value),
        }
    }

    /// Recurring monthly total: tier price plus selected add-on prices.
    #[must_use]
    pub fn monthly_total(&self) -> Decimal {
        let base = catalog::tier(self.tier).monthly_price;
        self.addons
            .iter()
            .map(|&id| catalog::addon(id).monthly_price)
            .fold(base, |acc, price| acc + price)
    }

    /// One-time setup total: the tier's flat setup fee. Add-ons never carry
    /// a setup fee.
    #[must_use]
    pub fn setup_total(&self) -> Decimal {
        catalog::tier(self.tier).setup_fee
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim(), "true" | "on" | "1")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_switch_clears_addons() {
        let mut state = CheckoutState::new(TierId::Capture);
        let _ = state.toggle_addon(AddonId::AiVoiceChat);
        let _ = state.toggle_addon(AddonId::ReputationManager);
        assert_eq!(state.addons.len(), 2);

        let event = state.set_tier(TierId::Launch);
        assert!(state.addons.is_empty());
        assert_eq!(
            event,
            AnalyticsEvent::TierChanged {
                from: TierId::Capture,
                to: TierId::Launch,
            }
        );
    }

    #[test]
    fn test_setting_same_tier_still_clears_addons() {
        let mut state = CheckoutState::new(TierId::Capture);
        let _ = state.toggle_addon(AddonId::AiVoiceChat);
        let _ = state.set_tier(TierId::Capture);
        assert!(state.addons.is_empty());
    }

    #[test]
    fn test_toggle_addon_flips_membership() {
        let mut state = CheckoutState::new(TierId::Capture);

        let event = state.toggle_addon(AddonId::AiVoiceChat);
        assert!(state.addons.contains(&AddonId::AiVoiceChat));
        assert_eq!(
            event,
            AnalyticsEvent::AddonToggled {
                addon: AddonId::AiVoiceChat,
                selected: true,
                tier: TierId::Capture,
            }
        );

        let event = state.toggle_addon(AddonId::AiVoiceChat);
        assert!(!state.addons.contains(&AddonId::AiVoiceChat));
        assert_eq!(
            event,
            AnalyticsEvent::AddonToggled {
                addon: AddonId::AiVoiceChat,
                selected: false,
                tier: TierId::Capture,
            }
        );
    }

    #[test]
    fn test_monthly_total_sums_tier_and_addons() {
        let mut state = CheckoutState::new(TierId::Capture);
        let _ = state.toggle_addon(AddonId::AiVoiceChat);
        // capture $97/mo + ai-voice-chat $79/mo
        assert_eq!(state.monthly_total(), Decimal::from(176));
        assert_eq!(state.setup_total(), Decimal::from(249));
    }

    #[test]
    fn test_totals_are_pure() {
        let mut state = CheckoutState::new(TierId::Convert);
        let _ = state.toggle_addon(AddonId::MissedCallTextback);
        let first = state.monthly_total();
        let second = state.monthly_total();
        assert_eq!(first, second);
    }

    #[test]
    fn test_update_field_strings_and_bools() {
        let mut state = CheckoutState::new(TierId::Launch);
        state.update_field(BuyerField::FirstName, "Ada");
        state.update_field(BuyerField::Email, "ada@example.com");
        state.update_field(BuyerField::HasDomain, "on");
        state.update_field(BuyerField::TcpaConsent, "true");

        assert_eq!(state.first_name, "Ada");
        assert_eq!(state.email, "ada@example.com");
        assert!(state.has_domain);
        assert!(state.tcpa_consent);

        state.update_field(BuyerField::TcpaConsent, "false");
        assert!(!state.tcpa_consent);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state = CheckoutState::new(TierId::Scale);
        let _ = state.toggle_addon(AddonId::SocialPoster);
        state.update_field(BuyerField::BusinessName, "Riverside Plumbing");
        state.utm.utm_source = Some("google".to_string());

        let json = serde_json::to_string(&state).unwrap();
        let restored: CheckoutState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}
