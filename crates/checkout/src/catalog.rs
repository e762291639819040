//! Static pricing catalog.
//!
//! The tier and add-on tables are fixed at compile time and consumed
//! read-only by the checkout flow. Prices are whole dollars; add-ons carry a
//! monthly price only (no setup fee) and a CRM tag applied to the contact on
//! order creation.

use everintent_core::{AddonId, TierId};
use rust_decimal::Decimal;

/// A pricing tier from the static catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    pub id: TierId,
    pub display_name: &'static str,
    /// Recurring monthly price in USD.
    pub monthly_price: Decimal,
    /// One-time setup fee in USD.
    pub setup_fee: Decimal,
}

/// An add-on from the static catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addon {
    pub id: AddonId,
    pub display_name: &'static str,
    /// Recurring monthly price in USD.
    pub monthly_price: Decimal,
    /// CRM tag applied to the contact when the order is created.
    pub ghl_tag: &'static str,
}

/// Look up a tier in the static table.
///
/// Infallible: [`TierId`] is a closed set, so every id resolves.
#[must_use]
pub fn tier(id: TierId) -> Tier {
    let (display_name, monthly, setup) = match id {
        TierId::Launch => ("Launch", 49, 149),
        TierId::Capture => ("Capture", 97, 249),
        TierId::Convert => ("Convert", 197, 449),
        TierId::Scale => ("Scale", 297, 699),
    };
    Tier {
        id,
        display_name,
        monthly_price: Decimal::from(monthly),
        setup_fee: Decimal::from(setup),
    }
}

/// Look up an add-on in the static table.
#[must_use]
pub fn addon(id: AddonId) -> Addon {
    let (display_name, monthly, ghl_tag) = match id {
        AddonId::AiVoiceChat => ("AI Voice + Chat", 79, "addon-ai-voice-chat"),
        AddonId::ReputationManager => ("Reputation Manager", 49, "addon-reputation-manager"),
        AddonId::MissedCallTextback => ("Missed-Call Text-Back", 29, "addon-missed-call-textback"),
        AddonId::SocialPoster => ("Social Poster", 59, "addon-social-poster"),
    };
    Addon {
        id,
        display_name,
        monthly_price: Decimal::from(monthly),
        ghl_tag,
    }
}

/// All tiers in display order.
#[must_use]
pub fn all_tiers() -> Vec<Tier> {
    TierId::ALL.into_iter().map(tier).collect()
}

/// All add-ons in display order.
#[must_use]
pub fn all_addons() -> Vec<Addon> {
    AddonId::ALL.into_iter().map(addon).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tier_resolves() {
        for id in TierId::ALL {
            let t = tier(id);
            assert_eq!(t.id, id);
            assert!(!t.display_name.is_empty());
            assert!(t.monthly_price > Decimal::ZERO);
        }
    }

    #[test]
    fn test_every_addon_resolves() {
        for id in AddonId::ALL {
            let a = addon(id);
            assert_eq!(a.id, id);
            assert!(a.ghl_tag.starts_with("addon-"));
        }
    }

    #[test]
    fn test_capture_pricing() {
        let t = tier(TierId::Capture);
        assert_eq!(t.monthly_price, Decimal::from(97));
        assert_eq!(t.setup_fee, Decimal::from(249));
    }

    #[test]
    fn test_ai_voice_chat_pricing() {
        let a = addon(AddonId::AiVoiceChat);
        assert_eq!(a.monthly_price, Decimal::from(79));
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(all_tiers().len(), 4);
        assert_eq!(all_addons().len(), 4);
    }
}
