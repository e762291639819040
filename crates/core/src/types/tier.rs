//! Pricing tier identifiers.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known tier.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown tier: {0}")]
pub struct UnknownTier(pub String);

/// Identifier for a pricing tier.
///
/// The tier set is fixed: every `TierId` is guaranteed to resolve against the
/// static tier table. Strings from URLs, session snapshots, or backend
/// records are parsed with [`TierId::from_str`], which rejects anything
/// outside the set; callers decide whether to fall back to
/// [`TierId::default`] or surface the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TierId {
    /// Entry plan: website plus basic lead capture.
    #[default]
    Launch,
    /// Adds missed-call capture and unified inbox.
    Capture,
    /// Adds nurture automations and booking.
    Convert,
    /// Full stack for multi-location businesses.
    Scale,
}

impl TierId {
    /// All tiers, in display order.
    pub const ALL: [Self; 4] = [Self::Launch, Self::Capture, Self::Convert, Self::Scale];

    /// The URL/storage slug for this tier.
    #[must_use]
    pub const fn as_slug(&self) -> &'static str {
        match self {
            Self::Launch => "launch",
            Self::Capture => "capture",
            Self::Convert => "convert",
            Self::Scale => "scale",
        }
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_slug())
    }
}

impl FromStr for TierId {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "launch" => Ok(Self::Launch),
            "capture" => Ok(Self::Capture),
            "convert" => Ok(Self::Convert),
            "scale" => Ok(Self::Scale),
            other => Err(UnknownTier(other.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for tier in TierId::ALL {
            assert_eq!(tier.as_slug().parse::<TierId>().unwrap(), tier);
        }
    }

    #[test]
    fn test_unknown_slug_rejected() {
        let err = "nonexistent-tier".parse::<TierId>().unwrap_err();
        assert_eq!(err.to_string(), "unknown tier: nonexistent-tier");
    }

    #[test]
    fn test_default_is_launch() {
        assert_eq!(TierId::default(), TierId::Launch);
    }

    #[test]
    fn test_serde_uses_slug() {
        let json = serde_json::to_string(&TierId::Capture).unwrap();
        assert_eq!(json, "\"capture\"");
        let tier: TierId = serde_json::from_str("\"scale\"").unwrap();
        assert_eq!(tier, TierId::Scale);
    }
}
