//! Add-on identifiers.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known add-on.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown add-on: {0}")]
pub struct UnknownAddon(pub String);

/// Identifier for an optional monthly add-on.
///
/// Add-ons are tier-independent feature bundles layered onto any tier.
/// Like [`TierId`](super::TierId) the set is closed; slugs from backend
/// records are parsed with [`AddonId::from_str`] and unknown slugs are
/// dropped by the hydration path rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddonId {
    /// AI voice agent answering and routing inbound calls.
    AiVoiceChat,
    /// Automated review requests and response drafting.
    ReputationManager,
    /// Instant SMS follow-up on missed calls.
    MissedCallTextback,
    /// Monthly social posting across connected profiles.
    SocialPoster,
}

impl AddonId {
    /// All add-ons, in display order.
    pub const ALL: [Self; 4] = [
        Self::AiVoiceChat,
        Self::ReputationManager,
        Self::MissedCallTextback,
        Self::SocialPoster,
    ];

    /// The storage/wire slug for this add-on.
    #[must_use]
    pub const fn as_slug(&self) -> &'static str {
        match self {
            Self::AiVoiceChat => "ai-voice-chat",
            Self::ReputationManager => "reputation-manager",
            Self::MissedCallTextback => "missed-call-textback",
            Self::SocialPoster => "social-poster",
        }
    }
}

impl fmt::Display for AddonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_slug())
    }
}

impl FromStr for AddonId {
    type Err = UnknownAddon;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ai-voice-chat" => Ok(Self::AiVoiceChat),
            "reputation-manager" => Ok(Self::ReputationManager),
            "missed-call-textback" => Ok(Self::MissedCallTextback),
            "social-poster" => Ok(Self::SocialPoster),
            other => Err(UnknownAddon(other.to_string())),
        }
    }
}
