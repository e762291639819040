//! Backend order-record types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Status of a backend order record.
///
/// Only [`OrderStatus::Pending`] rows are resumable; every other status
/// (including values this service has never heard of) degrades to a fresh
/// checkout. The catch-all variant keeps an unrecognized backend status from
/// failing the whole resume fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Abandoned,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Whether a record with this status may be resumed into a checkout.
    #[must_use]
    pub const fn is_resumable(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Opaque token identifying a resumable backend order record.
///
/// Embedded in checkout URLs (`?resume=...`); this service treats it as an
/// opaque key and never inspects or synthesizes its contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeToken(String);

impl ResumeToken {
    /// Wrap a raw token string.
    #[must_use]
    pub const fn new(token: String) -> Self {
        Self(token)
    }

    /// Get the underlying token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResumeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ResumeToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_is_resumable() {
        assert!(OrderStatus::Pending.is_resumable());
        assert!(!OrderStatus::Completed.is_resumable());
        assert!(!OrderStatus::Abandoned.is_resumable());
        assert!(!OrderStatus::Cancelled.is_resumable());
        assert!(!OrderStatus::Unknown.is_resumable());
    }

    #[test]
    fn test_unknown_status_deserializes() {
        let status: OrderStatus = serde_json::from_str("\"paid_in_full\"").unwrap();
        assert_eq!(status, OrderStatus::Unknown);
    }

    #[test]
    fn test_status_snake_case() {
        let status: OrderStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, OrderStatus::Pending);
    }

    #[test]
    fn test_resume_token_transparent_serde() {
        let token = ResumeToken::new("ord_8f2k".to_string());
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"ord_8f2k\"");
    }
}
