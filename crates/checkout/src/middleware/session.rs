//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. The session is the
//! checkout's ephemeral store: it lives for the browser session (session
//! cookie, no max-age) and is the only place in-progress checkouts are
//! persisted on this side.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::CheckoutConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "ei_session";

/// Create the session layer with the in-memory store.
#[must_use]
pub fn create_session_layer(config: &CheckoutConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        // Session cookie: gone when the browser closes, like the
        // sessionStorage slot it stands in for.
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
