//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::CheckoutConfig;
use crate::services::{AnalyticsSink, BackendClient, BackendError, HttpSink, TracingSink};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the backend client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: CheckoutConfig,
    backend: BackendClient,
    analytics: Arc<dyn AnalyticsSink>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Picks the HTTP analytics sink when a collector endpoint is
    /// configured, and the tracing sink otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client fails to build.
    pub fn new(config: CheckoutConfig) -> Result<Self, BackendError> {
        let backend = BackendClient::new(&config.backend)?;
        let analytics: Arc<dyn AnalyticsSink> = match &config.analytics_collector_url {
            Some(endpoint) => Arc::new(HttpSink::new(endpoint.clone())),
            None => Arc::new(TracingSink),
        };

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                analytics,
            }),
        })
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &CheckoutConfig {
        &self.inner.config
    }

    /// Get a reference to the backend API client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Get a reference to the analytics sink.
    #[must_use]
    pub fn analytics(&self) -> &dyn AnalyticsSink {
        self.inner.analytics.as_ref()
    }
}
