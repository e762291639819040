//! External service clients and sinks.

pub mod analytics;
pub mod backend;

pub use analytics::{AnalyticsEvent, AnalyticsSink, HttpSink, TracingSink};
pub use backend::{
    BackendClient, BackendError, OrderCreationResponse, OrderPayload, OrderRecord, PayloadAddon,
    RecordAddon,
};
