//! Integration tests for the EverIntent checkout service.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p everintent-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Full flow scenarios: fresh start, resume, hydration
//! - `submission` - Submission gating and the order-creation wire contract
//! - `session_store` - Snapshot persistence against a real session store
//!
//! Tests drive the checkout library directly; no server or backend is
//! started.
