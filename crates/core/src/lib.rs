//! EverIntent Core - Shared domain types.
//!
//! This crate provides common types used across the checkout service
//! components:
//! - `checkout` - Checkout flow service (HTTP API)
//! - `integration-tests` - Cross-crate flow tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no session
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Tier and add-on identifiers, order status, resume token

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
