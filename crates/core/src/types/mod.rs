//! Core types for the EverIntent checkout flow.
//!
//! This module provides type-safe identifiers for the fixed pricing catalog
//! and the backend order-record contract.

pub mod addon;
pub mod order;
pub mod tier;

pub use addon::{AddonId, UnknownAddon};
pub use order::{OrderStatus, ResumeToken};
pub use tier::{TierId, UnknownTier};
