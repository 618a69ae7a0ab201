//! Shared domain types for newshound.
//!
//! This crate contains the domain types used across the newshound client:
//! session identity, conversation turns, backend payloads, and their
//! associated error taxonomies.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod error;
pub mod session;
pub mod status;
