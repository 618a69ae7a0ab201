//! Infrastructure implementations for newshound.
//!
//! Implements the seams declared in `newshound-core` against real I/O:
//! the chat gateway over HTTP (reqwest), session-id persistence on the
//! filesystem, and the `config.toml` loader.

pub mod config;
pub mod http;
pub mod store;
