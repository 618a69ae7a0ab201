//! Backend health and session metadata payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

/// Result of the backend health probe.
///
/// `services` is an open map (service name to state string) rather than a
/// fixed struct: which services exist is backend topology, not client
/// contract. `BTreeMap` keeps display order stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub status: String,
    pub services: BTreeMap<String, String>,
    pub database: DatabaseStatus,
    pub timestamp: DateTime<Utc>,
}

/// Article store block of the health probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseStatus {
    pub collection: String,
    pub document_count: u64,
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Per-session metadata reported by the backend.
///
/// `ttl_seconds` is signed: the backend reports negative sentinel values
/// for sessions without an expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub message_count: u32,
    pub ttl_seconds: i64,
    pub expires_at: DateTime<Utc>,
    pub status: String,
}
