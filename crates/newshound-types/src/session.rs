//! Session identity for the news Q&A backend.
//!
//! A session id correlates one conversation across client restarts. The
//! backend treats ids as opaque tokens; the client owns generation and
//! validation. Ids follow a fixed structural pattern and are never
//! mutated, only replaced wholesale on reset.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Number of random characters in the id suffix.
const SUFFIX_LEN: usize = 8;

/// A client-generated session identifier.
///
/// Format: `sess_{unix_millis}_{8 random alphanumeric chars}`. The
/// millisecond timestamp makes ids roughly sortable; the random suffix
/// makes collisions across clients vanishingly unlikely.
///
/// Construction goes through [`SessionId::generate`] or the validating
/// [`FromStr`] impl, so a held `SessionId` is always structurally valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh id from the current time and a random suffix.
    ///
    /// The suffix is the first eight hex characters of a UUIDv4.
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let uuid = Uuid::new_v4().simple().to_string();
        Self(format!("sess_{millis}_{}", &uuid[..SUFFIX_LEN]))
    }

    /// Structural validity check: `sess_` prefix, all-digit millisecond
    /// block, exactly eight alphanumeric suffix characters.
    ///
    /// Pure and local -- never consults the backend.
    pub fn is_valid(candidate: &str) -> bool {
        let Some(rest) = candidate.strip_prefix("sess_") else {
            return false;
        };
        let Some((millis, suffix)) = rest.split_once('_') else {
            return false;
        };
        !millis.is_empty()
            && millis.bytes().all(|b| b.is_ascii_digit())
            && suffix.len() == SUFFIX_LEN
            && suffix.bytes().all(|b| b.is_ascii_alphanumeric())
    }

    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix for display (first eight characters).
    pub fn prefix(&self) -> &str {
        &self.0[..8.min(self.0.len())]
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(format!("invalid session id: '{s}'"))
        }
    }
}
