//! Conversation turn types for newshound.
//!
//! These types model the local conversation log and the payloads the
//! backend returns for submission and hydration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(format!("invalid role: '{other}'")),
        }
    }
}

/// A single message in the conversation.
///
/// Turns are immutable once created and ordered by submission. `sources`
/// carries the articles the backend grounded an assistant reply on (empty
/// for user turns and hydrated history). `failed` marks the synthetic
/// assistant turn appended when a submission fails; failed turns stay in
/// the log but never contribute to conversation context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<RelevantArticle>,
    #[serde(default)]
    pub failed: bool,
}

impl Turn {
    /// Build a user turn from submitted text.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            sources: Vec::new(),
            failed: false,
        }
    }

    /// Build an assistant turn from a backend reply.
    pub fn assistant(content: impl Into<String>, sources: Vec<RelevantArticle>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            sources,
            failed: false,
        }
    }

    /// Build the synthetic assistant turn shown when a submission fails.
    pub fn failure(message: &str) -> Self {
        Self {
            id: Uuid::now_v7(),
            role: Role::Assistant,
            content: format!("Sorry, I encountered an error: {message}"),
            timestamp: Utc::now(),
            sources: Vec::new(),
            failed: true,
        }
    }

    /// Build a turn from a hydrated history record, keeping its original
    /// timestamp.
    pub fn from_history(message: HistoryMessage) -> Self {
        Self {
            id: Uuid::now_v7(),
            role: message.role,
            content: message.content,
            timestamp: message.timestamp,
            sources: Vec::new(),
            failed: false,
        }
    }
}

/// One strictly-parsed history record from the backend.
///
/// Raw records that do not fit this shape (unknown role, missing content,
/// unparseable timestamp) are dropped at the gateway boundary and never
/// reach the conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Backend reply to a submitted turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub relevant_articles: Vec<RelevantArticle>,
}

/// A news article the backend retrieved to ground a reply.
///
/// `score` is retrieval relevance (higher is better); `distance` is the
/// raw vector distance it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevantArticle {
    pub title: String,
    pub url: String,
    pub text: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub date_publish: String,
    pub score: f64,
    pub distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_id: Option<i64>,
}
