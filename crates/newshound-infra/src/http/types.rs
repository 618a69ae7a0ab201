//! Wire payloads for the news Q&A REST API.
//!
//! Envelope keys are camelCase on the wire. Article and history record
//! keys come through snake_case from the retrieval layer, so those reuse
//! the domain types directly instead of duplicating them here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use newshound_types::chat::{ChatReply, RelevantArticle};
use newshound_types::status::{DatabaseStatus, SessionInfo, SystemStatus};

use std::collections::BTreeMap;

/// `POST /api/session` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSessionRequest<'a> {
    pub session_id: &'a str,
}

/// `POST /api/session` response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSessionResponse {
    pub session_id: String,
}

/// `POST /api/chat/message` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMessageRequest<'a> {
    pub session_id: &'a str,
    pub message: &'a str,
}

/// `POST /api/chat/message` response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReplyPayload {
    pub response: String,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub relevant_articles: Vec<RelevantArticle>,
}

impl From<ChatReplyPayload> for ChatReply {
    fn from(payload: ChatReplyPayload) -> Self {
        ChatReply {
            response: payload.response,
            session_id: payload.session_id,
            timestamp: payload.timestamp,
            relevant_articles: payload.relevant_articles,
        }
    }
}

/// `GET /api/chat/history/{id}` response body.
///
/// Records stay raw here: each is parsed individually at the gateway so
/// one malformed record drops alone instead of failing the whole fetch.
#[derive(Debug, Deserialize)]
pub struct HistoryEnvelope {
    #[serde(default)]
    pub messages: Vec<Value>,
}

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

/// `GET /api/chat/status` response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    pub status: String,
    #[serde(default)]
    pub services: BTreeMap<String, String>,
    pub database: DatabasePayload,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabasePayload {
    pub collection: String,
    pub document_count: u64,
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl From<StatusPayload> for SystemStatus {
    fn from(payload: StatusPayload) -> Self {
        SystemStatus {
            status: payload.status,
            services: payload.services,
            database: DatabaseStatus {
                collection: payload.database.collection,
                document_count: payload.database.document_count,
                status: payload.database.status,
                message: payload.database.message,
            },
            timestamp: payload.timestamp,
        }
    }
}

/// `GET /api/session/{id}` response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfoPayload {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub message_count: u32,
    pub ttl_seconds: i64,
    pub expires_at: DateTime<Utc>,
    pub status: String,
}

impl From<SessionInfoPayload> for SessionInfo {
    fn from(payload: SessionInfoPayload) -> Self {
        SessionInfo {
            session_id: payload.session_id,
            created_at: payload.created_at,
            message_count: payload.message_count,
            ttl_seconds: payload.ttl_seconds,
            expires_at: payload.expires_at,
            status: payload.status,
        }
    }
}
