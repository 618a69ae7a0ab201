//! ChatGateway trait definition.
//!
//! The typed boundary between conversation orchestration and the news Q&A
//! REST backend. Every transport failure is normalized into the
//! [`GatewayError`] taxonomy on the other side of this trait; callers
//! never see raw HTTP errors. Retries are nobody's job here -- the
//! gateway never retries, and neither does the controller.

use newshound_types::chat::{ChatReply, HistoryMessage};
use newshound_types::error::GatewayError;
use newshound_types::session::SessionId;
use newshound_types::status::{SessionInfo, SystemStatus};

/// Request/response boundary to the backend.
///
/// Implementations live in newshound-infra (e.g., `HttpChatGateway`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatGateway: Send + Sync {
    /// Register a session with the backend. Idempotent: registering an
    /// existing session succeeds. Returns the backend-confirmed id string.
    fn register_session(
        &self,
        id: &SessionId,
    ) -> impl std::future::Future<Output = Result<String, GatewayError>> + Send;

    /// Fetch stored history for a session, oldest first.
    ///
    /// A conversation with no history is an empty Vec, not an error.
    /// Records that fail strict parsing are dropped at this boundary.
    fn fetch_history(
        &self,
        id: &SessionId,
    ) -> impl std::future::Future<Output = Result<Vec<HistoryMessage>, GatewayError>> + Send;

    /// Submit one user turn and wait for the reply.
    ///
    /// Callers must have trimmed the text and enforced the length cap
    /// already; the gateway does not re-validate.
    fn submit_turn(
        &self,
        id: &SessionId,
        text: &str,
    ) -> impl std::future::Future<Output = Result<ChatReply, GatewayError>> + Send;

    /// Delete stored history for a session. Idempotent: clearing an
    /// absent history succeeds.
    fn clear_history(
        &self,
        id: &SessionId,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send;

    /// Probe backend health. Independent of any session.
    fn fetch_status(
        &self,
    ) -> impl std::future::Future<Output = Result<SystemStatus, GatewayError>> + Send;

    /// Fetch per-session metadata (creation time, message count, TTL).
    fn session_info(
        &self,
        id: &SessionId,
    ) -> impl std::future::Future<Output = Result<SessionInfo, GatewayError>> + Send;
}
