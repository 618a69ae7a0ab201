//! [`HttpChatGateway`] -- reqwest implementation of [`ChatGateway`].
//!
//! Normalizes every transport outcome into the gateway error taxonomy at
//! this boundary: a failure status becomes [`GatewayError::Server`] with
//! the body's `error` detail, a request that never got a response becomes
//! [`GatewayError::NoResponse`], and everything else (unbuildable request,
//! undecodable reply) becomes [`GatewayError::Client`]. Callers never see
//! reqwest errors.

use std::time::Duration;

use reqwest::{Response, StatusCode};
use tracing::debug;

use newshound_core::gateway::ChatGateway;
use newshound_types::chat::{ChatReply, HistoryMessage};
use newshound_types::error::GatewayError;
use newshound_types::session::SessionId;
use newshound_types::status::{SessionInfo, SystemStatus};

use crate::config::ClientConfig;

use super::types::{
    ChatReplyPayload, ErrorBody, HistoryEnvelope, RegisterSessionRequest, RegisterSessionResponse,
    SessionInfoPayload, StatusPayload, SubmitMessageRequest,
};

/// Chat gateway over the backend's REST API.
pub struct HttpChatGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatGateway {
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a send-phase failure. An unbuildable request is a client bug;
    /// anything else at this phase means no response arrived.
    fn transport(err: reqwest::Error) -> GatewayError {
        debug!(%err, "transport failure");
        if err.is_builder() {
            return GatewayError::Client {
                message: err.to_string(),
            };
        }
        GatewayError::no_response()
    }

    /// Map a body-decode failure on a success response.
    fn decode(err: reqwest::Error) -> GatewayError {
        GatewayError::Client {
            message: format!("failed to decode response: {err}"),
        }
    }

    /// Pass a success response through; turn a failure status into
    /// [`GatewayError::Server`] with the body's `error` detail when the
    /// backend supplied one.
    async fn check(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);
        Err(GatewayError::server(status.as_u16(), detail))
    }
}

impl ChatGateway for HttpChatGateway {
    async fn register_session(&self, id: &SessionId) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(self.url("/api/session"))
            .json(&RegisterSessionRequest {
                session_id: id.as_str(),
            })
            .send()
            .await
            .map_err(Self::transport)?;

        let body: RegisterSessionResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(Self::decode)?;
        Ok(body.session_id)
    }

    async fn fetch_history(&self, id: &SessionId) -> Result<Vec<HistoryMessage>, GatewayError> {
        let response = self
            .client
            .get(self.url(&format!("/api/chat/history/{id}")))
            .send()
            .await
            .map_err(Self::transport)?;

        let envelope: HistoryEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .map_err(Self::decode)?;

        // Strict per-record parse: a malformed record drops alone.
        let mut messages = Vec::with_capacity(envelope.messages.len());
        for raw in envelope.messages {
            match serde_json::from_value::<HistoryMessage>(raw) {
                Ok(message) => messages.push(message),
                Err(err) => debug!(%err, session = %id, "dropping malformed history record"),
            }
        }
        Ok(messages)
    }

    async fn submit_turn(&self, id: &SessionId, text: &str) -> Result<ChatReply, GatewayError> {
        let response = self
            .client
            .post(self.url("/api/chat/message"))
            .json(&SubmitMessageRequest {
                session_id: id.as_str(),
                message: text,
            })
            .send()
            .await
            .map_err(Self::transport)?;

        let payload: ChatReplyPayload = Self::check(response)
            .await?
            .json()
            .await
            .map_err(Self::decode)?;
        Ok(payload.into())
    }

    async fn clear_history(&self, id: &SessionId) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/chat/history/{id}")))
            .send()
            .await
            .map_err(Self::transport)?;

        // Clearing a session the backend never saw (or already expired)
        // is a no-op, not a failure.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::check(response).await?;
        Ok(())
    }

    async fn fetch_status(&self) -> Result<SystemStatus, GatewayError> {
        let response = self
            .client
            .get(self.url("/api/chat/status"))
            .send()
            .await
            .map_err(Self::transport)?;

        let payload: StatusPayload = Self::check(response)
            .await?
            .json()
            .await
            .map_err(Self::decode)?;
        Ok(payload.into())
    }

    async fn session_info(&self, id: &SessionId) -> Result<SessionInfo, GatewayError> {
        let response = self
            .client
            .get(self.url(&format!("/api/session/{id}")))
            .send()
            .await
            .map_err(Self::transport)?;

        let payload: SessionInfoPayload = Self::check(response)
            .await?
            .json()
            .await
            .map_err(Self::decode)?;
        Ok(payload.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::extract::Path;
    use axum::routing::{delete, get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use newshound_types::chat::Role;

    /// Serve a stub backend on a loopback port, returning its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn gateway(base_url: &str) -> HttpChatGateway {
        HttpChatGateway::new(&ClientConfig {
            api_url: base_url.to_string(),
            request_timeout_secs: 5,
        })
    }

    fn session() -> SessionId {
        "sess_1700000000000_abcd1234".parse().unwrap()
    }

    #[tokio::test]
    async fn register_sends_camel_case_and_parses_echo() {
        let router = Router::new().route(
            "/api/session",
            post(|Json(body): Json<Value>| async move {
                // Echo whatever arrived under the camelCase key.
                Json(json!({ "sessionId": body["sessionId"] }))
            }),
        );
        let base = serve(router).await;

        let id = session();
        let registered = gateway(&base).register_session(&id).await.unwrap();
        assert_eq!(registered, id.as_str());
    }

    #[tokio::test]
    async fn fetch_history_drops_malformed_records() {
        let router = Router::new().route(
            "/api/chat/history/{id}",
            get(|| async {
                Json(json!({
                    "messages": [
                        {"role": "user", "content": "hi", "timestamp": "2025-06-01T12:00:00Z"},
                        {"role": "oracle", "content": "??", "timestamp": "2025-06-01T12:00:01Z"},
                        {"role": "assistant", "timestamp": "2025-06-01T12:00:02Z"},
                        {"role": "assistant", "content": "hello", "timestamp": "2025-06-01T12:00:03Z"},
                    ]
                }))
            }),
        );
        let base = serve(router).await;

        let messages = gateway(&base).fetch_history(&session()).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "hi");
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "hello");
    }

    #[tokio::test]
    async fn submit_parses_reply_and_articles() {
        let router = Router::new().route(
            "/api/chat/message",
            post(|| async {
                Json(json!({
                    "response": "Markets rallied on rate cut hopes.",
                    "sessionId": "sess_1700000000000_abcd1234",
                    "timestamp": "2025-06-01T12:00:00Z",
                    "relevantArticles": [{
                        "title": "Markets rally",
                        "url": "https://www.bbc.com/news/business-0001",
                        "text": "Stocks climbed after...",
                        "authors": "BBC News",
                        "date_publish": "2025-06-01",
                        "score": 0.91,
                        "distance": 0.09,
                        "chunk_id": 7
                    }]
                }))
            }),
        );
        let base = serve(router).await;

        let reply = gateway(&base)
            .submit_turn(&session(), "what happened?")
            .await
            .unwrap();
        assert_eq!(reply.response, "Markets rallied on rate cut hopes.");
        assert_eq!(reply.relevant_articles.len(), 1);
        let article = &reply.relevant_articles[0];
        assert_eq!(article.title, "Markets rally");
        assert_eq!(article.authors, "BBC News");
        assert_eq!(article.chunk_id, Some(7));
    }

    #[tokio::test]
    async fn failure_status_uses_body_detail() {
        let router = Router::new().route(
            "/api/chat/message",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "boom"})),
                )
            }),
        );
        let base = serve(router).await;

        let err = gateway(&base)
            .submit_turn(&session(), "hi")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::Server {
                status: 500,
                message: "boom".to_string()
            }
        );
    }

    #[tokio::test]
    async fn failure_status_without_detail_falls_back() {
        let router = Router::new().route(
            "/api/chat/status",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let base = serve(router).await;

        let err = gateway(&base).fetch_status().await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::Server {
                status: 503,
                message: "Server error occurred".to_string()
            }
        );
    }

    #[tokio::test]
    async fn connection_refused_is_no_response() {
        // Bind and immediately drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = gateway(&format!("http://{addr}"))
            .fetch_status()
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::no_response());
    }

    #[tokio::test]
    async fn malformed_success_body_is_client_error() {
        let router = Router::new().route("/api/chat/status", get(|| async { "not json" }));
        let base = serve(router).await;

        let err = gateway(&base).fetch_status().await.unwrap_err();
        assert!(matches!(err, GatewayError::Client { .. }));
    }

    #[tokio::test]
    async fn clear_history_succeeds() {
        let router = Router::new().route(
            "/api/chat/history/{id}",
            delete(|Path(id): Path<String>| async move {
                assert_eq!(id, "sess_1700000000000_abcd1234");
                Json(json!({"message": "Chat history cleared successfully"}))
            }),
        );
        let base = serve(router).await;

        gateway(&base).clear_history(&session()).await.unwrap();
    }

    #[tokio::test]
    async fn clear_history_tolerates_missing_session() {
        let router = Router::new().route(
            "/api/chat/history/{id}",
            delete(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"error": "Session not found"})),
                )
            }),
        );
        let base = serve(router).await;

        gateway(&base).clear_history(&session()).await.unwrap();
    }

    #[tokio::test]
    async fn clear_history_twice_never_errors() {
        // First delete removes the history; the second finds nothing and
        // 404s. Both succeed from the client's perspective.
        let cleared = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let state = Arc::clone(&cleared);
        let router = Router::new().route(
            "/api/chat/history/{id}",
            delete(move || async move {
                if state.swap(true, std::sync::atomic::Ordering::SeqCst) {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"error": "Session not found"})),
                    )
                } else {
                    (
                        StatusCode::OK,
                        Json(json!({"message": "Chat history cleared successfully"})),
                    )
                }
            }),
        );
        let base = serve(router).await;

        let gateway = gateway(&base);
        gateway.clear_history(&session()).await.unwrap();
        gateway.clear_history(&session()).await.unwrap();
        assert!(cleared.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[tokio::test]
    async fn status_maps_payload_into_domain() {
        let router = Router::new().route(
            "/api/chat/status",
            get(|| async {
                Json(json!({
                    "status": "healthy",
                    "services": {
                        "redis": "connected",
                        "chroma": "connected",
                        "gemini": "configured",
                        "jina": "configured"
                    },
                    "database": {
                        "collection": "news_articles",
                        "documentCount": 1523,
                        "status": "ready"
                    },
                    "timestamp": "2025-06-01T12:00:00Z"
                }))
            }),
        );
        let base = serve(router).await;

        let status = gateway(&base).fetch_status().await.unwrap();
        assert_eq!(status.status, "healthy");
        assert_eq!(status.services.len(), 4);
        assert_eq!(status.services["redis"], "connected");
        assert_eq!(status.database.collection, "news_articles");
        assert_eq!(status.database.document_count, 1523);
        assert!(status.database.message.is_empty());
    }

    #[tokio::test]
    async fn session_info_maps_payload_into_domain() {
        let router = Router::new().route(
            "/api/session/{id}",
            get(|| async {
                Json(json!({
                    "sessionId": "sess_1700000000000_abcd1234",
                    "createdAt": "2025-06-01T12:00:00Z",
                    "messageCount": 6,
                    "ttlSeconds": 3600,
                    "expiresAt": "2025-06-01T13:00:00Z",
                    "status": "active"
                }))
            }),
        );
        let base = serve(router).await;

        let info = gateway(&base).session_info(&session()).await.unwrap();
        assert_eq!(info.session_id, "sess_1700000000000_abcd1234");
        assert_eq!(info.message_count, 6);
        assert_eq!(info.ttl_seconds, 3600);
        assert_eq!(info.status, "active");
    }
}
