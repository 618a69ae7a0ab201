//! Error taxonomies for gateway and session storage failures.
//!
//! Transport failures are normalized into [`GatewayError`] exactly once,
//! at the gateway boundary, and never re-wrapped further up. `Display` on
//! each variant is the user-facing text shown in the error banner and in
//! synthetic failure turns, so messages here are UX copy, not debug dumps.

use thiserror::Error;

/// Fallback message when a failure status carries no error detail.
const SERVER_ERROR_FALLBACK: &str = "Server error occurred";

/// Message for requests that went out but got nothing back.
const NO_RESPONSE_MESSAGE: &str = "No response from server. Please check your connection.";

/// Errors surfaced by the chat gateway.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// The backend responded with a failure status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The request was sent but no response came back (connection
    /// refused, timeout, network drop).
    #[error("{message}")]
    NoResponse { message: String },

    /// The request could not be built or the reply could not be decoded.
    #[error("{message}")]
    Client { message: String },
}

impl GatewayError {
    /// Server failure, using the response body's error detail when
    /// present and the canonical fallback otherwise.
    pub fn server(status: u16, detail: Option<String>) -> Self {
        Self::Server {
            status,
            message: detail
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string()),
        }
    }

    /// Canonical request-sent-but-no-response failure.
    pub fn no_response() -> Self {
        Self::NoResponse {
            message: NO_RESPONSE_MESSAGE.to_string(),
        }
    }
}

/// Errors from durable session-id storage.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_uses_body_detail() {
        let err = GatewayError::server(500, Some("boom".to_string()));
        assert_eq!(err.to_string(), "boom");
        assert_eq!(
            err,
            GatewayError::Server {
                status: 500,
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn test_server_error_falls_back_without_detail() {
        assert_eq!(
            GatewayError::server(503, None).to_string(),
            "Server error occurred"
        );
        assert_eq!(
            GatewayError::server(503, Some(String::new())).to_string(),
            "Server error occurred"
        );
    }

    #[test]
    fn test_no_response_display() {
        assert_eq!(
            GatewayError::no_response().to_string(),
            "No response from server. Please check your connection."
        );
    }

    #[test]
    fn test_store_error_display() {
        let err = SessionStoreError::Unavailable("disk full".to_string());
        assert_eq!(err.to_string(), "session storage unavailable: disk full");
    }
}
