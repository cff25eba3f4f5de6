//! Error types used throughout the feed

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the Blend feed
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum FeedError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for feed operations
pub type Result<T> = std::result::Result<T, FeedError>;

/// Coarse classification of a remote API failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// The request never produced an HTTP response (connect, timeout, TLS).
    Transport,
    /// The remote API answered with a non-success status.
    Status,
}

crate::impl_domain_status_conversions!(ApiErrorKind {
    Transport => "transport",
    Status => "status",
});

/// Failure returned by every remote API call.
///
/// The client never raises past its boundary: transport problems and
/// non-2xx answers both become one of these values, carrying the detail the
/// caller needs to report the failure.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApiError {
    /// Connection error, timeout, or any exception raised while sending.
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Non-success HTTP status; `body` is the raw remote payload.
    #[error("Blend API returned status {status}: {body}")]
    Status { status: u16, body: String },
}

impl ApiError {
    /// Build a transport failure from any displayable error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport { message: message.into() }
    }

    /// Build a status failure from an HTTP status and the raw body.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status { status, body: body.into() }
    }

    /// Classification of this failure.
    pub const fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Transport { .. } => ApiErrorKind::Transport,
            Self::Status { .. } => ApiErrorKind::Status,
        }
    }

    /// The raw remote body or the exception text.
    pub fn detail(&self) -> &str {
        match self {
            Self::Transport { message } => message,
            Self::Status { body, .. } => body,
        }
    }

    /// HTTP status of the failure, when the remote API answered.
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Transport { .. } => None,
            Self::Status { status, .. } => Some(*status),
        }
    }
}

impl From<ApiError> for FeedError {
    fn from(err: ApiError) -> Self {
        Self::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_exposes_kind_and_detail() {
        let transport = ApiError::transport("connection refused");
        assert_eq!(transport.kind(), ApiErrorKind::Transport);
        assert_eq!(transport.detail(), "connection refused");
        assert_eq!(transport.http_status(), None);

        let status = ApiError::status(422, r#"{"message":"bad email"}"#);
        assert_eq!(status.kind(), ApiErrorKind::Status);
        assert_eq!(status.detail(), r#"{"message":"bad email"}"#);
        assert_eq!(status.http_status(), Some(422));
    }

    #[test]
    fn api_error_serializes_with_kind_tag() {
        let json = serde_json::to_value(ApiError::status(500, "boom")).unwrap();
        assert_eq!(json["kind"], "status");
        assert_eq!(json["status"], 500);
        assert_eq!(json["body"], "boom");
    }

    #[test]
    fn feed_error_round_trips_through_serde() {
        let err = FeedError::Config("missing username".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"type":"Config","message":"missing username"}"#);
        let back: FeedError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn api_error_converts_to_network_feed_error() {
        let err: FeedError = ApiError::transport("timed out").into();
        assert!(matches!(err, FeedError::Network(msg) if msg.contains("timed out")));
    }
}
