//! Conversions from external infrastructure errors into domain errors.

use std::error::Error as _;
use std::io::Error as IoError;

use blendfeed_domain::{ApiError, FeedError};
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub FeedError);

impl From<InfraError> for FeedError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<FeedError> for InfraError {
    fn from(value: FeedError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoFeedError {
    fn into_feed_error(self) -> FeedError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → FeedError */
/* -------------------------------------------------------------------------- */

impl IntoFeedError for HttpError {
    fn into_feed_error(self) -> FeedError {
        if self.is_builder() {
            return FeedError::Config(format!("invalid HTTP client configuration: {self}"));
        }
        if self.is_timeout() {
            return FeedError::Network("HTTP request timed out".into());
        }
        if self.is_connect() {
            return FeedError::Network("HTTP connection failure".into());
        }
        FeedError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_feed_error())
    }
}

/// Transport-level failure text for a request that produced no response.
///
/// The full error chain is kept so operators see the underlying cause
/// (DNS, TLS, refused connection).
pub fn transport_error(err: &HttpError) -> ApiError {
    let mut message = if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    };

    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    ApiError::transport(message)
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → FeedError */
/* -------------------------------------------------------------------------- */

impl IntoFeedError for IoError {
    fn into_feed_error(self) -> FeedError {
        match self.kind() {
            std::io::ErrorKind::NotFound => FeedError::NotFound(self.to_string()),
            _ => FeedError::Config(format!("I/O error: {self}")),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        Self(value.into_feed_error())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
