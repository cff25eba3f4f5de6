//! Submission port interfaces
//!
//! The orchestrator talks to the remote lending platform and to the host
//! form platform only through these traits. `blendfeed-infra` provides the
//! HTTP implementation of [`LenderApi`]; hosts implement [`FeedHost`].

use std::fmt;

use async_trait::async_trait;
use blendfeed_domain::{ApiError, ApiSettings, EntryNote, Feed, Result, TargetInstance};

/// Result of one remote call: the raw response body or a tagged failure.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// HTTP verbs used against the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated access to the remote lending API.
///
/// Implementations hold a mutable target-instance override, so one instance
/// must not be shared between concurrent submissions.
#[async_trait]
pub trait LenderApi: Send + Sync {
    /// Replace base URL, default tenant/instance, and credentials.
    fn configure(&mut self, settings: &ApiSettings);

    /// Apply a `tenant~instance` override for subsequent calls.
    ///
    /// An empty value leaves the current configuration untouched.
    fn set_target_instance(&mut self, value: &str);

    /// Send `body` to `route` and return the raw response body.
    ///
    /// `target` overrides any previously set target instance for this call
    /// only. Never panics; every failure is an `ApiError`.
    async fn request(
        &self,
        method: HttpMethod,
        route: &str,
        body: String,
        target: Option<&TargetInstance>,
    ) -> ApiResult<String>;

    async fn get(&self, route: &str, target: Option<&TargetInstance>) -> ApiResult<String> {
        self.request(HttpMethod::Get, route, String::new(), target).await
    }

    async fn post(
        &self,
        route: &str,
        body: String,
        target: Option<&TargetInstance>,
    ) -> ApiResult<String> {
        self.request(HttpMethod::Post, route, body, target).await
    }

    async fn patch(
        &self,
        route: &str,
        body: String,
        target: Option<&TargetInstance>,
    ) -> ApiResult<String> {
        self.request(HttpMethod::Patch, route, body, target).await
    }

    async fn put(
        &self,
        route: &str,
        body: String,
        target: Option<&TargetInstance>,
    ) -> ApiResult<String> {
        self.request(HttpMethod::Put, route, body, target).await
    }

    async fn delete(&self, route: &str, target: Option<&TargetInstance>) -> ApiResult<String> {
        self.request(HttpMethod::Delete, route, String::new(), target).await
    }
}

/// Creates a fresh [`LenderApi`] client per submission.
pub trait LenderConnector: Send + Sync {
    /// Build a client configured from `settings`.
    ///
    /// # Errors
    /// Returns `FeedError::Config` when a client cannot be built.
    fn connect(&self, settings: &ApiSettings) -> Result<Box<dyn LenderApi>>;
}

/// Host form platform collaborator that receives per-entry outcomes.
#[async_trait]
pub trait FeedHost: Send + Sync {
    /// Append a note to the originating entry.
    async fn add_note(&self, entry_id: &str, note: EntryNote) -> Result<()>;

    /// Report a feed-level processing error for the entry.
    async fn add_feed_error(&self, feed: &Feed, entry_id: &str, message: &str) -> Result<()>;
}
