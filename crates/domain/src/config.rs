//! Configuration structures
//!
//! Loaded once per process by `blendfeed_infra::config::loader` and passed
//! explicitly into the client and the orchestrator.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    BETA_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_INSTANCE_ID, PRODUCTION_BASE_URL,
};
use crate::types::Feed;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub api: ApiSettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub feeds: Vec<Feed>,
}

impl Config {
    /// Find a configured feed by name or id.
    pub fn feed(&self, name_or_id: &str) -> Option<&Feed> {
        self.feeds.iter().find(|feed| feed.name == name_or_id || feed.id == name_or_id)
    }
}

/// Remote environment selector.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApiEnvironment {
    #[default]
    Beta,
    Production,
    /// Any other base URL (staging proxies, local mock servers).
    Custom(String),
}

impl ApiEnvironment {
    /// Base URL every route is joined onto.
    pub fn base_url(&self) -> &str {
        match self {
            Self::Beta => BETA_BASE_URL,
            Self::Production => PRODUCTION_BASE_URL,
            Self::Custom(url) => url,
        }
    }
}

impl From<String> for ApiEnvironment {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "beta" | "test" => Self::Beta,
            "production" | "prod" => Self::Production,
            _ if trimmed == BETA_BASE_URL => Self::Beta,
            _ if trimmed == PRODUCTION_BASE_URL => Self::Production,
            _ => Self::Custom(trimmed.to_string()),
        }
    }
}

impl From<&str> for ApiEnvironment {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ApiEnvironment> for String {
    fn from(value: ApiEnvironment) -> Self {
        match value {
            ApiEnvironment::Beta => "beta".to_string(),
            ApiEnvironment::Production => "production".to_string(),
            ApiEnvironment::Custom(url) => url,
        }
    }
}

/// Credentials and environment for the remote API.
///
/// Immutable for the duration of a submission.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiSettings {
    #[serde(default)]
    pub tenant_name: String,
    #[serde(default = "default_instance_id")]
    pub instance_id: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub environment: ApiEnvironment,
}

fn default_instance_id() -> String {
    DEFAULT_INSTANCE_ID.to_string()
}

impl ApiSettings {
    /// Base URL for the selected environment.
    pub fn base_url(&self) -> &str {
        self.environment.base_url()
    }
}

impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("tenant_name", &self.tenant_name)
            .field("instance_id", &self.instance_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("environment", &self.environment)
            .finish()
    }
}

/// HTTP transport settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpSettings {
    pub timeout_seconds: u64,
}

impl HttpSettings {
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS }
    }
}
