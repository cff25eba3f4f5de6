use blendfeed_core::{LenderApi, LenderConnector};
use blendfeed_domain::{ApiSettings, FeedError, HttpSettings, Result};
use tracing::debug;

use super::client::{build_http_client, BlendClient};
use crate::http::HttpClient;

/// Hands out one [`BlendClient`] per submission.
///
/// Clients share a single HTTP connection pool; the per-submission state
/// (target-instance override) lives in each client.
#[derive(Clone, Debug)]
pub struct BlendConnector {
    http: HttpClient,
}

impl BlendConnector {
    /// # Errors
    /// Returns `FeedError::Config` if the HTTP client cannot be built.
    pub fn new(http: &HttpSettings) -> Result<Self> {
        Ok(Self { http: build_http_client(http)? })
    }

    pub fn with_http_client(http: HttpClient) -> Self {
        Self { http }
    }

    /// Concrete client, for callers that need more than the port offers.
    pub fn client(&self, settings: &ApiSettings) -> Result<BlendClient> {
        validate_settings(settings)?;
        Ok(BlendClient::new(self.http.clone(), settings))
    }
}

impl LenderConnector for BlendConnector {
    fn connect(&self, settings: &ApiSettings) -> Result<Box<dyn LenderApi>> {
        let client = self.client(settings)?;
        debug!(base_url = %client.base_url(), "Blend client ready");
        Ok(Box::new(client))
    }
}

/// Check that credentials and the base URL are present.
///
/// The tenant and instance may come from a feed or a submission instead of
/// the global settings, so they are checked per request by the client.
///
/// # Errors
/// Returns `FeedError::Config` naming the first missing setting.
pub fn validate_settings(settings: &ApiSettings) -> Result<()> {
    let required = [
        ("API username", &settings.username),
        ("API password", &settings.password),
    ];
    for (label, value) in required {
        if value.trim().is_empty() {
            return Err(FeedError::Config(format!("Blend {label} is not configured")));
        }
    }
    if settings.base_url().trim().is_empty() {
        return Err(FeedError::Config("Blend base URL is not configured".into()));
    }
    Ok(())
}
