use std::time::Duration;

use blendfeed_domain::constants::DEFAULT_HTTP_TIMEOUT_SECS;
use blendfeed_domain::{ApiError, FeedError};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::{transport_error, InfraError};

/// HTTP client with a fixed request timeout.
///
/// Each request is sent exactly once. Cloning is cheap and shares the
/// underlying connection pool.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
    timeout: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, FeedError> {
        Self::builder().build()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder.
    ///
    /// Any HTTP status is a successful send; only failures to obtain a
    /// response (invalid request, connection, timeout) are errors.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder.build().map_err(|err| transport_error(&err))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(transport_error(&err))
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, FeedError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| FeedError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, timeout: self.timeout })
    }
}
