//! HTTP client for the Blend API
//!
//! Every request carries basic auth, the API version header, and a
//! `tenant~instance` target header. The target header is resolved at send
//! time, most specific first: per-call override, then the override set with
//! `set_target_instance`, then the configured default.

use async_trait::async_trait;
use blendfeed_core::{ApiResult, HttpMethod, LenderApi};
use blendfeed_domain::constants::{
    ACCEPT_JSON_UTF8, API_VERSION, API_VERSION_HEADER, APPLICATIONS_ROUTE,
    AUTHENTICATION_STATUS_ROUTE, TARGET_INSTANCE_HEADER,
};
use blendfeed_domain::{ApiError, ApiSettings, FeedError, HttpSettings, TargetInstance};
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::Method;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::errors::transport_error;
use crate::http::HttpClient;

const USER_AGENT: &str = concat!("blendfeed/", env!("CARGO_PKG_VERSION"));

/// Blend API client.
///
/// Holds a mutable target-instance override; use one client per submission.
pub struct BlendClient {
    http: HttpClient,
    base_url: String,
    default_target: TargetInstance,
    instance_id: String,
    username: String,
    password: String,
    target_override: Option<TargetInstance>,
}

impl BlendClient {
    /// Client sharing `http`'s connection pool, configured from `settings`.
    pub fn new(http: HttpClient, settings: &ApiSettings) -> Self {
        let mut client = Self {
            http,
            base_url: String::new(),
            default_target: TargetInstance::new("", None),
            instance_id: String::new(),
            username: String::new(),
            password: String::new(),
            target_override: None,
        };
        client.configure(settings);
        client
    }

    /// Build a client with its own HTTP connection pool.
    ///
    /// # Errors
    /// Returns `FeedError::Config` if the HTTP client cannot be built.
    pub fn from_settings(settings: &ApiSettings, http: &HttpSettings) -> Result<Self, FeedError> {
        let http = build_http_client(http)?;
        Ok(Self::new(http, settings))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `tenant~instance` header value a call with `per_call` would carry.
    pub fn target_header(&self, per_call: Option<&TargetInstance>) -> String {
        self.effective_target(per_call).header_value(&self.instance_id)
    }

    fn effective_target<'a>(&'a self, per_call: Option<&'a TargetInstance>) -> &'a TargetInstance {
        per_call.or(self.target_override.as_ref()).unwrap_or(&self.default_target)
    }

    /// Like [`Self::target_header`], but rejects a target with no tenant or
    /// instance before anything is sent.
    fn resolve_target_header(&self, per_call: Option<&TargetInstance>) -> ApiResult<String> {
        let target = self.effective_target(per_call);
        if target.tenant.trim().is_empty() {
            return Err(ApiError::transport("Blend tenant name is not configured"));
        }
        if target.instance.as_deref().unwrap_or(&self.instance_id).trim().is_empty() {
            return Err(ApiError::transport("Blend instance id is not configured"));
        }
        Ok(target.header_value(&self.instance_id))
    }

    /// Connectivity check against `authentication-status`.
    ///
    /// Returns `Ok(false)` when the API answers but does not report the
    /// credentials as authenticated.
    #[instrument(skip(self))]
    pub async fn authentication_status(&self) -> ApiResult<bool> {
        let body = self.get(AUTHENTICATION_STATUS_ROUTE, None).await?;
        let authenticated = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| value.get("isAuthenticated").cloned())
            .is_some_and(|flag| match flag {
                serde_json::Value::Bool(flag) => flag,
                serde_json::Value::String(flag) => flag.eq_ignore_ascii_case("true"),
                _ => false,
            });
        debug!(authenticated, "Authentication status");
        Ok(authenticated)
    }

    /// Raw body of `GET home-lending/applications`.
    #[instrument(skip(self))]
    pub async fn list_applications(&self) -> ApiResult<String> {
        self.get(APPLICATIONS_ROUTE, None).await
    }
}

#[async_trait]
impl LenderApi for BlendClient {
    fn configure(&mut self, settings: &ApiSettings) {
        self.base_url = settings.base_url().to_string();
        self.instance_id = settings.instance_id.clone();
        self.default_target =
            TargetInstance::new(settings.tenant_name.clone(), Some(settings.instance_id.clone()));
        self.username = settings.username.clone();
        self.password = settings.password.clone();
    }

    fn set_target_instance(&mut self, value: &str) {
        if let Some(target) = TargetInstance::parse(value) {
            debug!(target_instance = %target, "Target instance override set");
            self.target_override = Some(target);
        }
    }

    #[instrument(skip_all, fields(method = %method, route = %route))]
    async fn request(
        &self,
        method: HttpMethod,
        route: &str,
        body: String,
        target: Option<&TargetInstance>,
    ) -> ApiResult<String> {
        let url = join_url(&self.base_url, route)?;
        let target_header = self.resolve_target_header(target)?;
        debug!(url = %url, target_instance = %target_header, "Sending Blend request");

        let mut builder = self
            .http
            .request(to_reqwest_method(method), url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, ACCEPT_JSON_UTF8)
            .header(API_VERSION_HEADER, API_VERSION)
            .header(TARGET_INSTANCE_HEADER, target_header)
            .header(CACHE_CONTROL, "no-cache")
            .basic_auth(&self.username, Some(&self.password));
        if !body.is_empty() {
            builder = builder.body(body);
        }

        let response = self.http.send(builder).await?;
        let status = response.status();
        let text = response.text().await.map_err(|err| transport_error(&err))?;

        if status.is_success() {
            Ok(text)
        } else {
            warn!(status = status.as_u16(), "Blend request rejected");
            Err(ApiError::status(status.as_u16(), text))
        }
    }
}

/// Join `base` and `route` with exactly one `/` between them.
///
/// # Errors
/// Returns a transport error when the result is not a valid URL.
pub fn join_url(base: &str, route: &str) -> ApiResult<Url> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), route.trim_start_matches('/'));
    Url::parse(&joined)
        .map_err(|err| ApiError::transport(format!("invalid request URL '{joined}': {err}")))
}

pub(crate) fn build_http_client(http: &HttpSettings) -> Result<HttpClient, FeedError> {
    HttpClient::builder().timeout(http.timeout()).user_agent(USER_AGENT).build()
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}
