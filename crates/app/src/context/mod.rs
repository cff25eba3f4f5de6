//! Application context - dependency injection container

mod host;

use std::sync::Arc;

use blendfeed_core::{LenderConnector, SubmissionService};
use blendfeed_domain::{Config, Feed, FeedError, FieldMapSchema, Result};
use blendfeed_infra::{config, BlendClient, BlendConnector};
use tracing::info;

pub use host::{ConsoleHost, HostRecord};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub connector: Arc<BlendConnector>,
    pub host: Arc<ConsoleHost>,
    pub submissions: SubmissionService,
}

impl AppContext {
    /// Load configuration and wire every service.
    ///
    /// # Errors
    /// Returns `FeedError::Config` when no valid configuration is found.
    pub fn new() -> Result<Self> {
        let config = config::load()?;
        Self::from_config(config)
    }

    /// Wire every service around an already loaded configuration.
    ///
    /// Submissions are checked against the stock Blend field-map schema.
    pub fn from_config(config: Config) -> Result<Self> {
        let connector = Arc::new(BlendConnector::new(&config.http)?);
        let host = Arc::new(ConsoleHost::default());

        let lender: Arc<dyn LenderConnector> = connector.clone();
        let submissions = SubmissionService::new(lender, host.clone(), Arc::new(config.api.clone()))
            .with_schema(FieldMapSchema::default_blend());

        info!(
            base_url = %config.api.base_url(),
            tenant = %config.api.tenant_name,
            feeds = config.feeds.len(),
            "Application context ready"
        );

        Ok(Self { config, connector, host, submissions })
    }

    /// Client for one-off diagnostic calls.
    pub fn client(&self) -> Result<BlendClient> {
        self.connector.client(&self.config.api)
    }

    /// Feed by name or id; with no name, the only configured feed.
    ///
    /// # Errors
    /// Returns `FeedError::NotFound` for an unknown name, or
    /// `FeedError::InvalidInput` when the choice is ambiguous.
    pub fn feed(&self, name_or_id: Option<&str>) -> Result<&Feed> {
        match (name_or_id, self.config.feeds.as_slice()) {
            (Some(name), _) => self
                .config
                .feed(name)
                .ok_or_else(|| FeedError::NotFound(format!("feed '{name}'"))),
            (None, [only]) => Ok(only),
            (None, []) => Err(FeedError::NotFound("no feeds are configured".into())),
            (None, _) => Err(FeedError::InvalidInput(
                "several feeds are configured; name the feed to use".into(),
            )),
        }
    }
}
