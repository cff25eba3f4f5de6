//! Operator commands behind the `blendfeed` binary
//!
//! Each command returns the text to show; printing is left to `main`.

use std::fmt;
use std::path::Path;

use blendfeed_core::{LenderApi, SubmissionOutcome};
use blendfeed_domain::{FeedError, FieldMapSchema, Result, Submission};
use tracing::instrument;

use crate::context::{AppContext, HostRecord};

/// Check that the configured credentials are accepted.
#[instrument(skip_all)]
pub async fn connection_status(ctx: &AppContext) -> Result<String> {
    let client = ctx.client()?;
    match client.authentication_status().await {
        Ok(true) => Ok("API connected successfully".to_string()),
        Ok(false) => Ok("API reachable, but the credentials are not authenticated".to_string()),
        Err(err) => Ok(format!("API connection failed: {err}")),
    }
}

/// Application listing, pretty-printed when it is JSON.
#[instrument(skip_all)]
pub async fn list_applications(ctx: &AppContext) -> Result<String> {
    let mut client = ctx.client()?;
    if let Some(target) = ctx.feed(None).ok().and_then(|feed| feed.target_instance.as_deref()) {
        client.set_target_instance(target);
    }
    let body = client.list_applications().await?;

    Ok(match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or(body),
        Err(_) => body,
    })
}

/// Result of `submit`: the orchestrator outcome plus what it reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReport {
    pub outcome: SubmissionOutcome,
    pub records: Vec<HostRecord>,
}

impl fmt::Display for SubmitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{record}")?;
        }
        match &self.outcome {
            SubmissionOutcome::Created { application_id: Some(id), .. } => {
                write!(f, "Submission complete: application {id}")
            }
            SubmissionOutcome::Created { application_id: None, .. } => {
                write!(f, "Submission sent: no application id returned")
            }
            SubmissionOutcome::Failed { step, .. } => write!(f, "Submission failed at {step}"),
        }
    }
}

/// Run the entry stored as JSON at `entry_path` through a configured feed.
///
/// # Errors
/// Fails before any call when the entry cannot be read or the feed is
/// unknown; remote failures are part of the report instead.
#[instrument(skip(ctx))]
pub async fn submit_entry(
    ctx: &AppContext,
    entry_path: &Path,
    feed_name: Option<&str>,
) -> Result<SubmitReport> {
    let raw = std::fs::read_to_string(entry_path).map_err(|e| {
        FeedError::InvalidInput(format!("cannot read entry {}: {e}", entry_path.display()))
    })?;
    let submission: Submission = serde_json::from_str(&raw)
        .map_err(|e| FeedError::Serialization(format!("invalid entry JSON: {e}")))?;
    let feed = ctx.feed(feed_name)?;

    let outcome = ctx.submissions.process(feed, &submission).await;
    Ok(SubmitReport { outcome, records: ctx.host.drain() })
}

/// The stock field-map schema as pretty JSON.
pub fn field_map_schema() -> Result<String> {
    serde_json::to_string_pretty(&FieldMapSchema::default_blend())
        .map_err(|e| FeedError::Serialization(e.to_string()))
}
