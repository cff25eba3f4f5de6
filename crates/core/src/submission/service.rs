//! Submission orchestrator - core business logic
//!
//! One submission runs a short linear sequence with no retries:
//!
//! 1. resolve the feed's field map into a nested payload
//! 2. pull the reserved assignee out of the payload
//! 3. create the application (`POST home-lending/applications`)
//! 4. when an assignee and an application id exist, assign the loan officer
//!    (`PATCH home-lending/applications/{id}/assignees`)
//!
//! A failed step reports a feed error to the host and ends the sequence.
//! Side effects of earlier steps are kept; nothing is rolled back.

use std::fmt;
use std::sync::Arc;

use blendfeed_domain::constants::{
    assignees_route, APPLICATIONS_ROUTE, ASSIGN_FAILED_MESSAGE, CREATE_FAILED_MESSAGE,
    MISSING_ID_MESSAGE, SERVICE_NAME,
};
use blendfeed_domain::{
    ApiError, ApiSettings, AssigneesPayload, EntryNote, Feed, FieldMapSchema, Submission,
    TargetInstance,
};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use super::mapping::{extract_assignee, resolve_field_map};
use super::ports::{FeedHost, LenderApi, LenderConnector};

/// Step of the submission sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStep {
    Validate,
    Connect,
    CreateApplication,
    AssignLoanOfficer,
}

impl fmt::Display for SubmissionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Validate => "validate",
            Self::Connect => "connect",
            Self::CreateApplication => "create_application",
            Self::AssignLoanOfficer => "assign_loan_officer",
        })
    }
}

/// Definite outcome of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The application was created; assignment ran if it was requested.
    Created {
        application_id: Option<String>,
        assigned_to: Option<String>,
    },
    /// A step failed and the sequence stopped there.
    Failed {
        step: SubmissionStep,
        message: String,
        /// Set when the application exists despite the failure.
        application_id: Option<String>,
    },
}

impl SubmissionOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Created { .. })
    }

    pub fn application_id(&self) -> Option<&str> {
        match self {
            Self::Created { application_id, .. } | Self::Failed { application_id, .. } => {
                application_id.as_deref()
            }
        }
    }
}

/// Submission orchestrator
pub struct SubmissionService {
    connector: Arc<dyn LenderConnector>,
    host: Arc<dyn FeedHost>,
    settings: Arc<ApiSettings>,
    schema: Option<FieldMapSchema>,
}

impl SubmissionService {
    /// Create a new submission service
    pub fn new(
        connector: Arc<dyn LenderConnector>,
        host: Arc<dyn FeedHost>,
        settings: Arc<ApiSettings>,
    ) -> Self {
        Self { connector, host, settings, schema: None }
    }

    /// Reject feeds whose field map leaves a required schema entry unmapped.
    pub fn with_schema(mut self, schema: FieldMapSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Process one submission for `feed`.
    ///
    /// Never returns an error: every failure is reported to the host as a
    /// feed error and reflected in the returned outcome.
    #[instrument(skip_all, fields(feed = %feed.name, entry_id = %submission.entry_id))]
    pub async fn process(&self, feed: &Feed, submission: &Submission) -> SubmissionOutcome {
        if let Err(message) = self.validate_feed(feed) {
            return self.fail(feed, submission, SubmissionStep::Validate, message, None).await;
        }

        let mut resolved = resolve_field_map(&feed.field_map, submission);
        let assignee = extract_assignee(&mut resolved.payload);
        debug!(
            fields = resolved.payload.leaf_count(),
            has_assignee = assignee.is_some(),
            has_target_override = resolved.target_override.is_some(),
            "Resolved field map"
        );

        let mut api = match self.connector.connect(&self.settings) {
            Ok(api) => api,
            Err(err) => {
                let message = format!("Unable to configure {SERVICE_NAME} client: {err}");
                return self.fail(feed, submission, SubmissionStep::Connect, message, None).await;
            }
        };
        if let Some(feed_target) = feed.target_instance.as_deref() {
            api.set_target_instance(feed_target);
        }
        let target = resolved.target_override.as_ref();

        let body = match serde_json::to_string(&resolved.payload) {
            Ok(body) => body,
            Err(err) => {
                let message = format!("{CREATE_FAILED_MESSAGE}: {err}");
                return self
                    .fail(feed, submission, SubmissionStep::CreateApplication, message, None)
                    .await;
            }
        };

        let response = match api.post(APPLICATIONS_ROUTE, body, target).await {
            Ok(response) => response,
            Err(err) => {
                let message = failure_message(CREATE_FAILED_MESSAGE, &err);
                return self
                    .fail(feed, submission, SubmissionStep::CreateApplication, message, None)
                    .await;
            }
        };

        let Some(application_id) = parse_application_id(&response) else {
            warn!("Create response did not contain an application id");
            self.note(&submission.entry_id, EntryNote::error(MISSING_ID_MESSAGE)).await;
            return SubmissionOutcome::Created { application_id: None, assigned_to: None };
        };

        info!(application_id = %application_id, "Application created");
        self.note(
            &submission.entry_id,
            EntryNote::success(format!(
                "Application created in {SERVICE_NAME}. Application ID: {application_id}"
            )),
        )
        .await;

        let Some(assignee) = assignee else {
            return SubmissionOutcome::Created {
                application_id: Some(application_id),
                assigned_to: None,
            };
        };

        let assigned = assign_loan_officer(&*api, &application_id, &assignee, target).await;
        if let Err(err) = assigned {
            let message = failure_message(ASSIGN_FAILED_MESSAGE, &err);
            return self
                .fail(
                    feed,
                    submission,
                    SubmissionStep::AssignLoanOfficer,
                    message,
                    Some(application_id),
                )
                .await;
        }

        info!(application_id = %application_id, assignee = %assignee, "Loan officer assigned");
        self.note(
            &submission.entry_id,
            EntryNote::success(format!(
                "Loan officer {assignee} assigned to {SERVICE_NAME} application {application_id}"
            )),
        )
        .await;

        SubmissionOutcome::Created {
            application_id: Some(application_id),
            assigned_to: Some(assignee),
        }
    }

    fn validate_feed(&self, feed: &Feed) -> Result<(), String> {
        feed.validate().map_err(|err| err.to_string())?;

        if let Some(schema) = &self.schema {
            let missing: Vec<&str> = schema
                .missing_required(&feed.field_map)
                .into_iter()
                .map(|entry| entry.label.as_str())
                .collect();
            if !missing.is_empty() {
                return Err(format!(
                    "Feed is missing required field mappings: {}",
                    missing.join(", ")
                ));
            }
        }
        Ok(())
    }

    async fn fail(
        &self,
        feed: &Feed,
        submission: &Submission,
        step: SubmissionStep,
        message: String,
        application_id: Option<String>,
    ) -> SubmissionOutcome {
        error!(step = %step, error = %message, "Submission failed");
        if let Err(err) = self.host.add_feed_error(feed, &submission.entry_id, &message).await {
            error!(error = %err, "Failed to record feed error");
        }
        SubmissionOutcome::Failed { step, message, application_id }
    }

    async fn note(&self, entry_id: &str, note: EntryNote) {
        if let Err(err) = self.host.add_note(entry_id, note).await {
            error!(error = %err, "Failed to record entry note");
        }
    }
}

async fn assign_loan_officer(
    api: &dyn LenderApi,
    application_id: &str,
    assignee: &str,
    target: Option<&TargetInstance>,
) -> Result<String, ApiError> {
    let body = to_body(&AssigneesPayload::single(assignee))?;
    api.patch(&assignees_route(application_id), body, target).await
}

fn to_body<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|err| ApiError::transport(err.to_string()))
}

fn failure_message(prefix: &str, err: &ApiError) -> String {
    let detail = err.detail().trim();
    if detail.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}: {detail}")
    }
}

/// Read the `id` of a create-application response.
///
/// Accepts string or numeric ids; anything else is treated as missing.
pub fn parse_application_id(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.as_object()?.get("id")? {
        serde_json::Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
        serde_json::Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
