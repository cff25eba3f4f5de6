//! Form submission → Blend application orchestration

pub mod mapping;
pub mod ports;
pub mod service;

pub use mapping::{extract_assignee, resolve_field_map, resolve_field_value, ResolvedSubmission};
pub use ports::{ApiResult, FeedHost, HttpMethod, LenderApi, LenderConnector};
pub use service::{parse_application_id, SubmissionOutcome, SubmissionService, SubmissionStep};
