//! Feed constants
//!
//! Centralized location for the reserved mapping keys, remote routes, and
//! header values shared by the orchestrator and the API client.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

// Reserved field-map keys
pub const TARGET_INSTANCE_KEY: &str = "blend_target_instance";
pub const ASSIGNEE_KEY: &str = "assignee";
pub const TARGET_INSTANCE_SEPARATOR: char = '~';
pub const PATH_SEPARATOR: char = '.';

// Remote environments
pub const BETA_BASE_URL: &str = "https://api.beta.blend.com/";
pub const PRODUCTION_BASE_URL: &str = "https://api.blend.com/";
pub const DEFAULT_INSTANCE_ID: &str = "default";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

// Routes (relative to the base URL)
pub const APPLICATIONS_ROUTE: &str = "home-lending/applications";
pub const AUTHENTICATION_STATUS_ROUTE: &str = "authentication-status";

// Headers
pub const API_VERSION: &str = "5.3.0";
pub const API_VERSION_HEADER: &str = "blend-api-version";
pub const TARGET_INSTANCE_HEADER: &str = "blend-target-instance";
pub const ACCEPT_JSON_UTF8: &str = "application/json; charset=utf-8";

// Host-facing messages
pub const SERVICE_NAME: &str = "Blend";
pub const CREATE_FAILED_MESSAGE: &str = "Error posting to Blend";
pub const ASSIGN_FAILED_MESSAGE: &str = "Error assigning loan officer";
pub const MISSING_ID_MESSAGE: &str = "Blend response did not include an application id";

/// Bytes escaped in a single path segment. `/` and `%` are included so a
/// remote-supplied id cannot leave its segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Route for the assignee association of an application.
///
/// The id is percent-encoded as one path segment.
pub fn assignees_route(application_id: &str) -> String {
    let id = utf8_percent_encode(application_id, PATH_SEGMENT);
    format!("{APPLICATIONS_ROUTE}/{id}/assignees")
}
