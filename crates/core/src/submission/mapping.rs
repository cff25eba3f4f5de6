//! Field-map resolution
//!
//! Turns a feed's flat `targetPath → fieldId` list plus one submission's
//! values into the nested request payload.

use blendfeed_domain::constants::ASSIGNEE_KEY;
use blendfeed_domain::{FieldMapping, PayloadNode, PayloadTree, Submission, TargetInstance};
use tracing::{debug, warn};

use crate::utils::patterns::normalize_field_value;

/// Payload and routing data resolved from one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSubmission {
    pub payload: PayloadTree,
    /// Value of the reserved target-instance mapping, when mapped and set.
    pub target_override: Option<TargetInstance>,
}

/// Look up and normalise one field of the submission.
///
/// Unknown field ids and blank values resolve to `None`.
pub fn resolve_field_value(submission: &Submission, field_id: &str) -> Option<String> {
    let field = submission.field(field_id.trim())?;
    normalize_field_value(&field.value, field.kind)
}

/// Build the payload for `submission` from `field_map`.
///
/// Mappings are applied in declaration order, so a later mapping to the same
/// path overwrites an earlier one. Empty values never create their path.
/// The reserved target-instance mapping is routed to
/// [`ResolvedSubmission::target_override`] instead of the payload.
pub fn resolve_field_map(field_map: &[FieldMapping], submission: &Submission) -> ResolvedSubmission {
    let mut resolved = ResolvedSubmission::default();

    for mapping in field_map {
        let Some(value) = resolve_field_value(submission, &mapping.source_field_id) else {
            debug!(
                target_path = %mapping.target_path,
                field_id = %mapping.source_field_id,
                "Skipping mapping with empty value"
            );
            continue;
        };

        if mapping.is_target_instance() {
            resolved.target_override = TargetInstance::parse(&value);
            continue;
        }

        let segments = mapping.segments();
        if segments.is_empty() {
            warn!(target_path = %mapping.target_path, "Skipping mapping with empty target path");
            continue;
        }
        resolved.payload.insert_path(&segments, value);
    }

    resolved
}

/// Remove the top-level assignee key from `payload` and return its value.
///
/// The key is always removed; a nested value under it is not a valid
/// assignee and is discarded.
pub fn extract_assignee(payload: &mut PayloadTree) -> Option<String> {
    match payload.remove(ASSIGNEE_KEY)? {
        PayloadNode::Leaf(value) => Some(value),
        PayloadNode::Branch(_) => {
            warn!("Discarding nested '{}' mapping; expected a single user id", ASSIGNEE_KEY);
            None
        }
    }
}
