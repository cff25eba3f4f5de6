//! Feed, submission, and note types exchanged with the host form platform

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::mapping::{FieldKind, FieldMapping};
use crate::errors::Result;

/// A configured binding of form fields to the remote payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub field_map: Vec<FieldMapping>,
    /// Per-feed `tenant~instance` override of the global settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_instance: Option<String>,
}

impl Feed {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), field_map: Vec::new(), target_instance: None }
    }

    pub fn with_mapping(mut self, mapping: FieldMapping) -> Self {
        self.field_map.push(mapping);
        self
    }

    pub fn with_target_instance(mut self, target: impl Into<String>) -> Self {
        self.target_instance = Some(target.into());
        self
    }

    /// Check every mapping's target path.
    ///
    /// # Errors
    /// Returns the first invalid mapping's `FeedError::InvalidInput`.
    pub fn validate(&self) -> Result<()> {
        self.field_map.iter().try_for_each(FieldMapping::validate)
    }
}

/// One field value of a submitted entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryField {
    pub value: String,
    #[serde(default)]
    pub kind: FieldKind,
}

impl EntryField {
    pub fn text(value: impl Into<String>) -> Self {
        Self { value: value.into(), kind: FieldKind::Text }
    }

    pub fn with_kind(value: impl Into<String>, kind: FieldKind) -> Self {
        Self { value: value.into(), kind }
    }
}

/// One filled-in form entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub entry_id: String,
    #[serde(default)]
    pub form_id: String,
    #[serde(default)]
    pub fields: BTreeMap<String, EntryField>,
}

impl Submission {
    pub fn new(entry_id: impl Into<String>) -> Self {
        Self { entry_id: entry_id.into(), ..Self::default() }
    }

    pub fn with_field(mut self, field_id: impl Into<String>, field: EntryField) -> Self {
        self.fields.insert(field_id.into(), field);
        self
    }

    pub fn with_text(self, field_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_field(field_id, EntryField::text(value))
    }

    pub fn field(&self, field_id: &str) -> Option<&EntryField> {
        self.fields.get(field_id)
    }
}

/// Whether a note records a success or an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    Success,
    Error,
}

crate::impl_domain_status_conversions!(NoteKind {
    Success => "success",
    Error => "error",
});

/// Append-only note attached to the originating entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryNote {
    pub kind: NoteKind,
    pub message: String,
}

impl EntryNote {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoteKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoteKind::Error, message: message.into() }
    }
}

/// One assignee association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeRef {
    pub user_id: String,
}

/// Body of the assignee follow-up call: `{"assignees":[{"userId":"..."}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssigneesPayload {
    pub assignees: Vec<AssigneeRef>,
}

impl AssigneesPayload {
    pub fn single(user_id: impl Into<String>) -> Self {
        Self { assignees: vec![AssigneeRef { user_id: user_id.into() }] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignees_payload_shape() {
        let body = serde_json::to_string(&AssigneesPayload::single("LO77")).unwrap();
        assert_eq!(body, r#"{"assignees":[{"userId":"LO77"}]}"#);
    }

    #[test]
    fn submission_deserializes_with_default_kinds() {
        let json = r#"{
            "entry_id": "42",
            "fields": {
                "1.3": {"value": "Jo"},
                "4": {"value": "(555) 123-4567", "kind": "standard_phone"}
            }
        }"#;
        let submission: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.entry_id, "42");
        assert_eq!(submission.field("1.3").unwrap().kind, FieldKind::Text);
        assert_eq!(submission.field("4").unwrap().kind, FieldKind::StandardPhone);
        assert!(submission.field("9").is_none());
    }

    #[test]
    fn feed_validate_reports_bad_paths() {
        let mut feed = Feed::new("1", "Leads")
            .with_mapping(FieldMapping::new("party.email", "2").unwrap());
        assert!(feed.validate().is_ok());

        feed.field_map.push(FieldMapping {
            target_path: "party..lastName".to_string(),
            source_field_id: "3".to_string(),
        });
        assert!(feed.validate().is_err());
    }

    #[test]
    fn note_constructors_set_kind() {
        assert_eq!(EntryNote::success("ok").kind, NoteKind::Success);
        assert_eq!(EntryNote::error("nope").kind, NoteKind::Error);
        assert_eq!(NoteKind::Error.to_string(), "error");
    }
}
