//! Field-map types
//!
//! A feed's field map binds form fields to locations in the outbound
//! payload. The admin-UI schema describing which locations exist is
//! supplied from outside; the orchestrator only consumes it.

use serde::{Deserialize, Serialize};

use crate::constants::{ASSIGNEE_KEY, TARGET_INSTANCE_KEY};
use crate::errors::{FeedError, Result};
use crate::utils::payload_tree::split_path;

/// One `targetPath ← sourceFieldId` binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Dot-delimited location in the outbound payload.
    pub target_path: String,
    /// Field id in the submitted entry (e.g. `"3"` or `"1.3"`).
    pub source_field_id: String,
}

impl FieldMapping {
    /// Create a mapping, rejecting paths with empty segments.
    ///
    /// # Errors
    /// Returns `FeedError::InvalidInput` when `target_path` is empty or
    /// contains an empty segment.
    pub fn new(target_path: impl Into<String>, source_field_id: impl Into<String>) -> Result<Self> {
        let mapping =
            Self { target_path: target_path.into(), source_field_id: source_field_id.into() };
        mapping.validate()?;
        Ok(mapping)
    }

    /// Check the target-path invariant.
    ///
    /// # Errors
    /// Returns `FeedError::InvalidInput` naming the offending path.
    pub fn validate(&self) -> Result<()> {
        if self.target_path.is_empty() || self.target_path.split('.').any(str::is_empty) {
            return Err(FeedError::InvalidInput(format!(
                "field map target path '{}' has an empty segment",
                self.target_path
            )));
        }
        Ok(())
    }

    /// Non-empty segments of the target path.
    pub fn segments(&self) -> Vec<&str> {
        split_path(&self.target_path).collect()
    }

    /// Whether this mapping carries the per-submission target instance.
    pub fn is_target_instance(&self) -> bool {
        self.target_path == TARGET_INSTANCE_KEY
    }
}

/// How a form field's raw value is formatted before mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    /// Phone field in international format (passed through).
    Phone,
    /// Phone field in the standard `(ddd) ddd-dddd` format.
    StandardPhone,
    Hidden,
}

crate::impl_domain_status_conversions!(FieldKind {
    Text => "text",
    Email => "email",
    Phone => "phone",
    StandardPhone => "standard_phone",
    Hidden => "hidden",
});

/// One location offered by the admin UI's field-map widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapEntry {
    pub target_path: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    /// Field types the widget offers for this location; empty means any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_types: Vec<FieldKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl FieldMapEntry {
    fn new(target_path: &str, label: &str, required: bool) -> Self {
        Self {
            target_path: target_path.to_string(),
            label: label.to_string(),
            required,
            field_types: Vec::new(),
            tooltip: None,
        }
    }

    fn with_types(mut self, types: &[FieldKind]) -> Self {
        self.field_types = types.to_vec();
        self
    }

    fn with_tooltip(mut self, tooltip: &str) -> Self {
        self.tooltip = Some(tooltip.to_string());
        self
    }
}

/// Externally supplied description of the field-map UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapSchema {
    pub entries: Vec<FieldMapEntry>,
}

impl FieldMapSchema {
    pub const fn new(entries: Vec<FieldMapEntry>) -> Self {
        Self { entries }
    }

    /// Stock field map for a Blend home-lending application.
    pub fn default_blend() -> Self {
        Self::new(vec![
            FieldMapEntry::new("party.email", "Email", true)
                .with_types(&[FieldKind::Email, FieldKind::Hidden]),
            FieldMapEntry::new("party.firstName", "First Name", true),
            FieldMapEntry::new("party.lastName", "Last Name", true),
            FieldMapEntry::new("party.homePhone", "Home Phone", false)
                .with_types(&[FieldKind::Phone, FieldKind::StandardPhone]),
            FieldMapEntry::new("loanPurposeType", "Loan Purpose", false)
                .with_tooltip("Should be one of the following: CONSTRUCTION, PURCHASE, REFINANCE"),
            FieldMapEntry::new("property.address.state", "Property Address State", false),
            FieldMapEntry::new("property.address.zipCode", "Property Address ZIP code", false),
            FieldMapEntry::new("property.type", "Property Type", false).with_tooltip(
                "Should be one of the following: SINGLE_FAMILY, CONDOMINIUM, TOWNHOUSE, \
                 TWO_TO_FOUR_UNIT_PROPERTY, COOPERATIVE, MANUFACTURED_OR_MOBILE_HOME",
            ),
            FieldMapEntry::new(ASSIGNEE_KEY, "Loan Officer (Blend user id)", false),
            FieldMapEntry::new(TARGET_INSTANCE_KEY, "Target Instance (tenant~instance)", false),
        ])
    }

    /// Look up an entry by target path.
    pub fn entry(&self, target_path: &str) -> Option<&FieldMapEntry> {
        self.entries.iter().find(|entry| entry.target_path == target_path)
    }

    /// Required target paths that `field_map` leaves unmapped.
    pub fn missing_required(&self, field_map: &[FieldMapping]) -> Vec<&FieldMapEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.required)
            .filter(|entry| {
                !field_map.iter().any(|mapping| {
                    mapping.target_path == entry.target_path
                        && !mapping.source_field_id.trim().is_empty()
                })
            })
            .collect()
    }
}
