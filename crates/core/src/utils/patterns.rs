//! Field value normalisation patterns
//!
//! Form values arrive as the visitor typed them and are forwarded unchanged.
//! The one exception is a phone number entered in the standard North
//! American format, which is rewritten as `ddd-ddd-dddd`.
//!
//! # Examples
//!
//! ```
//! use blendfeed_core::utils::patterns::format_standard_phone;
//!
//! assert_eq!(format_standard_phone("(555) 123-4567"), "555-123-4567");
//! assert_eq!(format_standard_phone("+44 20 7946 0958"), "+44 20 7946 0958");
//! ```

use blendfeed_domain::FieldKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// Up to one separator before the area code, up to two after it, and up to
/// one between exchange and line number.
static STANDARD_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\D?(\d{3})\D?\D?(\d{3})\D?(\d{4})$")
        .expect("STANDARD_PHONE_REGEX should compile - this is a bug")
});

/// Rewrite a standard-format phone number as `ddd-ddd-dddd`.
///
/// Values that do not match the standard pattern are returned unchanged.
pub fn format_standard_phone(value: &str) -> String {
    STANDARD_PHONE_REGEX.captures(value).map_or_else(
        || value.to_string(),
        |caps| format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]),
    )
}

/// Normalise a raw entry value for the given field kind.
///
/// Returns `None` for whitespace-only values; empty values are never mapped.
/// Anything else keeps its surrounding whitespace.
pub fn normalize_field_value(raw: &str, kind: FieldKind) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }

    let value = match kind {
        FieldKind::StandardPhone => format_standard_phone(raw),
        FieldKind::Text | FieldKind::Email | FieldKind::Phone | FieldKind::Hidden => {
            raw.to_string()
        }
    };
    Some(value)
}
