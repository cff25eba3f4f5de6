//! Macro for implementing Display and FromStr for small domain enums
//!
//! Several feed enums (note kinds, field kinds, error kinds) are stored in
//! config files and printed in logs using a stable lowercase label. This
//! macro generates both directions from one table.
//!
//! # Example
//!
//! ```rust
//! use blendfeed_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum StepState {
//!     Pending,
//!     Done,
//! }
//!
//! impl_domain_status_conversions!(StepState {
//!     Pending => "pending",
//!     Done => "done",
//! });
//!
//! assert_eq!(StepState::Done.to_string(), "done");
//! assert_eq!("PENDING".parse::<StepState>(), Ok(StepState::Pending));
//! ```

/// Implements Display and FromStr traits for label enums
///
/// - Display writes the label exactly as declared
/// - FromStr parses case-insensitively and reports the enum name on failure
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
