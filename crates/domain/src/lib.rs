//! # Blend Feed Domain
//!
//! Business domain types and models for the Blend feed.
//!
//! This crate contains:
//! - Feed data types (FieldMapping, Submission, TargetInstance, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants (reserved keys, routes, header names)
//!
//! ## Architecture
//! - No dependencies on other Blend feed crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
// Re-export the payload tree builder
pub use utils::payload_tree::{set_path, PayloadNode, PayloadTree};
