//! # Blend Feed Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the lending API and the host
//! - Field-map resolution into nested payloads
//! - The submission orchestrator
//!
//! ## Architecture Principles
//! - Only depends on `blendfeed-domain`
//! - No HTTP or storage code
//! - All external dependencies via traits

pub mod submission;
pub mod utils;

pub use submission::ports::{ApiResult, FeedHost, HttpMethod, LenderApi, LenderConnector};
pub use submission::{SubmissionOutcome, SubmissionService, SubmissionStep};
