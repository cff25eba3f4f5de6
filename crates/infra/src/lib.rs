//! # Blend Feed Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The Blend HTTP client (`LenderApi`) and its connector
//! - Shared HTTP client plumbing
//! - Configuration loading from environment variables and files
//!
//! ## Architecture
//! - Implements traits defined in `blendfeed-core`
//! - Contains all "impure" code (network and file I/O)

pub mod blend;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use blend::{BlendClient, BlendConnector};
pub use errors::InfraError;
pub use http::HttpClient;
