//! Blend lending API adapter
//!
//! [`BlendClient`] implements the core `LenderApi` port over HTTP;
//! [`BlendConnector`] hands out one fresh client per submission.

pub mod client;
pub mod connector;

pub use client::{join_url, BlendClient};
pub use connector::{validate_settings, BlendConnector};
