//! Shared test helpers for `blendfeed-core` integration tests.
//!
//! Lightweight recording mocks of the submission ports so orchestrator tests
//! can focus on the call sequence instead of HTTP plumbing.

#![allow(dead_code)]

pub mod host;
pub mod lender;
