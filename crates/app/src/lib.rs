//! # Blend Feed
//!
//! Operator application layer - commands and main entry point.
//!
//! This crate contains:
//! - Commands behind the `blendfeed` binary
//! - Application context (dependency injection)
//! - A console implementation of the host port
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
