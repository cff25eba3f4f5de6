//! Value formatting helpers shared by the orchestrator

pub mod patterns;
