//! Shared test utilities for the pact-dsl crates.
//!
//! This crate provides:
//! - Proptest generators for templates, literals and specification versions
//! - Mock implementations: log capture and an in-memory contract writer
//! - Test fixtures with described record types and sample templates
//! - Path assertions for checking rules against bodies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;
pub mod paths;

pub use generators::*;
pub use paths::path_resolves;
