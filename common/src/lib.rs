//! Cross-cutting helpers shared by the pact-dsl crates.
//!
//! This crate provides:
//! - Tracing subscriber configuration for test harnesses
//! - JSON sniffing helpers used for body diagnostics

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod json;
pub mod tracing_config;

pub use json::{is_json_formatted_object, is_json_formatted_object_bytes};
pub use tracing_config::{TracingConfig, init_tracing};
