//! Edgeconf Core Library
//!
//! This crate provides the types shared by the Edgeconf crates: routing rule
//! inputs, ordered header maps, generator configuration and error handling.

pub mod config;
pub mod error;
pub mod headers;
pub mod rules;

pub use config::{ConfigLoader, GeneratorConfig};
pub use error::{Error, Result, ValidationError};
pub use headers::{HeaderEntry, HeadersMap};
pub use rules::{RedirectRule, RewriteRule};

/// Edgeconf version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
