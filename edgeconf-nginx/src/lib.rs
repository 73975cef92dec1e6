//! Edgeconf nginx generator
//!
//! This crate turns a static site's rewrites, redirects and per-path headers
//! into an nginx configuration that serves the site from object storage.
//!
//! # Example
//!
//! ```rust,ignore
//! use edgeconf_core::{GeneratorConfig, HeadersMap, RedirectRule, RewriteRule};
//! use edgeconf_nginx::generate_configuration;
//!
//! let text = generate_configuration(
//!     &[RewriteRule::new("/:slug/p", "/__client-side-product__/p")],
//!     &[RedirectRule::new("/api/*", "https://example.com/api/:splat")],
//!     &HeadersMap::new(),
//!     &GeneratorConfig::default(),
//! )
//! .unwrap();
//! ```

pub mod assembler;
pub mod builders;
pub mod directive;
pub mod pattern;
pub mod validate;

pub use assembler::{assemble, generate_configuration};
pub use builders::{generate_path_location, generate_redirects, generate_rewrites};
pub use directive::{Block, Directive, stringify};
pub use pattern::convert_from_path;
pub use validate::{Destination, validate_redirect, validate_redirects};
