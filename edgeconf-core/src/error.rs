//! Error types for Edgeconf

use thiserror::Error;

/// Result type for Edgeconf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Edgeconf
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Site manifest error
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Redirect validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Redirect validation failures.
///
/// Raised before a redirect is turned into a location block. Either kind is
/// fatal: a configuration with an inconsistent redirect is never emitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `toPath` is not an absolute URL with a host
    #[error("redirect toPath \"{to_path}\" must be a valid absolute URL")]
    InvalidAbsoluteUrl { to_path: String },

    /// `fromPath` with `*` replaced by `:splat` differs from the URL path
    #[error("redirect toPath \"{to_path}\" fromPath \"{from_path}\": paths must match")]
    PathMismatch { to_path: String, from_path: String },
}

impl ValidationError {
    /// The offending `toPath`
    pub fn to_path(&self) -> &str {
        match self {
            Self::InvalidAbsoluteUrl { to_path } | Self::PathMismatch { to_path, .. } => to_path,
        }
    }
}
