//! Routing rule inputs
//!
//! Rewrites and redirects as supplied by the site build. Field names follow
//! the camelCase used by the build manifest.

use serde::{Deserialize, Serialize};

/// A client-side routed page: requests matching `from_path` are served the
/// page rendered at `to_path`.
///
/// Rewrites are evaluated top-to-bottom by the server, so the order of a
/// rewrite list is its routing priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRule {
    /// Route pattern (may contain `*` and `:slug`)
    pub from_path: String,
    /// Canonical page path
    pub to_path: String,
}

impl RewriteRule {
    pub fn new(from_path: impl Into<String>, to_path: impl Into<String>) -> Self {
        Self {
            from_path: from_path.into(),
            to_path: to_path.into(),
        }
    }
}

/// A path forwarded to another origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectRule {
    /// Source pattern, may contain the `*` wildcard
    pub from_path: String,

    /// Absolute destination URL; `:splat` stands for the wildcard match
    pub to_path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_permanent: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_in_browser: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl RedirectRule {
    pub fn new(from_path: impl Into<String>, to_path: impl Into<String>) -> Self {
        Self {
            from_path: from_path.into(),
            to_path: to_path.into(),
            is_permanent: None,
            redirect_in_browser: None,
            status_code: None,
        }
    }
}
