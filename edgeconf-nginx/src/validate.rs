//! Redirect validation
//!
//! A redirect forwards `fromPath` unchanged to another origin, so the
//! destination path must be `fromPath` with the wildcard spelled `:splat`.

use crate::pattern::{SPLAT, WILDCARD};
use edgeconf_core::{RedirectRule, ValidationError};
use url::Url;

/// Destination origin of a validated redirect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// URL scheme without the trailing colon (e.g. "https")
    pub scheme: String,
    /// Host, with the port when it is not the scheme default
    pub host: String,
}

impl Destination {
    /// `<scheme>://<host>`
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

/// Check that a redirect is internally consistent
pub fn validate_redirect(rule: &RedirectRule) -> Result<(), ValidationError> {
    parse_destination(rule).map(|_| ())
}

/// Validate every redirect, stopping at the first failure
pub fn validate_redirects(rules: &[RedirectRule]) -> Result<(), ValidationError> {
    rules.iter().try_for_each(validate_redirect)
}

/// Validate a redirect and extract its destination origin
pub fn parse_destination(rule: &RedirectRule) -> Result<Destination, ValidationError> {
    let url = Url::parse(&rule.to_path)
        .ok()
        .filter(|url| url.has_host())
        .ok_or_else(|| ValidationError::InvalidAbsoluteUrl {
            to_path: rule.to_path.clone(),
        })?;

    let expected_path = rule.from_path.replace(WILDCARD, SPLAT);
    if expected_path != url.path() {
        return Err(ValidationError::PathMismatch {
            to_path: rule.to_path.clone(),
            from_path: rule.from_path.clone(),
        });
    }

    let host = url.host_str().unwrap_or_default();
    let host = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    Ok(Destination {
        scheme: url.scheme().to_string(),
        host,
    })
}
