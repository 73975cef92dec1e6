//! Redirect locations
//!
//! Redirects are served by proxying to the destination origin rather than by
//! answering with a 3xx, so API and GraphQL calls stay same-origin for the
//! browser.

use crate::directive::Directive;
use crate::pattern::convert_from_path;
use crate::validate::parse_destination;
use edgeconf_core::{GeneratorConfig, RedirectRule, ValidationError};

/// Build one case-insensitive regex location per redirect.
///
/// Every redirect is validated first; a single invalid rule fails the whole
/// batch and no locations are returned.
pub fn generate_redirects(
    rules: &[RedirectRule],
    config: &GeneratorConfig,
) -> Result<Vec<Directive>, ValidationError> {
    rules
        .iter()
        .map(|rule| generate_redirect(rule, config))
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|e| tracing::warn!("Rejected redirect: {}", e))
}

/// Build the location for a single redirect
pub fn generate_redirect(
    rule: &RedirectRule,
    config: &GeneratorConfig,
) -> Result<Directive, ValidationError> {
    let destination = parse_destination(rule)?;

    Ok(Directive::new("location")
        .arg("~*")
        .arg(convert_from_path(&rule.from_path, config.policy.slug))
        .with_block(vec![
            Directive::new("proxy_pass")
                .arg(format!("{}$uri$is_args$args", destination.origin())),
            Directive::new("proxy_http_version").arg(&config.proxy.http_version),
            Directive::new("proxy_ssl_server_name").arg("on"),
            Directive::new("proxy_set_header")
                .arg(&config.proxy.forwarded_host_header)
                .arg("$proxy_host"),
            Directive::new("proxy_set_header")
                .arg("Referer")
                .arg(format!("{}://$proxy_host/$referer_path", destination.scheme)),
        ]))
}
