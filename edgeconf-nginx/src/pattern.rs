//! Route pattern translation
//!
//! Route patterns use `*` for "anything" and `:slug` for a path segment.
//! They are turned into regex sources for `location ~*` and `rewrite`.

use edgeconf_core::config::SlugPolicy;

/// Wildcard token in route patterns
pub const WILDCARD: &str = "*";

/// Segment placeholder in route patterns
pub const SLUG: &str = ":slug";

/// Placeholder for the wildcard match in redirect destinations
pub const SPLAT: &str = ":splat";

/// Convert a route pattern into a start-anchored regex source.
///
/// Wildcards are replaced before slugs so the slug fragment's own `*` is
/// never rewritten. No end anchor is added: nginx may still append an index
/// document after the match.
pub fn convert_from_path(path: &str, slug: SlugPolicy) -> String {
    let body = path.replace(WILDCARD, ".*").replace(SLUG, slug.fragment());
    format!("^{}", body)
}
