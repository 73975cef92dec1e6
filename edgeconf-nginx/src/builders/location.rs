//! Exact-match locations carrying per-path headers

use crate::directive::Directive;
use edgeconf_core::{GeneratorConfig, HeaderEntry};

/// Build `location = <path>` adding `headers` and proxying to storage
pub fn generate_path_location(
    path: &str,
    headers: &[HeaderEntry],
    config: &GeneratorConfig,
) -> Directive {
    let mut directives: Vec<Directive> = headers
        .iter()
        .map(|header| {
            Directive::new("add_header")
                .arg(&header.name)
                .arg(format!("\"{}\"", header.value))
        })
        .collect();

    directives.push(Directive::new("proxy_pass").arg(format!(
        "{}{}",
        config.storage.origin,
        storage_target(path, &config.storage.default_document)
    )));

    Directive::new("location")
        .arg("=")
        .arg(path)
        .with_block(directives)
}

/// Object path for a request path: a last segment without a dot is a page
/// and gets the default document appended. Dotfiles count as files.
fn storage_target(path: &str, default_document: &str) -> String {
    let file_name = path.rfind('/').map_or(path, |i| &path[i + 1..]);
    if file_name.contains('.') {
        return path.to_string();
    }
    format!("{}/{}", path.trim_end_matches('/'), default_document)
}
