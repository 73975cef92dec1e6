//! Header derivation from build artifacts
//!
//! Pages get `Link` preload headers for their scripts and page data; hashed
//! assets get an immutable `Cache-Control`.

use crate::manifest::AssetManifest;
use crate::page::Page;
use edgeconf_core::{HeaderEntry, HeadersMap};
use std::path::Path;

/// Cache-Control value for content-hashed assets
pub const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Chunks every page loads
pub const COMMON_BUNDLES: [&str; 2] = ["commons", "app"];

/// Directory holding page data
pub const PAGE_DATA_DIR: &str = "page-data";

pub fn immutable_caching_header() -> HeaderEntry {
    HeaderEntry::new("Cache-Control", IMMUTABLE_CACHE_CONTROL)
}

/// Caching headers applied regardless of the build output
pub fn fixed_caching_headers() -> Vec<(&'static str, Vec<HeaderEntry>)> {
    vec![
        ("/static/*", vec![immutable_caching_header()]),
        ("/sw.js", vec![HeaderEntry::new("Cache-Control", "no-cache")]),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Preload {
    Script,
    Fetch,
}

/// `Link` preload headers for every page, keyed by its served path
pub fn preload_headers_by_path(
    pages: &[Page],
    manifest: &AssetManifest,
    path_prefix: &str,
) -> HeadersMap {
    pages
        .iter()
        .map(|page| {
            let mut scripts: Vec<&str> = COMMON_BUNDLES
                .iter()
                .flat_map(|chunk| script_paths(chunk, manifest))
                .collect();
            scripts.extend(script_paths(&page.path_chunk(), manifest));
            scripts.extend(script_paths(&page.component_chunk_name, manifest));

            let data = [
                format!("{}/app-data.json", PAGE_DATA_DIR),
                page_data_path(&page.path),
            ];

            let headers: Vec<HeaderEntry> = scripts
                .iter()
                .filter(|script| !script.is_empty())
                .map(|script| link(script, path_prefix, Preload::Script))
                .chain(data.iter().map(|json| link(json, path_prefix, Preload::Fetch)))
                .collect();

            (normalize_path(&format!("{}{}", path_prefix, page.path)), headers)
        })
        .collect()
}

/// Immutable caching for page component chunks and the app bundle
pub fn cache_headers_by_path(pages: &[Page], manifest: &AssetManifest) -> HeadersMap {
    let chunks = pages
        .iter()
        .map(|page| page.component_chunk_name.as_str())
        .chain(["pages-manifest", "app"]);

    let mut headers: HeadersMap = chunks
        .flat_map(|chunk| manifest.files(chunk))
        .map(|file| (format!("/{}", file), vec![immutable_caching_header()]))
        .collect();

    for (path, entries) in fixed_caching_headers() {
        headers.insert(path, entries);
    }
    headers
}

/// Preload headers with caching headers merged over them
pub fn site_headers(pages: &[Page], manifest: &AssetManifest, path_prefix: &str) -> HeadersMap {
    let mut headers = preload_headers_by_path(pages, manifest, path_prefix);
    headers.merge(cache_headers_by_path(pages, manifest));
    headers
}

/// User hook rewriting the headers of each path.
///
/// Headers are passed as `"Name: value"` lines and parsed back the same way.
pub trait HeadersTransform {
    fn transform(&self, headers: Vec<String>, path: &str) -> Vec<String>;
}

impl<F> HeadersTransform for F
where
    F: Fn(Vec<String>, &str) -> Vec<String>,
{
    fn transform(&self, headers: Vec<String>, path: &str) -> Vec<String> {
        self(headers, path)
    }
}

/// Run `transform` over every path of `headers`
pub fn apply_headers_transform(headers: HeadersMap, transform: &dyn HeadersTransform) -> HeadersMap {
    headers
        .into_iter()
        .map(|(path, entries)| {
            let lines = entries
                .iter()
                .map(|header| format!("{}: {}", header.name, header.value))
                .collect();
            let entries: Vec<HeaderEntry> = transform
                .transform(lines, &path)
                .iter()
                .map(|line| header_from_line(line))
                .collect();
            (path, entries)
        })
        .collect()
}

fn header_from_line(line: &str) -> HeaderEntry {
    match line.split_once(':') {
        Some((name, value)) => HeaderEntry::new(name, value.trim()),
        None => HeaderEntry::new(line, ""),
    }
}

/// Drop one trailing slash, except for the root
fn normalize_path(path: &str) -> String {
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => path.to_string(),
    }
}

fn script_paths<'a>(chunk: &str, manifest: &'a AssetManifest) -> impl Iterator<Item = &'a str> {
    manifest
        .files(chunk)
        .iter()
        .map(String::as_str)
        .filter(|file| Path::new(file).extension().is_some_and(|ext| ext == "js"))
}

fn link(asset: &str, path_prefix: &str, kind: Preload) -> HeaderEntry {
    let value = match kind {
        Preload::Script => format!("<{}/{}>; rel=preload; as=script", path_prefix, asset),
        Preload::Fetch => format!("<{}/{}>; rel=preload; as=fetch; crossorigin", path_prefix, asset),
    };
    HeaderEntry::new("Link", value)
}

fn page_data_path(path: &str) -> String {
    let page = if path == "/" { "index" } else { path.trim_matches('/') };
    format!("{}/{}/page-data.json", PAGE_DATA_DIR, page)
}
