//! Built pages and the rewrites they need

use edgeconf_core::RewriteRule;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Chunk name of the root page's path bundle
const INDEX_PATH_CHUNK: &str = "path---index";

/// Hex digits of the path hash kept in a path chunk name
const PATH_HASH_LENGTH: usize = 3;

/// A page produced by the site build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Canonical path the page is rendered at
    pub path: String,

    /// Client-side route pattern, when it differs from `path`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_path: Option<String>,

    /// Bundle chunk of the page component
    pub component_chunk_name: String,

    /// Bundle chunk generated for the page path, as named by the bundler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_chunk_name: Option<String>,
}

impl Page {
    pub fn new(path: impl Into<String>, component_chunk_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            match_path: None,
            component_chunk_name: component_chunk_name.into(),
            path_chunk_name: None,
        }
    }

    pub fn with_match_path(mut self, match_path: impl Into<String>) -> Self {
        self.match_path = Some(match_path.into());
        self
    }

    /// Path chunk to preload.
    ///
    /// An explicit `pathChunkName` wins. Otherwise the name is derived the
    /// way the bundler names it: `path---index` for the root page and
    /// `path---<kebab-path>-<hash>` for every other page.
    pub fn path_chunk(&self) -> Cow<'_, str> {
        match self.path_chunk_name.as_deref() {
            Some(name) => Cow::Borrowed(name),
            None if self.path == "/" => Cow::Borrowed(INDEX_PATH_CHUNK),
            None => Cow::Owned(format!("path---{}", kebab_hash(&self.path))),
        }
    }

    /// Whether the page is served for paths other than its own
    pub fn is_client_routed(&self) -> bool {
        self.match_path
            .as_deref()
            .is_some_and(|match_path| match_path != self.path)
    }
}

/// Kebab-cased input followed by a short md5 prefix of the raw input
fn kebab_hash(input: &str) -> String {
    let digest = format!("{:x}", Md5::digest(input.as_bytes()));
    format!("{}-{}", kebab_case(input), &digest[..PATH_HASH_LENGTH])
}

/// Lowercase words joined by `-`.
///
/// Words break at non-alphanumeric characters, at lower-to-upper case
/// changes, between letters and digits, and before the last capital of an
/// acronym followed by a lowercase letter (`XMLHttp` is `xml-http`).
fn kebab_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().filter(|c| *c != '\'' && *c != '\u{2019}').collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
            let next = chars.get(i + 1).copied();
            let boundary = prev.is_alphanumeric()
                && ((prev.is_lowercase() && c.is_uppercase())
                    || (prev.is_alphabetic() && c.is_numeric())
                    || (prev.is_numeric() && c.is_alphabetic())
                    || (prev.is_uppercase()
                        && c.is_uppercase()
                        && next.is_some_and(char::is_lowercase)));
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }

    words.join("-")
}

/// Rewrites for client-routed pages, in page order
pub fn rewrites_from_pages(pages: &[Page]) -> Vec<RewriteRule> {
    pages
        .iter()
        .filter(|page| page.is_client_routed())
        .filter_map(|page| {
            page.match_path
                .as_ref()
                .map(|match_path| RewriteRule::new(match_path.clone(), page.path.clone()))
        })
        .collect()
}
