//! Response headers keyed by exact request path
//!
//! [`HeadersMap`] keeps insertion order for both paths and entries: the
//! generated location blocks and their `add_header` lines follow it exactly.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A single response header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Ordered mapping from exact request path to its headers.
///
/// Inserting a path that is already present replaces its headers but keeps
/// the original position, so merging maps behaves like an object spread.
#[derive(Debug, Clone, Default)]
pub struct HeadersMap {
    entries: Vec<(String, Vec<HeaderEntry>)>,
    /// Position of each path in `entries`
    index: HashMap<String, usize>,
}

impl HeadersMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the headers for `path`, returning the previous ones
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        headers: Vec<HeaderEntry>,
    ) -> Option<Vec<HeaderEntry>> {
        let path = path.into();
        match self.index.get(&path) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, headers)),
            None => {
                self.index.insert(path.clone(), self.entries.len());
                self.entries.push((path, headers));
                None
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&[HeaderEntry]> {
        self.index
            .get(path)
            .map(|&position| self.entries[position].1.as_slice())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Merge `other` over `self`
    pub fn merge(&mut self, other: HeadersMap) {
        for (path, headers) in other.entries {
            self.insert(path, headers);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[HeaderEntry])> {
        self.entries
            .iter()
            .map(|(path, headers)| (path.as_str(), headers.as_slice()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for HeadersMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for HeadersMap {}

impl<P: Into<String>> FromIterator<(P, Vec<HeaderEntry>)> for HeadersMap {
    fn from_iter<I: IntoIterator<Item = (P, Vec<HeaderEntry>)>>(iter: I) -> Self {
        let mut map = HeadersMap::new();
        for (path, headers) in iter {
            map.insert(path, headers);
        }
        map
    }
}

impl IntoIterator for HeadersMap {
    type Item = (String, Vec<HeaderEntry>);
    type IntoIter = std::vec::IntoIter<(String, Vec<HeaderEntry>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for HeadersMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, headers) in &self.entries {
            map.serialize_entry(path, headers)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HeadersMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HeadersMapVisitor;

        impl<'de> Visitor<'de> for HeadersMapVisitor {
            type Value = HeadersMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from request path to a list of headers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<HeadersMap, A::Error> {
                let mut map = HeadersMap::new();
                while let Some((path, headers)) =
                    access.next_entry::<String, Vec<HeaderEntry>>()?
                {
                    map.insert(path, headers);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(HeadersMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_cache() -> Vec<HeaderEntry> {
        vec![HeaderEntry::new("Cache-Control", "no-cache")]
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut map = HeadersMap::new();
        map.insert("/z", no_cache());
        map.insert("/a", no_cache());
        map.insert("/m", no_cache());
        assert_eq!(map.paths().collect::<Vec<_>>(), vec!["/z", "/a", "/m"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut map = HeadersMap::new();
        map.insert("/a", no_cache());
        map.insert("/b", no_cache());
        let previous = map.insert("/a", vec![HeaderEntry::new("X-Frame-Options", "DENY")]);

        assert_eq!(previous, Some(no_cache()));
        assert_eq!(map.paths().collect::<Vec<_>>(), vec!["/a", "/b"]);
        assert_eq!(map.get("/a").unwrap()[0].name, "X-Frame-Options");
    }

    #[test]
    fn test_merge_overrides() {
        let mut base: HeadersMap = vec![("/a", no_cache()), ("/b", no_cache())]
            .into_iter()
            .collect();
        let over: HeadersMap = vec![
            ("/b", vec![HeaderEntry::new("Link", "</app.js>; rel=preload; as=script")]),
            ("/c", no_cache()),
        ]
        .into_iter()
        .collect();

        base.merge(over);
        assert_eq!(base.paths().collect::<Vec<_>>(), vec!["/a", "/b", "/c"]);
        assert_eq!(base.get("/b").unwrap()[0].name, "Link");
    }

    #[test]
    fn test_many_paths() {
        let count = 100_000;
        let mut map: HeadersMap = (0..count)
            .map(|i| (format!("/static/{}.js", i), no_cache()))
            .collect();
        assert_eq!(map.len(), count);

        // Re-inserting every path replaces in place
        map.merge((0..count).rev().map(|i| (format!("/static/{}.js", i), Vec::new())).collect());
        assert_eq!(map.len(), count);
        assert_eq!(map.paths().next(), Some("/static/0.js"));
        assert_eq!(map.paths().last(), Some("/static/99999.js"));
        assert!(map.get("/static/5000.js").unwrap().is_empty());
        assert!(map.contains("/static/99999.js"));
        assert!(!map.contains("/static/100000.js"));
    }

    #[test]
    fn test_deserialize_keeps_document_order() {
        let json = r#"{
            "/sw.js": [{"name": "Cache-Control", "value": "no-cache"}],
            "/a": [{"name": "X-Frame-Options", "value": "DENY"}, {"name": "Referrer-Policy", "value": "same-origin"}],
            "/static/*": []
        }"#;
        let map: HeadersMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.paths().collect::<Vec<_>>(), vec!["/sw.js", "/a", "/static/*"]);

        let names: Vec<_> = map.get("/a").unwrap().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["X-Frame-Options", "Referrer-Policy"]);
    }

    #[test]
    fn test_serialize_as_map() {
        let map: HeadersMap = vec![("/a", no_cache())].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"/a":[{"name":"Cache-Control","value":"no-cache"}]}"#);
    }
}
