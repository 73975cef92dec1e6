//! Build manifests
//!
//! [`SiteManifest`] is the JSON document handed over by the site build.
//! [`AssetCollector`] accumulates assets while the bundler runs and is
//! consumed once to produce the [`AssetManifest`] the header derivation
//! reads.

use crate::page::Page;
use edgeconf_core::{Error, RedirectRule, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Bundle chunk name to emitted files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetManifest {
    chunks: HashMap<String, Vec<String>>,
}

impl AssetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, chunk: impl Into<String>, files: Vec<String>) {
        self.chunks.insert(chunk.into(), files);
    }

    /// Files of `chunk`, empty when the chunk is unknown
    pub fn files(&self, chunk: &str) -> &[String] {
        self.chunks.get(chunk).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Accumulates chunk assets during compilation.
///
/// A later record for the same chunk replaces the earlier one.
#[derive(Debug, Default)]
pub struct AssetCollector {
    assets: HashMap<String, String>,
}

impl AssetCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, chunk: impl Into<String>, file: impl Into<String>) {
        self.assets.insert(chunk.into(), file.into());
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Finish collecting. Entries of the bundler stats' `assetsByChunkName`
    /// take precedence over collected assets.
    pub fn into_manifest(self, assets_by_chunk_name: HashMap<String, Vec<String>>) -> AssetManifest {
        let mut manifest = AssetManifest::new();
        for (chunk, file) in self.assets {
            manifest.insert(chunk, vec![file]);
        }
        for (chunk, files) in assets_by_chunk_name {
            manifest.insert(chunk, files);
        }
        manifest
    }
}

impl<C: Into<String>, F: Into<String>> Extend<(C, F)> for AssetCollector {
    fn extend<I: IntoIterator<Item = (C, F)>>(&mut self, iter: I) {
        for (chunk, file) in iter {
            self.record(chunk, file);
        }
    }
}

/// Everything the site build reports after compilation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteManifest {
    /// Prefix the site is deployed under (e.g. "/store"), empty for root
    pub path_prefix: String,

    pub pages: Vec<Page>,

    pub redirects: Vec<RedirectRule>,

    /// Assets collected during compilation, chunk name to file
    pub assets: HashMap<String, String>,

    /// `assetsByChunkName` from the bundler stats
    pub assets_by_chunk_name: HashMap<String, Vec<String>>,
}

impl SiteManifest {
    /// Load a site manifest from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Manifest(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Manifest(format!("Invalid JSON in {}: {}", path.display(), e)))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::Manifest(format!("Invalid JSON: {}", e)))
    }

    /// Asset manifest combining collected assets and bundler stats
    pub fn asset_manifest(&self) -> AssetManifest {
        let mut collector = AssetCollector::new();
        collector.extend(self.assets.iter().map(|(chunk, file)| (chunk.as_str(), file.as_str())));
        collector.into_manifest(self.assets_by_chunk_name.clone())
    }
}
