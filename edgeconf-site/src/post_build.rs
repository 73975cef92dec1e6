//! Post-build step
//!
//! Runs once the site is compiled: derives rewrites and headers from the
//! site manifest, generates the nginx configuration and writes it next to
//! the site.

use crate::headers::{HeadersTransform, apply_headers_transform, site_headers};
use crate::manifest::SiteManifest;
use crate::page::rewrites_from_pages;
use edgeconf_core::{GeneratorConfig, Result};
use edgeconf_nginx::generate_configuration;
use std::path::{Path, PathBuf};

/// Post-build configuration writer
pub struct PostBuild<'a> {
    config: &'a GeneratorConfig,
    transform: Option<Box<dyn HeadersTransform + 'a>>,
}

impl<'a> PostBuild<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            transform: None,
        }
    }

    /// Rewrite headers with a user hook before generation
    pub fn with_transform(mut self, transform: impl HeadersTransform + 'a) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Generate the configuration text for `site`
    pub fn render(&self, site: &SiteManifest) -> Result<String> {
        let rewrites = rewrites_from_pages(&site.pages);
        let manifest = site.asset_manifest();

        let mut headers = site_headers(&site.pages, &manifest, &site.path_prefix);
        if let Some(transform) = &self.transform {
            headers = apply_headers_transform(headers, transform.as_ref());
        }

        tracing::debug!(
            pages = site.pages.len(),
            rewrites = rewrites.len(),
            redirects = site.redirects.len(),
            header_paths = headers.len(),
            "Collected site routing"
        );

        Ok(generate_configuration(
            &rewrites,
            &site.redirects,
            &headers,
            self.config,
        )?)
    }

    /// Generate and write the configuration into `site_dir`
    pub fn run(&self, site: &SiteManifest, site_dir: impl AsRef<Path>) -> Result<PathBuf> {
        let text = self.render(site)?;
        let path = site_dir.as_ref().join(&self.config.output.file_name);
        std::fs::write(&path, text)?;

        tracing::info!("Wrote nginx configuration to {}", path.display());
        Ok(path)
    }
}
