//! Edgeconf site build
//!
//! Plumbing between a static site build and the nginx generator: page
//! rewrites, asset manifests, header derivation and the post-build step
//! that writes the configuration file.

pub mod headers;
pub mod manifest;
pub mod page;
pub mod post_build;

pub use headers::{
    HeadersTransform, apply_headers_transform, cache_headers_by_path, preload_headers_by_path,
    site_headers,
};
pub use manifest::{AssetCollector, AssetManifest, SiteManifest};
pub use page::{Page, rewrites_from_pages};
pub use post_build::PostBuild;
