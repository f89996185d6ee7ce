//! The upstream build system, seen through the interface the adapter needs.
//!
//! The route table, the prerendered page list and the compiled client live
//! outside this crate. [`KitBuilder`] is the seam; [`ManifestBuilder`]
//! implements it over a JSON manifest plus the two output directories.

mod manifest;
mod strict;

pub use manifest::{AutoTag, KitManifest, PrerenderOption, PrerenderedPage, RouteDescriptor};
pub use strict::StrictCheck;

use std::path::{Path, PathBuf};

use anyhow::Result;
use thiserror::Error;

use crate::config::AdapterConfig;
use crate::utils::fs::copy_dir;

/// Errors raised while reading upstream build outputs.
#[derive(Debug, Error)]
pub enum KitError {
    #[error("failed to read kit manifest `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid kit manifest `{0}`")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("{0}")]
    DynamicRoutes(String),
}

/// What the adapter consumes from the upstream build.
pub trait KitBuilder: Sync {
    /// Route table, in manifest order.
    fn routes(&self) -> &[RouteDescriptor];

    /// Prerendered pages, in manifest order.
    fn pages(&self) -> &[PrerenderedPage];

    /// Configured prerender entry points (`["*"]` by default).
    fn prerender_entries(&self) -> &[String];

    /// Copy compiled client assets into `dest`, returning written files.
    fn write_client(&self, dest: &Path) -> Result<Vec<PathBuf>>;

    /// Copy prerendered pages (HTML + `__data.json`) into `dest`.
    fn write_prerendered(&self, dest: &Path) -> Result<Vec<PathBuf>>;
}

/// [`KitBuilder`] over a manifest file and the upstream output directories.
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    manifest: KitManifest,
    client_dir: PathBuf,
    prerendered_dir: PathBuf,
}

impl ManifestBuilder {
    pub fn new(manifest: KitManifest, client_dir: PathBuf, prerendered_dir: PathBuf) -> Self {
        Self {
            manifest,
            client_dir,
            prerendered_dir,
        }
    }

    /// Load the manifest named by `[kit] manifest`.
    pub fn from_config(config: &AdapterConfig) -> Result<Self, KitError> {
        let manifest = KitManifest::load(&config.kit.manifest)?;
        Ok(Self::new(
            manifest,
            config.kit.client.clone(),
            config.kit.prerendered.clone(),
        ))
    }
}

impl KitBuilder for ManifestBuilder {
    fn routes(&self) -> &[RouteDescriptor] {
        &self.manifest.routes
    }

    fn pages(&self) -> &[PrerenderedPage] {
        &self.manifest.pages
    }

    fn prerender_entries(&self) -> &[String] {
        &self.manifest.prerender_entries
    }

    fn write_client(&self, dest: &Path) -> Result<Vec<PathBuf>> {
        if !self.client_dir.exists() {
            return Ok(Vec::new());
        }
        copy_dir(&self.client_dir, dest)
    }

    fn write_prerendered(&self, dest: &Path) -> Result<Vec<PathBuf>> {
        copy_dir(&self.prerendered_dir, dest)
    }
}
