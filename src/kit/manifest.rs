//! Kit manifest: what the upstream build tells us about the site.
//!
//! ```json
//! {
//!   "routes": [{ "id": "/blog/[slug]", "prerender": "auto" }],
//!   "pages": [{ "path": "/blog", "file": "blog.html" }],
//!   "prerender_entries": ["*"]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::KitError;
use crate::core::NavPath;

/// Route-level `prerender` option.
///
/// Only `true` counts as prerendered; `"auto"` routes may still be rendered
/// on demand and therefore need a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrerenderOption {
    Flag(bool),
    Auto(AutoTag),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoTag {
    Auto,
}

impl PrerenderOption {
    #[inline]
    pub fn is_prerendered(self) -> bool {
        self == Self::Flag(true)
    }
}

impl Default for PrerenderOption {
    fn default() -> Self {
        Self::Flag(false)
    }
}

/// One entry of the route table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// Route id as written in the route tree, e.g. `/blog/[slug]`.
    pub id: String,
    #[serde(default)]
    pub prerender: PrerenderOption,
}

impl RouteDescriptor {
    /// Route id contains a `[param]` segment.
    pub fn has_params(&self) -> bool {
        self.id.contains('[')
    }
}

/// A prerendered page and the HTML file it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrerenderedPage {
    pub path: NavPath,
    /// HTML file relative to the prerendered directory, e.g. `blog.html`.
    pub file: PathBuf,
}

/// Manifest written by the upstream build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KitManifest {
    #[serde(default)]
    pub routes: Vec<RouteDescriptor>,
    #[serde(default)]
    pub pages: Vec<PrerenderedPage>,
    #[serde(default = "default_entries")]
    pub prerender_entries: Vec<String>,
}

fn default_entries() -> Vec<String> {
    vec!["*".to_string()]
}

impl KitManifest {
    pub fn load(path: &Path) -> Result<Self, KitError> {
        let content =
            fs::read_to_string(path).map_err(|err| KitError::Io(path.to_path_buf(), err))?;
        serde_json::from_str(&content).map_err(|err| KitError::Parse(path.to_path_buf(), err))
    }
}
