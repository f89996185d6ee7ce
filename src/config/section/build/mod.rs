//! `[build]` section configuration.
//!
//! Output locations and the flags that shape the conversion.
//!
//! # Example
//!
//! ```toml
//! [build]
//! out = "build"       # Deployable tree (relative to project root)
//! assets = "build"    # Compiled client assets go here
//! ssr = true          # Turn pages into PHP scripts that re-run loaders
//! strict = false      # Require every route to be prerendered
//! fallback = false    # Skip the strict prerender check entirely
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Deployable output directory.
    pub out: PathBuf,

    /// Directory receiving the compiled client assets.
    pub assets: PathBuf,

    /// Rewrite prerendered pages into PHP scripts.
    pub ssr: bool,

    /// Fail when a route is not fully prerendered.
    pub strict: bool,

    /// The site ships a fallback page; the strict check does not apply.
    pub fallback: bool,
}

impl BuildSectionConfig {
    pub const OUT: FieldPath = FieldPath::new("build.out");
    pub const ASSETS: FieldPath = FieldPath::new("build.assets");
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            out: "build".into(),
            assets: "build".into(),
            ssr: true,
            strict: false,
            fallback: false,
        }
    }
}

impl BuildSectionConfig {
    /// Validate output directories against the scratch directory.
    ///
    /// The scratch directory is wiped and then copied into `out`, so it may
    /// neither coincide with nor live inside either output directory.
    pub fn validate(&self, temp: &std::path::Path, diag: &mut ConfigDiagnostics) {
        for (field, dir) in [(Self::OUT, &self.out), (Self::ASSETS, &self.assets)] {
            if dir.as_os_str().is_empty() {
                diag.error(field, "must not be empty");
            } else if temp.starts_with(dir) {
                diag.error_with_hint(
                    field,
                    format!("contains the scratch directory `{}`", temp.display()),
                    "move `kit.temp` outside of the output directories",
                );
            }
        }
    }
}
