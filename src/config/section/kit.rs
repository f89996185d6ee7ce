//! `[kit]` section configuration.
//!
//! Where the upstream build left its outputs, and where route sources live.
//!
//! # Example
//!
//! ```toml
//! [kit]
//! routes = "src/routes"
//! manifest = ".svelte-kit/output/kit.json"
//! client = ".svelte-kit/output/client"
//! prerendered = ".svelte-kit/output/prerendered"
//! temp = ".svelte-kit/svelte-php"
//! extension = "php"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KitSectionConfig {
    /// Route source tree scanned for `+page.server.*` / `+layout.server.*`.
    pub routes: PathBuf,

    /// Kit manifest (route table + prerendered pages).
    pub manifest: PathBuf,

    /// Compiled client assets.
    pub client: PathBuf,

    /// Prerendered pages and their `__data.json` files.
    pub prerendered: PathBuf,

    /// Scratch directory, wiped on every build.
    pub temp: PathBuf,

    /// Extension of server unit sources (`+page.server.<ext>`).
    pub extension: String,
}

impl KitSectionConfig {
    pub const EXTENSION: FieldPath = FieldPath::new("kit.extension");
    pub const ROUTES: FieldPath = FieldPath::new("kit.routes");
}

impl Default for KitSectionConfig {
    fn default() -> Self {
        Self {
            routes: "src/routes".into(),
            manifest: ".svelte-kit/output/kit.json".into(),
            client: ".svelte-kit/output/client".into(),
            prerendered: ".svelte-kit/output/prerendered".into(),
            temp: ".svelte-kit/svelte-php".into(),
            extension: "php".into(),
        }
    }
}

impl KitSectionConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.extension.is_empty() {
            diag.error_with_hint(Self::EXTENSION, "must not be empty", "use `php`");
        } else if !self.extension.chars().all(|c| c.is_ascii_alphanumeric()) {
            diag.error_with_hint(
                Self::EXTENSION,
                format!("`{}` is not a plain file extension", self.extension),
                "write it without the leading dot, e.g. `php`",
            );
        }

        if !self.routes.exists() {
            diag.warn(
                Self::ROUTES,
                format!("`{}` does not exist", self.routes.display()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_validation() {
        let mut kit = KitSectionConfig::default();
        let mut diag = ConfigDiagnostics::new();
        kit.validate(&mut diag);
        assert!(!diag.has_errors());

        kit.extension = ".php".into();
        let mut diag = ConfigDiagnostics::new();
        kit.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, KitSectionConfig::EXTENSION);

        kit.extension = String::new();
        let mut diag = ConfigDiagnostics::new();
        kit.validate(&mut diag);
        assert!(diag.has_errors());
    }
}
