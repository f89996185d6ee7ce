//! Adapter configuration management for `kitphp.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [build] and [kit] sections
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # AdapterConfig (this file)
//! ```
//!
//! The config file is optional: without one every section takes its
//! defaults, rooted at the current directory. CLI flags always win.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BuildSectionConfig, KitSectionConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    debug, log,
    utils::path::{normalize_path, resolve_against},
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing kitphp.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Output settings
    #[serde(default)]
    pub build: BuildSectionConfig,

    /// Upstream build outputs
    #[serde(default)]
    pub kit: KitSectionConfig,
}

impl AdapterConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory, or cwd when there is no config file.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                config.config_path = path;
                config
            }
            None => {
                debug!("config"; "no {} found, using defaults", cli.config.display());
                Self {
                    config_path: cwd.join(&cli.config),
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.apply_cli(cli);
        config.normalize_paths();
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get path relative to the project root, for display.
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply global path overrides and command-specific options.
    fn apply_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.build.out, cli.out.as_ref());
        Self::update_option(&mut self.build.assets, cli.assets.as_ref());
        Self::update_option(&mut self.kit.routes, cli.routes.as_ref());
        Self::update_option(&mut self.kit.manifest, cli.manifest.as_ref());

        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Routes { .. } => {}
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.ssr, args.ssr.as_ref());
        Self::update_option(&mut self.build.strict, args.strict.as_ref());
        Self::update_option(&mut self.build.fallback, args.fallback.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve every configured directory against the project root.
    fn normalize_paths(&mut self) {
        let root = normalize_path(&self.root);

        self.build.out = resolve_against(&self.build.out, &root);
        self.build.assets = resolve_against(&self.build.assets, &root);
        self.kit.routes = resolve_against(&self.kit.routes, &root);
        self.kit.manifest = resolve_against(&self.kit.manifest, &root);
        self.kit.client = resolve_against(&self.kit.client, &root);
        self.kit.prerendered = resolve_against(&self.kit.prerendered, &root);
        self.kit.temp = resolve_against(&self.kit.temp, &root);

        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the normalized configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.build.validate(&self.kit.temp, &mut diag);
        self.kit.validate(&mut diag);

        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

/// Config rooted at `root` with every directory in its default place.
#[cfg(test)]
pub fn test_config(root: &Path) -> AdapterConfig {
    let mut config = AdapterConfig {
        config_path: root.join("kitphp.toml"),
        root: root.to_path_buf(),
        ..AdapterConfig::default()
    };
    config.normalize_paths();
    config
}

// ============================================================================
// tests
// ============================================================================
