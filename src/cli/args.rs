//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Convert a prerendered kit site into a PHP-servable tree
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: kitphp.toml)
    #[arg(short = 'C', long, global = true, default_value = "kitphp.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Output directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub out: Option<PathBuf>,

    /// Client assets directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub assets: Option<PathBuf>,

    /// Route source tree (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub routes: Option<PathBuf>,

    /// Kit manifest path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub manifest: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert the prerendered site into a PHP-servable tree
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print the loader chain of every prerendered page as JSON
    #[command(visible_alias = "r")]
    Routes {
        #[command(flatten)]
        args: RoutesArgs,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Rewrite pages into PHP scripts that re-run loaders per request
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub ssr: Option<bool>,

    /// Fail when any route is not fully prerendered
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub strict: Option<bool>,

    /// The site ships a fallback page (disables the strict check)
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub fallback: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Suppress the progress line
    #[arg(short, long)]
    pub quiet: bool,
}

/// Routes command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RoutesArgs {
    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Include pages that have no loaders
    #[arg(short = 'A', long)]
    pub all: bool,

    /// Write output to file instead of stdout
    #[arg(short = 'w', long = "write", value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
