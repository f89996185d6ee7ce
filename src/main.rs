//! kitphp - serve a prerendered kit site from a PHP host.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod embed;
mod generator;
mod kit;
mod logger;
mod route;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build::build_site, routes::run_routes};
use config::AdapterConfig;
use kit::ManifestBuilder;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = AdapterConfig::load(&cli)?;
    let kit = ManifestBuilder::from_config(&config)?;

    match &cli.command {
        Commands::Build { build_args } => build_site(&config, &kit, build_args.quiet).map(|_| ()),
        Commands::Routes { args } => run_routes(args, &config, &kit),
    }
}
