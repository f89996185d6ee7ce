//! Site conversion orchestration.
//!
//! Build pipeline phases:
//! - **Check** - Strict prerenderability, before anything is written
//! - **Clean** - Remove output, assets and scratch directories
//! - **Client** - Copy client assets, patch the start entry
//! - **Stage** - Copy prerendered pages into the scratch directory
//! - **Resolve** - Index the route tree, resolve every page in parallel
//! - **Generate** - Endpoints and PHP pages, alongside unit relocation
//! - **Finalize** - Publish the staged tree, summary

mod pipeline;

use anyhow::Result;
use std::path::PathBuf;

use crate::{
    config::AdapterConfig,
    core::NavPath,
    generator::{PageOutcome, relocate_all},
    kit::KitBuilder,
    log,
    logger::ProgressLine,
    route::RouteIndex,
    utils::plural_count,
};

/// Summary of a finished build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Prerendered pages seen.
    pub pages: usize,
    /// Pages that got a data endpoint.
    pub converted: usize,
    /// Converted pages whose HTML had no data bootstrap.
    pub missing_bootstrap: Vec<NavPath>,
    /// Units relocated under `_protected`.
    pub units: usize,
    /// Relocated units that declared a `load` function.
    pub loaders: usize,
    /// Client files written.
    pub client_files: usize,
    /// Patched client start entry.
    pub entry: Option<PathBuf>,
    /// Files published to the output directory.
    pub files: usize,
}

/// Convert a prerendered site into a PHP-servable tree.
///
/// Pipeline: check -> clean -> client -> stage -> resolve -> generate + relocate -> finalize
pub fn build_site(config: &AdapterConfig, kit: &dyn KitBuilder, quiet: bool) -> Result<BuildReport> {
    pipeline::check_prerenderable(config, kit)?;
    pipeline::clean_outputs(config)?;

    let client = pipeline::write_client(config, kit)?;

    let staging = pipeline::staging_dir(config);
    kit.write_prerendered(&staging)?;

    // Resolve every page before touching any of them
    let index = RouteIndex::scan(&config.kit.routes, &config.kit.extension)?;
    let pages = kit.pages();
    let paths: Vec<NavPath> = pages.iter().map(|page| page.path.clone()).collect();
    let resolution = index.resolve_all(&paths);
    let used = resolution.used.as_slice();

    let progress = create_progress(pages.len(), used.len(), quiet);

    // Endpoints and relocated units live in disjoint subtrees
    let (outcomes, loaders) = rayon::join(
        || {
            pipeline::generate_pages(
                &staging,
                pages,
                &resolution.chains,
                config.build.ssr,
                progress.as_ref(),
            )
        },
        || relocate_all(&config.kit.routes, &staging, used, progress.as_ref()),
    );
    let outcomes = outcomes?;
    let loaders = loaders?;

    if let Some(p) = progress {
        p.finish();
    }

    let missing_bootstrap = pipeline::warn_missing_bootstrap(pages, &outcomes);
    let files = pipeline::finalize(&staging, &config.build.out)?;

    let report = BuildReport {
        pages: pages.len(),
        converted: outcomes
            .iter()
            .filter(|outcome| **outcome != PageOutcome::Static)
            .count(),
        missing_bootstrap,
        units: used.len(),
        loaders,
        client_files: client.files,
        entry: client.entry,
        files,
    };

    if !quiet {
        log_build_result(config, &report);
    }

    Ok(report)
}

/// Create progress display if not quiet
fn create_progress(pages: usize, units: usize, quiet: bool) -> Option<ProgressLine> {
    if quiet {
        return None;
    }
    Some(ProgressLine::new(&[("pages", pages), ("units", units)]))
}

fn log_build_result(config: &AdapterConfig, report: &BuildReport) {
    log!(
        "build";
        "{} with data endpoints, {} relocated",
        plural_count(report.converted, "page"),
        plural_count(report.units, "unit")
    );
    if report.loaders < report.units {
        log!(
            "warning";
            "{} without a load function",
            plural_count(report.units - report.loaders, "unit")
        );
    }
    log!(
        "done";
        "{} written to {}",
        plural_count(report.files, "file"),
        config.root_relative(&config.build.out).display()
    );
}
