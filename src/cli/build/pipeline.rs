use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};

use crate::{
    config::AdapterConfig,
    core::NavPath,
    debug,
    generator::{PageOutcome, generate_page, patch_start_entry},
    kit::{KitBuilder, PrerenderedPage, StrictCheck},
    log,
    logger::ProgressLine,
    route::DependencyChain,
    utils::{
        fs::{copy_dir, remove_dir},
        path::to_slash,
    },
};

/// Staging directory the prerendered tree is converted in.
pub(super) fn staging_dir(config: &AdapterConfig) -> PathBuf {
    config.kit.temp.join("prerendered")
}

/// Fail before any write if the site cannot be served without rendering.
pub(super) fn check_prerenderable(config: &AdapterConfig, kit: &dyn KitBuilder) -> Result<()> {
    let routes_prefix = routes_label(config);
    StrictCheck {
        strict: config.build.strict,
        fallback: config.build.fallback,
        routes_prefix: &routes_prefix,
        routes: kit.routes(),
        prerender_entries: kit.prerender_entries(),
    }
    .run()?;
    Ok(())
}

/// Route root as listed in reports: `/`-separated when inside the project,
/// as is otherwise.
pub(super) fn routes_label(config: &AdapterConfig) -> String {
    let routes = config.root_relative(&config.kit.routes);
    if routes.is_absolute() {
        routes.display().to_string()
    } else {
        to_slash(&routes)
    }
}

/// Remove previous outputs and recreate the scratch directory.
pub(super) fn clean_outputs(config: &AdapterConfig) -> Result<()> {
    debug!("build"; "cleaning {} and {}", config.build.out.display(), config.kit.temp.display());
    remove_dir(&config.build.out)?;
    remove_dir(&config.build.assets)?;
    remove_dir(&config.kit.temp)?;
    fs::create_dir_all(&config.kit.temp)
        .with_context(|| format!("failed to create directory {}", config.kit.temp.display()))
}

/// Client assets written and the patched start entry, if any.
pub(super) struct ClientOutput {
    pub files: usize,
    pub entry: Option<PathBuf>,
}

/// Copy client assets; with server rendering, point the start entry at the
/// generated endpoints.
pub(super) fn write_client(config: &AdapterConfig, kit: &dyn KitBuilder) -> Result<ClientOutput> {
    let written = kit.write_client(&config.build.assets)?;
    debug!("build"; "{} client files", written.len());

    if !config.build.ssr {
        return Ok(ClientOutput {
            files: written.len(),
            entry: None,
        });
    }

    let entry = match patch_start_entry(&written)? {
        Some((path, count)) => {
            debug!("build"; "patched {} data reference(s) in {}", count, path.display());
            Some(path)
        }
        None => {
            debug!("build"; "no client start entry found");
            None
        }
    };

    Ok(ClientOutput {
        files: written.len(),
        entry,
    })
}

/// Convert every page in parallel, in page order.
///
/// The first failure is logged and aborts remaining pages.
pub(super) fn generate_pages(
    staging: &Path,
    pages: &[PrerenderedPage],
    chains: &[DependencyChain<'_>],
    ssr: bool,
    progress: Option<&ProgressLine>,
) -> Result<Vec<PageOutcome>> {
    let has_error = AtomicBool::new(false);

    pages
        .par_iter()
        .zip(chains.par_iter())
        .map(|(page, chain)| -> Result<PageOutcome> {
            if has_error.load(Ordering::Relaxed) {
                return Err(anyhow!("Aborted"));
            }
            let outcome = generate_page(staging, page, chain, ssr).inspect_err(|e| {
                if !has_error.swap(true, Ordering::Relaxed) {
                    log!("error"; "{}: {:#}", page.path, e);
                }
            })?;
            if let Some(p) = progress {
                p.inc("pages");
            }
            Ok(outcome)
        })
        .collect()
}

/// Warn about converted pages that kept their static data.
pub(super) fn warn_missing_bootstrap(
    pages: &[PrerenderedPage],
    outcomes: &[PageOutcome],
) -> Vec<NavPath> {
    let missing: Vec<_> = pages
        .iter()
        .zip(outcomes)
        .filter(|(_, outcome)| **outcome == PageOutcome::MissingBootstrap)
        .map(|(page, _)| page.path.clone())
        .collect();

    for path in &missing {
        log!("warning"; "{} has no inline data bootstrap, page data stays static", path);
    }
    missing
}

/// Publish the converted tree.
pub(super) fn finalize(staging: &Path, out: &Path) -> Result<usize> {
    let written = copy_dir(staging, out)
        .with_context(|| format!("failed to publish {}", out.display()))?;
    Ok(written.len())
}
