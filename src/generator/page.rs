//! Per-page conversion.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::endpoint::{data_json_path, endpoint_path, render_endpoint};
use super::html::{convert_html, php_page_path};
use super::GenerateError;
use crate::kit::PrerenderedPage;
use crate::route::DependencyChain;
use crate::utils::fs::write_file;
use crate::utils::path::{relative_slash, to_slash};

/// What happened to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// No loaders apply, the page stays static.
    Static,
    /// Endpoint written, HTML converted when server rendering is on.
    Converted,
    /// Converted, but the HTML had no data bootstrap to replace.
    MissingBootstrap,
}

/// Convert one prerendered page inside `root` (the prerendered tree).
///
/// Writes `<path>/__data.php`. With `ssr` the HTML becomes a `.php` page
/// that includes the endpoint and `<path>/__data.json` is removed.
///
/// Without `ssr` the HTML and `__data.json` are both kept: the client entry
/// is not patched then, so client-side navigation still fetches the static
/// `__data.json` and removing it would break it.
pub fn generate_page(
    root: &Path,
    page: &PrerenderedPage,
    chain: &DependencyChain<'_>,
    ssr: bool,
) -> Result<PageOutcome> {
    if chain.is_empty() {
        return Ok(PageOutcome::Static);
    }

    let html_path = root.join(&page.file);
    let html = fs::read_to_string(&html_path).map_err(|source| GenerateError::MissingHtml {
        page: page.path.clone(),
        file: html_path.clone(),
        source,
    })?;

    let json_path = root.join(data_json_path(&page.path));
    if !json_path.is_file() {
        return Err(GenerateError::MissingData {
            page: page.path.clone(),
            file: json_path,
        }
        .into());
    }

    let endpoint = endpoint_path(&page.path);
    write_file(&root.join(&endpoint), &render_endpoint(chain))?;

    if !ssr {
        return Ok(PageOutcome::Converted);
    }
    fs::remove_file(&json_path)
        .with_context(|| format!("failed to remove {}", json_path.display()))?;

    let html_dir = page.file.parent().map(to_slash).unwrap_or_default();
    let converted = convert_html(&html, &relative_slash(&html_dir, &endpoint));

    let php_path = root.join(php_page_path(&page.file));
    write_file(&php_path, &converted.content)?;
    if php_path != html_path {
        fs::remove_file(&html_path)
            .with_context(|| format!("failed to remove {}", html_path.display()))?;
    }

    Ok(if converted.has_bootstrap {
        PageOutcome::Converted
    } else {
        PageOutcome::MissingBootstrap
    })
}
