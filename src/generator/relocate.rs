//! Unit source relocation.
//!
//! Copies every used unit to its deployed path under `_protected`, renaming
//! its `load` entry point so all loaders of a chain can share one script.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use rayon::prelude::*;
use regex::{NoExpand, Regex};

use crate::debug;
use crate::logger::ProgressLine;
use crate::route::RouteUnit;
use crate::utils::fs::write_file;

static LOAD_SIGNATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfunction\s+load\s*\(").unwrap());

/// Rename the first `function load(` declaration.
///
/// Returns the rewritten source and whether a declaration was found; other
/// functions pass through untouched.
pub fn rename_load(source: &str, function: &str) -> (String, bool) {
    let renamed = format!("function {function}(");
    let found = LOAD_SIGNATURE.is_match(source);
    (
        LOAD_SIGNATURE.replacen(source, 1, NoExpand(&renamed)).into_owned(),
        found,
    )
}

/// Relocate one unit from `routes` into `dest`.
pub fn relocate_unit(routes: &Path, dest: &Path, unit: &RouteUnit) -> Result<bool> {
    let source_path = routes.join(unit.source_relative());
    let source = fs::read_to_string(&source_path)
        .with_context(|| format!("failed to read route unit {}", source_path.display()))?;

    let (renamed, found) = rename_load(&source, &unit.function);
    if !found {
        debug!("route"; "{} has no load function", unit.source);
    }

    write_file(&dest.join(&unit.deployed), &renamed)?;
    Ok(found)
}

/// Relocate all units in parallel, joined before returning.
///
/// Returns how many units declared a `load` function.
pub fn relocate_all(
    routes: &Path,
    dest: &Path,
    units: &[&RouteUnit],
    progress: Option<&ProgressLine>,
) -> Result<usize> {
    let found = units
        .par_iter()
        .map(|unit| -> Result<bool> {
            let found = relocate_unit(routes, dest, unit)?;
            if let Some(p) = progress {
                p.inc("units");
            }
            Ok(found)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(found.into_iter().filter(|&f| f).count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NavPath;
    use crate::route::UnitKind;
    use tempfile::TempDir;

    #[test]
    fn test_rename_first_load_only() {
        let source = "<?php\nfunction helper($x) { return $x; }\nfunction load($event) {\n    return helper([]);\n}\n// function load( again\n";
        let (renamed, found) = rename_load(source, "_blog_page_load");
        assert!(found);
        assert!(renamed.contains("function helper($x)"));
        assert!(renamed.contains("function _blog_page_load($event) {"));
        assert!(renamed.contains("// function load( again"));
    }

    #[test]
    fn test_rename_tolerates_spacing() {
        let (renamed, found) = rename_load("<?php function  load ($e) {}", "_layout_load");
        assert!(found);
        assert_eq!(renamed, "<?php function _layout_load($e) {}");
    }

    #[test]
    fn test_rename_ignores_similar_names() {
        let source = "<?php function preload($e) {} function loader($e) {}";
        let (renamed, found) = rename_load(source, "_layout_load");
        assert!(!found);
        assert_eq!(renamed, source);
    }

    #[test]
    fn test_relocate_all_writes_deployed_paths() {
        let temp = TempDir::new().unwrap();
        let routes = temp.path().join("routes");
        let dest = temp.path().join("out");
        fs::create_dir_all(routes.join("blog")).unwrap();
        fs::write(routes.join("+layout.server.php"), "<?php function load($e) { return ['a' => 1]; }").unwrap();
        fs::write(routes.join("blog/+page.server.php"), "<?php // no loader").unwrap();

        let layout = RouteUnit::new(NavPath::root(), UnitKind::Layout, "php");
        let page = RouteUnit::new(NavPath::new("/blog"), UnitKind::Page, "php");
        let found = relocate_all(&routes, &dest, &[&layout, &page], None).unwrap();

        assert_eq!(found, 1);
        assert_eq!(
            fs::read_to_string(dest.join("_protected/_layout.php")).unwrap(),
            "<?php function _layout_load($e) { return ['a' => 1]; }"
        );
        assert_eq!(
            fs::read_to_string(dest.join("_protected/blog/_page.php")).unwrap(),
            "<?php // no loader"
        );
    }

    #[test]
    fn test_relocate_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        let unit = RouteUnit::new(NavPath::new("/gone"), UnitKind::Page, "php");
        let err = relocate_all(temp.path(), temp.path(), &[&unit], None).unwrap_err();
        assert!(err.to_string().contains("failed to read route unit"));
    }
}
