//! Route tree indexing.
//!
//! Walks the route root once and classifies every `+layout.server.<ext>` and
//! `+page.server.<ext>` file. The index is immutable afterwards and shared
//! read-only by the parallel resolvers.

use std::path::Path;

use rustc_hash::FxHashMap;

use super::conflict::{collect_name_sources, detect_collisions, print_collisions};
use super::{RouteError, RouteUnit, UnitKind};
use crate::core::NavPath;
use crate::debug;
use crate::utils::fs::collect_all_files;
use crate::utils::path::to_slash;

/// All route units of a project.
#[derive(Debug, Default)]
pub struct RouteIndex {
    /// Units ordered by source path.
    units: Vec<RouteUnit>,
    /// Layout unit indices, shallow first.
    layouts: Vec<usize>,
    /// Page unit index by exact path.
    pages: FxHashMap<NavPath, usize>,
}

impl RouteIndex {
    /// Scan `root` for unit files with the given extension.
    ///
    /// A missing root is an error; an empty tree is a valid, empty index.
    pub fn scan(root: &Path, extension: &str) -> Result<Self, RouteError> {
        if !root.is_dir() {
            return Err(RouteError::MissingRoot(root.to_path_buf()));
        }

        let units = collect_all_files(root)
            .into_iter()
            .filter_map(|path| classify(root, &path, extension))
            .collect();

        Self::from_units(units)
    }

    /// Build an index from already classified units.
    ///
    /// Rejects units whose function names collide.
    pub fn from_units(mut units: Vec<RouteUnit>) -> Result<Self, RouteError> {
        units.sort_by(|a, b| a.source.cmp(&b.source));
        units.dedup_by(|a, b| a.source == b.source);

        let collisions = detect_collisions(&collect_name_sources(&units));
        if !collisions.is_empty() {
            print_collisions(&collisions);
            return Err(RouteError::NameCollision(collisions));
        }

        let mut layouts: Vec<usize> = Vec::new();
        let mut pages = FxHashMap::default();
        for (i, unit) in units.iter().enumerate() {
            debug!("route"; "{} -> {}", unit.source, unit.function);
            match unit.kind {
                UnitKind::Layout => layouts.push(i),
                UnitKind::Page => {
                    pages.insert(unit.prefix.clone(), i);
                }
            }
        }
        layouts.sort_by_key(|&i| units[i].prefix.depth());

        Ok(Self {
            units,
            layouts,
            pages,
        })
    }

    /// Every unit, ordered by source path.
    pub fn units(&self) -> &[RouteUnit] {
        &self.units
    }

    /// Layout units, shallow first.
    pub fn layouts(&self) -> impl Iterator<Item = &RouteUnit> {
        self.layouts.iter().map(|&i| &self.units[i])
    }

    /// Page unit located exactly at `path`.
    pub fn page(&self, path: &NavPath) -> Option<&RouteUnit> {
        self.pages.get(path).map(|&i| &self.units[i])
    }
}

/// Turn a file under `root` into a unit, `None` for unrelated files.
fn classify(root: &Path, path: &Path, extension: &str) -> Option<RouteUnit> {
    let name = path.file_name()?.to_str()?;
    let kind = UnitKind::from_file_name(name, extension)?;

    let dir = path.parent()?.strip_prefix(root).ok()?;
    Some(RouteUnit::new(NavPath::new(&to_slash(dir)), kind, extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<?php function load($e) { return []; }").unwrap();
    }

    #[test]
    fn test_scan_classifies_units() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "+layout.server.php");
        touch(root, "blog/+layout.server.php");
        touch(root, "blog/+page.server.php");
        touch(root, "blog/+page.svelte");
        touch(root, "about/+page.server.js");

        let index = RouteIndex::scan(root, "php").unwrap();
        let sources: Vec<_> = index.units().iter().map(|u| u.source.as_str()).collect();
        assert_eq!(
            sources,
            [
                "/+layout.server.php",
                "/blog/+layout.server.php",
                "/blog/+page.server.php",
            ]
        );

        let layouts: Vec<_> = index.layouts().map(|u| u.prefix.as_str()).collect();
        assert_eq!(layouts, ["/", "/blog"]);
        assert_eq!(
            index.page(&NavPath::new("/blog")).map(|u| u.function.as_str()),
            Some("_blog_page_load")
        );
        assert!(index.page(&NavPath::new("/about")).is_none());
    }

    #[test]
    fn test_scan_is_repeatable() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "+layout.server.php");
        touch(root, "docs/+layout.server.php");
        touch(root, "docs/intro/+page.server.php");
        touch(root, "blog/+page.server.php");
        touch(root, "blog/archive/+layout.server.php");

        let first = RouteIndex::scan(root, "php").unwrap();
        let second = RouteIndex::scan(root, "php").unwrap();
        assert_eq!(first.units(), second.units());

        let deployed: Vec<_> = first.units().iter().map(|u| (u.function.as_str(), u.deployed.as_str())).collect();
        let deployed_again: Vec<_> = second.units().iter().map(|u| (u.function.as_str(), u.deployed.as_str())).collect();
        assert_eq!(deployed, deployed_again);

        let layouts: Vec<_> = first.layouts().map(|u| u.source.as_str()).collect();
        let layouts_again: Vec<_> = second.layouts().map(|u| u.source.as_str()).collect();
        assert_eq!(layouts, layouts_again);
        assert_eq!(layouts[0], "/+layout.server.php");
    }

    #[test]
    fn test_scan_respects_extension() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "+page.server.inc");
        touch(temp.path(), "+layout.server.php");

        let index = RouteIndex::scan(temp.path(), "inc").unwrap();
        assert_eq!(index.units().len(), 1);
        assert_eq!(index.units()[0].deployed, "_protected/_page.inc");
    }

    #[test]
    fn test_scan_empty_tree() {
        let temp = TempDir::new().unwrap();
        let index = RouteIndex::scan(temp.path(), "php").unwrap();
        assert!(index.units().is_empty());
    }

    #[test]
    fn test_scan_missing_root() {
        let err = RouteIndex::scan(Path::new("/definitely/not/here"), "php").unwrap_err();
        assert!(matches!(err, RouteError::MissingRoot(_)));
    }

    #[test]
    fn test_scan_rejects_collisions() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "ab/+page.server.php");
        touch(temp.path(), "a-b/+page.server.php");

        let err = RouteIndex::scan(temp.path(), "php").unwrap_err();
        let RouteError::NameCollision(collisions) = &err else {
            panic!("expected name collision");
        };
        assert_eq!(collisions[0].function, "_ab_page_load");
        assert!(err.to_string().contains("/a-b/+page.server.php"));
    }
}
