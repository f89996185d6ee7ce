//! Route units - server data loaders found in the route tree.
//!
//! ```text
//! src/routes/
//! ├── +layout.server.php          -> layout  /      _layout_load       _protected/_layout.php
//! └── blog/
//!     ├── +layout.server.php      -> layout  /blog  _blog_layout_load  _protected/blog/_layout.php
//!     └── +page.server.php        -> page    /blog  _blog_page_load    _protected/blog/_page.php
//! ```

use serde::Serialize;

use crate::core::NavPath;

/// Directory under the output root that holds relocated unit sources.
pub const PROTECTED_DIR: &str = "_protected";

/// Suffix appended to every generated load function name.
pub const LOAD_SUFFIX: &str = "_load";

/// Layout loaders apply to a subtree, page loaders to exactly one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Layout,
    Page,
}

impl UnitKind {
    /// `+layout` / `+page`
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Layout => "+layout",
            Self::Page => "+page",
        }
    }

    /// Source file name: `+page.server.php`
    pub fn source_name(self, extension: &str) -> String {
        format!("{}.server.{extension}", self.marker())
    }

    /// Relocated file name: `_page.php`
    pub fn deployed_name(self, extension: &str) -> String {
        format!("_{}.{extension}", &self.marker()[1..])
    }

    /// Classify a file name, `None` for anything that is not a unit.
    pub fn from_file_name(name: &str, extension: &str) -> Option<Self> {
        [Self::Layout, Self::Page]
            .into_iter()
            .find(|kind| name == kind.source_name(extension))
    }
}

/// A single data-loading source file. Immutable once indexed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RouteUnit {
    /// Route-tree relative source path, e.g. `/blog/+page.server.php`.
    pub source: String,
    pub kind: UnitKind,
    /// Directory the unit lives in, e.g. `/blog`.
    pub prefix: NavPath,
    /// Unique PHP function name the `load` entry point is renamed to.
    pub function: String,
    /// Output-root relative destination, e.g. `_protected/blog/_page.php`.
    pub deployed: String,
}

impl RouteUnit {
    pub fn new(prefix: NavPath, kind: UnitKind, extension: &str) -> Self {
        let dir = if prefix.is_root() {
            String::new()
        } else {
            prefix.as_str().to_string()
        };

        let source = format!("{dir}/{}", kind.source_name(extension));
        let deployed = format!("{PROTECTED_DIR}{dir}/{}", kind.deployed_name(extension));
        let function = function_name(&source, extension);

        Self {
            source,
            kind,
            prefix,
            function,
            deployed,
        }
    }

    /// Route-tree relative source without the leading slash.
    pub fn source_relative(&self) -> &str {
        self.source.trim_start_matches('/')
    }
}

/// Derive the load function name from a unit source path.
///
/// Drops `.server.<ext>`, turns `/` into `_`, then removes every character a
/// PHP identifier cannot hold (`+`, `(`, `)`, `[`, `]`, `-`, `.`, ...) and
/// appends [`LOAD_SUFFIX`]. The leading `/` guarantees the name never starts
/// with a digit.
///
/// The mapping is lossy (`/a-b` and `/ab` collide); the indexer rejects
/// collisions.
pub fn function_name(source: &str, extension: &str) -> String {
    let suffix = format!(".server.{extension}");
    let stem = source.strip_suffix(suffix.as_str()).unwrap_or(source);

    let mut name: String = stem
        .chars()
        .filter_map(|c| match c {
            '/' => Some('_'),
            c if c.is_alphanumeric() || c == '_' => Some(c),
            _ => None,
        })
        .collect();
    name.push_str(LOAD_SUFFIX);
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_layout_unit() {
        let unit = RouteUnit::new(NavPath::root(), UnitKind::Layout, "php");
        assert_eq!(unit.source, "/+layout.server.php");
        assert_eq!(unit.function, "_layout_load");
        assert_eq!(unit.deployed, "_protected/_layout.php");
        assert_eq!(unit.source_relative(), "+layout.server.php");
    }

    #[test]
    fn test_nested_page_unit() {
        let unit = RouteUnit::new(NavPath::new("/blog"), UnitKind::Page, "php");
        assert_eq!(unit.source, "/blog/+page.server.php");
        assert_eq!(unit.function, "_blog_page_load");
        assert_eq!(unit.deployed, "_protected/blog/_page.php");
    }

    #[test]
    fn test_function_name_strips_invalid_characters() {
        assert_eq!(
            function_name("/(app)/docs/[slug]/+page.server.php", "php"),
            "_app_docs_slug_page_load"
        );
        assert_eq!(
            function_name("/my-blog/v1.2/+layout.server.php", "php"),
            "_myblog_v12_layout_load"
        );
    }

    #[test]
    fn test_function_name_is_lossy() {
        assert_eq!(
            function_name("/a-b/+page.server.php", "php"),
            function_name("/ab/+page.server.php", "php")
        );
    }

    #[test]
    fn test_kind_from_file_name() {
        assert_eq!(
            UnitKind::from_file_name("+layout.server.php", "php"),
            Some(UnitKind::Layout)
        );
        assert_eq!(
            UnitKind::from_file_name("+page.server.php", "php"),
            Some(UnitKind::Page)
        );
        assert_eq!(UnitKind::from_file_name("+page.server.js", "php"), None);
        assert_eq!(UnitKind::from_file_name("+page.svelte", "php"), None);
        assert_eq!(
            UnitKind::from_file_name("+page.server.inc", "inc"),
            Some(UnitKind::Page)
        );
    }

    #[test]
    fn test_deployed_name() {
        assert_eq!(UnitKind::Layout.deployed_name("php"), "_layout.php");
        assert_eq!(UnitKind::Page.deployed_name("php"), "_page.php");
    }
}
