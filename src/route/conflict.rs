//! Load function name collision detection.
//!
//! Name mangling is lossy, so two distinct units may map to the same PHP
//! function. Relocated sources are all included into the same script, which
//! would then redeclare a function and fail at request time.

use rustc_hash::FxHashMap;

use super::RouteUnit;
use crate::log;
use crate::utils::plural_s;

/// Name sources map: function name -> unit sources claiming it.
pub type NameSourceMap<'a> = FxHashMap<&'a str, Vec<&'a str>>;

/// Several units mangle to the same function name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision {
    pub function: String,
    /// Unit sources, sorted.
    pub sources: Vec<String>,
}

pub fn collect_name_sources(units: &[RouteUnit]) -> NameSourceMap<'_> {
    let mut name_sources = NameSourceMap::default();
    for unit in units {
        name_sources
            .entry(unit.function.as_str())
            .or_default()
            .push(unit.source.as_str());
    }
    name_sources
}

/// Function names with more than one source, ordered by name.
pub fn detect_collisions(name_sources: &NameSourceMap<'_>) -> Vec<NameCollision> {
    let mut collisions: Vec<_> = name_sources
        .iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(function, sources)| {
            let mut sources: Vec<_> = sources.iter().map(|s| s.to_string()).collect();
            sources.sort();
            NameCollision {
                function: function.to_string(),
                sources,
            }
        })
        .collect();
    collisions.sort_by(|a, b| a.function.cmp(&b.function));
    collisions
}

/// Print collisions using the standard log format.
///
/// ```text
/// [error] load function collisions (1 name, 2 sources)
///
/// [route] _ab_page_load (2 sources)
///   - /a-b/+page.server.php
///   - /ab/+page.server.php
/// ```
pub fn print_collisions(collisions: &[NameCollision]) {
    if collisions.is_empty() {
        return;
    }

    let total_sources: usize = collisions.iter().map(|c| c.sources.len()).sum();
    log!("error"; "load function collisions ({} name{}, {} source{})",
        collisions.len(), plural_s(collisions.len()),
        total_sources, plural_s(total_sources));

    for collision in collisions {
        eprintln!();
        log!("route"; "{} ({} source{})", collision.function, collision.sources.len(), plural_s(collision.sources.len()));
        for source in &collision.sources {
            eprintln!("  - {source}");
        }
    }
}

/// Collisions as a single error message.
pub fn format_collisions(collisions: &[NameCollision]) -> String {
    collisions
        .iter()
        .map(|collision| {
            let mut lines = vec![format!(
                "{} ({})",
                collision.function,
                collision.sources.len()
            )];
            lines.extend(collision.sources.iter().map(|s| format!("  - {s}")));
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NavPath;
    use crate::route::UnitKind;

    fn page(prefix: &str) -> RouteUnit {
        RouteUnit::new(NavPath::new(prefix), UnitKind::Page, "php")
    }

    #[test]
    fn test_no_collisions() {
        let units = [page("/a"), page("/b"), page("/a/b")];
        let collisions = detect_collisions(&collect_name_sources(&units));
        assert!(collisions.is_empty());
    }

    #[test]
    fn test_lossy_names_collide() {
        let units = [page("/ab"), page("/a-b"), page("/other")];
        let collisions = detect_collisions(&collect_name_sources(&units));

        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].function, "_ab_page_load");
        assert_eq!(
            collisions[0].sources,
            ["/a-b/+page.server.php", "/ab/+page.server.php"]
        );
    }

    #[test]
    fn test_format_collisions() {
        let collisions = [NameCollision {
            function: "_ab_page_load".to_string(),
            sources: vec![
                "/a-b/+page.server.php".to_string(),
                "/ab/+page.server.php".to_string(),
            ],
        }];
        assert_eq!(
            format_collisions(&collisions),
            "_ab_page_load (2)\n  - /a-b/+page.server.php\n  - /ab/+page.server.php"
        );
    }
}
