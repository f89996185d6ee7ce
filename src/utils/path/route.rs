//! Slash-separated path helpers.
//!
//! Generated PHP and route ids always use `/`, regardless of the host OS.

use std::path::{Component, Path};

/// Render a relative path with `/` separators.
///
/// `blog\post\+page.server.php` -> `blog/post/+page.server.php`
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Relative `/`-path from directory `from` to file `to`.
///
/// Both arguments are slash paths relative to the same root; an empty
/// `from` is the root itself.
///
/// # Examples
/// ```ignore
/// relative_slash("", "blog/__data.php")          -> "blog/__data.php"
/// relative_slash("blog", "_protected/_page.php")  -> "../_protected/_page.php"
/// relative_slash("blog", "blog/__data.php")      -> "__data.php"
/// ```
pub fn relative_slash(from: &str, to: &str) -> String {
    let from: Vec<_> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to: Vec<_> = to.split('/').filter(|s| !s.is_empty()).collect();

    let shared = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from.len() - shared];
    parts.extend(&to[shared..]);
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_to_slash() {
        let path: PathBuf = ["blog", "post", "+page.server.php"].iter().collect();
        assert_eq!(to_slash(&path), "blog/post/+page.server.php");
        assert_eq!(to_slash(Path::new("")), "");
    }

    #[test]
    fn test_relative_slash_from_root() {
        assert_eq!(relative_slash("", "blog/__data.php"), "blog/__data.php");
        assert_eq!(relative_slash("", "__data.php"), "__data.php");
    }

    #[test]
    fn test_relative_slash_climbs_out() {
        assert_eq!(
            relative_slash("blog", "_protected/blog/_page.php"),
            "../_protected/blog/_page.php"
        );
        assert_eq!(
            relative_slash("a/b", "_protected/_layout.php"),
            "../../_protected/_layout.php"
        );
    }

    #[test]
    fn test_relative_slash_shared_prefix() {
        assert_eq!(relative_slash("blog", "blog/__data.php"), "__data.php");
        assert_eq!(relative_slash("blog/", "blog/post/__data.php"), "post/__data.php");
    }
}
