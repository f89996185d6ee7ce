//! Client start entry patching.
//!
//! The client runtime fetches `<path>/__data.json` on navigation; with server
//! rendering those requests must hit the generated `__data.php` instead.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use super::endpoint::{DATA_JSON_FILE, ENDPOINT_FILE};
use crate::utils::path::to_slash;

static START_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"entry/start(.*)\.js$").unwrap());

/// First written client file that is the start entry bundle.
pub fn find_start_entry(files: &[PathBuf]) -> Option<&Path> {
    files
        .iter()
        .map(PathBuf::as_path)
        .find(|path| START_ENTRY.is_match(&to_slash(path)))
}

/// Point every data request of the start entry at the endpoint.
///
/// Returns the entry file with the number of rewritten references, `None`
/// when the client has no start entry.
pub fn patch_start_entry(files: &[PathBuf]) -> Result<Option<(PathBuf, usize)>> {
    let Some(path) = find_start_entry(files) else {
        return Ok(None);
    };

    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read client entry {}", path.display()))?;
    let count = source.matches(DATA_JSON_FILE).count();
    if count > 0 {
        fs::write(path, source.replace(DATA_JSON_FILE, ENDPOINT_FILE))
            .with_context(|| format!("failed to patch client entry {}", path.display()))?;
    }

    Ok(Some((path.to_path_buf(), count)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_start_entry() {
        let files = vec![
            PathBuf::from("/out/_app/immutable/entry/app.abc.js"),
            PathBuf::from("/out/_app/immutable/entry/start.d41d8.js"),
            PathBuf::from("/out/_app/immutable/entry/start.d41d8.js.map"),
        ];
        assert_eq!(
            find_start_entry(&files),
            Some(Path::new("/out/_app/immutable/entry/start.d41d8.js"))
        );
        assert_eq!(find_start_entry(&files[..1]), None);
    }

    #[test]
    fn test_patch_replaces_all_occurrences() {
        let temp = TempDir::new().unwrap();
        let entry = temp.path().join("_app/immutable/entry/start.js");
        fs::create_dir_all(entry.parent().unwrap()).unwrap();
        fs::write(&entry, r#"a="/__data.json";b=x+"__data.json""#).unwrap();

        let files = vec![temp.path().join("favicon.png"), entry.clone()];
        let (patched, count) = patch_start_entry(&files).unwrap().unwrap();

        assert_eq!(patched, entry);
        assert_eq!(count, 2);
        assert_eq!(
            fs::read_to_string(&entry).unwrap(),
            r#"a="/__data.php";b=x+"__data.php""#
        );
    }

    #[test]
    fn test_patch_without_entry() {
        let files = vec![PathBuf::from("/out/favicon.png")];
        assert!(patch_start_entry(&files).unwrap().is_none());
    }
}
