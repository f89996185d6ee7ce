//! Path normalization utilities.
//!
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `resolve_against` - resolve a configured path against the project root

use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
///
/// Directories that do not exist yet (e.g. `build/` before the first run)
/// take the fallback branch.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a configured path against the project root.
///
/// Absolute paths are kept, relative paths are joined with `root`.
#[inline]
pub fn resolve_against(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    normalize_path(&root.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_absolute() {
        let path = Path::new("/absolute/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_normalize_path_relative() {
        let path = Path::new("relative/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_resolve_against_absolute_kept() {
        let resolved = resolve_against(Path::new("/srv/site/build"), Path::new("/project"));
        assert_eq!(resolved, PathBuf::from("/srv/site/build"));
    }

    #[test]
    fn test_resolve_against_relative_joined() {
        let resolved = resolve_against(Path::new("nonexistent/build"), Path::new("/project"));
        assert_eq!(resolved, PathBuf::from("/project/nonexistent/build"));
    }
}
