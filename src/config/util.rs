//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/site/src/routes/  ← cwd
/// /home/user/site/kitphp.toml  ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_from(&cwd, config_name)
}

/// Upward search starting at `start`.
pub fn find_config_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_walks_upward() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("src/routes/blog");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join("kitphp.toml"), "").unwrap();

        let found = find_config_from(&nested, Path::new("kitphp.toml")).unwrap();
        assert_eq!(found, temp.path().join("kitphp.toml"));
    }

    #[test]
    fn test_find_config_absolute_missing() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        assert!(find_config_from(temp.path(), &missing).is_none());
    }
}
