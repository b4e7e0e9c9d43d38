//! Locates the `.gearrc` for a validation run.
//!
//! An explicit `--config` path always wins and must be loadable. Otherwise
//! the `.gearrc` at the validated root is used when present, and the
//! built-in defaults when it is not.

use std::path::{Path, PathBuf};

/// Name of the per-project configuration file.
pub const GEARRC: &str = ".gearrc";

/// Returns the configuration file to load for `root`, if any.
#[must_use]
pub fn locate(root: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = root.join(GEARRC);
    if candidate.is_file() {
        tracing::debug!("Found {}", candidate.display());
        Some(candidate)
    } else {
        tracing::debug!("No {GEARRC} in {}, using defaults", root.display());
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_path_is_used_even_if_missing() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        fs::write(tmp.path().join(GEARRC), "").expect("Failed to write config");
        let explicit = tmp.path().join("ci.gearrc");

        assert_eq!(locate(tmp.path(), Some(&explicit)), Some(explicit));
    }

    #[test]
    fn gearrc_at_root() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        fs::write(tmp.path().join(GEARRC), "rules: {}\n").expect("Failed to write config");

        assert_eq!(locate(tmp.path(), None), Some(tmp.path().join(GEARRC)));
    }

    #[test]
    fn nested_or_directory_gearrc_is_ignored() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir(tmp.path().join(GEARRC)).expect("Failed to create dir");
        fs::create_dir_all(tmp.path().join("pkg")).expect("Failed to create dir");
        fs::write(tmp.path().join("pkg").join(GEARRC), "").expect("Failed to write config");

        assert_eq!(locate(tmp.path(), None), None);
    }
}
