//! Test utilities for whisker
//!
//! This crate provides shared testing utilities used across the whisker workspace.

pub mod fixtures;

use tempfile::TempDir;

pub use fixtures::{Showcase, write_showcase, write_tree};

/// Creates a temporary directory within `.tmp/` at the project root
///
/// All test temporary files end up in a single gitignored location.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or if `.tmp/` or the
/// temporary subdirectory cannot be created.
///
/// # Examples
///
/// ```no_run
/// use whisker_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("page.mustache");
/// std::fs::write(&file_path, "Hello {{name}}").unwrap();
/// // Cleanup happens automatically when temp is dropped
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_in_workspace_creates_in_tmp() {
        let temp = temp_dir_in_workspace();
        let path = temp.path();

        assert!(
            path.to_string_lossy().contains(".tmp"),
            "Path should contain .tmp, got: {}",
            path.display()
        );
        assert!(path.is_dir(), "Path should be a directory");
    }

    #[test]
    fn test_temp_dir_auto_cleanup() {
        let path = {
            let temp = temp_dir_in_workspace();
            let p = temp.path().to_path_buf();
            assert!(p.exists(), "Directory should exist before drop");
            p
        };

        assert!(!path.exists(), "Directory should be removed after drop");
    }
}
