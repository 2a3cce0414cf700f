//! Partial discovery on the file system

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, WhiskerError};
use crate::template::Partials;

/// Load every file under `dir` whose name ends with `extension`
///
/// The partial name is the file name without `extension`; sub-directories do not
/// contribute to it, so `dir/a/x.mustache` and `dir/x.mustache` both define `x`.
/// Files are visited in name order and the last one visited wins.
pub fn load_partials(dir: impl AsRef<Path>, extension: &str) -> Result<Partials> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(WhiskerError::PartialDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut partials = Partials::new();
    for entry in WalkDir::new(dir).sort_by_file_name().into_iter() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("WalkDir error: {}", e);
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        let Some(name) = file_name.strip_suffix(extension) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        let text = read_partial(entry.path())?;
        tracing::debug!(partial = name, path = %entry.path().display(), "loaded partial");
        partials.insert(name.to_string(), text);
    }
    Ok(partials)
}

/// Load explicitly named partial files, keyed by file stem
pub fn load_partial_files<P: AsRef<Path>>(paths: &[P]) -> Result<Partials> {
    let mut partials = Partials::new();
    for path in paths {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| WhiskerError::PartialReadFailed {
                path: path.to_path_buf(),
                reason: "path has no file name".to_string(),
            })?;
        let text = read_partial(path)?;
        tracing::debug!(partial = %name, path = %path.display(), "loaded partial");
        partials.insert(name, text);
    }
    Ok(partials)
}

fn read_partial(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| WhiskerError::PartialReadFailed {
        path: PathBuf::from(path),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::DEFAULT_PARTIAL_EXTENSION;
    use std::fs;
    use whisker_testkit::temp_dir_in_workspace;

    #[test]
    fn test_load_partials_recursively() {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        fs::create_dir_all(root.join("nested/deeper")).unwrap();
        fs::write(root.join("header.mustache"), "<h1>{{title}}</h1>").unwrap();
        fs::write(root.join("nested/deeper/row.mustache"), "<li>{{.}}</li>").unwrap();
        fs::write(root.join("notes.txt"), "ignored").unwrap();

        let partials = load_partials(root, DEFAULT_PARTIAL_EXTENSION).unwrap();
        assert_eq!(partials.len(), 2);
        assert_eq!(partials["header"], "<h1>{{title}}</h1>");
        assert_eq!(partials["row"], "<li>{{.}}</li>");
    }

    #[test]
    fn test_load_partials_custom_extension() {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        fs::write(root.join("a.hbs"), "A").unwrap();
        fs::write(root.join("b.mustache"), "B").unwrap();

        let partials = load_partials(root, ".hbs").unwrap();
        assert_eq!(partials.len(), 1);
        assert_eq!(partials["a"], "A");
    }

    #[test]
    fn test_load_partials_missing_dir() {
        let temp = temp_dir_in_workspace();
        let result = load_partials(temp.path().join("nope"), DEFAULT_PARTIAL_EXTENSION);
        assert!(matches!(
            result,
            Err(WhiskerError::PartialDirNotFound { .. })
        ));
    }

    #[test]
    fn test_load_partial_files_by_stem() {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        fs::write(root.join("footer.html"), "bye").unwrap();

        let partials = load_partial_files(&[root.join("footer.html")]).unwrap();
        assert_eq!(partials["footer"], "bye");
    }

    #[test]
    fn test_load_partial_files_missing_file() {
        let temp = temp_dir_in_workspace();
        let result = load_partial_files(&[temp.path().join("absent.mustache")]);
        match result {
            Err(WhiskerError::PartialReadFailed { path, .. }) => {
                assert!(path.ends_with("absent.mustache"));
            }
            _ => panic!("Expected PartialReadFailed error"),
        }
    }
}
