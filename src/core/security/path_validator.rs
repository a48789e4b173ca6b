use std::io;
use std::path::{Component, Path, PathBuf};

/// Errors that can occur during path validation
#[derive(Debug, thiserror::Error)]
pub enum PathSecurityError {
    #[error("Path '{path}' is outside allowed root directory '{root}'")]
    OutsideRootDirectory { path: PathBuf, root: PathBuf },

    #[error("Symlink '{path}' points outside allowed root directory")]
    SymlinkOutsideRoot { path: PathBuf },

    #[error("Cannot canonicalize path '{path}': {error}")]
    CannotCanonicalize { path: PathBuf, error: io::Error },

    #[error("Path does not exist: '{path}'")]
    PathNotFound { path: PathBuf },

    #[error("Path component '..' is not allowed in '{path}'")]
    ParentTraversal { path: PathBuf },

    #[error("IO error for path '{path}': {error}")]
    IoError { path: PathBuf, error: io::Error },
}

/// Validates that an existing path is within the storage root.
///
/// This function performs the following checks:
/// 1. Interprets relative keys against the root
/// 2. Canonicalizes the path to resolve `.`, `..`, and symlinks
/// 3. Ensures the canonical path stays within the root
/// 4. Handles symlinks according to the given policy
///
/// Used by download and delete operations, which require the target to
/// already exist.
pub fn validate_existing(
    key: &str,
    root: &Path,
    allow_symlinks: bool,
) -> Result<PathBuf, PathSecurityError> {
    let canonical_root = root
        .canonicalize()
        .map_err(|e| PathSecurityError::IoError {
            path: root.to_path_buf(),
            error: e,
        })?;

    let path = Path::new(key);
    let path = if path.is_relative() {
        canonical_root.join(path)
    } else {
        path.to_path_buf()
    };

    if !path.exists() {
        return Err(PathSecurityError::PathNotFound { path });
    }

    if path.is_symlink() && !allow_symlinks {
        let target = path.read_link().map_err(|e| PathSecurityError::IoError {
            path: path.clone(),
            error: e,
        })?;

        let canonical_target = canonicalize_path(&target)
            .map_err(|_| PathSecurityError::SymlinkOutsideRoot { path: path.clone() })?;

        if !is_within_root(&canonical_target, &canonical_root) {
            return Err(PathSecurityError::SymlinkOutsideRoot { path });
        }
    }

    let canonical_path = path
        .canonicalize()
        .map_err(|e| PathSecurityError::CannotCanonicalize {
            path: path.clone(),
            error: e,
        })?;

    if !is_within_root(&canonical_path, &canonical_root) {
        return Err(PathSecurityError::OutsideRootDirectory {
            path: canonical_path,
            root: canonical_root,
        });
    }

    Ok(canonical_path)
}

/// Resolves a relative storage key to an absolute path under the root,
/// without requiring the target to exist.
///
/// Used by upload operations, where the file is about to be created.
/// Absolute paths and `..` components are rejected outright.
pub fn resolve_within_root(key: &str, root: &Path) -> Result<PathBuf, PathSecurityError> {
    let rel = Path::new(key);

    if rel.is_absolute() {
        return Err(PathSecurityError::OutsideRootDirectory {
            path: rel.to_path_buf(),
            root: root.to_path_buf(),
        });
    }

    for component in rel.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => {
                return Err(PathSecurityError::ParentTraversal {
                    path: rel.to_path_buf(),
                });
            }
        }
    }

    Ok(root.join(rel))
}

/// Checks if a path is within (or equal to) a root directory
fn is_within_root(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}

/// Attempts to canonicalize a path, mapping NotFound to a dedicated error
fn canonicalize_path(path: &Path) -> Result<PathBuf, PathSecurityError> {
    path.canonicalize().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            PathSecurityError::PathNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PathSecurityError::CannotCanonicalize {
                path: path.to_path_buf(),
                error: e,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_relative_key_resolved_against_root() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("file.txt"), "data").unwrap();

        let validated = validate_existing("file.txt", temp.path(), true).unwrap();
        assert!(validated.ends_with("file.txt"));
    }

    #[test]
    fn test_traversal_outside_root_rejected() {
        let temp = TempDir::new().unwrap();
        let result = validate_existing("../etc/passwd", temp.path(), true);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_path_rejected() {
        let temp = TempDir::new().unwrap();
        let result = validate_existing("nope.txt", temp.path(), true);
        assert!(matches!(
            result,
            Err(PathSecurityError::PathNotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_within_root_plain_key() {
        let temp = TempDir::new().unwrap();
        let resolved = resolve_within_root("reports/out.csv", temp.path()).unwrap();
        assert!(resolved.starts_with(temp.path()));
    }

    #[test]
    fn test_resolve_within_root_rejects_parent() {
        let temp = TempDir::new().unwrap();
        assert!(resolve_within_root("../escape", temp.path()).is_err());
        assert!(resolve_within_root("a/../../escape", temp.path()).is_err());
    }

    #[test]
    fn test_resolve_within_root_rejects_absolute() {
        let temp = TempDir::new().unwrap();
        assert!(resolve_within_root("/etc/passwd", temp.path()).is_err());
    }
}
