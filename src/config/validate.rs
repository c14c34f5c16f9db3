//! Source/target root validation.
//! Verifies the source is a readable directory, creates the target if needed,
//! and keeps the two trees disjoint so a run never walks its own output.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::{io_err, FramefoldError, Result};

/// Validate the roots of a run. Creates `target` (and parents) when absent.
/// Returns the canonical, absolute target directory.
pub fn validate_roots(source: &Path, target: &Path) -> Result<PathBuf> {
    // 1) Source: must exist, be a directory, and be readable.
    let meta = fs::metadata(source).map_err(|e| FramefoldError::InvalidRoot {
        name: "source",
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !meta.is_dir() {
        return Err(FramefoldError::InvalidRoot {
            name: "source",
            path: source.to_path_buf(),
            reason: "not a directory".into(),
        });
    }
    fs::read_dir(source).map_err(io_err("read source directory", source))?;

    // 2) Target: must be a directory; create if missing.
    if target.exists() {
        if !target.is_dir() {
            return Err(FramefoldError::InvalidRoot {
                name: "target",
                path: target.to_path_buf(),
                reason: "exists but is not a directory".into(),
            });
        }
    } else {
        fs::create_dir_all(target).map_err(io_err("create target directory", target))?;
        info!(path = %target.display(), "Created target directory");
    }

    // 3) Resolve symlinks and ensure the roots are disjoint (neither contains the other).
    let src_real = fs::canonicalize(source).map_err(io_err("resolve source directory", source))?;
    let dst_real = fs::canonicalize(target).map_err(io_err("resolve target directory", target))?;

    if src_real == dst_real {
        return Err(FramefoldError::InvalidRoot {
            name: "target",
            path: target.to_path_buf(),
            reason: "resolves to the same path as the source".into(),
        });
    }
    if dst_real.starts_with(&src_real) {
        return Err(FramefoldError::InvalidRoot {
            name: "target",
            path: target.to_path_buf(),
            reason: format!("must not be inside the source '{}'", source.display()),
        });
    }
    if src_real.starts_with(&dst_real) {
        return Err(FramefoldError::InvalidRoot {
            name: "source",
            path: source.to_path_buf(),
            reason: format!("must not be inside the target '{}'", target.display()),
        });
    }

    debug!(source = %src_real.display(), target = %dst_real.display(), "Roots validated");
    Ok(dst_real)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_missing_target() {
        let td = tempdir().unwrap();
        let src = td.path().join("in");
        fs::create_dir_all(&src).unwrap();
        let dst = td.path().join("out").join("nested");
        let resolved = validate_roots(&src, &dst).unwrap();
        assert!(dst.is_dir());
        assert!(resolved.is_absolute());
        assert_eq!(resolved, fs::canonicalize(&dst).unwrap());
    }

    #[test]
    fn missing_source_is_rejected() {
        let td = tempdir().unwrap();
        let err = validate_roots(&td.path().join("nope"), &td.path().join("out")).unwrap_err();
        assert!(matches!(err, FramefoldError::InvalidRoot { name: "source", .. }));
    }

    #[test]
    fn source_file_is_rejected() {
        let td = tempdir().unwrap();
        let f = td.path().join("file.jpg");
        fs::write(&f, b"x").unwrap();
        let err = validate_roots(&f, &td.path().join("out")).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn nested_roots_are_rejected() {
        let td = tempdir().unwrap();
        let src = td.path().join("in");
        fs::create_dir_all(&src).unwrap();
        let err = validate_roots(&src, &src.join("sorted")).unwrap_err();
        assert!(err.to_string().contains("must not be inside the source"));
        let err = validate_roots(&src, &src).unwrap_err();
        assert!(err.to_string().contains("same path"));
        let inner = src.join("deeper");
        fs::create_dir_all(&inner).unwrap();
        let err = validate_roots(&inner, &src).unwrap_err();
        assert!(err.to_string().contains("must not be inside the target"));
    }
}
