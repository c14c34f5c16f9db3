//! Empty-directory sweep after a move run.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::{io_err, Result};

/// Remove each directory in `dirs` that is empty, deepest first so a removed
/// child can leave its (also tracked) parent empty within the same sweep.
///
/// Directories that no longer exist are skipped. Returns how many were removed.
pub fn remove_empty_dirs(dirs: &BTreeSet<PathBuf>) -> Result<usize> {
    let mut ordered: Vec<&PathBuf> = dirs.iter().collect();
    // Deeper paths first; ties keep the set's lexicographic order.
    ordered.sort_by_key(|d| std::cmp::Reverse(d.components().count()));

    let mut removed = 0;
    for dir in ordered {
        if remove_if_empty(dir)? {
            info!(path = %dir.display(), "Removed empty directory");
            removed += 1;
        }
    }
    Ok(removed)
}

fn remove_if_empty(dir: &Path) -> Result<bool> {
    let mut entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(io_err("read directory", dir)(e)),
    };
    if entries.next().is_some() {
        return Ok(false);
    }
    fs::remove_dir(dir).map_err(io_err("remove empty directory", dir))?;
    Ok(true)
}
