//! Processed-file ledger output.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::{io_err, Result};

/// Write `entries` to `path`, sorted, one per line, replacing any existing file.
pub fn write_ledger(path: &Path, entries: &[PathBuf]) -> Result<()> {
    let mut lines: Vec<String> = entries
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    lines.sort();

    let mut body = lines.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    fs::write(path, body).map_err(io_err("write processed files list", path))?;
    info!(path = %path.display(), entries = lines.len(), "Wrote processed files list");
    Ok(())
}
