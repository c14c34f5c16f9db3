//! Default path helpers.

use std::path::PathBuf;

use crate::errors::{FramefoldError, Result};

use super::LOCK_FILE_NAME;

/// Per-user single-instance lock location: `<home>/.framefold.lock`.
/// Independent of the source and target directories of a run.
pub fn default_lock_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(LOCK_FILE_NAME))
        .ok_or(FramefoldError::NoHomeDir)
}
