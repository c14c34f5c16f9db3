//! Single-instance run lock.
//! Ensures only one framefold process mutates source/target trees at a time.
//!
//! Design:
//! - The lock is a marker file (by default `~/.framefold.lock`) created with
//!   `create_new`, so creation fails if the file already exists.
//! - The marker holds the owner's decimal pid; its mtime is the creation time.
//! - A marker is stale when it is older than `STALE_AFTER`, when the pid cannot be
//!   parsed, or when no process with that pid is alive. Stale markers are removed
//!   and creation is retried a bounded number of times.
//!
//! Notes:
//! - The lock is released when the InstanceLock guard is dropped, so every exit
//!   path of a run (errors and unwinding panics included) removes the marker.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, trace, warn};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use crate::errors::{FramefoldError, Result};

/// Markers older than this are considered abandoned.
pub const STALE_AFTER: Duration = Duration::from_secs(24 * 60 * 60);

const MAX_ATTEMPTS: u32 = 3;

/// RAII guard held while the run lock is owned.
#[derive(Debug)]
pub struct InstanceLock {
    path: PathBuf,
    released: bool,
}

impl InstanceLock {
    /// Try to take the lock at `path` without blocking.
    /// Returns Ok(Some(lock)) on success, Ok(None) if a live instance holds it,
    /// or Err on unexpected I/O errors.
    pub fn acquire(path: &Path) -> Result<Option<InstanceLock>> {
        for attempt in 1..=MAX_ATTEMPTS {
            match create_marker(path) {
                Ok(()) => {
                    trace!(path = %path.display(), attempt, "lock acquired");
                    return Ok(Some(InstanceLock {
                        path: path.to_path_buf(),
                        released: false,
                    }));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    if !is_stale(path) {
                        debug!(path = %path.display(), "lock held by a live instance");
                        return Ok(None);
                    }
                    warn!(path = %path.display(), "Removing stale lock file");
                    match fs::remove_file(path) {
                        Ok(()) => {}
                        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                        Err(source) => {
                            return Err(FramefoldError::Lock {
                                path: path.to_path_buf(),
                                source,
                            });
                        }
                    }
                }
                Err(source) => {
                    return Err(FramefoldError::Lock {
                        path: path.to_path_buf(),
                        source,
                    });
                }
            }
        }
        warn!(path = %path.display(), attempts = MAX_ATTEMPTS, "gave up reclaiming lock");
        Ok(None)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the marker. A marker that is already gone is not an error.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        remove_marker(&self.path).map_err(|source| FramefoldError::Lock {
            path: self.path.clone(),
            source,
        })
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        if !self.released {
            self.released = true;
            if let Err(e) = remove_marker(&self.path) {
                warn!(path = %self.path.display(), error = %e, "failed to remove lock file");
            }
        }
    }
}

fn create_marker(path: &Path) -> io::Result<()> {
    let mut opts = OpenOptions::new();
    opts.write(true).create_new(true);
    #[cfg(unix)]
    opts.mode(0o600);
    let mut f = opts.open(path)?;

    if let Err(e) = write!(f, "{}", std::process::id()).and_then(|_| f.flush()) {
        // Don't leave a marker without an owner behind.
        drop(f);
        let _ = fs::remove_file(path);
        return Err(e);
    }
    Ok(())
}

fn remove_marker(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// True when the marker at `path` no longer protects a live run.
pub fn is_stale(path: &Path) -> bool {
    let meta = match fs::metadata(path) {
        Ok(m) => m,
        // Vanished between our create attempt and now: nothing to protect.
        Err(e) if e.kind() == io::ErrorKind::NotFound => return true,
        Err(_) => return false,
    };

    if let Ok(modified) = meta.modified()
        && let Ok(age) = SystemTime::now().duration_since(modified)
        && age > STALE_AFTER
    {
        debug!(path = %path.display(), age_secs = age.as_secs(), "lock older than threshold");
        return true;
    }

    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return e.kind() == io::ErrorKind::NotFound,
    };
    match contents.trim().parse::<u32>() {
        Ok(pid) => !process_alive(pid),
        Err(_) => {
            debug!(path = %path.display(), "lock holds no valid pid");
            true
        }
    }
}

/// Probe a pid with signal 0 (no effect on the target).
#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    let Ok(pid) = libc::pid_t::try_from(pid) else {
        return false;
    };
    if pid <= 0 {
        return false;
    }
    let rc = unsafe { libc::kill(pid, 0) };
    if rc == 0 {
        return true;
    }
    // EPERM: the process exists but belongs to someone else.
    io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    // No cheap liveness probe here; rely on the age threshold.
    true
}
