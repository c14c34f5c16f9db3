//! Cooperative stop flag, set from the Ctrl-C handler.
//!
//! The organizer polls it before each file, so an interrupted run ends with
//! `FramefoldError::Interrupted` after the file in flight and still drops its lock.

use std::sync::atomic::{AtomicBool, Ordering};

static STOP: AtomicBool = AtomicBool::new(false);

/// Ask the current run to stop. Returns true if a stop was already pending,
/// which the binary treats as "stop now".
pub fn request() -> bool {
    STOP.swap(true, Ordering::Relaxed)
}

#[inline]
pub fn is_requested() -> bool {
    STOP.load(Ordering::Relaxed)
}

/// Test/utility-only: clear a pending stop so several runs can share one process.
#[cfg(any(test, feature = "test-utils"))]
pub fn reset() {
    STOP.store(false, Ordering::Relaxed);
}
