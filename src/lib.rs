//! Core library for `framefold`.
//!
//! Walks a source tree of photos and videos, works out when each one was taken
//! and copies (or moves) it into a date-based folder layout under a target root.
//! Files already present at their destination with identical content are skipped,
//! so repeated runs over the same source are cheap and safe.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod media;
pub mod organizer;
pub mod output;
pub mod shutdown;

pub use config::{Config, LogLevel, OnConflict};
pub use errors::{FramefoldError, Result};
pub use media::date::{CaptureTimeReader, DateError, ExifTool};
pub use organizer::{Job, Organizer, RunStats};

/// Long version string: the package version plus the build commit embedded via
/// `FRAMEFOLD_COMMIT` at compile time, if any.
pub fn version_info() -> String {
    let commit = option_env!("FRAMEFOLD_COMMIT").unwrap_or("unknown");
    format!("{} (commit {})", env!("CARGO_PKG_VERSION"), commit)
}
