//! Run statistics and the end-of-run summary.

use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

use crate::media::date::TimestampOrigin;

pub const IMAGES: &str = "images";
pub const VIDEOS: &str = "videos";

/// What happened to one recognised file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Copied to the destination; the source stays.
    Copied,
    /// Copied, verified, and the source deleted.
    Moved,
    /// Destination already held identical content. `source_removed` is set in move mode.
    Identical { source_removed: bool },
    /// A different file sits at the destination and the skip policy left both alone.
    Conflict,
}

/// Counters accumulated by the organizer over one run.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub processed: u64,
    pub images: u64,
    pub videos: u64,
    pub metadata_dates: u64,
    pub total_bytes: u64,
    pub copied: u64,
    pub skipped_identical: u64,
    pub skipped_conflict: u64,
    pub sources_removed: u64,
    pub removed_dirs: u64,
    pub started: Instant,
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            processed: 0,
            images: 0,
            videos: 0,
            metadata_dates: 0,
            total_bytes: 0,
            copied: 0,
            skipped_identical: 0,
            skipped_conflict: 0,
            sources_removed: 0,
            removed_dirs: 0,
            started: Instant::now(),
        }
    }

    pub(crate) fn record(&mut self, media_type: &str, size: u64, origin: TimestampOrigin, outcome: &Outcome) {
        self.processed += 1;
        match media_type {
            IMAGES => self.images += 1,
            VIDEOS => self.videos += 1,
            _ => {}
        }
        if origin == TimestampOrigin::Metadata {
            self.metadata_dates += 1;
        }
        self.total_bytes += size;

        match outcome {
            Outcome::Copied => self.copied += 1,
            Outcome::Moved => {
                self.copied += 1;
                self.sources_removed += 1;
            }
            Outcome::Identical { source_removed } => {
                self.skipped_identical += 1;
                if *source_removed {
                    self.sources_removed += 1;
                }
            }
            Outcome::Conflict => self.skipped_conflict += 1,
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            images: self.images,
            videos: self.videos,
            files_with_exif: self.metadata_dates,
            total_size_bytes: self.total_bytes,
            total_files: self.processed,
            copied: self.copied,
            skipped_identical: self.skipped_identical,
            skipped_conflict: self.skipped_conflict,
            sources_removed: self.sources_removed,
            removed_dirs: self.removed_dirs,
            duration: format_duration(self.started.elapsed()),
            total_size: format_size(self.total_bytes),
        }
    }
}

/// Serializable end-of-run report, printed as pretty JSON.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub images: u64,
    pub videos: u64,
    pub files_with_exif: u64,
    pub total_size_bytes: u64,
    pub total_files: u64,
    pub copied: u64,
    pub skipped_identical: u64,
    pub skipped_conflict: u64,
    pub sources_removed: u64,
    pub removed_dirs: u64,
    pub duration: String,
    pub total_size: String,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// "1.5 MB"-style size in binary units; plain bytes below 1 KiB.
pub fn format_size(size: u64) -> String {
    const UNIT: u64 = 1024;
    if size < UNIT {
        return format!("{size} B");
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = size / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    let prefix = ['K', 'M', 'G', 'T', 'P', 'E'][exp];
    format!("{:.1} {}B", size as f64 / div as f64, prefix)
}

pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{} minutes {} seconds", secs / 60, secs % 60)
}
