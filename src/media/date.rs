//! Capture-time extraction.
//!
//! The metadata source is a capability (`CaptureTimeReader`) so the organizer can be
//! driven by a fake in tests. The production reader shells out to `exiftool`, asking
//! for DateTimeOriginal and then DateTime; exiftool prints whichever tags it finds,
//! one per line, in that order.

use chrono::{DateTime, Local, NaiveDateTime};
use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::trace;

/// Format of EXIF date values ("2025:04:24 15:30:00").
pub const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
const EXIF_DATE_LEN: usize = 19;

#[derive(Debug, Error)]
pub enum DateError {
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    Failed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("no capture date found in metadata")]
    Missing,

    #[error("unparsable metadata date '{value}': {source}")]
    Parse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Where a file's timestamp came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampOrigin {
    /// Embedded capture/modify date from the file's metadata.
    Metadata,
    /// Filesystem modification time (fallback).
    Modified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimestamp {
    pub taken: NaiveDateTime,
    pub origin: TimestampOrigin,
}

/// Source of embedded capture times.
pub trait CaptureTimeReader {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Check once per run that the reader can work at all.
    fn probe(&self) -> Result<(), DateError>;

    /// Capture time of the file at `path`.
    fn capture_time(&self, path: &Path) -> Result<NaiveDateTime, DateError>;
}

/// `exiftool` subprocess reader.
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: PathBuf,
}

impl Default for ExifTool {
    fn default() -> Self {
        Self::new("exiftool")
    }
}

impl ExifTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn tool(&self) -> String {
        self.program.display().to_string()
    }
}

impl CaptureTimeReader for ExifTool {
    fn name(&self) -> &str {
        self.program.to_str().unwrap_or("exiftool")
    }

    fn probe(&self) -> Result<(), DateError> {
        let status = Command::new(&self.program)
            .arg("-ver")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| DateError::Spawn {
                tool: self.tool(),
                source,
            })?;
        if !status.success() {
            return Err(DateError::Failed {
                tool: self.tool(),
                status: status.to_string(),
                stderr: String::new(),
            });
        }
        Ok(())
    }

    fn capture_time(&self, path: &Path) -> Result<NaiveDateTime, DateError> {
        let output = Command::new(&self.program)
            .args(["-DateTimeOriginal", "-DateTime", "-s", "-s", "-s"])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| DateError::Spawn {
                tool: self.tool(),
                source,
            })?;
        if !output.status.success() {
            return Err(DateError::Failed {
                tool: self.tool(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        trace!(path = %path.display(), output = %stdout.trim(), "exiftool output");
        parse_tool_output(&stdout)
    }
}

/// Parse the first non-empty line of exiftool's terse output.
pub fn parse_tool_output(stdout: &str) -> Result<NaiveDateTime, DateError> {
    let line = stdout
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or(DateError::Missing)?;
    parse_exif_datetime(line)
}

/// Parse `YYYY:MM:DD HH:MM:SS`. Trailing sub-seconds or zone offsets are ignored.
pub fn parse_exif_datetime(value: &str) -> Result<NaiveDateTime, DateError> {
    let value = value.trim();
    let head = value.get(..EXIF_DATE_LEN).unwrap_or(value);
    NaiveDateTime::parse_from_str(head, EXIF_DATE_FORMAT).map_err(|source| DateError::Parse {
        value: value.to_string(),
        source,
    })
}

/// Filesystem modification time as local wall-clock time.
pub fn modified_time(meta: &Metadata) -> io::Result<NaiveDateTime> {
    let modified = meta.modified()?;
    Ok(DateTime::<Local>::from(modified).naive_local())
}
