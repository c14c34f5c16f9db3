//! Core configuration types.
//! - Config holds run settings with the built-in defaults.
//! - LogLevel represents verbosity with simple parsing helpers.
//! - OnConflict decides what happens when a different file already sits at a destination.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::level_filters::LevelFilter;

use super::FOLDER_TEMPLATE_DEFAULT;

/// Verbosity levels accepted in config files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse common names into a LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" | "quiet" | "none" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" | "normal" => Some(LogLevel::Info),
            "debug" | "verbose" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// What to do when the destination path holds a file with different content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnConflict {
    /// Replace the existing destination file.
    #[default]
    Overwrite,
    /// Try "name (2).ext", "name (3).ext", ... until a free or identical slot is found.
    Rename,
    /// Leave the destination alone and keep the source where it is.
    Skip,
}

impl FromStr for OnConflict {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(OnConflict::Overwrite),
            "rename" => Ok(OnConflict::Rename),
            "skip" => Ok(OnConflict::Skip),
            _ => Err(format!(
                "invalid on_conflict value: '{s}' (expected overwrite, rename or skip)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Info,
        }
    }
}

/// Run configuration. Loaded once before a run and never mutated while it executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Relative folder layout, e.g. "{{Year}}/{{Month}}"
    pub folder_template: String,
    /// Category label -> extensions (lowercase, with leading dot)
    pub media_types: BTreeMap<String, Vec<String>>,
    /// Keep the source file name instead of synthesizing one from the date
    pub use_original_filename: bool,
    pub logging: LoggingConfig,
    pub on_conflict: OnConflict,
}

impl Default for Config {
    fn default() -> Self {
        let mut media_types = BTreeMap::new();
        media_types.insert(
            "images".to_string(),
            [".jpg", ".jpeg", ".png", ".gif", ".heic"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        media_types.insert(
            "videos".to_string(),
            [".mp4", ".mov", ".avi"].iter().map(|s| s.to_string()).collect(),
        );
        Self {
            folder_template: FOLDER_TEMPLATE_DEFAULT.to_string(),
            media_types,
            use_original_filename: true,
            logging: LoggingConfig::default(),
            on_conflict: OnConflict::Overwrite,
        }
    }
}

/// Normalize a configured extension: trim, lowercase, ensure a single leading dot.
pub(crate) fn normalize_extension(ext: &str) -> String {
    let trimmed = ext.trim().trim_start_matches('.').to_ascii_lowercase();
    format!(".{trimmed}")
}
