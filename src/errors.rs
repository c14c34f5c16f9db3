//! Typed error definitions for framefold.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::media::template::TemplateError;

pub type Result<T> = std::result::Result<T, FramefoldError>;

#[derive(Debug, Error)]
pub enum FramefoldError {
    #[error("Another instance of framefold is already running (lock file {})", lock.display())]
    AlreadyRunning { lock: PathBuf },

    #[error("Lock file {}: {source}", path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not determine the home directory for the lock file")]
    NoHomeDir,

    #[error("{tool} is not available: {reason}. Please install {tool} to extract dates from media files")]
    ToolUnavailable { tool: String, reason: String },

    #[error("Error reading config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error parsing config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Folder template: {0}")]
    Template(#[from] TemplateError),

    #[error("{name} {}: {reason}", path.display())]
    InvalidRoot {
        name: &'static str,
        path: PathBuf,
        reason: String,
    },

    #[error("Failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl FramefoldError {
    /// Stable numeric code, logged as a structured field.
    pub fn code(&self) -> u16 {
        match self {
            FramefoldError::AlreadyRunning { .. } => 10,
            FramefoldError::Lock { .. } => 11,
            FramefoldError::NoHomeDir => 12,
            FramefoldError::ToolUnavailable { .. } => 20,
            FramefoldError::ConfigRead { .. } => 30,
            FramefoldError::ConfigParse { .. } => 31,
            FramefoldError::InvalidConfig(_) => 32,
            FramefoldError::Template(_) => 33,
            FramefoldError::InvalidRoot { .. } => 40,
            FramefoldError::Io { .. } => 50,
            FramefoldError::Interrupted => 130,
        }
    }

    /// Short machine-friendly kind label.
    pub fn kind(&self) -> &'static str {
        match self {
            FramefoldError::AlreadyRunning { .. } => "already_running",
            FramefoldError::Lock { .. } => "lock",
            FramefoldError::NoHomeDir => "no_home_dir",
            FramefoldError::ToolUnavailable { .. } => "tool_unavailable",
            FramefoldError::ConfigRead { .. } => "config_read",
            FramefoldError::ConfigParse { .. } => "config_parse",
            FramefoldError::InvalidConfig(_) => "invalid_config",
            FramefoldError::Template(_) => "template",
            FramefoldError::InvalidRoot { .. } => "invalid_root",
            FramefoldError::Io { .. } => "io",
            FramefoldError::Interrupted => "interrupted",
        }
    }
}

/// Adapter for `.map_err(...)` on io results: attaches the operation and path.
pub(crate) fn io_err<'a>(
    op: &'static str,
    path: &'a std::path::Path,
) -> impl FnOnce(io::Error) -> FramefoldError + 'a {
    move |source| FramefoldError::Io {
        op,
        path: path.to_path_buf(),
        source,
    }
}
