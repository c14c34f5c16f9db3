//! CLI definition and parsing.
//!
//! Notes:
//! - `--log-level` overrides `logging.level` from the config file.
//! - `--version` prints the version with the build commit and exits without touching any directory.

use clap::{Command, CommandFactory, FromArgMatches, Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Organize photos and videos into date-based folders.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "framefold",
    author,
    version,
    about = "Organize photos and videos into date-based folders"
)]
pub struct Args {
    /// Directory containing the photos and videos to organize.
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub source: PathBuf,

    /// Directory that receives the organized folder tree (created if missing).
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub target: PathBuf,

    /// JSON configuration file. Built-in defaults are used when omitted.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Delete source files after they are safely at their destination.
    #[arg(long, help = "Delete source files after a successful copy (default: keep them)")]
    pub delete_source: bool,

    /// Write the sorted list of copied/moved destination paths to this file.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Set log level. One of: error, warn, info, debug, trace.
    #[arg(long, help = "Set log level: error, warn, info, debug, trace")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON.
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level from `--log-level`, if valid.
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.logging.level = level;
        }
    }
}

/// The clap command, with the commit-bearing long version attached.
pub fn command() -> Command {
    Args::command().long_version(crate::version_info())
}

pub fn parse() -> Args {
    let matches = command().get_matches();
    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}
