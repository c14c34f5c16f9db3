//! Tracing setup for the binary.
//!
//! - Level comes from `logging.level` (or `--log-level`); `logging.enabled = false` keeps errors only.
//! - Events go to stderr, compact by default or one JSON object per line with `--json`.

use anyhow::Result;
use chrono::Local;
use framefold::config::LoggingConfig;
use std::fmt as stdfmt;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::util::SubscriberInitExt;

/// Local wall-clock timestamps (DD/MM/YY HH:MM:SS).
struct LocalHumanTime;

impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

fn filter_for(logging: &LoggingConfig) -> EnvFilter {
    let level = if logging.enabled {
        logging.level.to_level_filter()
    } else {
        LevelFilter::ERROR
    };
    EnvFilter::default().add_directive(level.into())
}

pub fn init_tracing(logging: &LoggingConfig, json: bool) -> Result<()> {
    let filter = filter_for(logging);
    let base = tsfmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(LocalHumanTime)
        .with_level(true);

    if json {
        registry()
            .with(filter)
            .with(base.with_target(true).json())
            .try_init()?;
    } else {
        registry()
            .with(filter)
            .with(base.with_target(false).compact())
            .try_init()?;
    }
    Ok(())
}
