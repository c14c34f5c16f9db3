//! Application orchestrator.
//! Loads config, initializes logging, installs the Ctrl-C handler, runs the
//! organizer, and prints the summary. Fatal errors are returned to `main`,
//! which reports them once.

use anyhow::{anyhow, Result};
use tracing::{debug, error, info};

use framefold::cli::Args;
use framefold::config::{default_lock_path, load_config};
use framefold::output as out;
use framefold::{shutdown, version_info, ExifTool, FramefoldError, Job, Organizer};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut cfg);

    init_tracing(&cfg.logging, args.json)
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))?;

    ctrlc::set_handler(|| {
        if shutdown::request() {
            out::print_error("Interrupted twice; exiting immediately");
            std::process::exit(130);
        }
        out::print_warn("Received interrupt; stopping after the current file (press Ctrl-C again to force)");
    })?;

    debug!(version = %version_info(), ?args, "Starting framefold");

    let mut job = Job::new(&args.source, &args.target, default_lock_path()?);
    job.delete_source = args.delete_source;
    job.output = args.output.clone();

    let mut organizer = Organizer::new(job, cfg, Box::new(ExifTool::default()))?;
    match organizer.run() {
        Ok(stats) => {
            info!(
                files = stats.processed,
                copied = stats.copied,
                skipped = stats.skipped_identical,
                "Run completed"
            );
            out::print_user(&stats.summary().to_string());
            Ok(())
        }
        Err(e) => {
            let code = e.code();
            let kind = e.kind();
            match &e {
                FramefoldError::AlreadyRunning { lock } => {
                    error!(code, kind, lock = %lock.display(), "Another instance is running")
                }
                FramefoldError::ToolUnavailable { tool, reason } => {
                    error!(code, kind, %tool, %reason, "Metadata tool unavailable")
                }
                FramefoldError::Io { op, path, source } => {
                    error!(code, kind, op, path = %path.display(), error = %source, "Run aborted")
                }
                FramefoldError::Interrupted => error!(code, kind, "Run aborted by user"),
                _ => error!(code, kind, error = %e, "Run failed"),
            }
            Err(e.into())
        }
    }
}
