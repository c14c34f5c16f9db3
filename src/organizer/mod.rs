//! The relocation pipeline.
//!
//! One `Organizer::run` takes the single-instance lock, walks the source tree in a
//! stable order and, for every recognised media file, resolves a timestamp, renders
//! the destination folder, and then skips, copies, or moves the file. When moving,
//! source directories emptied by the run are swept afterwards.
//!
//! Any filesystem failure aborts the run; files already relocated stay where they are.

pub mod ledger;
pub mod stats;

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

use crate::config::{validate_roots, Config, OnConflict};
use crate::errors::{io_err, FramefoldError, Result};
use crate::fs_ops::{copy_streaming, duplicate, files_identical, remove_empty_dirs, DurabilityMode, InstanceLock};
use crate::media::date::modified_time;
use crate::media::{
    CaptureTimeReader, Classification, FolderTemplate, MediaCatalog, ResolvedTimestamp,
    TemplateVars, TimestampOrigin,
};
use crate::shutdown;

pub use ledger::write_ledger;
pub use stats::{Outcome, RunStats, RunSummary};

/// Where to read from, where to write to, and how.
#[derive(Debug, Clone)]
pub struct Job {
    pub source: PathBuf,
    pub target: PathBuf,
    /// Delete each source file once it is safely at its destination.
    pub delete_source: bool,
    /// Optional file receiving the sorted list of relocated destinations.
    pub output: Option<PathBuf>,
    /// Single-instance marker file.
    pub lock_path: PathBuf,
}

impl Job {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>, lock_path: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            delete_source: false,
            output: None,
            lock_path: lock_path.into(),
        }
    }
}

pub struct Organizer {
    job: Job,
    config: Config,
    template: FolderTemplate,
    catalog: MediaCatalog,
    reader: Box<dyn CaptureTimeReader>,
    reader_checked: bool,
    target_root: PathBuf,
    stats: RunStats,
    touched: BTreeSet<PathBuf>,
    ledger: Vec<PathBuf>,
}

impl Organizer {
    /// Build an organizer. The folder template is parsed here, before any file is touched.
    pub fn new(job: Job, config: Config, reader: Box<dyn CaptureTimeReader>) -> Result<Self> {
        let template = FolderTemplate::parse(&config.folder_template)?;
        let catalog = MediaCatalog::new(&config.media_types);
        Ok(Self {
            job,
            config,
            template,
            catalog,
            reader,
            reader_checked: false,
            target_root: PathBuf::new(),
            stats: RunStats::new(),
            touched: BTreeSet::new(),
            ledger: Vec::new(),
        })
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Destinations copied or moved by the last run, in processing order.
    pub fn ledger(&self) -> &[PathBuf] {
        &self.ledger
    }

    /// Execute one run. The lock is held for the whole run and released on every exit path.
    pub fn run(&mut self) -> Result<RunStats> {
        let lock = InstanceLock::acquire(&self.job.lock_path)?.ok_or_else(|| {
            FramefoldError::AlreadyRunning {
                lock: self.job.lock_path.clone(),
            }
        })?;

        self.stats = RunStats::new();
        self.touched.clear();
        self.ledger.clear();
        self.reader_checked = false;

        info!(
            source = %self.job.source.display(),
            target = %self.job.target.display(),
            delete_source = self.job.delete_source,
            template = %self.template,
            "Starting run"
        );

        // On error the guard is dropped here, removing the marker.
        self.process_tree()?;
        self.finish()?;

        lock.release()?;
        Ok(self.stats.clone())
    }

    fn process_tree(&mut self) -> Result<()> {
        // Destinations (and so the ledger) are always absolute.
        self.target_root = validate_roots(&self.job.source, &self.job.target)?;

        let source = self.job.source.clone();
        for entry in WalkDir::new(&source).sort_by_file_name() {
            if shutdown::is_requested() {
                return Err(FramefoldError::Interrupted);
            }
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| source.clone());
                FramefoldError::Io {
                    op: "walk",
                    path,
                    source: io::Error::from(e),
                }
            })?;
            let file_type = entry.file_type();
            let meta = if file_type.is_file() {
                entry
                    .metadata()
                    .map_err(|e| io_err("stat", entry.path())(io::Error::from(e)))?
            } else if file_type.is_symlink() {
                // Links to files are organised like files; linked directories are not descended.
                match fs::metadata(entry.path()) {
                    Ok(m) if m.is_file() => m,
                    Ok(_) => continue,
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        warn!(path = %entry.path().display(), "Skipping dangling symlink");
                        continue;
                    }
                    Err(e) => return Err(io_err("stat", entry.path())(e)),
                }
            } else {
                continue;
            };
            self.process_file(entry.path(), &meta)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.job.delete_source {
            self.stats.removed_dirs = remove_empty_dirs(&self.touched)? as u64;
        }
        self.ledger.sort();
        if let Some(out) = self.job.output.as_deref() {
            write_ledger(out, &self.ledger)?;
        }
        Ok(())
    }

    fn process_file(&mut self, path: &Path, meta: &Metadata) -> Result<()> {
        let Some(class) = self.catalog.classify(path) else {
            trace!(path = %path.display(), "not a recognised media file");
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            self.touched.insert(parent.to_path_buf());
        }

        let size = meta.len();
        let resolved = self.resolve_timestamp(path, meta)?;

        let rel = self.template.render(&TemplateVars {
            taken: resolved.taken,
            media_type: &class.media_type,
            extension: &class.extension,
        })?;
        let dest_dir = self.target_root.join(rel);
        fs::create_dir_all(&dest_dir).map_err(io_err("create directory", &dest_dir))?;

        let name = self.destination_name(path, &class, &resolved.taken);
        let outcome = self.place(path, &dest_dir, &name)?;

        self.stats.record(&class.media_type, size, resolved.origin, &outcome);
        Ok(())
    }

    fn resolve_timestamp(&mut self, path: &Path, meta: &Metadata) -> Result<ResolvedTimestamp> {
        if !self.reader_checked {
            self.reader_checked = true;
            self.reader
                .probe()
                .map_err(|e| FramefoldError::ToolUnavailable {
                    tool: self.reader.name().to_string(),
                    reason: e.to_string(),
                })?;
            debug!(tool = self.reader.name(), "metadata reader available");
        }

        match self.reader.capture_time(path) {
            Ok(taken) => Ok(ResolvedTimestamp {
                taken,
                origin: TimestampOrigin::Metadata,
            }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read capture date, using file modification time");
                let taken = modified_time(meta).map_err(io_err("read modification time of", path))?;
                Ok(ResolvedTimestamp {
                    taken,
                    origin: TimestampOrigin::Modified,
                })
            }
        }
    }

    fn destination_name(&self, path: &Path, class: &Classification, taken: &NaiveDateTime) -> OsString {
        match path.file_name() {
            Some(name) if self.config.use_original_filename => name.to_os_string(),
            _ => synthesized_name(taken, &class.media_type, &class.extension).into(),
        }
    }

    /// Decide between skip, copy, and move for one file and carry it out.
    fn place(&mut self, src: &Path, dest_dir: &Path, name: &OsString) -> Result<Outcome> {
        let candidates: Box<dyn Iterator<Item = PathBuf> + '_> = match self.config.on_conflict {
            OnConflict::Rename => Box::new(duplicate::candidates(dest_dir, name)),
            OnConflict::Overwrite | OnConflict::Skip => Box::new(std::iter::once(dest_dir.join(name))),
        };

        for dest in candidates {
            match files_identical(src, &dest) {
                Ok(true) => return self.skip_identical(src, &dest),
                Ok(false) => match self.config.on_conflict {
                    OnConflict::Overwrite => {
                        debug!(dest = %dest.display(), "replacing different file at destination");
                        return self.transfer(src, dest);
                    }
                    OnConflict::Skip => {
                        warn!(src = %src.display(), dest = %dest.display(), "Different file already at destination; leaving both in place");
                        return Ok(Outcome::Conflict);
                    }
                    OnConflict::Rename => {
                        trace!(dest = %dest.display(), "name taken by different content");
                    }
                },
                Err(e) if e.kind() == io::ErrorKind::NotFound => return self.transfer(src, dest),
                Err(e) => return Err(io_err("compare against", &dest)(e)),
            }
        }

        let requested = dest_dir.join(name);
        Err(FramefoldError::Io {
            op: "find a free name for",
            path: requested,
            source: io::Error::new(io::ErrorKind::AlreadyExists, "all numbered variants are taken"),
        })
    }

    fn skip_identical(&mut self, src: &Path, dest: &Path) -> Result<Outcome> {
        info!(src = %src.display(), dest = %dest.display(), "Skipping identical file");
        if self.job.delete_source {
            fs::remove_file(src).map_err(io_err("delete source file", src))?;
        }
        Ok(Outcome::Identical {
            source_removed: self.job.delete_source,
        })
    }

    fn transfer(&mut self, src: &Path, dest: PathBuf) -> Result<Outcome> {
        let mode = if self.job.delete_source {
            DurabilityMode::Full
        } else {
            DurabilityMode::Data
        };
        let bytes = copy_streaming(src, &dest, mode).map_err(io_err("copy", src))?;

        let outcome = if self.job.delete_source {
            // Never delete a source whose copy can't be confirmed.
            let verified = files_identical(src, &dest).map_err(io_err("verify copy", &dest))?;
            if !verified {
                return Err(FramefoldError::Io {
                    op: "verify copy",
                    path: dest,
                    source: io::Error::other("copied content does not match the source"),
                });
            }
            fs::remove_file(src).map_err(io_err("delete source file", src))?;
            info!(src = %src.display(), dest = %dest.display(), bytes, "Moved");
            Outcome::Moved
        } else {
            info!(src = %src.display(), dest = %dest.display(), bytes, "Copied");
            Outcome::Copied
        };

        self.ledger.push(dest);
        Ok(outcome)
    }
}

/// `<YYYYMMDD>-<HHMMSS>-<category>.<ext>`, e.g. `20250424-153000-videos.mp4`.
pub fn synthesized_name(taken: &NaiveDateTime, media_type: &str, extension: &str) -> String {
    format!("{}-{}.{}", taken.format("%Y%m%d-%H%M%S"), media_type, extension)
}
