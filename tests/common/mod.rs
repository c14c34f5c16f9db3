#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use std::cell::Cell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

use framefold::{CaptureTimeReader, Config, DateError, Job, Organizer};

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

/// Deterministic stand-in for exiftool, keyed by file name.
#[derive(Clone, Default)]
pub struct FakeReader {
    pub dates: HashMap<String, NaiveDateTime>,
    pub probe_fails: bool,
    pub probes: Rc<Cell<usize>>,
    pub lookups: Rc<Cell<usize>>,
}

impl FakeReader {
    pub fn with(mut self, name: &str, taken: NaiveDateTime) -> Self {
        self.dates.insert(name.to_string(), taken);
        self
    }
}

impl CaptureTimeReader for FakeReader {
    fn name(&self) -> &str {
        "fake-exif"
    }

    fn probe(&self) -> Result<(), DateError> {
        self.probes.set(self.probes.get() + 1);
        if self.probe_fails {
            return Err(DateError::Missing);
        }
        Ok(())
    }

    fn capture_time(&self, path: &Path) -> Result<NaiveDateTime, DateError> {
        self.lookups.set(self.lookups.get() + 1);
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        self.dates.get(&name).copied().ok_or(DateError::Missing)
    }
}

/// Temp workspace with `in/`, `out/` and a private lock file.
pub struct Sandbox {
    pub root: TempDir,
    pub source: PathBuf,
    pub target: PathBuf,
    pub lock: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        // Destinations are reported canonicalised.
        let base = fs::canonicalize(root.path()).unwrap();
        let source = base.join("in");
        let target = base.join("out");
        fs::create_dir_all(&source).unwrap();
        let lock = base.join("framefold.lock");
        Self {
            root,
            source,
            target,
            lock,
        }
    }

    /// Write `contents` to `in/<rel>`, creating parents.
    pub fn file(&self, rel: &str, contents: &[u8]) -> PathBuf {
        let p = self.source.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(&p, contents).unwrap();
        p
    }

    pub fn job(&self) -> Job {
        Job::new(&self.source, &self.target, &self.lock)
    }

    pub fn organizer(&self, job: Job, config: Config, reader: FakeReader) -> Organizer {
        Organizer::new(job, config, Box::new(reader)).unwrap()
    }
}

/// All regular files under `dir`, relative and sorted.
pub fn tree(dir: &Path) -> Vec<String> {
    let mut out: Vec<String> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    out.sort();
    out
}
