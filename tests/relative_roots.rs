mod common;

use common::{FakeReader, at};
use framefold::{Config, Job, Organizer};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::Path;

/// Restores the working directory when dropped.
struct CwdGuard(std::path::PathBuf);

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.0);
    }
}

#[test]
#[serial]
fn relative_target_yields_absolute_ledger() {
    let td = tempfile::tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    fs::create_dir_all(base.join("in/trip")).unwrap();
    fs::write(base.join("in/a.jpg"), b"a").unwrap();
    fs::write(base.join("in/trip/b.mp4"), b"b").unwrap();

    let _restore = CwdGuard(env::current_dir().unwrap());
    env::set_current_dir(&base).unwrap();

    let mut job = Job::new("in", "out", base.join("framefold.lock"));
    job.output = Some("moved.txt".into());
    let reader = FakeReader::default()
        .with("a.jpg", at(2024, 1, 5, 0, 0, 0))
        .with("b.mp4", at(2024, 2, 6, 0, 0, 0));
    let mut org = Organizer::new(job, Config::default(), Box::new(reader)).unwrap();
    org.run().unwrap();

    let text = fs::read_to_string(base.join("moved.txt")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert!(Path::new(line).is_absolute(), "ledger entry {line} is relative");
    }
    assert_eq!(lines[0], base.join("out/2024/01/a.jpg").to_string_lossy());
    assert_eq!(lines[1], base.join("out/2024/02/b.mp4").to_string_lossy());
}
