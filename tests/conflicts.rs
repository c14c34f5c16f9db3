mod common;

use common::{FakeReader, Sandbox, at, tree};
use framefold::{Config, OnConflict};
use std::fs;

fn reader() -> FakeReader {
    FakeReader::default().with("shot.jpg", at(2022, 8, 9, 7, 0, 0))
}

fn with_existing(sb: &Sandbox) {
    sb.file("shot.jpg", b"new content");
    fs::create_dir_all(sb.target.join("2022/08")).unwrap();
    fs::write(sb.target.join("2022/08/shot.jpg"), b"older, different").unwrap();
}

fn config(policy: OnConflict) -> Config {
    Config {
        on_conflict: policy,
        ..Config::default()
    }
}

#[test]
fn overwrite_replaces_different_file() {
    let sb = Sandbox::new();
    with_existing(&sb);

    let stats = sb
        .organizer(sb.job(), config(OnConflict::Overwrite), reader())
        .run()
        .unwrap();

    assert_eq!(stats.copied, 1);
    assert_eq!(fs::read(sb.target.join("2022/08/shot.jpg")).unwrap(), b"new content");
}

#[test]
fn skip_leaves_both_files() {
    let sb = Sandbox::new();
    with_existing(&sb);

    let mut job = sb.job();
    job.delete_source = true;
    let mut org = sb.organizer(job, config(OnConflict::Skip), reader());
    let stats = org.run().unwrap();

    assert_eq!(stats.copied, 0);
    assert_eq!(stats.skipped_conflict, 1);
    assert_eq!(stats.processed, 1);
    assert!(org.ledger().is_empty());
    assert_eq!(fs::read(sb.target.join("2022/08/shot.jpg")).unwrap(), b"older, different");
    assert!(sb.source.join("shot.jpg").exists(), "source kept on conflict");
}

#[test]
fn rename_picks_numbered_name_and_stays_idempotent() {
    let sb = Sandbox::new();
    with_existing(&sb);

    sb.organizer(sb.job(), config(OnConflict::Rename), reader())
        .run()
        .unwrap();
    assert_eq!(tree(&sb.target), vec!["2022/08/shot (2).jpg", "2022/08/shot.jpg"]);
    assert_eq!(fs::read(sb.target.join("2022/08/shot (2).jpg")).unwrap(), b"new content");

    let stats = sb
        .organizer(sb.job(), config(OnConflict::Rename), reader())
        .run()
        .unwrap();
    assert_eq!(stats.skipped_identical, 1);
    assert_eq!(stats.copied, 0);
    assert_eq!(tree(&sb.target).len(), 2);
}
