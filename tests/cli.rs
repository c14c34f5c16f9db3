use assert_cmd::cargo;
use clap::Parser;
use framefold::cli::{self, Args};
use framefold::{Config, LogLevel};
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn parses_all_flags() {
    let args = Args::parse_from([
        "framefold",
        "--source",
        "/media/card",
        "--target",
        "/photos",
        "--config",
        "cfg.json",
        "--delete-source",
        "--output",
        "moved.txt",
        "--log-level",
        "debug",
        "--json",
    ]);
    assert_eq!(args.source, PathBuf::from("/media/card"));
    assert_eq!(args.target, PathBuf::from("/photos"));
    assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
    assert!(args.delete_source);
    assert_eq!(args.output, Some(PathBuf::from("moved.txt")));
    assert!(args.json);

    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.logging.level, LogLevel::Debug);
}

#[test]
fn defaults_leave_config_untouched() {
    let args = Args::parse_from(["framefold", "--source", "a", "--target", "b"]);
    assert!(!args.delete_source);
    assert!(args.output.is_none());

    let mut cfg = Config::default();
    cfg.logging.level = LogLevel::Warn;
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.logging.level, LogLevel::Warn);
}

#[test]
fn long_version_names_the_commit() {
    let text = cli::command().render_long_version();
    assert!(text.contains(env!("CARGO_PKG_VERSION")));
    assert!(text.contains("(commit "), "{text}");
}

#[test]
fn missing_target_is_rejected() {
    assert!(Args::try_parse_from(["framefold", "--source", "a"]).is_err());
}

#[test]
fn binary_prints_version() {
    let out = Command::new(cargo::cargo_bin!("framefold"))
        .arg("--version")
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "unexpected version output: {stdout}");
    assert!(stdout.contains("(commit "), "build commit missing: {stdout}");
}

#[test]
fn binary_fails_without_required_flags() {
    let out = Command::new(cargo::cargo_bin!("framefold"))
        .arg("--source")
        .arg("somewhere")
        .output()
        .expect("spawn binary");
    assert!(!out.status.success(), "expected clap to reject missing --target");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("--target"), "stderr did not name the missing flag: {stderr}");
}

#[test]
fn binary_prints_json_summary() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let source = base.join("in");
    fs::create_dir_all(&source).unwrap();
    // No media, so the metadata tool is never needed.
    fs::write(source.join("notes.txt"), b"text").unwrap();

    let out = Command::new(cargo::cargo_bin!("framefold"))
        .env("HOME", &base)
        .arg("--source")
        .arg(&source)
        .arg("--target")
        .arg(base.join("out"))
        .output()
        .expect("spawn binary");

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(summary["total_files"], 0);
    assert_eq!(summary["copied"], 0);
    assert!(base.join("out").is_dir());
    assert!(!base.join(".framefold.lock").exists());
}

#[test]
fn binary_rejects_bad_config() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let source = base.join("in");
    fs::create_dir_all(&source).unwrap();
    let cfg = base.join("framefold.json");
    fs::write(&cfg, r#"{"folder_template": "{{Year}}", "bogus": 1}"#).unwrap();

    let out = Command::new(cargo::cargo_bin!("framefold"))
        .env("HOME", &base)
        .arg("--source")
        .arg(&source)
        .arg("--target")
        .arg(base.join("out"))
        .arg("--config")
        .arg(&cfg)
        .output()
        .expect("spawn binary");

    assert!(!out.status.success());
    assert!(!base.join("out").exists(), "target untouched when config is invalid");

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(
        stderr.matches("Error parsing config file").count(),
        1,
        "error should be reported exactly once: {stderr}"
    );
    assert!(!stderr.contains("Error: "), "stderr: {stderr}");
}
