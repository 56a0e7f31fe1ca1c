//! Integration tests for `rsaid batch`.
#![allow(clippy::expect_used)]

use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Path to the compiled `rsaid` binary.
fn rsaid_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("rsaid");
    path
}

/// Path to a fixture file under `tests/fixtures`.
fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(name);
    path
}

fn batch(args: &[&str]) -> Output {
    Command::new(rsaid_bin())
        .args(["--now", "2018-03-30", "batch"])
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run rsaid batch")
}

#[test]
fn batch_all_valid_exits_0() {
    let file = fixture("ids-valid.txt");
    let out = batch(&[file.to_str().expect("path")]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 3, "blank line skipped: {stdout}");
    assert!(stdout.lines().all(|l| l.ends_with("\tvalid")), "{stdout}");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("3 checked, 3 valid, 0 invalid"), "{stderr}");
}

#[test]
fn batch_mixed_exits_1_with_per_line_results() {
    let file = fixture("ids-mixed.txt");
    let out = batch(&[file.to_str().expect("path")]);
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "6712272244082\tvalid",
            "6142273344082\tinvalid\tbirth-date,checksum",
            "9005025586082\tvalid",
            "61422733\tinvalid\tstructure",
        ]
    );
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("4 checked, 2 valid, 2 invalid"), "{stderr}");
    assert!(stderr.contains("2 of 4"), "{stderr}");
}

#[test]
fn batch_json_lines() {
    let file = fixture("ids-mixed.txt");
    let out = batch(&["-f", "json", file.to_str().expect("path")]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    let values: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid NDJSON"))
        .collect();
    assert_eq!(values.len(), 4);
    assert_eq!(values[2]["id"], "9005025586082");
    assert_eq!(values[2]["valid"], true);
    assert_eq!(values[3]["failed"][0], "structure");
}

#[test]
fn batch_reads_stdin() {
    let mut child = Command::new(rsaid_bin())
        .args(["--now", "2018-03-30", "batch", "-"])
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn rsaid");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"6712272244082\n0409130295085\n")
        .expect("write stdin");
    let out = child.wait_with_output().expect("wait");
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout).lines().count(), 2);
}

#[test]
fn batch_missing_file_exits_2() {
    let out = batch(&["/no/such/ids.txt"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
}

#[test]
fn batch_respects_max_file_size() {
    let file = fixture("ids-valid.txt");
    let out = batch(&["--max-file-size", "10", file.to_str().expect("path")]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("too large"), "{stderr}");
}

#[test]
fn batch_invalid_utf8_exits_2() {
    let mut tmp = tempfile::NamedTempFile::new().expect("temp file");
    tmp.write_all(b"6712272244082\n\xff\n").expect("write");
    let out = batch(&[tmp.path().to_str().expect("path")]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("offset 14"), "{stderr}");
}

#[test]
fn version_prints_semver() {
    let out = Command::new(rsaid_bin())
        .arg("version")
        .output()
        .expect("run rsaid version");
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.trim().split('.').count(), 3, "{stdout}");
}
