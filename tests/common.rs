#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Sample legacy document: three entries in the week of 2025-01-05..2025-01-11
/// and one in February.
pub const LEGACY_DOC: &str = r#"{
  "entries": [
    {"task": "Fix login", "requestor": "Ana", "duration": 3, "tags": "t1",
     "timestamp": "2025-01-06T12:00:00.000Z", "id": 1736164800000},
    {"task": "Review PR", "requestor": "Ben", "duration": 5, "tags": "t1,t2",
     "timestamp": "2025-01-07T12:00:00.000Z", "id": 1736251200000},
    {"task": "Release notes", "requestor": "Ana", "duration": "1.5", "tags": "docs",
     "timestamp": "2025-01-09T12:00:00.000Z", "id": 1736424000000},
    {"task": "Planning", "requestor": "Cleo", "duration": 2, "tags": "",
     "timestamp": "2025-02-03T12:00:00.000Z", "id": 1738584000000}
  ]
}"#;

/// Binary under test, isolated from the user's configuration.
pub fn rwl() -> Command {
    let mut cmd = cargo_bin_cmd!("rworklog");
    let home = env::temp_dir().join("rworklog_test_home");
    fs::create_dir_all(&home).ok();
    cmd.env("HOME", &home).env_remove("RUST_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rworklog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh, empty temp directory
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("{name}_rworklog_dir"));
    fs::remove_dir_all(&dir).ok();
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

pub fn init_db(db_path: &str) {
    rwl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB and import [`LEGACY_DOC`], giving entries with fixed dates.
pub fn init_db_with_data(db_path: &str, name: &str) {
    init_db(db_path);

    let doc = temp_out(name, "legacy.json");
    fs::write(&doc, LEGACY_DOC).expect("write legacy doc");

    rwl()
        .args(["--db", db_path, "import", &doc])
        .assert()
        .success();
}
