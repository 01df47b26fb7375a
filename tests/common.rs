#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn bic() -> Command {
    cargo_bin_cmd!("bicicletario")
}

/// Command bound to a test database, never touching the user's config.
pub fn bic_db(db_path: &str) -> Command {
    let mut cmd = bic();
    cmd.args(["--db", db_path, "--test"]);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_bicicletario.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary input file with the given content
pub fn temp_file(name: &str, ext: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_in.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::write(&p, content).expect("write temp file");
    p
}

/// Initialize a fresh test DB
pub fn init_db(db_path: &str) {
    bic_db(db_path).arg("init").assert().success();
}

/// Log an entry and return the new record id
pub fn log_entry(db_path: &str, client: &str, bike: &str, at: &str) -> String {
    let out = bic_db(db_path)
        .args(["entry", client, bike, "--at", at])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8_lossy(&out);
    stdout
        .lines()
        .find_map(|l| l.trim().strip_prefix("id: "))
        .map(|s| s.trim().to_string())
        .expect("entry prints the record id")
}

/// Three records: two on 2024-03-05 and one on 2024-04-01
pub fn init_db_with_data(db_path: &str) -> Vec<String> {
    init_db(db_path);
    vec![
        log_entry(db_path, "c1", "b1", "2024-03-05T10:00:00"),
        log_entry(db_path, "c2", "b2", "2024-03-05T22:00:00"),
        log_entry(db_path, "c1", "b1", "2024-04-01T09:00:00"),
    ]
}
