#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rtimeclock::models::clock_event::ClockEvent;
use rtimeclock::models::event_type::ClockEventType;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Isolated HOME for one test, so no real configuration is read.
pub fn test_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("rtimeclock_home_{}", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test home");
    path
}

/// Binary under test, with HOME pointing at `home`.
pub fn rti(home: &PathBuf) -> Command {
    let mut cmd = cargo_bin_cmd!("rtimeclock");
    cmd.env("HOME", home).env_remove("RTIMECLOCK_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimeclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh HOME and initialized DB for a CLI test.
pub fn init_env(name: &str) -> (PathBuf, String) {
    let home = test_home(name);
    let db_path = setup_test_db(name);

    rti(&home)
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    (home, db_path)
}

/// Writes a configuration file into the test HOME.
pub fn write_config(home: &PathBuf, yaml: &str) {
    let dir = home.join(".rtimeclock");
    fs::create_dir_all(&dir).expect("create config dir");
    fs::write(dir.join("rtimeclock.conf"), yaml).expect("write config");
}

/// 2025-09-01 00:00 UTC, a Monday.
pub fn day_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap()
}

pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
}

/// Instant at `h:m` on the test day.
pub fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, h, m, 0).unwrap()
}

pub fn ev(kind: ClockEventType, h: u32, m: u32) -> ClockEvent {
    ClockEvent::new("alice", kind, at(h, m))
}

pub fn auto_ev(kind: ClockEventType, h: u32, m: u32, slot: &str) -> ClockEvent {
    ClockEvent::automatic("alice", kind, at(h, m), slot)
}
