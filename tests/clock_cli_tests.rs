use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_env, rti, write_config};

fn clock(home: &std::path::PathBuf, db_path: &str, action: &str, time: &str) {
    rti(home)
        .args([
            "--db",
            db_path,
            "clock",
            action,
            "--date",
            "2025-09-01",
            "--at",
            time,
        ])
        .assert()
        .success();
}

#[test]
fn test_init_creates_database() {
    let (home, db_path) = init_env("cli_init");

    assert!(std::path::Path::new(&db_path).exists());

    rti(&home)
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_full_day_is_listed() {
    let (home, db_path) = init_env("cli_full_day");

    clock(&home, &db_path, "in", "09:00");
    clock(&home, &db_path, "out", "17:00");

    rti(&home)
        .args(["--db", &db_path, "list", "--period", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("Worked: 480 min").and(contains("Expected: 480 min")));
}

#[test]
fn test_clock_prints_transition() {
    let (home, db_path) = init_env("cli_transition");

    rti(&home)
        .args([
            "--db",
            &db_path,
            "clock",
            "in",
            "--date",
            "2025-09-01",
            "--at",
            "09:00",
            "-u",
            "alice",
        ])
        .assert()
        .success()
        .stdout(contains("CLOCK_IN recorded for alice").and(contains("CLOCKED_OUT → CLOCKED_IN")));
}

#[test]
fn test_clock_out_without_clock_in_is_rejected() {
    let (home, db_path) = init_env("cli_reject");

    rti(&home)
        .args([
            "--db",
            &db_path,
            "clock",
            "out",
            "--date",
            "2025-09-01",
            "--at",
            "17:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Cannot clock out without a prior clock-in."));

    rti(&home)
        .args(["--db", &db_path, "list", "--period", "2025-09"])
        .assert()
        .success()
        .stdout(contains("No clock events for default"));
}

#[test]
fn test_break_end_while_working_is_rejected() {
    let (home, db_path) = init_env("cli_break_end");

    clock(&home, &db_path, "in", "09:00");

    rti(&home)
        .args([
            "--db",
            &db_path,
            "clock",
            "break-end",
            "--date",
            "2025-09-01",
            "--at",
            "10:00",
        ])
        .assert()
        .failure()
        .stderr(contains("no break is in progress"));
}

#[test]
fn test_project_only_with_in_or_switch() {
    let (home, db_path) = init_env("cli_project_flag");

    rti(&home)
        .args([
            "--db",
            &db_path,
            "clock",
            "out",
            "--date",
            "2025-09-01",
            "--at",
            "17:00",
            "--project",
            "alpha",
        ])
        .assert()
        .failure()
        .stderr(contains("--project can only be used"));
}

#[test]
fn test_paid_break_from_config() {
    let (home, db_path) = init_env("cli_paid_break");
    write_config(
        &home,
        &format!(
            "database: {db_path}\n\
             timezone: UTC\n\
             schedule:\n  expected_minutes: 480\n  workdays: [1, 2, 3, 4, 5]\n  paid_breaks:\n\
             \x20   - id: lunch\n      start: \"12:00\"\n      end: \"12:30\"\n      automatic: true\n"
        ),
    );

    clock(&home, &db_path, "in", "09:00");
    clock(&home, &db_path, "break-start", "12:00");
    clock(&home, &db_path, "break-end", "12:30");
    clock(&home, &db_path, "out", "17:00");

    rti(&home)
        .args(["--db", &db_path, "list", "--period", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("Worked: 480 min").and(contains("Paid break: 30 min")));
}

#[test]
fn test_sweep_inserts_automatic_break() {
    let (home, db_path) = init_env("cli_sweep");
    write_config(
        &home,
        &format!(
            "database: {db_path}\n\
             schedule:\n  paid_breaks:\n\
             \x20   - id: lunch\n      start: \"12:00\"\n      end: \"12:30\"\n      automatic: true\n"
        ),
    );

    clock(&home, &db_path, "in", "09:00");
    clock(&home, &db_path, "out", "17:00");

    rti(&home)
        .args(["--db", &db_path, "sweep", "--date", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("2 automatic event(s) inserted"));

    rti(&home)
        .args(["--db", &db_path, "sweep", "--date", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("0 automatic event(s) inserted"));

    rti(&home)
        .args(["--db", &db_path, "list", "--period", "2025-09-01", "--events"])
        .assert()
        .success()
        .stdout(
            contains("Worked: 480 min")
                .and(contains("Break: 30 min"))
                .and(contains("lunch")),
        );
}

#[test]
fn test_list_json() {
    let (home, db_path) = init_env("cli_json");

    clock(&home, &db_path, "in", "09:00");
    clock(&home, &db_path, "break-start", "12:00");
    clock(&home, &db_path, "break-end", "12:30");
    clock(&home, &db_path, "out", "17:00");

    let output = rti(&home)
        .args(["--db", &db_path, "list", "--period", "2025-09-01", "--json"])
        .output()
        .expect("run list --json");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is valid JSON");
    let day = &json[0];
    assert_eq!(day["date"], "2025-09-01");
    assert_eq!(day["totals"]["worked_minutes"], 450.0);
    assert_eq!(day["totals"]["break_minutes"], 30.0);
    assert_eq!(day["state"], "CLOCKED_OUT");

    // No paid slots configured: zero, not negative zero
    let paid = day["totals"]["paid_break_minutes"].as_f64().expect("number");
    assert_eq!(paid, 0.0);
    assert!(paid.is_sign_positive());
}

#[test]
fn test_project_switch_and_details() {
    let (home, db_path) = init_env("cli_projects");

    rti(&home)
        .args([
            "--db",
            &db_path,
            "clock",
            "in",
            "--date",
            "2025-09-01",
            "--at",
            "09:00",
            "--project",
            "alpha",
        ])
        .assert()
        .success();

    rti(&home)
        .args([
            "--db",
            &db_path,
            "clock",
            "switch",
            "--date",
            "2025-09-01",
            "--at",
            "11:00",
            "--project",
            "beta",
        ])
        .assert()
        .success();

    clock(&home, &db_path, "out", "17:00");

    rti(&home)
        .args(["--db", &db_path, "list", "--period", "2025-09-01", "--details"])
        .assert()
        .success()
        .stdout(
            contains("Worked: 480 min")
                .and(contains("project alpha: 120 min"))
                .and(contains("project beta: 360 min")),
        );
}

#[test]
fn test_log_records_clock_operations() {
    let (home, db_path) = init_env("cli_log");

    clock(&home, &db_path, "in", "09:00");

    rti(&home)
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("clock").and(contains("migration_applied")));
}
