use assert_cmd::Command;
use predicates::prelude::*;

/// Monday 11:00–22:00, Friday night 20:00–03:00, Tuesday closed.
const SCHEDULE: &str = r#"[
    {"diaSemana": 1, "apertura": "11:00:00", "cierre": "22:00:00", "cerrado": false},
    {"diaSemana": 2, "apertura": null, "cierre": null, "cerrado": true},
    {"diaSemana": 5, "apertura": "20:00:00", "cierre": "03:00:00", "cerrado": false}
]"#;

fn hours() -> Command {
    let mut cmd = Command::cargo_bin("findixi-hours").unwrap();
    cmd.env_remove("FINDIXI_TIMEZONE").env_remove("RUST_LOG");
    cmd
}

#[test]
fn status_open_in_english() {
    hours()
        .args(["status", "--schedule", "-", "--day", "1", "--time", "16:00", "--lang", "en"])
        .write_stdin(SCHEDULE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Open Now"))
        .stdout(predicate::str::contains("Closes at").not());
}

#[test]
fn status_carry_over_warns_about_closing() {
    hours()
        .args(["status", "-s", "-", "--day", "6", "--time", "01:30", "--lang", "en"])
        .write_stdin(SCHEDULE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Open Now"))
        .stdout(predicate::str::contains("Closes at 3:00 AM"));
}

#[test]
fn status_closed_defaults_to_spanish() {
    hours()
        .args(["status", "-s", "-", "--day", "2", "--time", "10:00"])
        .write_stdin(SCHEDULE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cerrado Ahora"))
        .stdout(predicate::str::contains("Abre Viernes a 8:00 PM"));
}

#[test]
fn status_json_report() {
    let output = hours()
        .args(["status", "-s", "-", "--day", "1", "--time", "21:00", "--json"])
        .write_stdin(SCHEDULE)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["status"]["state"], "open");
    assert_eq!(report["status"]["closes_at"], "22:00");
    assert_eq!(report["status"]["closing_soon"], true);
    assert_eq!(report["rendered"]["is_open"], true);
    assert_eq!(report["instant"]["minute"], "21:00");
}

#[test]
fn status_at_instant_in_timezone() {
    // 2026-10-19T20:00Z is Monday 16:00 in Puerto Rico (UTC-4)
    hours()
        .args(["status", "-s", "-", "--at", "2026-10-19T20:00:00Z", "--lang", "en"])
        .write_stdin(SCHEDULE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Open Now"));

    // Same instant read as UTC is Monday 20:00, within two hours of closing
    hours()
        .args(["status", "-s", "-", "--at", "2026-10-19T20:00:00Z", "--timezone", "UTC", "--lang", "en"])
        .write_stdin(SCHEDULE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Closes at 10:00 PM"));
}

#[test]
fn status_custom_closing_soon_window() {
    hours()
        .args([
            "status", "-s", "-", "--day", "1", "--time", "21:00", "--closing-soon", "30", "--lang", "en",
        ])
        .write_stdin(SCHEDULE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Closes at").not());
}

#[test]
fn next_reports_tomorrow() {
    hours()
        .args(["next", "-s", "-", "--day", "0", "--lang", "en"])
        .write_stdin(SCHEDULE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Opens tomorrow at 11:00 AM"));
}

#[test]
fn next_takes_a_day_without_time() {
    let output = hours()
        .args(["next", "-s", "-", "--day", "3", "--json"])
        .write_stdin(SCHEDULE)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["from"], "Wed");
    assert_eq!(report["next"]["day"], "Fri");
    assert_eq!(report["next"]["days_ahead"], 2);
    assert_eq!(report["next"]["opens_at"], "20:00");
}

#[test]
fn next_from_instant_in_timezone() {
    // 2026-10-19T20:00Z is Monday afternoon in Puerto Rico; next opening is Friday
    hours()
        .args(["next", "-s", "-", "--at", "2026-10-19T20:00:00Z", "--lang", "en"])
        .write_stdin(SCHEDULE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Opens Friday at 8:00 PM"));
}

#[test]
fn next_rejects_day_with_at() {
    hours()
        .args(["next", "-s", "-", "--day", "3", "--at", "2026-10-19T20:00:00Z"])
        .write_stdin(SCHEDULE)
        .assert()
        .failure();
}

#[test]
fn next_json_for_closed_week() {
    let output = hours()
        .args(["next", "-s", "-", "--day", "3", "--json"])
        .write_stdin(r#"[{"dayOfWeek": 3, "isClosed": true}]"#)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report["next"].is_null());
}

#[test]
fn table_lists_every_day() {
    hours()
        .args(["table", "-s", "-", "--lang", "en"])
        .write_stdin(SCHEDULE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sunday: Hours not available"))
        .stdout(predicate::str::contains("Monday: 11:00 AM - 10:00 PM"))
        .stdout(predicate::str::contains("Tuesday: Closed"))
        .stdout(predicate::str::contains("Friday: 8:00 PM - 3:00 AM"));
}

#[test]
fn malformed_time_fails() {
    hours()
        .args(["status", "-s", "-", "--day", "1", "--time", "25:99"])
        .write_stdin(SCHEDULE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed time"));
}

#[test]
fn invalid_schedule_json_fails() {
    hours()
        .args(["status", "-s", "-", "--day", "1", "--time", "12:00"])
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid schedule record"));
}

#[test]
fn unknown_timezone_fails() {
    hours()
        .args(["status", "-s", "-", "--timezone", "Mars/Olympus"])
        .write_stdin(SCHEDULE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown timezone"));
}

#[test]
fn missing_schedule_file_fails() {
    hours()
        .args(["table", "-s", "/nonexistent/schedule.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read schedule file"));
}

#[test]
fn day_without_time_is_rejected() {
    hours()
        .args(["status", "-s", "-", "--day", "1"])
        .write_stdin(SCHEDULE)
        .assert()
        .failure();
}
