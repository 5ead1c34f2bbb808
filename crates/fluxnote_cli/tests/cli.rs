use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn fluxnote(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fluxnote").unwrap();
    cmd.env_remove("FLUXNOTE_DB_PATH");
    cmd.env_remove("FLUXNOTE_LOG_LEVEL");
    cmd.arg("--db").arg(db);
    cmd
}

fn add(db: &Path, title: &str) -> String {
    let output = fluxnote(db).args(["add", title]).output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn probe_prints_ping_and_version() {
    let dir = tempfile::tempdir().unwrap();
    fluxnote(&dir.path().join("flux.db"))
        .arg("probe")
        .assert()
        .success()
        .stdout(predicate::str::contains("ping=pong"))
        .stdout(predicate::str::contains("version="));
}

#[test]
fn groceries_flow_through_cli() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("flux.db");

    let id = add(&db, "Groceries");
    assert!(!id.is_empty());

    fluxnote(&db)
        .args(["edit", &id, "--content", "milk, eggs"])
        .assert()
        .success();

    fluxnote(&db)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"content\": \"milk, eggs\""))
        .stdout(predicate::str::contains("\"title\": \"Groceries\""));

    fluxnote(&db).args(["rm", &id]).assert().success();

    fluxnote(&db)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn list_shows_most_recently_updated_first() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("flux.db");
    let first = add(&db, "first");
    add(&db, "second");
    fluxnote(&db)
        .args(["edit", &first, "--title", "first again"])
        .assert()
        .success();

    let output = fluxnote(&db).arg("list").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let titles: Vec<&str> = stdout
        .lines()
        .map(|line| line.rsplit('\t').next().unwrap())
        .collect();
    assert_eq!(titles, vec!["first again", "second"]);
}

#[test]
fn blank_title_fails() {
    let dir = tempfile::tempdir().unwrap();
    fluxnote(&dir.path().join("flux.db"))
        .args(["add", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title must not be empty"));
}

#[test]
fn rm_unknown_id_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    fluxnote(&dir.path().join("flux.db"))
        .args(["rm", "missing"])
        .assert()
        .success();
}

#[test]
fn clear_requires_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("flux.db");
    add(&db, "a");

    fluxnote(&db).arg("clear").assert().failure();
    fluxnote(&db)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed 1"));
}

#[test]
fn list_json_includes_state_fields() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("flux.db");
    add(&db, "json");

    fluxnote(&db)
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"loading\": false"))
        .stdout(predicate::str::contains("\"collaborators\": []"));
}

#[test]
fn log_level_comes_from_environment_when_flag_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    fluxnote(&dir.path().join("flux.db"))
        .env("FLUXNOTE_LOG_LEVEL", "info")
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("event=db_open"));
}

#[test]
fn log_level_flag_overrides_environment() {
    let dir = tempfile::tempdir().unwrap();
    fluxnote(&dir.path().join("flux.db"))
        .env("FLUXNOTE_LOG_LEVEL", "info")
        .args(["--log-level", "error", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("event=db_open").not());
}

#[test]
fn default_log_level_keeps_stderr_quiet() {
    let dir = tempfile::tempdir().unwrap();
    fluxnote(&dir.path().join("flux.db"))
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
