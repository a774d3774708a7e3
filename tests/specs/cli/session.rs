// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Login, logout and preferences from the command line.

mod common;
use common::*;

#[test]
fn whoami_requires_login() {
    let home = init_home();
    uc(&home)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn login_whoami_logout() {
    let home = init_home();
    uc(&home)
        .args(["login", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as 42"));

    uc(&home)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("42 (since "));

    let json = json_output(uc(&home).arg("whoami"));
    assert_eq!(json["userId"], "42");
    assert!(json["lastLoginEpochMs"].as_i64().unwrap() > 0);

    uc(&home)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));
    uc(&home).arg("whoami").assert().failure();
}

#[test]
fn login_rejects_multi_segment_user_id() {
    let home = init_home();
    uc(&home)
        .args(["login", "a/b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("single path segment"));
    uc(&home).arg("whoami").assert().failure();
}

#[test]
fn prefs_show_defaults() {
    let home = init_home();
    uc(&home)
        .args(["prefs", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("theme: light"))
        .stdout(predicate::str::contains("language: en"));

    let json = json_output(uc(&home).args(["prefs", "show"]));
    assert_eq!(json, serde_json::json!({"theme": "light", "language": "en"}));
}

#[test]
fn prefs_set_requires_a_change() {
    let home = init_home();
    uc(&home).args(["login", "42"]).assert().success();
    uc(&home).args(["prefs", "set"]).assert().failure();
}

#[test]
fn prefs_set_requires_login() {
    let home = init_home();
    uc(&home)
        .args(["prefs", "set", "--theme", "dark"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn prefs_set_rejects_unknown_theme() {
    let home = init_home();
    uc(&home).args(["login", "42"]).assert().success();
    uc(&home)
        .args(["prefs", "set", "--theme", "purple"])
        .assert()
        .failure();
}

#[test]
fn prefs_set_queues_user_preferences() {
    let home = init_home();
    uc(&home).args(["login", "42"]).assert().success();

    uc(&home)
        .args(["prefs", "set", "--theme", "dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("theme: dark"))
        .stdout(predicate::str::contains("Queued for sync"));

    uc(&home)
        .args(["prefs", "set", "--language", "kk"])
        .assert()
        .success();

    let prefs = json_output(uc(&home).args(["prefs", "show"]));
    assert_eq!(prefs, serde_json::json!({"theme": "dark", "language": "kk"}));

    let pending = json_output(uc(&home).arg("pending"));
    let writes = pending.as_array().unwrap();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0]["path"], "users/42/preferences");
    assert_eq!(
        writes[0]["data"],
        serde_json::json!({"theme": "dark", "language": "kk"})
    );
}

#[test]
fn logout_drops_pending_and_preferences() {
    let home = init_home();
    uc(&home).args(["login", "42"]).assert().success();
    uc(&home)
        .args(["prefs", "set", "--theme", "dark"])
        .assert()
        .success();
    uc(&home).args(["write", "a", "1"]).assert().success();

    uc(&home)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("discarded 2 pending write(s)"));

    let pending = json_output(uc(&home).arg("pending"));
    assert_eq!(pending, serde_json::json!([]));
    let prefs = json_output(uc(&home).args(["prefs", "show"]));
    assert_eq!(prefs["theme"], "light");
}

#[test]
fn logout_keep_pending() {
    let home = init_home();
    uc(&home).args(["login", "42"]).assert().success();
    uc(&home).args(["write", "a", "1"]).assert().success();

    uc(&home)
        .args(["logout", "--keep-pending"])
        .assert()
        .success();

    let pending = json_output(uc(&home).arg("pending"));
    assert_eq!(pending.as_array().unwrap().len(), 1);
}

#[test]
fn status_shows_user() {
    let home = init_home();
    uc(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("User: not logged in"));

    uc(&home).args(["login", "ada"]).assert().success();
    let json = json_output(uc(&home).arg("status"));
    assert_eq!(json["user"], "ada");
}
