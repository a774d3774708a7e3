// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline queueing, pending listing and sync from the command line.

mod common;
use common::*;

#[test]
fn commands_require_init() {
    let home = TempDir::new().unwrap();
    uc(&home)
        .arg("pending")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn init_twice_fails() {
    let home = init_home();
    uc(&home)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn init_rejects_non_websocket_remote() {
    let home = TempDir::new().unwrap();
    uc(&home)
        .args(["init", "--remote", "http://example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ws://"));
}

#[test]
fn write_without_remote_is_queued() {
    let home = init_home();
    uc(&home)
        .args(["write", "users/42/name", "\"Ada\""])
        .assert()
        .success()
        .stdout(predicate::str::contains("Queued users/42/name"));

    uc(&home)
        .arg("pending")
        .assert()
        .success()
        .stdout(predicate::str::contains("users/42/name"))
        .stdout(predicate::str::contains("\"Ada\""));
}

#[test]
fn write_to_unreachable_remote_is_queued() {
    let home = init_home_unreachable();
    uc(&home)
        .args(["write", "a/b", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remote unreachable"));
}

#[test]
fn pending_is_empty_after_init() {
    let home = init_home();
    uc(&home)
        .arg("pending")
        .assert()
        .success()
        .stdout(predicate::str::contains("No pending writes"));

    let json = json_output(uc(&home).arg("pending"));
    assert_eq!(json, serde_json::json!([]));
}

#[test]
fn last_write_wins_per_path() {
    let home = init_home();
    uc(&home).args(["write", "a", "1"]).assert().success();
    uc(&home).args(["write", "b", "true"]).assert().success();
    uc(&home).args(["write", "a", "{\"x\":2}"]).assert().success();

    let json = json_output(uc(&home).arg("pending"));
    let writes = json.as_array().unwrap();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0]["path"], "a");
    assert_eq!(writes[0]["data"], serde_json::json!({"x": 2}));
    assert_eq!(writes[1]["path"], "b");
    assert!(writes[0]["timestamp"].as_i64().unwrap() > 0);
}

#[test]
fn paths_are_normalized() {
    let home = init_home();
    uc(&home).args(["write", "/a/b/", "1"]).assert().success();

    let json = json_output(uc(&home).arg("pending"));
    assert_eq!(json[0]["path"], "a/b");
}

#[yare::parameterized(
    dot = { "a.b" },
    hash = { "a/#" },
    dollar = { "$a" },
    bracket = { "a/[0]" },
    empty_segment = { "a//b" },
    only_slashes = { "///" },
)]
fn write_rejects_invalid_path(path: &str) {
    let home = init_home();
    uc(&home)
        .args(["write", path, "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid path"));
}

#[yare::parameterized(
    bare_word = { "hello" },
    trailing_comma = { "[1,]" },
    unterminated = { "{\"a\":" },
)]
fn write_rejects_invalid_json(value: &str) {
    let home = init_home();
    uc(&home)
        .args(["write", "a", value])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON value"));
}

#[test]
fn forget_drops_one_path() {
    let home = init_home();
    uc(&home).args(["write", "a", "1"]).assert().success();
    uc(&home).args(["write", "b", "2"]).assert().success();

    uc(&home)
        .args(["forget", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Forgot pending write for a"));

    let json = json_output(uc(&home).arg("pending"));
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["path"], "b");
}

#[test]
fn forget_unknown_path_fails() {
    let home = init_home();
    uc(&home)
        .args(["forget", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing pending for missing"));
}

#[test]
fn discard_drops_everything() {
    let home = init_home();
    uc(&home).args(["write", "a", "1"]).assert().success();
    uc(&home).args(["write", "b", "2"]).assert().success();

    uc(&home)
        .arg("discard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Discarded 2 pending write(s)"));

    let json = json_output(uc(&home).arg("pending"));
    assert_eq!(json, serde_json::json!([]));
}

#[test]
fn sync_without_remote_fails() {
    let home = init_home();
    uc(&home)
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no remote configured"));
}

#[test]
fn sync_with_empty_queue_is_idle() {
    let home = init_home_unreachable();
    let json = json_output(uc(&home).arg("sync"));
    assert_eq!(json["outcome"], "idle");
    assert_eq!(json["attempted"], 0);
}

#[test]
fn sync_against_unreachable_remote_keeps_writes() {
    let home = init_home_unreachable();
    uc(&home).args(["write", "a", "1"]).assert().success();

    uc(&home)
        .arg("sync")
        .assert()
        .failure()
        .stdout(predicate::str::contains("failed: a"))
        .stderr(predicate::str::contains("sync incomplete"))
        .stderr(predicate::str::contains("hint"));

    let json = json_output(uc(&home).arg("pending"));
    assert_eq!(json[0]["path"], "a");
}

#[test]
fn status_reports_pending_count() {
    let home = init_home();
    uc(&home).args(["write", "a", "1"]).assert().success();

    uc(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Remote: none"))
        .stdout(predicate::str::contains("Pending: 1"))
        .stdout(predicate::str::contains("Last sync: never"));

    let json = json_output(uc(&home).arg("status"));
    assert_eq!(json["pending"], 1);
    assert_eq!(json["connected"], false);
    assert!(json["last_sync"].is_null());
}

#[test]
fn status_shows_unreachable_remote_offline() {
    let home = init_home_unreachable();
    uc(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("(offline)"));
}

#[test]
fn watch_queues_writes_from_stdin() {
    let home = init_home();
    uc(&home)
        .arg("watch")
        .write_stdin("a 1\nnot.valid 2\nquit\n")
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("Queued a"))
        .stdout(predicate::str::contains("error: invalid path"));

    let json = json_output(uc(&home).arg("pending"));
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["data"], 1);
}

#[test]
fn completion_generates_script() {
    let home = TempDir::new().unwrap();
    uc(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("uc"));
}
