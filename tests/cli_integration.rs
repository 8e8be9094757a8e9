//! CLI integration tests for Inkan
//!
//! These tests run the binary against edit scripts and sessions, checking
//! the draft, the gates and the generation hand-off end to end.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const READY_SCRIPT: &str = r#"{"op":"set_document","field":"title","value":"Quarterly Report"}
{"op":"set_document","field":"author","value":"Ada"}
{"op":"set_section","id":1,"field":"title","value":"Intro"}
{"op":"set_section","id":1,"field":"content","value":"Hello"}
{"op":"add_section"}
"#;

const INCOMPLETE_SCRIPT: &str = r#"{"op":"set_document","field":"title","value":"Quarterly Report"}
{"op":"set_section","id":1,"field":"title","value":"Intro"}
"#;

/// Get a command instance for the inkan binary, isolated from user config
fn inkan_cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("inkan"));
    cmd.current_dir(dir.path())
        .env("INKAN_CONFIG_DIR", dir.path().join("global"))
        .env_remove("RUST_LOG");
    cmd
}

/// Write a script into the temp directory
fn write_script(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// Replay Tests
// =============================================================================

#[test]
fn test_replay_prints_draft() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "draft.jsonl", READY_SCRIPT);

    inkan_cmd(&dir)
        .arg("replay")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Title:  Quarterly Report"))
        .stdout(predicate::str::contains("[1] Intro  (complete)"))
        .stdout(predicate::str::contains("[2] (untitled)  (incomplete)"))
        .stdout(predicate::str::contains("can generate:    yes"));
}

#[test]
fn test_replay_json() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "draft.jsonl", READY_SCRIPT);

    let output = inkan_cmd(&dir)
        .args(["--format", "json", "replay"])
        .arg(&script)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["draft"]["documentInfo"]["author"], "Ada");
    assert_eq!(json["draft"]["sections"].as_array().unwrap().len(), 2);
    assert_eq!(json["gates"]["can_add_section"], true);
    assert_eq!(json["version"], 5);
}

#[test]
fn test_replay_from_stdin() {
    let dir = TempDir::new().unwrap();

    inkan_cmd(&dir)
        .args(["replay", "-"])
        .write_stdin(INCOMPLETE_SCRIPT)
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] Intro  (incomplete)"));
}

#[test]
fn test_replay_ignores_out_of_contract_edits() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        &dir,
        "noop.jsonl",
        "{\"op\":\"remove_section\",\"id\":1}\n{\"op\":\"remove_section\",\"id\":99}\n{\"op\":\"set_section\",\"id\":7,\"field\":\"title\",\"value\":\"x\"}\n",
    );

    let output = inkan_cmd(&dir)
        .args(["-f", "json", "replay"])
        .arg(&script)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["draft"],
        serde_json::json!({
            "documentInfo": {"title": "", "author": ""},
            "sections": [{"id": 1, "title": "", "content": ""}]
        })
    );
    assert_eq!(json["version"], 0);
}

#[test]
fn test_replay_reports_bad_line() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "bad.jsonl", "{\"op\":\"add_section\"}\nnot json\n");

    inkan_cmd(&dir)
        .arg("replay")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_replay_missing_script() {
    let dir = TempDir::new().unwrap();

    inkan_cmd(&dir)
        .args(["replay", "missing.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open edit script"));
}

// =============================================================================
// Check Tests
// =============================================================================

#[test]
fn test_check_lists_blockers() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "draft.jsonl", INCOMPLETE_SCRIPT);

    inkan_cmd(&dir)
        .arg("check")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("can generate:    no"))
        .stdout(predicate::str::contains("author is empty"))
        .stdout(predicate::str::contains("no section has both a title and content"));
}

#[test]
fn test_check_strict_fails_when_blocked() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "draft.jsonl", INCOMPLETE_SCRIPT);

    inkan_cmd(&dir)
        .args(["check", "--strict"])
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not ready to generate"));
}

#[test]
fn test_check_strict_passes_when_ready() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "draft.jsonl", READY_SCRIPT);

    let output = inkan_cmd(&dir)
        .args(["-f", "json", "check", "--strict"])
        .arg(&script)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["gates"]["can_generate"], true);
    assert_eq!(json["blockers"], serde_json::json!([]));
}

// =============================================================================
// Generate Tests
// =============================================================================

#[test]
fn test_generate_writes_snapshot_to_stdout() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "draft.jsonl", READY_SCRIPT);

    let output = inkan_cmd(&dir).arg("generate").arg(&script).output().unwrap();
    assert!(output.status.success());

    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        snapshot,
        serde_json::json!({
            "documentInfo": {"title": "Quarterly Report", "author": "Ada"},
            "sections": [
                {"id": 1, "title": "Intro", "content": "Hello"},
                {"id": 2, "title": "", "content": ""}
            ]
        })
    );
}

#[test]
fn test_generate_complete_only() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "draft.jsonl", READY_SCRIPT);

    let output = inkan_cmd(&dir)
        .args(["generate", "--complete-only"])
        .arg(&script)
        .output()
        .unwrap();
    assert!(output.status.success());

    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["sections"].as_array().unwrap().len(), 1);
}

#[test]
fn test_generate_to_file() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "draft.jsonl", READY_SCRIPT);
    let out = dir.path().join("snapshot.json");

    inkan_cmd(&dir)
        .arg("generate")
        .arg(&script)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Handed off 2 section(s)"));

    let snapshot: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(snapshot["documentInfo"]["title"], "Quarterly Report");
}

#[test]
fn test_generate_blocked_draft_fails() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "draft.jsonl", INCOMPLETE_SCRIPT);
    let out = dir.path().join("snapshot.json");

    inkan_cmd(&dir)
        .arg("generate")
        .arg(&script)
        .arg("--out")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("author is empty"));

    assert!(!out.exists());
}

#[test]
fn test_generate_uses_configured_policy() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "draft.jsonl", READY_SCRIPT);
    fs::write(dir.path().join("inkan.toml"), "[generate]\nsections = \"complete\"\n").unwrap();

    let output = inkan_cmd(&dir).arg("generate").arg(&script).output().unwrap();
    assert!(output.status.success());

    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["sections"].as_array().unwrap().len(), 1);
}

#[test]
fn test_invalid_project_config_fails() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "draft.jsonl", READY_SCRIPT);
    fs::write(dir.path().join("inkan.toml"), "[generate\n").unwrap();

    inkan_cmd(&dir)
        .arg("replay")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse project config"));
}

#[test]
fn test_global_config_sets_format() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "draft.jsonl", READY_SCRIPT);
    let global = dir.path().join("global");
    fs::create_dir_all(&global).unwrap();
    fs::write(global.join("config.toml"), "default_format = \"json\"\n").unwrap();

    let output = inkan_cmd(&dir).arg("replay").arg(&script).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["gates"]["can_generate"], true);
}

#[cfg(unix)]
#[test]
fn test_generate_with_command() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "draft.jsonl", READY_SCRIPT);

    inkan_cmd(&dir)
        .arg("generate")
        .arg(&script)
        .args(["--command", "sh", "--arg", "-c", "--arg"])
        .arg(r#"read line; echo '{"success":true,"data":{"document":"doc-1"}}'"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Handed off 2 section(s) to sh"))
        .stdout(predicate::str::contains("doc-1"));
}

#[cfg(unix)]
#[test]
fn test_generate_command_rejection() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "draft.jsonl", READY_SCRIPT);

    inkan_cmd(&dir)
        .arg("generate")
        .arg(&script)
        .args(["--command", "sh", "--arg", "-c", "--arg"])
        .arg(r#"read line; echo '{"success":false,"error":"quota exceeded"}'"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("quota exceeded"));
}

// =============================================================================
// Session Tests
// =============================================================================

#[test]
fn test_session_scenario() {
    let dir = TempDir::new().unwrap();
    let input = "\
add
section 1 title Intro
section 1 content Hello
add
add
remove 99
title Report
author Ada
generate
show
quit
";

    inkan_cmd(&dir)
        .arg("session")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("cannot add a section: complete a section first"))
        .stdout(predicate::str::contains("no change"))
        .stdout(predicate::str::contains(r#""documentInfo":{"title":"Report","author":"Ada"}"#))
        .stdout(predicate::str::contains("generated: 3 section(s) handed off to stdout"))
        .stdout(predicate::str::contains("Title:  (empty)"));
}

#[test]
fn test_session_json_replies() {
    let dir = TempDir::new().unwrap();

    let output = inkan_cmd(&dir)
        .args(["-f", "json", "session"])
        .write_stdin("title Report\nremove 1\nstatus\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let replies: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(replies.len(), 3);
    assert_eq!(replies[0]["reply"], "applied");
    assert_eq!(replies[1]["reply"], "unchanged");
    assert_eq!(
        replies[2]["blockers"],
        serde_json::json!(["missing_author", "no_complete_section"])
    );
}

#[test]
fn test_session_json_generate_keeps_replies_tagged() {
    let dir = TempDir::new().unwrap();
    let input = "title Report\nauthor Ada\nsection 1 title Intro\nsection 1 content Hello\ngenerate\n";

    let output = inkan_cmd(&dir)
        .args(["-f", "json", "session"])
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let replies: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(replies.len(), 5);
    assert!(replies.iter().all(|r| r.get("reply").is_some()));
    assert_eq!(replies[4]["reply"], "generated");
    assert_eq!(replies[4]["receipt"]["sink"], "stderr");

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains(r#""documentInfo":{"title":"Report","author":"Ada"}"#));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "draft.jsonl", READY_SCRIPT);

    inkan_cmd(&dir)
        .args(["--verbose", "check"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("can generate:    yes"))
        .stderr(predicate::str::contains("section added"));
}
