//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Everything
//! here runs against the dev data directory and never needs a signed-in
//! backend.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "halcyon-cli", "--"])
        .args(args)
        .env("HALCYON_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_timer_status() {
    let (stdout, _, code) = run_cli(&["timer", "status"]);
    assert_eq!(code, 0, "timer status failed");
    // Status may print a completion event before the snapshot; the snapshot
    // is always last.
    assert!(stdout.contains("StateSnapshot"), "no snapshot in: {stdout}");
    assert!(stdout.contains("remaining_secs"));
}

#[test]
fn test_timer_start_then_pause() {
    let (stdout, _, code) = run_cli(&["timer", "start"]);
    assert_eq!(code, 0, "timer start failed");
    assert!(stdout.contains("\"type\""));

    let (_, _, code) = run_cli(&["timer", "pause"]);
    assert_eq!(code, 0, "timer pause failed");
}

#[test]
fn test_timer_reset() {
    let (stdout, _, code) = run_cli(&["timer", "reset"]);
    assert_eq!(code, 0, "timer reset failed");
    assert!(stdout.contains("TimerReset"));
}

#[test]
fn test_timer_rejects_bad_mode() {
    let (_, stderr, code) = run_cli(&["timer", "switch", "nap"]);
    assert_ne!(code, 0, "bad mode unexpectedly accepted");
    assert!(stderr.contains("unknown mode"));
}

#[test]
fn test_timer_rejects_out_of_bounds_duration() {
    let (_, stderr, code) = run_cli(&["timer", "set", "focus", "900"]);
    assert_ne!(code, 0, "out-of-bounds duration unexpectedly accepted");
    assert!(stderr.contains("duration"));
}

#[test]
fn test_config_get() {
    let (stdout, _, code) = run_cli(&["config", "get", "timer.focus_min"]);
    assert_eq!(code, 0, "config get failed");
    assert!(!stdout.trim().is_empty());
}

#[test]
fn test_config_get_unknown_key() {
    let (_, stderr, code) = run_cli(&["config", "get", "timer.nope"]);
    assert_ne!(code, 0, "unknown key unexpectedly succeeded");
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list_is_json() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("config list is JSON");
    assert!(parsed.get("timer").is_some());
}

#[test]
fn test_journal_prompt_without_backend() {
    let (stdout, _, code) = run_cli(&["journal", "prompt"]);
    assert_eq!(code, 0, "journal prompt failed");
    assert!(stdout.contains('?'));
}

#[test]
fn test_journal_prompt_category() {
    let (stdout, _, code) = run_cli(&["journal", "prompt", "--category", "gratitude"]);
    assert_eq!(code, 0, "journal prompt with category failed");
    assert!(!stdout.trim().is_empty());
}
