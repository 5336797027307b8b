//! Headless binary runs: stdin commands in, NDJSON events out
//!
//! Run with: cargo test --test headless

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn write_deck(dir: &Path) -> std::path::PathBuf {
    let deck = dir.join("talk.txt");
    std::fs::write(&deck, "Opening\x0CMiddle\x0CClosing").expect("write deck");
    deck
}

fn run_headless(deck: &Path, data_home: &Path, commands: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_deckview"))
        .arg(deck)
        .arg("--headless")
        .env("XDG_DATA_HOME", data_home)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn deckview");

    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(commands.as_bytes())
        .expect("write commands");

    child.wait_with_output().expect("wait for deckview")
}

fn events(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("every line is JSON"))
        .collect()
}

#[test]
fn test_quit_emits_shutdown_as_last_event() {
    let dir = tempfile::tempdir().unwrap();
    let deck = write_deck(dir.path());

    let output = run_headless(&deck, dir.path(), "quit\n");
    assert!(output.status.success());

    let events = events(&output);
    let last = events.last().expect("at least one event");
    assert_eq!(last["event"], "shutdown");
    assert_eq!(last["cause"], "user_quit");
    assert!(events.iter().all(|e| e["timestamp"].is_number()));
}

#[test]
fn test_unknown_command_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let deck = write_deck(dir.path());

    let output = run_headless(&deck, dir.path(), "jump 3\nquit\n");
    let events = events(&output);

    assert!(events
        .iter()
        .any(|e| e["event"] == "command_rejected" && e["command"] == "jump 3"));
}

#[test]
fn test_missing_deck_fails() {
    let dir = tempfile::tempdir().unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_deckview"))
        .arg(dir.path().join("missing.txt"))
        .arg("--headless")
        .env("XDG_DATA_HOME", dir.path())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("run deckview");

    assert!(!status.success());
}

#[test]
fn test_init_config_writes_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let deck = write_deck(dir.path());

    let status = Command::new(env!("CARGO_BIN_EXE_deckview"))
        .arg(&deck)
        .arg("--init-config")
        .env("XDG_DATA_HOME", dir.path())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("run deckview");

    assert!(status.success());
    assert!(dir.path().join(".deckview").join("config.toml").exists());
}
