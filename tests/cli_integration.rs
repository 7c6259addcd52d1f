// Integration tests for CLI commands
// These drive the built binary against a ledger in a temporary directory.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";

fn get_binary_path() -> &'static str {
    env!("CARGO_BIN_EXE_urbanplan")
}

/// Run a subcommand with the test identity and a config inside `dir`.
fn run(dir: &Path, args: &[&str]) -> Output {
    let config = dir.join("config.toml");
    Command::new(get_binary_path())
        .args(args)
        .arg("--config")
        .arg(&config)
        .env("URBANPLAN_MNEMONIC", TEST_MNEMONIC)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn init(dir: &Path) {
    let output = run(dir, &["init"]);
    assert!(output.status.success(), "init failed: {}", stderr(&output));
}

fn submit(dir: &Path, title: &str, district: &str, votes: &str) -> String {
    let output = run(
        dir,
        &[
            "submit",
            "--title",
            title,
            "--district",
            district,
            "--votes",
            votes,
        ],
    );
    assert!(output.status.success(), "submit failed: {}", stderr(&output));
    stdout(&output).trim().lines().last().unwrap().to_string()
}

#[test]
fn test_cli_help() {
    let output = Command::new(get_binary_path())
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("obscured vote counts"));
    for command in ["init", "list", "submit", "approve", "reject", "reveal", "stats"] {
        assert!(stdout.contains(command), "help is missing {}", command);
    }
}

#[test]
fn test_cli_version() {
    let output = Command::new(get_binary_path())
        .arg("version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(stdout(&output).contains("urbanplan"));
}

#[test]
fn test_cli_requires_init() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(temp_dir.path(), &["list"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("urbanplan init"));
}

#[test]
fn test_cli_submit_requires_district() {
    let output = Command::new(get_binary_path())
        .args(["submit", "--title", "Park", "--votes", "3"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(stderr(&output).contains("district"));
}

#[test]
fn test_cli_init_twice_needs_force() {
    let temp_dir = TempDir::new().unwrap();
    init(temp_dir.path());

    let output = run(temp_dir.path(), &["init"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--force"));

    let output = run(temp_dir.path(), &["init", "--force"]);
    assert!(output.status.success());
}

#[test]
fn test_cli_submit_list_reveal_approve() {
    let temp_dir = TempDir::new().unwrap();
    init(temp_dir.path());

    let id = submit(temp_dir.path(), "Riverside park", "District 4", "42");
    assert!(id.starts_with("prop-"));

    // Ledger stores only the token
    let ledger = std::fs::read_to_string(temp_dir.path().join("ledger.json")).unwrap();
    assert!(ledger.contains("proposal_keys"));

    let output = run(temp_dir.path(), &["list"]);
    assert!(output.status.success());
    let listing = stdout(&output);
    assert!(listing.contains(&id));
    assert!(listing.contains("Riverside park *"));
    assert!(listing.contains("FHE-"));

    let output = run(temp_dir.path(), &["reveal", &id, "--yes"]);
    assert!(output.status.success(), "reveal failed: {}", stderr(&output));
    assert!(stdout(&output).contains("Riverside park: 42"));

    let output = run(temp_dir.path(), &["approve", &id]);
    assert!(output.status.success(), "approve failed: {}", stderr(&output));

    let output = run(temp_dir.path(), &["reject", &id]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Rejection failed"));

    let output = run(temp_dir.path(), &["list", "--status", "approved"]);
    assert!(stdout(&output).contains(&id));
}

#[test]
fn test_cli_stats() {
    let temp_dir = TempDir::new().unwrap();
    init(temp_dir.path());

    submit(temp_dir.path(), "Library", "3", "1");
    submit(temp_dir.path(), "Market", "D3", "2");

    let output = run(temp_dir.path(), &["stats"]);
    assert!(output.status.success());
    let stats = stdout(&output);
    assert!(stats.contains("Total:    2"));
    assert!(stats.contains("D3:2"));
}

#[test]
fn test_cli_reveal_unknown_proposal() {
    let temp_dir = TempDir::new().unwrap();
    init(temp_dir.path());

    let output = run(temp_dir.path(), &["reveal", "prop-0-none", "--yes"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("prop-0-none"));
}
