use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

// Nothing listens here; every test below must finish without a request.
const UNREACHABLE: &str = "http://127.0.0.1:9";

fn chaosdash() -> Command {
    let mut cmd = Command::cargo_bin("chaosdash").unwrap();
    cmd.env_remove("CHAOSDASH_API_ROOT").env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_help_lists_commands() {
    chaosdash()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("experiments"))
        .stdout(predicate::str::contains("targets"))
        .stdout(predicate::str::contains("summary"));
}

#[test]
fn test_create_without_name_fails_before_network() {
    chaosdash()
        .args(["--api-root", UNREACHABLE, "experiments", "create"])
        .args(["--type", "pod-failure", "--target", "app=web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please fill in all required fields"));
}

#[test]
fn test_target_create_without_selector_fails() {
    chaosdash()
        .args(["--api-root", UNREACHABLE, "targets", "create", "--name", "web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please fill in all required fields"));
}

#[test]
fn test_stop_is_unsupported() {
    chaosdash()
        .args(["--api-root", UNREACHABLE, "experiments", "stop", "e1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "stopping experiments is not supported by the API yet",
        ));
}

#[test]
fn test_declined_delete_is_cancelled() {
    chaosdash()
        .args(["--api-root", UNREACHABLE, "targets", "delete", "t1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Are you sure you want to delete this target?"))
        .stdout(predicate::str::contains("Cancelled."));
}

#[test]
fn test_env_api_root_is_validated() {
    let mut cmd = Command::cargo_bin("chaosdash").unwrap();
    cmd.env("CHAOSDASH_API_ROOT", "chaos-api:8080")
        .args(["experiments", "stop", "e1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_root must be an http(s) URL"));
}

#[test]
fn test_bad_config_file_is_reported() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "api_root: ftp://chaos").unwrap();

    chaosdash()
        .arg("--config")
        .arg(file.path())
        .args(["experiments", "stop", "e1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_root must be an http(s) URL"));
}

#[test]
fn test_missing_config_file_is_reported() {
    chaosdash()
        .args(["--config", "/nonexistent/chaosdash.yaml", "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/chaosdash.yaml"));
}
