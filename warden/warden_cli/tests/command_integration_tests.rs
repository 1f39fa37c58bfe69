use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const EDITORS_POLICY: &str = r#"[
    {"name": "editors", "rules": {"editor": {"allow": {"action": ["view", "edit"]}}}},
    {"name": "readers", "rules": {"reader": {"allow": {"action": ["view"]}}}}
]"#;

fn warden() -> Command {
    let mut cmd = Command::cargo_bin("warden").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn setup_config(dir: &TempDir) -> String {
    fs::write(dir.path().join("editors.json"), EDITORS_POLICY).expect("Failed to write policy");

    let config_path = dir.path().join("warden.toml");
    fs::write(
        &config_path,
        r#"
log_level = "error"
policy_files = ["editors.json"]

[vocabulary]
roles = ["editor", "reader"]
actions = ["view", "edit", "delete"]
"#,
    )
    .expect("Failed to write config");

    config_path.to_string_lossy().to_string()
}

#[test]
fn test_check_granted() {
    warden()
        .args(["check", "admin", "edit"])
        .assert()
        .success()
        .stdout("Permission granted for edit action.\n");
}

#[test]
fn test_check_denied() {
    warden()
        .args(["check", "guest", "delete"])
        .assert()
        .success()
        .stdout("Permission denied for delete action.\n");
}

#[test]
fn test_check_invalid_role_and_action() {
    warden()
        .args(["check", "superuser", "view"])
        .assert()
        .success()
        .stdout("Invalid user role.\n");

    warden()
        .args(["check", "admin", "fly"])
        .assert()
        .success()
        .stdout("Invalid action.\n");
}

#[test]
fn test_demo_command() {
    warden()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "admin edit: Permission granted for edit action.",
        ))
        .stdout(predicate::str::contains(
            "guest delete: Permission denied for delete action.",
        ))
        .stdout(predicate::str::contains(
            "admin view: Permission denied for view action.",
        ));
}

#[test]
fn test_evaluate_prints_json() {
    warden()
        .args(["evaluate", "admin", "delete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"allowed\": true"))
        .stdout(predicate::str::contains("admin_policy"));
}

#[test]
fn test_evaluate_strict_rejects_unknown_role() {
    warden()
        .args(["evaluate", "--strict", "superuser", "view"])
        .assert()
        .code(2)
        .stdout("Invalid user role.\n");
}

#[test]
fn test_config_file_policies_and_vocabulary() {
    let dir = TempDir::new().unwrap();
    let config = setup_config(&dir);

    warden()
        .args(["--config", config.as_str(), "check", "editor", "edit"])
        .assert()
        .success()
        .stdout("Permission granted for edit action.\n");

    warden()
        .args(["--config", config.as_str(), "check", "reader", "edit"])
        .assert()
        .success()
        .stdout("Permission denied for edit action.\n");

    // admin is not in the configured vocabulary
    warden()
        .args(["--config", config.as_str(), "check", "admin", "edit"])
        .assert()
        .success()
        .stdout("Invalid user role.\n");
}

#[test]
fn test_policy_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    let config = setup_config(&dir);
    let override_path = dir.path().join("delete.json");
    fs::write(
        &override_path,
        r#"{"name": "cleanup", "rules": {"reader": {"allow": {"action": ["delete"]}}}}"#,
    )
    .unwrap();

    warden()
        .args(["--config", config.as_str(), "--policy"])
        .arg(&override_path)
        .arg("policies")
        .assert()
        .success()
        .stdout("cleanup: reader -> [delete]\n");
}

#[test]
fn test_policies_lists_demo_policies() {
    warden()
        .arg("policies")
        .assert()
        .success()
        .stdout(predicate::str::contains("admin_policy: admin -> [delete, edit]"))
        .stdout(predicate::str::contains("guest_policy: guest -> [view]"));
}

#[test]
fn test_validate_reports_malformed_policy() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("bad.json");
    fs::write(
        &file,
        r#"{"name": "bad", "rules": {"admin": {"allow": {"action": ["edit", false]}}}}"#,
    )
    .unwrap();

    warden()
        .arg("validate")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "rules.admin.allow.action[1] is not a string",
        ));
}

#[test]
fn test_validate_accepts_good_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("editors.json");
    fs::write(&file, EDITORS_POLICY).unwrap();

    warden()
        .arg("validate")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 valid policies"));
}

#[test]
fn test_log_level_flag_and_missing_config_warning() {
    warden()
        .args([
            "--log-level",
            "debug",
            "--config",
            "/no/such/warden.toml",
            "check",
            "admin",
            "edit",
        ])
        .assert()
        .success()
        .stdout("Permission granted for edit action.\n")
        .stderr(predicate::str::contains(
            "Configuration file not found: /no/such/warden.toml, using defaults",
        ))
        .stderr(predicate::str::contains("evaluated request"));
}

#[test]
fn test_log_level_error_silences_warnings() {
    warden()
        .args([
            "--log-level",
            "error",
            "--config",
            "/no/such/warden.toml",
            "check",
            "admin",
            "edit",
        ])
        .assert()
        .success()
        .stdout("Permission granted for edit action.\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_missing_policy_file_fails() {
    warden()
        .args(["--policy", "/no/such/policy.json", "check", "admin", "edit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load policy file"));
}
