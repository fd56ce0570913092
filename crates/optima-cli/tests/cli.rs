//! End-to-end tests of the `optima` binary.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("optima").unwrap();
        cmd.env_remove("OPTIMA_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.dir.path().join("config.toml"))
            .arg("--data")
            .arg(self.dir.path().join("optima.redb"));
        cmd
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }
}

const SCENARIO: &str = r#"
operationDate = "2026-04-02"

[[titles]]
id = "1"
payer = "CLIENTE EXEMPLO LTDA"
invoiceNumber = "1024/A"
value = 5000.0
dueDate = "2026-04-22"
"#;

#[test]
fn test_holidays_lists_carnival() {
    Sandbox::new()
        .cmd()
        .args(["holidays", "--year", "2026", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-02-17"))
        .stdout(predicate::str::contains("Tiradentes"));
}

#[test]
fn test_settle_across_year_end() {
    Sandbox::new()
        .cmd()
        .args(["settle", "--due", "2025-12-31", "--float", "1", "--format", "minimal"])
        .assert()
        .success()
        .stdout("2026-01-02\n");
}

#[test]
fn test_settle_rejects_bad_date() {
    Sandbox::new()
        .cmd()
        .args(["settle", "--due", "31/12/2025"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn test_simulate_minimal_prints_final_net() {
    let sandbox = Sandbox::new();
    let input = sandbox.write("scenario.toml", SCENARIO);

    sandbox
        .cmd()
        .args(["simulate", "--format", "minimal", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout("4787.57\n");
}

#[test]
fn test_simulate_table_shows_summary() {
    let sandbox = Sandbox::new();
    let input = sandbox.write("scenario.toml", SCENARIO);

    sandbox
        .cmd()
        .args(["simulate", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Final Net"))
        .stdout(predicate::str::contains("4847.57"))
        .stdout(predicate::str::contains("2026-04-22"));
}

#[test]
fn test_save_then_browse_history() {
    let sandbox = Sandbox::new();
    let input = sandbox.write("scenario.toml", SCENARIO);

    sandbox
        .cmd()
        .args(["simulate", "--save", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved operation"));

    let output = sandbox
        .cmd()
        .args(["history", "list", "--format", "minimal"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let ids = String::from_utf8(output.stdout).unwrap();
    let ids: Vec<&str> = ids.lines().collect();
    assert_eq!(ids.len(), 1);

    sandbox
        .cmd()
        .args(["history", "show", ids[0], "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"institutionName\": \"Banco Exemplo S.A.\""));

    sandbox
        .cmd()
        .args(["history", "summary", "--format", "minimal"])
        .assert()
        .success()
        .stdout("1\n");

    sandbox
        .cmd()
        .args(["history", "delete", ids[0]])
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["history", "show", ids[0]])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown operation"));
}

#[test]
fn test_save_rejected_when_final_net_not_positive() {
    let sandbox = Sandbox::new();
    let input = sandbox.write(
        "small.json",
        r#"{"operationDate": "2026-04-02", "titles": [{"id": "1", "value": 50, "dueDate": "2026-04-22"}]}"#,
    );

    sandbox
        .cmd()
        .args(["simulate", "--save", "--format", "minimal", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not positive"));

    sandbox
        .cmd()
        .args(["history", "list", "--format", "minimal"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_unsupported_input_format() {
    let sandbox = Sandbox::new();
    let input = sandbox.write("scenario.yaml", "titles: []");

    sandbox
        .cmd()
        .args(["simulate", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported input format"));
}

#[test]
fn test_institution_registry() {
    let sandbox = Sandbox::new();
    let profile = sandbox.write(
        "banco.json",
        r#"{"name": "Banco Dois", "monthlyRate": 1.9, "tac": 30, "minDays": 10}"#,
    );

    sandbox
        .cmd()
        .args(["institution", "add", "--method", "compound", "--file"])
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored 'Banco Dois'"));

    let output = sandbox
        .cmd()
        .args(["institution", "list", "--format", "minimal"])
        .output()
        .unwrap();
    let ids = String::from_utf8(output.stdout).unwrap();
    assert_eq!(ids.lines().count(), 2);
    assert!(ids.lines().any(|id| id == "default-1"));

    sandbox
        .cmd()
        .args(["institution", "show", "banco dois", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"discountMethod\": \"compound\""));

    sandbox
        .cmd()
        .args(["institution", "remove", "default-1"])
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["institution", "show", "default-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown institution"));
}

#[test]
fn test_invalid_profile_is_rejected() {
    let sandbox = Sandbox::new();
    let profile = sandbox.write("bad.toml", "name = \"Banco Ruim\"\nmonthlyRate = -1.0\n");

    sandbox
        .cmd()
        .args(["institution", "add", "--file"])
        .arg(&profile)
        .assert()
        .failure()
        .stderr(predicate::str::contains("monthlyRate"));
}

#[test]
fn test_oversized_float_is_rejected() {
    let sandbox = Sandbox::new();
    let profile = sandbox.write(
        "slow.json",
        r#"{"name": "Banco Lento", "workingDaysFloat": 4294967295}"#,
    );

    sandbox
        .cmd()
        .args(["institution", "add", "--file"])
        .arg(&profile)
        .assert()
        .failure()
        .stderr(predicate::str::contains("workingDaysFloat"));
}

#[test]
fn test_compare_reconciled() {
    let sandbox = Sandbox::new();
    let input = sandbox.write(
        "realized.json",
        r#"{
            "operationDate": "2026-04-02",
            "institution": "default-1",
            "titles": [{"id": "1", "value": 5000, "dueDate": "2026-04-22", "realizedNet": 4847.57}]
        }"#,
    );

    sandbox
        .cmd()
        .args(["compare", "--format", "minimal", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout("reconciled\n");
}

#[test]
fn test_config_init_and_show() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    assert!(sandbox.dir.path().join("config.toml").exists());

    sandbox
        .cmd()
        .args(["config", "show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"storage_backend\": \"redb\""));
}

#[test]
fn test_config_default_format_applies() {
    let sandbox = Sandbox::new();
    sandbox.write("config.toml", "default_format = \"minimal\"\n");

    sandbox
        .cmd()
        .args(["settle", "--due", "2026-06-04"])
        .assert()
        .success()
        .stdout("2026-06-05\n");
}

#[test]
fn test_config_storage_reports_counts() {
    let sandbox = Sandbox::new();
    let input = sandbox.write("scenario.toml", SCENARIO);

    sandbox
        .cmd()
        .args(["simulate", "--save", "--format", "json", "--input"])
        .arg(&input)
        .assert()
        .success();

    let output = sandbox
        .cmd()
        .args(["config", "storage", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["backend"], "redb");
    assert_eq!(status["healthy"], true);
    assert_eq!(status["operation_count"], 1);
    assert_eq!(status["institution_count"], 0);
    assert!(status["file_size_bytes"].as_u64().unwrap() > 0);

    sandbox
        .cmd()
        .args(["config", "storage", "--format", "minimal"])
        .assert()
        .success()
        .stdout("ok\n");
}
