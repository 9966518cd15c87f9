//! Command-line smoke tests; none of these reach a real backend

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn provision_ctl(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("provision-ctl").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("PROVISIONER_API_URL")
        .env_remove("PROVISIONER_SIMULATE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn local_estimate_prints_total() {
    let home = TempDir::new().unwrap();
    provision_ctl(&home)
        .args(["estimate", "-p", "aws", "-i", "t3.micro", "-n", "2", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$26.00"));
}

#[test]
fn local_estimate_json() {
    let home = TempDir::new().unwrap();
    let output = provision_ctl(&home)
        .args(["--json", "estimate", "--provider", "aws", "-n", "2", "--local"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["provider"], "aws");
    assert_eq!(value["architecture"]["vmCount"], 2);
    assert_eq!(value["estimate"]["monthly_cost"], 26.0);
    assert_eq!(value["estimate"]["breakdown"]["network"], 5.0);
}

#[test]
fn catalog_lists_every_provider() {
    let home = TempDir::new().unwrap();
    provision_ctl(&home)
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("t3.micro"))
        .stdout(predicate::str::contains("Standard_B1s"))
        .stdout(predicate::str::contains("e2-micro"));
}

#[test]
fn catalog_json_filters_provider() {
    let home = TempDir::new().unwrap();
    let output = provision_ctl(&home)
        .args(["catalog", "--provider", "gcp", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let providers = value["providers"].as_array().unwrap();
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0]["provider"], "gcp");
}

#[test]
fn health_against_simulated_backend() {
    let home = TempDir::new().unwrap();
    provision_ctl(&home)
        .env("PROVISIONER_SIMULATE", "1")
        .args(["health", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("healthy"));
}

#[test]
fn config_reads_local_file() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join(".provisioner.toml"),
        "[api]\nbase_url = \"http://provisioner.internal:8080\"\n\n[polling]\ninterval_secs = 5\n",
    )
    .unwrap();

    provision_ctl(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("http://provisioner.internal:8080"))
        .stdout(predicate::str::contains("interval_secs = 5"));
}

#[test]
fn invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join(".provisioner.toml"), "[polling]\ninterval_secs = 0\n").unwrap();

    provision_ctl(&home)
        .arg("catalog")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn unknown_provider_is_rejected() {
    let home = TempDir::new().unwrap();
    provision_ctl(&home)
        .args(["estimate", "-p", "oracle", "--local"])
        .assert()
        .failure();
}
