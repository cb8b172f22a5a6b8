use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn desynth() -> Command {
    Command::cargo_bin("desynth").unwrap()
}

/// Minimal deployment fixture: the four core contracts plus sETH, all with
/// ABIs, and a registry of sUSD + sETH. The provider URL in these tests
/// points at a closed port; every covered path must fail (or succeed)
/// before any RPC traffic.
fn write_fixture(dir: &Path) {
    let deployment = serde_json::json!({
        "targets": {
            "Synthetix": { "address": "0x0000000000000000000000000000000000000010", "source": "Synthetix" },
            "Issuer": { "address": "0x0000000000000000000000000000000000000011", "source": "Issuer" },
            "ExchangeRates": { "address": "0x0000000000000000000000000000000000000012", "source": "ExchangeRates" },
            "SystemStatus": { "address": "0x0000000000000000000000000000000000000013", "source": "SystemStatus" },
            "SynthsETH": { "address": "0x00000000000000000000000000000000000000e1", "source": "Synth" }
        },
        "sources": {
            "Synthetix": { "abi": [] },
            "Issuer": { "abi": [] },
            "ExchangeRates": { "abi": [] },
            "SystemStatus": { "abi": [] },
            "Synth": { "abi": [] }
        }
    });
    let config = serde_json::json!({
        "ProxysETH": { "deploy": false },
        "TokenStatesETH": { "deploy": false },
        "SynthsETH": { "deploy": false }
    });
    let synths = serde_json::json!([{ "name": "sUSD" }, { "name": "sETH" }]);

    std::fs::write(
        dir.join("deployment.json"),
        serde_json::to_string_pretty(&deployment).unwrap(),
    )
    .unwrap();
    std::fs::write(
        dir.join("config.json"),
        serde_json::to_string_pretty(&config).unwrap(),
    )
    .unwrap();
    std::fs::write(
        dir.join("synths.json"),
        serde_json::to_string_pretty(&synths).unwrap(),
    )
    .unwrap();
}

fn base_args(dir: &TempDir) -> Vec<String> {
    vec![
        "--network".to_string(),
        "local".to_string(),
        "--deployment-path".to_string(),
        dir.path().display().to_string(),
        "--provider-url".to_string(),
        "http://127.0.0.1:1".to_string(),
    ]
}

// ---------------------------------------------------------------------------
// desynth remove
// ---------------------------------------------------------------------------

#[test]
fn remove_with_no_synths_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    desynth()
        .arg("remove")
        .args(base_args(&dir))
        .assert()
        .success()
        .stdout(predicate::str::contains("No synths requested"));
}

#[test]
fn remove_base_synth_fails_before_any_rpc() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());
    desynth()
        .arg("remove")
        .args(base_args(&dir))
        .args(["--synth", "sUSD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot remove the base synth"));
}

#[test]
fn remove_unknown_synth_fails_before_any_rpc() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());
    desynth()
        .arg("remove")
        .args(base_args(&dir))
        .args(["--synth", "sDOGE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("synth not found: sDOGE"));
}

#[test]
fn remove_reports_missing_deployment() {
    let dir = TempDir::new().unwrap();
    desynth()
        .arg("remove")
        .args(base_args(&dir))
        .args(["--synth", "sETH"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("deployment not found"));
}

#[test]
fn remove_with_unreachable_node_fails() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());
    // Validation passes; the consistency check is the first RPC and the
    // node is unreachable.
    desynth()
        .arg("remove")
        .args(base_args(&dir))
        .args([
            "--synth",
            "sETH",
            "--yes",
            "--account",
            "0x0000000000000000000000000000000000000001",
        ])
        .assert()
        .failure();
}

#[test]
fn remove_preserves_stores_on_precondition_failure() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());
    let before = std::fs::read_to_string(dir.path().join("synths.json")).unwrap();

    desynth()
        .arg("remove")
        .args(base_args(&dir))
        .args(["--synth", "sUSD"])
        .assert()
        .failure();

    let after = std::fs::read_to_string(dir.path().join("synths.json")).unwrap();
    assert_eq!(before, after);
    assert!(!dir.path().join("owner-actions.json").exists());
}

// ---------------------------------------------------------------------------
// desynth verify
// ---------------------------------------------------------------------------

#[test]
fn verify_reports_missing_deployment() {
    let dir = TempDir::new().unwrap();
    desynth()
        .arg("verify")
        .args(base_args(&dir))
        .assert()
        .failure()
        .stderr(predicate::str::contains("deployment not found"));
}

#[test]
fn verify_rejects_missing_abi() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());
    // Strip the Issuer ABI; validation must catch it before any RPC.
    let path = dir.path().join("deployment.json");
    let mut deployment: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    deployment["sources"]["Issuer"] = serde_json::json!({});
    std::fs::write(&path, serde_json::to_string_pretty(&deployment).unwrap()).unwrap();

    desynth()
        .arg("verify")
        .args(base_args(&dir))
        .args(["--synth", "sETH"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no ABI for source 'Issuer'"));
}
