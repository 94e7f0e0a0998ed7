// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025-2026 Jonathan D.A. Jewell
//! End-to-end tests for the carbonprint binary

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const HOUSEHOLD: &str = r#"{
    "transport": {
        "privateCar": { "type": "gasoline", "size": "medium", "distance": 100 }
    },
    "energy": { "electricity": { "amount": 200, "region": "nationalAvg" } },
    "consumption": { "diet": "balanced" }
}"#;

/// Workspace with a config whose records live inside the temp dir
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let config = format!(
        "records:\n  directory: \"{}\"\n",
        dir.path().join("records").display()
    );
    std::fs::write(dir.path().join("config.yml"), config).unwrap();
    std::fs::write(dir.path().join("household.json"), HOUSEHOLD).unwrap();
    dir
}

fn carbonprint(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_carbonprint"))
        .current_dir(dir)
        .arg("--config")
        .arg(dir.join("config.yml"))
        .args(args)
        .output()
        .expect("run carbonprint")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("json on stdout")
}

#[test]
fn test_calculate_json() {
    let dir = workspace();
    let report = stdout_json(&carbonprint(
        dir.path(),
        &["calculate", "household.json", "--format", "json"],
    ));

    assert_eq!(report["total"], 4075);
    assert_eq!(report["breakdown"]["transport"], 1040);
    assert_eq!(report["breakdown"]["energy"], 1392);
    assert_eq!(report["breakdown"]["consumption"], 1643);
    assert_eq!(report["rating"], "moderate");
}

#[test]
fn test_calculate_text() {
    let dir = workspace();
    let output = carbonprint(dir.path(), &["calculate", "household.json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total:        4075 kg CO2e"));
    assert!(stdout.contains("Rating: moderate"));
}

#[test]
fn test_save_without_user_fails_before_output() {
    let dir = workspace();
    let output = carbonprint(dir.path(), &["calculate", "household.json", "--save"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--save needs --user"));
    assert!(!dir.path().join("records").exists());
}

#[test]
fn test_saved_result_appears_in_history() {
    let dir = workspace();
    let saved = carbonprint(
        dir.path(),
        &["calculate", "household.json", "--user", "alice.smith", "--save"],
    );
    assert!(saved.status.success());

    let history = stdout_json(&carbonprint(
        dir.path(),
        &["history", "--user", "alice.smith", "--format", "json"],
    ));
    assert_eq!(history["user_id"], "alice.smith");
    assert_eq!(history["records"].as_array().unwrap().len(), 1);
    assert_eq!(history["advisory_context"]["total"], 4075);

    let other = stdout_json(&carbonprint(
        dir.path(),
        &["history", "--user", "alice_smith", "--format", "json"],
    ));
    assert!(other["records"].as_array().unwrap().is_empty());
    assert!(other["advisory_context"].is_null());
}

#[test]
fn test_out_of_range_input_is_rejected() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("huge.json"),
        r#"{
            "transport": {
                "privateCar": { "type": "gasoline", "size": "medium", "distance": 1e20 }
            },
            "energy": { "electricity": { "amount": 0, "region": "nationalAvg" } },
            "consumption": { "diet": "balanced" }
        }"#,
    )
    .unwrap();

    let output = carbonprint(dir.path(), &["calculate", "huge.json"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("transport emissions exceed"));
}

#[test]
fn test_template_round_trips_through_calculate() {
    let dir = workspace();
    let template = carbonprint(dir.path(), &["template"]);
    assert!(template.status.success());
    std::fs::write(dir.path().join("template.json"), &template.stdout).unwrap();

    let report = stdout_json(&carbonprint(
        dir.path(),
        &["calculate", "template.json", "--format", "json"],
    ));
    assert_eq!(report["total"], 1643);
    assert_eq!(report["rating"], "excellent");
}

#[test]
fn test_factors_json() {
    let dir = workspace();
    let table = stdout_json(&carbonprint(dir.path(), &["factors", "--format", "json"]));
    assert_eq!(table["transport"]["fuelCar"]["gasoline"]["medium"], 0.2);
    assert_eq!(table["consumption"]["diet"]["meatHeavy"], 7.2);
}
