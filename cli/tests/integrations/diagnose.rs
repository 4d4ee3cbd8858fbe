use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_diagnose_likely_covid() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("diagnose")
        .arg("fever")
        .arg("cough")
        .arg("loss_of_taste");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Likely COVID-19"))
        .stdout(predicate::str::contains("1. covid-likely"))
        .stdout(predicate::str::contains("covid-severe").not());
}

#[test]
fn test_cli_diagnose_all_symptoms_fires_both_rules_in_order() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.args([
        "diagnose",
        "fever",
        "cough",
        "loss-of-taste",
        "Difficulty breathing",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Likely COVID-19"))
        .stdout(predicate::str::contains(
            "Possible severe COVID-19 - seek medical attention",
        ))
        .stdout(predicate::str::contains("1. covid-likely"))
        .stdout(predicate::str::contains("2. covid-severe"));
}

#[test]
fn test_cli_diagnose_no_match_shows_advice() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("diagnose").arg("cough");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "No COVID-19-specific rule was triggered.",
        ))
        .stdout(predicate::str::contains("consult a healthcare professional"))
        .stdout(predicate::str::contains("(no rules fired)"));
}

#[test]
fn test_cli_diagnose_without_symptoms() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("diagnose");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Symptoms: (none)"))
        .stdout(predicate::str::contains("(no rules fired)"));
}

#[test]
fn test_cli_diagnose_unknown_symptom_fails() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("diagnose").arg("sneezing");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown symptom 'sneezing'"))
        .stderr(predicate::str::contains("difficulty_breathing"));
}

#[test]
fn test_cli_diagnose_json_output() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.args(["diagnose", "fever", "difficulty_breathing", "--json"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(value["fired_rules"], serde_json::json!(["covid-severe"]));
    assert_eq!(
        value["diagnoses"],
        serde_json::json!(["Possible severe COVID-19 - seek medical attention"])
    );
    assert_eq!(
        value["symptoms"],
        serde_json::json!(["fever", "difficulty_breathing"])
    );
}

#[test]
fn test_cli_diagnose_reads_json_input() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("symptoms.json");
    fs::write(
        &input,
        r#"{"fever": true, "cough": true, "loss_of_taste": true, "difficulty_breathing": false}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("diagnose").arg("--input").arg(&input);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Likely COVID-19"));
}

#[test]
fn test_cli_diagnose_reads_json_from_stdin() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.args(["diagnose", "--input", "-"])
        .write_stdin(r#"{"fever": true, "difficulty_breathing": true}"#);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("covid-severe"));
}

#[test]
fn test_cli_diagnose_with_custom_rules_replaces_builtin() {
    let temp_dir = TempDir::new().unwrap();
    let rules_file = temp_dir.path().join("custom.rules");
    fs::write(
        &rules_file,
        r#"
rule cough-only
  when symptom(name = cough)
  then diagnosis(result = "Probably a cold")
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.args(["diagnose", "fever", "cough", "loss_of_taste", "--rules"])
        .arg(&rules_file);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Probably a cold"))
        .stdout(predicate::str::contains("1. cough-only"))
        .stdout(predicate::str::contains("Likely COVID-19").not());
}

#[test]
fn test_cli_diagnose_with_chained_rule_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("a_covid.rules"),
        include_str!("../../../triage/rules/covid.rules"),
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("b_escalation.rules"),
        include_str!("../../../triage/rules/escalation.rules"),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.args([
        "diagnose",
        "fever",
        "cough",
        "loss_of_taste",
        "difficulty_breathing",
        "--rules",
    ])
    .arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Escalate: likely COVID-19 with breathing difficulty",
        ))
        .stdout(predicate::str::contains("1. high-risk"))
        .stdout(predicate::str::contains("4. escalate"));
}

#[test]
fn test_cli_diagnose_empty_rules_directory_fails() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.args(["diagnose", "fever", "--rules"]).arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No .rules files found"));
}
