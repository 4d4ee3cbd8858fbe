use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_check_valid_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("covid.rules"),
        include_str!("../../../triage/rules/covid.rules"),
    )
    .unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "not a rule file").unwrap();

    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("check").arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("OK: 1 file, 2 rules"))
        .stdout(predicate::str::contains("covid-likely"));
}

#[test]
fn test_cli_check_syntax_error_fails() {
    let temp_dir = TempDir::new().unwrap();
    let rules_file = temp_dir.path().join("broken.rules");
    fs::write(
        &rules_file,
        r#"
rule broken
  when symptom(name = fever
  then diagnosis(result = "x")
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("check").arg(&rules_file);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn test_cli_check_duplicate_rule_names_fails() {
    let temp_dir = TempDir::new().unwrap();
    let rules_file = temp_dir.path().join("dupes.rules");
    fs::write(
        &rules_file,
        r#"
rule same
  when symptom(name = fever)
  then diagnosis(result = "a")

rule same
  when symptom(name = cough)
  then diagnosis(result = "b")
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("check").arg(&rules_file);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("same"));
}

#[test]
fn test_cli_check_wrong_attribute_shows_expected_attributes() {
    let temp_dir = TempDir::new().unwrap();
    let rules_file = temp_dir.path().join("shape.rules");
    fs::write(
        &rules_file,
        r#"
rule shape
  when symptom(label = fever)
  then diagnosis(result = "x")
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("check").arg(&rules_file);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Semantic error"))
        .stderr(predicate::str::contains("symptom facts take: name"));
}

#[test]
fn test_cli_verbose_logs_loaded_rule_files() {
    let temp_dir = TempDir::new().unwrap();
    let rules_file = temp_dir.path().join("covid.rules");
    fs::write(&rules_file, include_str!("../../../triage/rules/covid.rules")).unwrap();

    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.env_remove("RUST_LOG")
        .arg("-v")
        .arg("check")
        .arg(&rules_file);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("loaded rule file"));
}

#[test]
fn test_cli_quiet_by_default() {
    let temp_dir = TempDir::new().unwrap();
    let rules_file = temp_dir.path().join("covid.rules");
    fs::write(&rules_file, include_str!("../../../triage/rules/covid.rules")).unwrap();

    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.env_remove("RUST_LOG").arg("check").arg(&rules_file);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("loaded rule file").not());
}
