use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_rules_lists_builtin_rules() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("rules");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("covid-likely"))
        .stdout(predicate::str::contains("covid-severe"))
        .stdout(predicate::str::contains("symptom(name = loss_of_taste)"))
        .stdout(predicate::str::contains(
            "diagnosis(result = \"Likely COVID-19\")",
        ))
        .stdout(predicate::str::contains("NOT a medical diagnosis tool"));
}

#[test]
fn test_cli_symptoms_lists_catalogue() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("symptoms");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("fever"))
        .stdout(predicate::str::contains("loss_of_taste"))
        .stdout(predicate::str::contains("Loss of taste"))
        .stdout(predicate::str::contains("Difficulty breathing"));
}
