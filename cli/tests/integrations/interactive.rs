use assert_cmd::Command;

#[test]
fn test_interactive_flag_is_documented() {
    // The checklist needs a terminal; only check the flag is wired up
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.args(["diagnose", "--help"]);

    let output = cmd.assert().success();
    output.stdout(predicates::str::contains("--interactive"));
}

#[test]
fn test_top_level_help() {
    let mut cmd = Command::cargo_bin("triage").unwrap();
    cmd.arg("--help");

    let output = cmd.assert().success();
    output
        .stdout(predicates::str::contains("diagnose"))
        .stdout(predicates::str::contains("check"));
}
