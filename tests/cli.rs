use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn zhrl_eval_prints_the_serialized_value() {
    let mut cmd = Command::cargo_bin("zhrl").expect("binary exists");
    cmd.arg("eval").arg(r#"[["lam", ["x", "y"], ["+", "x", "y"]], 3, 4]"#);
    cmd.assert().success().stdout("7\n");
}

#[test]
fn zhrl_eval_reports_faults_on_stderr() {
    let mut cmd = Command::cargo_bin("zhrl").expect("binary exists");
    cmd.arg("eval").arg(r#"["/", 4, 0]"#);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("DivisionByZero"));
}

#[test]
fn zhrl_eval_rejects_malformed_json() {
    let mut cmd = Command::cargo_bin("zhrl").expect("binary exists");
    cmd.arg("eval").arg("(+ 1 2)");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("malformed JSON input"));
}

#[test]
fn zhrl_run_evaluates_a_script_file() {
    let dir = tempdir().expect("create temp dir");
    let script = dir.path().join("program.json");
    fs::write(
        &script,
        r#"["var", ["a", "=", 3], ["b", "=", 10], ["*", "a", ["+", "b", 1]]]"#,
    )
    .expect("write script");

    let mut cmd = Command::cargo_bin("zhrl").expect("binary exists");
    cmd.arg("run").arg(&script);
    cmd.assert().success().stdout("33\n");
}

#[test]
fn zhrl_run_many_evaluates_each_program() {
    let dir = tempdir().expect("create temp dir");
    let script = dir.path().join("programs.json");
    fs::write(&script, r#"[["<=", 3, 2], ["<=", 2, 3], ["lam", [], 1]]"#).expect("write script");

    let mut cmd = Command::cargo_bin("zhrl").expect("binary exists");
    cmd.arg("run").arg("--many").arg(&script);
    cmd.assert()
        .success()
        .stdout("false\ntrue\n#<procedure>\n");
}

#[test]
fn zhrl_run_missing_file_fails() {
    let dir = tempdir().expect("create temp dir");
    let mut cmd = Command::cargo_bin("zhrl").expect("binary exists");
    cmd.arg("run").arg(dir.path().join("absent.json"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}
