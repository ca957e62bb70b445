//! Runs the compiled binary against small fixture files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn cmd() -> Command {
    Command::cargo_bin("titanic_scratch").unwrap()
}

fn fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_input_exits_with_one() {
    cmd()
        .args(["logistic", "/no/such/titanic_project.csv"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not open file"));
}

#[test]
fn explore_reports_statistics() {
    let file = fixture("rm,medv\n6,20\n7,25\n5,15\n8,30\n");
    cmd()
        .arg("explore")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Stats for rm"))
        .stdout(predicate::str::contains("Stats for medv"))
        .stdout(predicate::str::contains("Correlation = 1"))
        .stdout(predicate::str::contains("Program Terminated."));
}

#[test]
fn bayes_reports_metrics() {
    let file = fixture(
        "idx,pclass,survived,sex,age\n1,1,1,0,29\n2,3,0,1,30\n3,1,1,0,31\n4,3,0,1,25\n5,1,1,0,20\n6,3,0,1,40\n",
    );
    cmd()
        .arg("bayes")
        .arg(file.path())
        .args(["--train-rows", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Apriori: [0.5, 0.5]"))
        .stdout(predicate::str::contains("Accuracy: 1"))
        .stdout(predicate::str::contains("ms\n"));
}

#[test]
fn malformed_field_is_reported() {
    let file = fixture("idx,pclass,survived,sex,age\n1,1,1,0,abc\n");
    cmd()
        .arg("logistic")
        .arg(file.path())
        .args(["--train-rows", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("field `age`"));
}
