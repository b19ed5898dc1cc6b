//! Integration tests for the packfilter CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command isolated from the caller's user config and environment
fn packfilter(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("packfilter").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("PACKFILTER_CONFIG")
        .env_remove("PACKFILTER_STRICT_INCLUDES")
        .env_remove("PACKFILTER_INCLUDES")
        .env_remove("PACKFILTER_EXCLUDES")
        .env_remove("PACKFILTER_JARS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    packfilter(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("include/exclude"));
}

#[test]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    packfilter(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("packfilter"));
}

#[test]
fn test_invalid_subcommand() {
    let dir = TempDir::new().unwrap();
    packfilter(&dir)
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_check_documented_example_from_flags() {
    let dir = TempDir::new().unwrap();
    packfilter(&dir)
        .args(["--include", "a,a/a/a", "--exclude", "a/a", "--strict-includes", "true"])
        .args(["check", "a", "a/b", "a/a/a", "a/a/a/b", "b", "a/a", "a/a/b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("process a/b\n"))
        .stdout(predicate::str::contains("process a/a/a/b\n"))
        .stdout(predicate::str::contains("skip b\n"))
        .stdout(predicate::str::contains("skip a/a\n"))
        .stdout(predicate::str::contains("skip a/a/b\n"));
}

#[test]
fn test_check_json_from_repo_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("packfilter.toml"),
        "strict_includes = true\nincludes = [\"com/example\"]\nexcludes = [\"com/example/gen\"]\n",
    )
    .unwrap();

    let assert = packfilter(&dir)
        .args([
            "check",
            "--format",
            "json",
            "com/example/Main",
            "com/example/gen/Stub",
            "fr/inria/yajta/Agent",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let verdicts: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        verdicts,
        serde_json::json!([
            { "class": "com/example/Main", "process": true },
            { "class": "com/example/gen/Stub", "process": false },
            { "class": "fr/inria/yajta/Agent", "process": false }
        ])
    );
}

#[test]
fn test_check_reads_names_from_file_and_stdin() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("classes.txt"),
        "# list\norg/acme/A\n\norg/other/B\n",
    )
    .unwrap();

    packfilter(&dir)
        .args(["-i", "org/acme", "check", "--file", "classes.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("process org/acme/A"))
        .stdout(predicate::str::contains("skip org/other/B"));

    packfilter(&dir)
        .args(["-i", "org/acme", "check", "--file", "-"])
        .write_stdin("org/acme/C\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("process org/acme/C"));
}

#[test]
fn test_check_without_names_fails() {
    let dir = TempDir::new().unwrap();
    packfilter(&dir)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No class names given"));
}

#[test]
fn test_environment_overrides_polarity() {
    let dir = TempDir::new().unwrap();
    packfilter(&dir)
        .env("PACKFILTER_STRICT_INCLUDES", "false")
        .args(["check", "java/lang/String"])
        .assert()
        .success()
        .stdout(predicate::str::contains("process java/lang/String"));
}

#[test]
fn test_environment_rule_lists_extend_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("packfilter.toml"), "includes = [\"org/acme\"]\n").unwrap();

    packfilter(&dir)
        .env("PACKFILTER_INCLUDES", "org/beta,org/gamma")
        .env("PACKFILTER_EXCLUDES", "org/acme/gen")
        .args(["check", "org/acme/A", "org/acme/gen/B", "org/beta/C", "org/gamma/D"])
        .assert()
        .success()
        .stdout(predicate::str::contains("process org/acme/A"))
        .stdout(predicate::str::contains("skip org/acme/gen/B"))
        .stdout(predicate::str::contains("process org/beta/C"))
        .stdout(predicate::str::contains("process org/gamma/D"));
}

#[test]
fn test_jars() {
    let dir = TempDir::new().unwrap();
    packfilter(&dir)
        .args(["--jar", "lib/", "jars", "lib/x.class", "bin/x.class"])
        .assert()
        .success()
        .stdout(predicate::str::contains("eligible lib/x.class"))
        .stdout(predicate::str::contains("outside bin/x.class"));

    packfilter(&dir)
        .args(["jars", "bin/x.class"])
        .assert()
        .success()
        .stdout(predicate::str::contains("eligible bin/x.class"));
}

#[test]
fn test_tree_dump() {
    let dir = TempDir::new().unwrap();
    packfilter(&dir)
        .args(["-q", "-i", "a,a/a/a", "-x", "a/a", "tree"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "ClassList:\na true\n\ta false\n\t\ta true\nfr false\n\tinria false\n\t\tyajta false\n",
        ));
}

#[test]
fn test_config_show_with_custom_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("rules.yaml"),
        "strict_includes: false\nexcludes:\n  - org/slow\n",
    )
    .unwrap();

    packfilter(&dir)
        .args(["--config", "rules.yaml", "config", "show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"strict_includes\": false"))
        .stdout(predicate::str::contains("org/slow"));
}

#[test]
fn test_missing_custom_config_fails() {
    let dir = TempDir::new().unwrap();
    packfilter(&dir)
        .args(["--config", "nope.toml", "tree"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_config_validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    packfilter(&dir)
        .args(["-i", "com.example", "config", "validate"])
        .assert()
        .success()
        .stderr(predicate::str::contains("suspicious rule"))
        .stderr(predicate::str::contains("com.example"));
}
