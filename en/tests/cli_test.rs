//! CLI integration tests
//!
//! The `java` executable is replaced by a script that drops `-jar <jar>` and
//! behaves like the engine, so `enhsp solve` runs end to end.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MANIFEST: &str = r#"
name: robot-1
actions:
  - name: move
    parameters:
      - { name: l_from, type: Location }
      - { name: l_to, type: Location }
objects:
  - { name: l0, type: Location }
  - { name: l1, type: Location }
kind: [FLAT_TYPING, NUMERIC_FLUENTS]
pddl:
  inline:
    domain: "(define (domain robot))"
    problem: "(define (problem robot-1) (:domain robot))"
"#;

fn enhsp(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("enhsp").expect("binary should build");
    cmd.env("HOME", home)
        .env("XDG_DATA_HOME", home.join("data"))
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("NO_COLOR", "1")
        .env_remove("ENHSP_JAR")
        .env_remove("RUST_LOG");
    cmd
}

fn write_manifest(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write manifest");
    path
}

/// A config whose `java` runs `body` with the engine arguments
fn write_fake_java(dir: &Path, body: &str) -> PathBuf {
    let java = dir.join("fake-java.sh");
    let script = format!("#!/bin/sh\nshift 2\ndomain=\"$2\"\nproblem=\"$4\"\nplan=\"$6\"\n{}\n", body);
    fs::write(&java, script).expect("Failed to write fake java");
    fs::set_permissions(&java, fs::Permissions::from_mode(0o755)).expect("Failed to chmod fake java");

    let config = dir.join("enhsp.yml");
    fs::write(
        &config,
        format!("engine:\n  java: {}\n  jar: {}\n", java.display(), dir.join("enhsp.jar").display()),
    )
    .expect("Failed to write config");
    config
}

#[test]
fn test_variants_lists_all_engines() {
    let home = TempDir::new().unwrap();
    enhsp(home.path())
        .arg("variants")
        .assert()
        .success()
        .stdout(predicate::str::contains("enhsp-opt-blind"))
        .stdout(predicate::str::contains("enhsp-anytime"))
        .stdout(predicate::str::contains("-s WAStar -h hrmax"));
}

#[test]
fn test_command_prints_forced_flags() {
    let home = TempDir::new().unwrap();
    enhsp(home.path())
        .env("ENHSP_JAR", "/opt/enhsp/enhsp.jar")
        .args(["command", "-V", "OPT", "-w", "/work", "-s", "gbfs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-jar /opt/enhsp/enhsp.jar"))
        .stdout(predicate::str::contains("-o /work/domain.pddl -f /work/problem.pddl -sp /work/plan.txt"))
        .stdout(predicate::str::contains("-s WAStar -h hrmax"))
        .stdout(predicate::str::contains("gbfs").not());
}

#[test]
fn test_command_default_and_anytime() {
    let home = TempDir::new().unwrap();
    enhsp(home.path())
        .args(["command", "-w", "/work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-planner sat-hmrp"));

    enhsp(home.path())
        .args(["command", "-V", "anytime", "-w", "/work"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("-anytime\n"));
}

#[test]
fn test_solve_missing_manifest_fails() {
    let home = TempDir::new().unwrap();
    enhsp(home.path())
        .args(["solve", "/nonexistent/robot.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load problem manifest"));
}

#[test]
fn test_solve_refuses_unsupported_kind() {
    let home = TempDir::new().unwrap();
    let manifest = write_manifest(
        home.path(),
        "cond.yml",
        &MANIFEST.replace("[FLAT_TYPING, NUMERIC_FLUENTS]", "[CONDITIONAL_EFFECTS]"),
    );

    enhsp(home.path())
        .args(["solve", "-V", "OPT-BLIND"])
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONDITIONAL_EFFECTS"))
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_supports_reports_each_variant() {
    let home = TempDir::new().unwrap();
    let manifest = write_manifest(
        home.path(),
        "cond.yml",
        &MANIFEST.replace("[FLAT_TYPING, NUMERIC_FLUENTS]", "[CONDITIONAL_EFFECTS]"),
    );

    enhsp(home.path())
        .arg("supports")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("robot-1"))
        .stdout(predicate::str::contains("missing: CONDITIONAL_EFFECTS"));
}

#[test]
fn test_solve_end_to_end_json() {
    let home = TempDir::new().unwrap();
    let manifest = write_manifest(home.path(), "robot.yml", MANIFEST);
    let config = write_fake_java(home.path(), r#"echo "(move l0 l1)" > "$plan""#);

    let output = enhsp(home.path())
        .arg("-c")
        .arg(&config)
        .args(["solve", "-f", "json"])
        .arg(&manifest)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["status"], "SOLVED_SATISFICING");
    assert_eq!(result["engine_name"], "enhsp");
    assert_eq!(result["plan"]["actions"][0]["action"]["name"], "move");
}

#[test]
fn test_anytime_stops_after_max_plans() {
    let home = TempDir::new().unwrap();
    let manifest = write_manifest(home.path(), "robot.yml", MANIFEST);
    let config = write_fake_java(
        home.path(),
        r#"echo "Found Plan:"
echo "0.0: (move l0 l1)"
echo "Plan-Length:1"
exec sleep 30"#,
    );

    enhsp(home.path())
        .arg("-c")
        .arg(&config)
        .args(["anytime", "-n", "1"])
        .arg(&manifest)
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .success()
        .stdout(predicate::str::contains("INTERMEDIATE"))
        .stdout(predicate::str::contains("move(l0, l1)"));
}
