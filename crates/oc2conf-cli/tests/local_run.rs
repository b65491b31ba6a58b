//! End-to-end runs of the `oc2conf` binary over local test trees.
//!
//! Single-file category directories keep per-file output deterministic, so
//! these tests can assert the exact line format as well as exit codes.

use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::json;

fn oc2conf() -> Command {
    Command::new(env!("CARGO_BIN_EXE_oc2conf"))
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn wrapper_schema_text() -> String {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "minProperties": 1,
        "maxProperties": 1,
        "properties": {
            "openc2_command": {
                "type": "object",
                "required": ["action", "target"],
                "properties": {
                    "action": {"type": "string"},
                    "target": {"type": "object"}
                }
            },
            "openc2_response": {
                "type": "object",
                "required": ["status"],
                "properties": {"status": {"type": "integer"}}
            }
        },
        "additionalProperties": false
    })
    .to_string()
}

#[test]
fn wrapper_run_reports_per_file_results_and_summary() {
    let tmp = tempfile::tempdir().unwrap();
    let suite = tmp.path().join("slpf");
    fs::create_dir_all(suite.join("Good-command")).unwrap();
    fs::create_dir_all(suite.join("Bad-command")).unwrap();
    fs::create_dir_all(suite.join("Good-response")).unwrap();

    write(&suite, "slpf.json", &wrapper_schema_text());
    write(
        &suite.join("Good-command"),
        "allow.json",
        r#"{"action": "allow", "target": {"ipv4_net": "10.0.0.0/8"}}"#,
    );
    write(
        &suite.join("Bad-command"),
        "broken.json",
        r#"{"action": "allow"}"#,
    );
    write(&suite.join("Good-response"), "ok.json", r#"{"status": 200}"#);

    let root = tmp.path().to_str().unwrap();
    let output = oc2conf().args([root, "--mode", "wrapper"]).output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.starts_with(&format!("Test data: {root}\n")),
        "stdout: {stdout}"
    );

    let allow_line = stdout
        .lines()
        .find(|l| l.contains("allow.json"))
        .expect("allow.json line");
    assert_eq!(allow_line, format!("{:>4} {:<50}", 1, "allow.json"));

    let broken_line = stdout
        .lines()
        .find(|l| l.contains("broken.json"))
        .expect("broken.json line");
    assert!(broken_line.starts_with(&format!("{:>4} {:<50}", 1, "broken.json")));
    assert!(broken_line.contains(" Fail: "), "line: {broken_line}");

    assert!(stdout.contains("\nGood-command\n"), "stdout: {stdout}");
    assert!(stdout.contains("\nBad-response No tests\n"), "stdout: {stdout}");
    assert!(stdout.contains("\nValidation Errors:\n"), "stdout: {stdout}");
    assert!(stdout.contains("\n  Good-command: 0/1\n"), "stdout: {stdout}");
    // The Bad-command rejection was expected, so no errors are charged.
    assert!(stdout.contains("\n  Bad-command: 0/1\n"), "stdout: {stdout}");
    assert!(stdout.contains("\n  Good-response: 0/1\n"), "stdout: {stdout}");
}

#[test]
fn typed_run_ignores_wrapper_schema_files() {
    let tmp = tempfile::tempdir().unwrap();
    let suite = tmp.path().join("slpf");
    fs::create_dir_all(suite.join("Good-command")).unwrap();
    write(&suite, "slpf.json", &wrapper_schema_text());

    let root = tmp.path().to_str().unwrap();
    let output = oc2conf().arg(root).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.contains("No schemas found in"),
        "stdout: {stdout}"
    );
}

#[test]
fn missing_root_exits_nonzero() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("absent");

    let output = oc2conf().arg(missing.to_str().unwrap()).output().unwrap();
    assert!(!output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Test data: "), "stdout: {stdout}");
    // The tracing subscriber owns the error line; only its text is stable.
    let logged = format!("{stdout}{}", String::from_utf8_lossy(&output.stderr));
    assert!(
        logged.contains("test suite discovery failed"),
        "output: {logged}"
    );
}

#[test]
fn unparseable_schema_skips_suite_but_run_succeeds() {
    let tmp = tempfile::tempdir().unwrap();
    let suite = tmp.path().join("slpf");
    fs::create_dir_all(suite.join("Good-command")).unwrap();
    write(&suite, "slpf.schema.json", "{not json at all");

    let output = oc2conf().arg(tmp.path().to_str().unwrap()).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.contains("Cannot parse schema slpf.schema.json"),
        "stdout: {stdout}"
    );
}

#[test]
fn strict_schemas_turns_parse_skip_into_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let suite = tmp.path().join("slpf");
    fs::create_dir_all(suite.join("Good-command")).unwrap();
    write(&suite, "slpf.schema.json", "{not json at all");

    let output = oc2conf()
        .args([tmp.path().to_str().unwrap(), "--strict-schemas"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let logged = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(logged.contains("cannot load schema"), "output: {logged}");
}
