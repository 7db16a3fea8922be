use assert_cmd::Command;
use std::fs;
use std::path::Path;

fn anonhealth(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("anonhealth").unwrap();
    cmd.current_dir(dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn stdout_of(assert: assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn summary_json_for_clean_report() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("report.json"),
        r#"{"project_name": "capture", "rows": [{"success": 10}, {"warning": 1}]}"#,
    )
    .unwrap();

    let assert = anonhealth(dir.path())
        .args(["summary", "--json"])
        .assert()
        .code(0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout_of(assert)).unwrap();

    let values: Vec<u64> = parsed["breakdown"]
        .as_array()
        .unwrap()
        .iter()
        .map(|slice| slice["value"].as_u64().unwrap())
        .collect();
    assert_eq!(values, vec![9, 0, 91]);
    assert_eq!(parsed["verdict"], "degraded");
    assert_eq!(parsed["project"], "capture");
    assert_eq!(parsed["ok"], true);
}

#[test]
fn summary_fails_when_errors_are_recorded() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("report.js"),
        "jsondata = [{\"success\": 50}, {\"error\": 1}];",
    )
    .unwrap();

    let assert = anonhealth(dir.path())
        .args(["summary", "--report", "report.js", "--rows"])
        .assert()
        .code(1);
    let out = stdout_of(assert);
    assert!(out.contains("Anonymization failed"));
    assert!(out.contains("100%"));
    assert!(out.contains("#1"));
    assert!(out.contains("exit: FAILED (1 error(s) recorded)"));
}

#[test]
fn policy_flag_switches_to_equal_weights() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("report.json"),
        r#"[{"success": 10, "warning": 1}]"#,
    )
    .unwrap();

    let assert = anonhealth(dir.path())
        .args(["summary", "--json", "--policy", "equal"])
        .assert()
        .code(0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout_of(assert)).unwrap();
    assert_eq!(parsed["policy"], "equal");
    assert_eq!(parsed["breakdown"][0]["value"], 91);
    assert_eq!(parsed["breakdown"][2]["value"], 9);
}

#[test]
fn policy_flag_wins_over_configured_weights() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("report.json"),
        r#"[{"success": 10, "warning": 1}]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("anonhealth.toml"),
        "[weights]\nsuccess = 1.0\ninfo = 0.1\nwarning = 100.0\n",
    )
    .unwrap();

    let assert = anonhealth(dir.path())
        .args(["summary", "--json", "--policy", "equal"])
        .assert()
        .code(0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout_of(assert)).unwrap();
    assert_eq!(parsed["policy"], "equal");
    assert_eq!(parsed["weights"]["warning"], 1.0);
    assert_eq!(parsed["breakdown"][0]["value"], 91);
    assert_eq!(parsed["breakdown"][2]["value"], 9);
}

#[test]
fn total_sums_a_column() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("report.json"),
        r#"{"data": [{"name": "ip", "discovered": 12}, {"name": "mac", "discovered": 3}]}"#,
    )
    .unwrap();

    let assert = anonhealth(dir.path())
        .args(["total", "--key", "discovered"])
        .assert()
        .code(0);
    assert_eq!(stdout_of(assert).trim(), "discovered: 15");
}

#[test]
fn init_writes_config_once() {
    let dir = tempfile::tempdir().unwrap();

    anonhealth(dir.path()).arg("init").assert().code(0);
    let written = fs::read_to_string(dir.path().join("anonhealth.toml")).unwrap();
    assert!(written.contains("policy = \"severity\""));

    anonhealth(dir.path()).arg("init").assert().code(2);
}

#[test]
fn missing_report_exits_with_two() {
    let dir = tempfile::tempdir().unwrap();
    let assert = anonhealth(dir.path()).arg("summary").assert().code(2);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("report not found"));
}
