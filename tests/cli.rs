use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Run `qta` with an isolated config directory so only the builtin catalog
/// or an explicit `--catalog` is visible.
fn run_qta(args: &[&str], stdin: &str) -> Output {
    let home = tempfile::tempdir().expect("temp home");
    let mut child = Command::new(env!("CARGO_BIN_EXE_qta"))
        .args(args)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn CLI");

    // the process may exit before reading stdin (e.g. a bad catalog)
    let _ = child
        .stdin
        .as_mut()
        .expect("stdin open")
        .write_all(stdin.as_bytes());

    child.wait_with_output().expect("read CLI output")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "cli exited with {}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn cli_ranks_builtin_catalog_from_stdin() {
    let output = run_qta(
        &[],
        r#"{"requirements":{"selected":["web","api"],"skill":"expert"}}"#,
    );
    let json = stdout_json(&output);

    assert_eq!(json["top"]["tool"], "Cypress");
    assert_eq!(json["top"]["score"], 100.0);
    let results = json["results"].as_array().expect("results array");
    assert_eq!(results.len(), 7);
    assert_eq!(results[1]["tool"], "Selenium");
    assert_eq!(results[1]["score"], 88.8);
    assert!(json["explanation"]
        .as_str()
        .expect("explanation")
        .contains("SDET / Expert"));
}

#[test]
fn cli_top_flag_limits_rows() {
    let output = run_qta(
        &["--top", "3"],
        r#"{"requirements":{"selected":["web","mobile","ai_self_heal","nlp","visual_ai","parallel"],"skill":"beginner"},"top":6}"#,
    );
    let json = stdout_json(&output);

    let results = json["results"].as_array().expect("results array");
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["tool"], "testRigor");
    assert_eq!(results[1]["tool"], "Tricentis Tosca");
    assert_eq!(results[2]["rank"], 3);
}

#[test]
fn cli_uses_explicit_catalog() {
    let dir = tempfile::tempdir().expect("temp dir");
    let catalog_path = dir.path().join("catalog.json");
    std::fs::write(
        &catalog_path,
        r#"{"version":"1.0","tools":[
            {"name":"MobileFirst","features":[0,1,0,1,0,1,0,0,0,0,1,1,0,1,1]},
            {"name":"WebFirst","features":[1,0,0,1,0,1,0,0,0,0,1,0,0,0,1]}
        ]}"#,
    )
    .expect("write catalog");

    let output = run_qta(
        &["--catalog", catalog_path.to_str().expect("utf-8 path")],
        r#"{"requirements":{"selected":["web","api"],"skill":"expert"}}"#,
    );
    let json = stdout_json(&output);

    assert_eq!(json["top"]["tool"], "WebFirst");
    assert_eq!(json["results"].as_array().expect("results").len(), 2);
}

#[test]
fn cli_rejects_narrow_catalog() {
    let dir = tempfile::tempdir().expect("temp dir");
    let catalog_path = dir.path().join("catalog.json");
    std::fs::write(
        &catalog_path,
        r#"{"tools":[{"name":"Narrow","features":[1,0,1]}]}"#,
    )
    .expect("write catalog");

    let output = run_qta(
        &["--catalog", catalog_path.to_str().expect("utf-8 path")],
        r#"{"requirements":{}}"#,
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Schema mismatch"));
}

#[test]
fn cli_rejects_negative_and_out_of_range_dials() {
    let negative = run_qta(
        &[],
        r#"{"requirements":{"selected":["web"]},"weights":{"platform":-1}}"#,
    );
    assert!(!negative.status.success());
    assert!(String::from_utf8_lossy(&negative.stderr).contains("Platform Priority"));

    let too_high = run_qta(
        &[],
        r#"{"requirements":{"selected":["web"]},"weights":{"modern_features":11}}"#,
    );
    assert!(!too_high.status.success());
    assert!(String::from_utf8_lossy(&too_high.stderr).contains("outside the allowed range"));
}

#[test]
fn cli_reports_malformed_input() {
    let output = run_qta(&[], "{ not json");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to parse input JSON"));
}

#[test]
fn cli_accepts_weights_without_requirements() {
    let output = run_qta(
        &[],
        r#"{"weights":{"platform":6,"skill_match":5,"modern_features":3}}"#,
    );
    let json = stdout_json(&output);

    assert_eq!(json["results"].as_array().expect("results array").len(), 7);
    assert!(json["explanation"]
        .as_str()
        .expect("explanation")
        .contains("Manual / Beginner and your 6/10 platform priority"));
}

#[test]
fn cli_table_format() {
    let output = run_qta(
        &["--format", "table", "--top", "2"],
        r#"{"requirements":{"selected":["web","api"],"skill":"expert"}}"#,
    );
    assert!(output.status.success());

    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Cypress"));
    assert!(text.contains("Selenium"));
    assert!(!text.contains("Playwright"));
}

#[test]
fn cli_lists_tools_in_catalog_order() {
    let output = run_qta(&["--list-tools"], "");
    let json = stdout_json(&output);

    let names: Vec<&str> = json["tools"]
        .as_array()
        .expect("tools array")
        .iter()
        .map(|t| t["name"].as_str().expect("name"))
        .collect();
    assert_eq!(
        names,
        vec![
            "Selenium",
            "Playwright",
            "Cypress",
            "Appium",
            "Katalon",
            "testRigor",
            "Tricentis Tosca"
        ]
    );
}
