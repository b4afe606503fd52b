//! CLI tests for `gate report`.

use std::process::{Command, Output};

use gate::core::checklist::{FAILURE_MESSAGE, SUCCESS_MESSAGE};
use gate::exit_codes;
use gate::test_support::{SourceTree, all_tasks, tasks_except};
use serde_json::{Value, json};

fn gate(tree: &SourceTree, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gate"))
        .current_dir(tree.root())
        .args(args)
        .output()
        .expect("gate report")
}

fn report_json(output: &Output) -> Value {
    let document: Value = serde_json::from_slice(&output.stdout).expect("json");
    document["report"].clone()
}

#[test]
fn full_pass_reports_success() {
    let tree = SourceTree::new().expect("tree");
    let tasks = serde_json::to_string(&all_tasks()).expect("tasks");
    let artifacts = json!({"valid": true, "size_bytes": 1_048_576}).to_string();

    let output = gate(
        &tree,
        &["--input-mode", "positional", "report", &tasks, &artifacts],
    );

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let report = report_json(&output);
    assert_eq!(report["status"], json!("success"));
    assert_eq!(report["message"], json!(SUCCESS_MESSAGE));
    assert_eq!(
        report["summary"][7],
        json!("✓ Binary verified: 1.00 MB (1048576 bytes)")
    );
}

#[test]
fn one_missing_task_keeps_success() {
    let tree = SourceTree::new().expect("tree");
    let input = json!({
        "tasks": tasks_except(&["nestedWorkflowTests"]),
        "artifacts": {"valid": true, "size_bytes": 4096},
    });
    tree.write("report.json", &input.to_string());

    let output = gate(&tree, &["report", "--input", "report.json"]);

    let report = report_json(&output);
    assert_eq!(report["status"], json!("success"));
    assert_eq!(report["summary"][5], json!("? nestedWorkflowTests: not found"));
}

#[test]
fn null_artifacts_fail_with_exit_status() {
    let tree = SourceTree::new().expect("tree");
    let tasks = serde_json::to_string(&all_tasks()).expect("tasks");

    let output = gate(
        &tree,
        &[
            "--input-mode",
            "positional",
            "report",
            "--exit-status",
            &tasks,
            "null",
        ],
    );

    assert_eq!(output.status.code(), Some(exit_codes::REPORT_FAILED));
    let report = report_json(&output);
    assert_eq!(report["status"], json!("failed"));
    assert_eq!(report["message"], json!(FAILURE_MESSAGE));
    assert_eq!(report["details"]["artifacts"], Value::Null);
}

#[test]
fn failed_report_without_exit_status_exits_ok() {
    let tree = SourceTree::new().expect("tree");
    let output = gate(
        &tree,
        &["--input-mode", "positional", "report", "{}", "null"],
    );

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(report_json(&output)["status"], json!("failed"));
}

#[test]
fn malformed_tasks_json_is_invalid() {
    let tree = SourceTree::new().expect("tree");
    let output = gate(
        &tree,
        &["--input-mode", "positional", "report", "{tasks", "null"],
    );

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("tasks is not valid JSON"));
}
