//! The report step: fold task results and artifact status into a verdict.

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::core::checklist::{ReportEnvelope, ReportInput, aggregate};
use crate::error::GateError;
use crate::io::input::{StepInput, parse_json};

/// Positional arguments: tasks JSON, artifacts JSON (`null` allowed).
pub const POSITIONAL_ARGS: usize = 2;

pub fn parse_input(input: StepInput) -> Result<ReportInput> {
    match input {
        StepInput::Document(value) => serde_json::from_value(value)
            .map_err(|err| GateError::configuration(format!("invalid report input: {err}")))
            .context("report input"),
        StepInput::Positional(args) => {
            let [tasks, artifacts] = <[String; POSITIONAL_ARGS]>::try_from(args)
                .map_err(|args| GateError::arguments("report", POSITIONAL_ARGS, args.len()))?;
            let tasks = match parse_json(&tasks, "tasks")? {
                serde_json::Value::Object(map) => map,
                other => {
                    return Err(GateError::configuration(format!(
                        "tasks must be an object, got {other}"
                    ))
                    .into());
                }
            };
            let artifacts = parse_json(&artifacts, "artifacts")?;
            Ok(ReportInput { tasks, artifacts })
        }
    }
}

#[instrument(skip_all)]
pub fn run_report_step(input: StepInput) -> Result<ReportEnvelope> {
    let input = parse_input(input)?;
    debug!(tasks = ?input.tasks, artifacts = %input.artifacts, "report input");

    let report = aggregate(&input).context("aggregate report")?;
    info!(
        status = ?report.status,
        message = %report.message,
        artifact = report.summary.last().map(String::as_str).unwrap_or_default(),
        "report step complete"
    );
    Ok(ReportEnvelope { report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::checklist::{CHECKLIST, ReportStatus};
    use crate::test_support::all_tasks;
    use serde_json::json;

    #[test]
    fn positional_null_artifacts_fail_report() {
        let tasks = serde_json::to_string(&all_tasks()).expect("tasks");
        let envelope =
            run_report_step(StepInput::Positional(vec![tasks, "null".to_string()])).expect("report");
        assert_eq!(envelope.report.status, ReportStatus::Failed);
        assert_eq!(envelope.report.summary.len(), CHECKLIST.len() + 1);
    }

    #[test]
    fn document_input_with_valid_artifact_succeeds() {
        let input = StepInput::Document(json!({
            "tasks": all_tasks(),
            "artifacts": {"valid": true, "size_bytes": 1_048_576},
        }));
        let envelope = run_report_step(input).expect("report");
        assert_eq!(envelope.report.status, ReportStatus::Success);
    }

    #[test]
    fn document_without_artifacts_reads_as_null() {
        let input = StepInput::Document(json!({"tasks": {}}));
        let envelope = run_report_step(input).expect("report");
        assert_eq!(envelope.report.details.artifacts, serde_json::Value::Null);
        assert_eq!(envelope.report.status, ReportStatus::Failed);
    }

    #[test]
    fn positional_tasks_must_be_object() {
        let err = parse_input(StepInput::Positional(vec![
            "[\"formatCheck\"]".to_string(),
            "null".to_string(),
        ]))
        .expect_err("array tasks");
        assert!(err.to_string().contains("tasks must be an object"));
    }
}
