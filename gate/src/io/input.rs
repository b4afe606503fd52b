//! Step input plumbing for the two invocation conventions.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::GateError;
use crate::io::config::InputMode;

/// Raw step input before a step parses it into its typed request.
#[derive(Debug, Clone, PartialEq)]
pub enum StepInput {
    /// A single JSON document.
    Document(Value),
    /// Positional arguments, count already checked.
    Positional(Vec<String>),
}

/// Resolve a step's input according to the selected mode.
///
/// In `document` mode the document comes from `input_path`, or stdin when
/// no path is given, and positional arguments are rejected. In `positional`
/// mode exactly `expected` arguments must be present.
pub fn resolve_input(
    mode: InputMode,
    step: &'static str,
    expected: usize,
    input_path: Option<&Path>,
    args: &[String],
) -> Result<StepInput> {
    match mode {
        InputMode::Document => {
            if !args.is_empty() {
                return Err(GateError::arguments(step, 0, args.len()))
                    .context("document mode reads --input or stdin, not arguments");
            }
            let raw = match input_path {
                Some(path) => fs::read_to_string(path)
                    .with_context(|| format!("read input document {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("read input document from stdin")?;
                    buf
                }
            };
            Ok(StepInput::Document(parse_json(&raw, "input document")?))
        }
        InputMode::Positional => {
            if args.len() != expected {
                return Err(GateError::arguments(step, expected, args.len()).into());
            }
            Ok(StepInput::Positional(args.to_vec()))
        }
    }
}

/// Parse a JSON argument or document. Malformed JSON is a configuration error.
pub fn parse_json(raw: &str, label: &str) -> Result<Value> {
    let value = serde_json::from_str(raw)
        .map_err(|err| GateError::configuration(format!("{label} is not valid JSON: {err}")))?;
    Ok(value)
}
