//! JSON output for step results.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

/// Serialize `value` as pretty-printed JSON with a trailing newline.
pub fn write_json<W: Write, T: Serialize>(mut writer: W, value: &T) -> Result<()> {
    let mut payload = serde_json::to_string_pretty(value).context("serialize json")?;
    payload.push('\n');
    writer
        .write_all(payload.as_bytes())
        .context("write json output")?;
    writer.flush().context("flush json output")?;
    Ok(())
}

/// Write the step's single result document to stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    write_json(std::io::stdout().lock(), value)
}
