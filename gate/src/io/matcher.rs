//! Glob expansion for category patterns.

use std::path::Path;

use glob::{MatchOptions, Pattern};
use tracing::{debug, warn};

use crate::core::types::MatchedPath;
use crate::error::GateError;

/// `*` stays within one path component and skips dotfiles; `**` recurses.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Expand every pattern and concatenate the matches, in pattern order.
///
/// Overlapping patterns yield the same path more than once; nothing is
/// deduplicated. Directories that cannot be traversed are logged and
/// skipped. An unparsable pattern is a configuration error.
pub fn expand_patterns(root: &Path, patterns: &[String]) -> Result<Vec<MatchedPath>, GateError> {
    let mut matches = Vec::new();
    for pattern in patterns {
        let expanded = expand_pattern(root, pattern)?;
        debug!(pattern = %pattern, matched = expanded.len(), "pattern expanded");
        matches.extend(expanded);
    }
    Ok(matches)
}

fn expand_pattern(root: &Path, pattern: &str) -> Result<Vec<MatchedPath>, GateError> {
    let relative = !Path::new(pattern).is_absolute();
    let full_pattern = if relative {
        let escaped_root = Pattern::escape(&root.to_string_lossy());
        format!("{}/{}", escaped_root.trim_end_matches('/'), pattern)
    } else {
        pattern.to_string()
    };

    let entries = glob::glob_with(&full_pattern, MATCH_OPTIONS)
        .map_err(|err| GateError::configuration(format!("invalid pattern '{pattern}': {err}")))?;

    let mut matches = Vec::new();
    for entry in entries {
        match entry {
            Ok(full) => {
                let display = display_path(root, &full, relative);
                matches.push(MatchedPath { display, full });
            }
            Err(err) => {
                warn!(
                    pattern = %pattern,
                    path = %err.path().display(),
                    error = %err.error(),
                    "skipping unreadable path"
                );
            }
        }
    }
    Ok(matches)
}

/// Paths from relative patterns lose the root text but keep the pattern's own
/// spelling, so `./b/*.rs` reports `./b/x.rs`. Sorting happens on this text.
fn display_path(root: &Path, full: &Path, relative: bool) -> String {
    let full_text = full.to_string_lossy();
    if !relative {
        return full_text.into_owned();
    }
    let root_prefix = format!("{}/", root.to_string_lossy().trim_end_matches('/'));
    match full_text.strip_prefix(root_prefix.as_str()) {
        Some(rest) => rest.to_string(),
        None => full
            .strip_prefix(root)
            .unwrap_or(full)
            .to_string_lossy()
            .into_owned(),
    }
}
