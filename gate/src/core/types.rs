//! Hash step data model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GateError;

/// Glob patterns for one named category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySpec {
    /// Patterns in declaration order. `**` matches across directories.
    pub patterns: Vec<String>,
}

/// Input of the hash step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HashRequest {
    pub categories: BTreeMap<String, CategorySpec>,
    /// Cache-busting token. Opaque; only hashed under the `mix` token policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
}

impl HashRequest {
    /// Parse a `{"categories": .., "workflow_id": ..}` document.
    pub fn from_value(value: Value) -> Result<Self, GateError> {
        serde_json::from_value(value)
            .map_err(|err| GateError::configuration(format!("invalid hash request: {err}")))
    }

    /// Build a request from a bare categories mapping and a token.
    pub fn from_categories(
        categories: Value,
        workflow_id: Option<String>,
    ) -> Result<Self, GateError> {
        let categories = serde_json::from_value(categories)
            .map_err(|err| GateError::configuration(format!("invalid categories: {err}")))?;
        Ok(Self {
            categories,
            workflow_id,
        })
    }
}

/// Digest and matched paths for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HashResult {
    /// Lowercase hex SHA-256.
    pub digest: String,
    /// Matched paths in hashing order, duplicates included.
    pub files: Vec<String>,
    pub count: usize,
}

/// A filesystem match for a category pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPath {
    /// Path as reported in [`HashResult::files`].
    pub display: String,
    /// Path used to open the file.
    pub full: std::path::PathBuf,
}
