//! The hash step: category cache keys for a CI run.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::core::types::{HashRequest, HashResult};
use crate::error::GateError;
use crate::io::config::{GateConfig, HashOutput, TokenPolicy};
use crate::io::hasher::hash_categories;
use crate::io::input::{StepInput, parse_json};

/// Positional arguments: categories JSON, cache-busting token.
pub const POSITIONAL_ARGS: usize = 2;

/// Settings for one hash step run, resolved from config and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashStepOptions {
    pub root: PathBuf,
    pub token_policy: TokenPolicy,
    pub output: HashOutput,
    pub primary_category: String,
}

impl HashStepOptions {
    pub fn from_config(cfg: &GateConfig) -> Self {
        Self {
            root: cfg.root.clone(),
            token_policy: cfg.hash.token_policy,
            output: cfg.hash.output,
            primary_category: cfg.hash.primary_category.clone(),
        }
    }
}

/// Wrapped output: one category's digest up front plus every digest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WrappedHashes {
    pub stdout: String,
    pub hashes: BTreeMap<String, String>,
}

/// Output document of the hash step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum HashDocument {
    Results(BTreeMap<String, HashResult>),
    Wrapped(WrappedHashes),
}

/// Parse the step input into a [`HashRequest`].
pub fn parse_request(input: StepInput) -> Result<HashRequest> {
    match input {
        StepInput::Document(value) => Ok(HashRequest::from_value(value)?),
        StepInput::Positional(args) => {
            let [categories, token] = <[String; POSITIONAL_ARGS]>::try_from(args)
                .map_err(|args| GateError::arguments("hash", POSITIONAL_ARGS, args.len()))?;
            let categories = parse_json(&categories, "categories")?;
            Ok(HashRequest::from_categories(categories, Some(token))?)
        }
    }
}

/// Run the hash step end to end: parse, hash, shape the output.
#[instrument(skip_all, fields(root = %options.root.display()))]
pub fn run_hash_step(options: &HashStepOptions, input: StepInput) -> Result<HashDocument> {
    let request = parse_request(input).context("hash request")?;
    debug!(
        categories = ?request.categories.keys().collect::<Vec<_>>(),
        workflow_id = ?request.workflow_id,
        "hash request"
    );

    let results = hash_categories(&options.root, &request, options.token_policy)
        .context("hash categories")?;
    debug!(hashes = ?digests(&results), "category digests");

    let document = shape_output(results, options.output, &options.primary_category)?;
    info!("hash step complete");
    Ok(document)
}

/// Arrange results into the requested output shape.
pub fn shape_output(
    results: BTreeMap<String, HashResult>,
    output: HashOutput,
    primary_category: &str,
) -> Result<HashDocument> {
    match output {
        HashOutput::Results => Ok(HashDocument::Results(results)),
        HashOutput::Wrapped => {
            let stdout = results
                .get(primary_category)
                .map(|result| result.digest.clone())
                .ok_or_else(|| {
                    GateError::configuration(format!(
                        "wrapped output needs category '{primary_category}'"
                    ))
                })?;
            Ok(HashDocument::Wrapped(WrappedHashes {
                stdout,
                hashes: digests(&results),
            }))
        }
    }
}

fn digests(results: &BTreeMap<String, HashResult>) -> BTreeMap<String, String> {
    results
        .iter()
        .map(|(name, result)| (name.clone(), result.digest.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::digest::EMPTY_DIGEST;
    use crate::test_support::write_file;
    use serde_json::json;

    fn options(root: PathBuf, output: HashOutput) -> HashStepOptions {
        HashStepOptions {
            root,
            token_policy: TokenPolicy::Log,
            output,
            primary_category: "all_sources".to_string(),
        }
    }

    #[test]
    fn positional_input_parses_categories_and_token() {
        let input = StepInput::Positional(vec![
            r#"{"rust": {"patterns": ["src/**/*.rs"]}}"#.to_string(),
            "wf-42".to_string(),
        ]);
        let request = parse_request(input).expect("request");
        assert_eq!(request.workflow_id.as_deref(), Some("wf-42"));
        assert_eq!(request.categories["rust"].patterns, vec!["src/**/*.rs"]);
    }

    #[test]
    fn document_without_categories_is_configuration_error() {
        let err = parse_request(StepInput::Document(json!({"workflow_id": "x"})))
            .expect_err("missing categories");
        assert!(
            err.chain()
                .any(|cause| matches!(
                    cause.downcast_ref::<GateError>(),
                    Some(GateError::Configuration { .. })
                ))
        );
    }

    #[test]
    fn results_output_lists_every_category() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_file(temp.path(), "src/lib.rs", "lib");
        let input = StepInput::Document(json!({
            "categories": {
                "rust": {"patterns": ["src/**/*.rs"]},
                "go": {"patterns": ["**/*.go"]},
            }
        }));

        let opts = options(temp.path().to_path_buf(), HashOutput::Results);
        let document = run_hash_step(&opts, input).expect("hash");
        let HashDocument::Results(results) = document else {
            panic!("expected results output");
        };
        assert_eq!(results["go"].digest, EMPTY_DIGEST);
        assert_eq!(results["rust"].files, vec!["src/lib.rs"]);
    }

    #[test]
    fn wrapped_output_uses_primary_category() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_file(temp.path(), "src/lib.rs", "lib");
        let input = StepInput::Document(json!({
            "categories": {
                "all_sources": {"patterns": ["**/*"]},
                "go": {"patterns": ["**/*.go"]},
            }
        }));

        let opts = options(temp.path().to_path_buf(), HashOutput::Wrapped);
        let document = run_hash_step(&opts, input).expect("hash");
        let HashDocument::Wrapped(wrapped) = document else {
            panic!("expected wrapped output");
        };
        assert_eq!(wrapped.stdout, wrapped.hashes["all_sources"]);
        assert_eq!(wrapped.hashes["go"], EMPTY_DIGEST);
        let encoded = serde_json::to_value(HashDocument::Wrapped(wrapped.clone())).expect("encode");
        assert_eq!(encoded["stdout"], json!(wrapped.stdout));
    }

    #[test]
    fn wrapped_output_requires_primary_category() {
        let results = BTreeMap::new();
        let err = shape_output(results, HashOutput::Wrapped, "all_sources").expect_err("missing");
        assert!(err.to_string().contains("all_sources"));
    }
}
