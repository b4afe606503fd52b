//! The artifact step: is the release binary there and runnable?

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::core::artifact::ArtifactDescriptor;
use crate::error::GateError;
use crate::io::input::StepInput;
use crate::io::probe::inspect_artifact;

/// Positional arguments: binary path.
pub const POSITIONAL_ARGS: usize = 1;

/// Input document of the artifact step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactInput {
    pub binary_path: String,
}

pub fn parse_input(input: StepInput) -> Result<ArtifactInput> {
    match input {
        StepInput::Document(value) => serde_json::from_value(value)
            .map_err(|err| GateError::configuration(format!("invalid artifact input: {err}")))
            .context("artifact input"),
        StepInput::Positional(mut args) => {
            if args.len() != POSITIONAL_ARGS {
                return Err(GateError::arguments("artifact", POSITIONAL_ARGS, args.len()).into());
            }
            Ok(ArtifactInput {
                binary_path: args.remove(0),
            })
        }
    }
}

#[instrument(skip_all)]
pub fn run_artifact_step(input: StepInput) -> Result<ArtifactDescriptor> {
    let input = parse_input(input)?;
    let artifact = inspect_artifact(&input.binary_path);
    info!(path = %artifact.path(), valid = artifact.valid(), "artifact step complete");
    Ok(artifact)
}
