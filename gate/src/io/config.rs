//! Gate configuration, read from `.ci/gate.toml` by default.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".ci/gate.toml";

/// Gate configuration (TOML).
///
/// Every field is optional in the file; missing fields take the defaults
/// below. CLI flags override whatever the file says.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GateConfig {
    /// Directory relative hash patterns are expanded against.
    pub root: PathBuf,

    /// How steps receive their inputs.
    pub input_mode: InputMode,

    pub hash: HashConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HashConfig {
    /// Whether the cache-busting token feeds the digest.
    pub token_policy: TokenPolicy,

    /// Shape of the hash step's output document.
    pub output: HashOutput,

    /// Category whose digest becomes `stdout` in the wrapped output.
    pub primary_category: String,
}

/// Step input convention.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// One JSON document from `--input` or stdin.
    #[default]
    Document,
    /// Positional CLI arguments, JSON-encoded where structured.
    Positional,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TokenPolicy {
    /// Log the token, keep it out of the digest.
    #[default]
    Log,
    /// Append the token's bytes to every category digest.
    Mix,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum HashOutput {
    /// `{category: {digest, files, count}}`.
    #[default]
    Results,
    /// `{"stdout": <primary digest>, "hashes": {category: digest}}`.
    Wrapped,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            token_policy: TokenPolicy::default(),
            output: HashOutput::default(),
            primary_category: "all_sources".to_string(),
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            input_mode: InputMode::default(),
            hash: HashConfig::default(),
        }
    }
}

impl GateConfig {
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(anyhow!("root must be non-empty"));
        }
        if self.hash.primary_category.trim().is_empty() {
            return Err(anyhow!("hash.primary_category must be non-empty"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `GateConfig::default()`.
pub fn load_config(path: &Path) -> Result<GateConfig> {
    if !path.exists() {
        let cfg = GateConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: GateConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
