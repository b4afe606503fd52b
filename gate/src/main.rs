//! `gate`: deterministic CI verification steps.
//!
//! Each subcommand is one workflow step. The result is a single JSON
//! document on stdout; diagnostics go to stderr.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use gate::artifact::{self, run_artifact_step};
use gate::core::checklist::ReportStatus;
use gate::exit_codes;
use gate::hash::{self, HashStepOptions, run_hash_step};
use gate::io::config::{DEFAULT_CONFIG_PATH, HashOutput, InputMode, TokenPolicy, load_config};
use gate::io::input::resolve_input;
use gate::io::output::print_json;
use gate::logging;
use gate::report::{self, run_report_step};

#[derive(Parser)]
#[command(name = "gate", version, about = "Deterministic CI verification steps")]
struct Cli {
    /// Config file (TOML). Missing file means defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the configured input convention.
    #[arg(long, global = true, value_enum)]
    input_mode: Option<InputMode>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute per-category content digests for cache keys.
    Hash {
        /// JSON input document (document mode). Defaults to stdin.
        #[arg(long)]
        input: Option<PathBuf>,
        /// Directory relative patterns are expanded against.
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long, value_enum)]
        output: Option<HashOutput>,
        #[arg(long, value_enum)]
        token_policy: Option<TokenPolicy>,
        /// Positional mode: categories JSON, cache-busting token.
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Check that a build artifact exists and is executable.
    Artifact {
        #[arg(long)]
        input: Option<PathBuf>,
        /// Positional mode: binary path.
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Summarize task results and artifact status into a CI verdict.
    Report {
        #[arg(long)]
        input: Option<PathBuf>,
        /// Exit with a distinct code when the report status is failed.
        #[arg(long)]
        exit_status: bool,
        /// Positional mode: tasks JSON, artifacts JSON.
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::for_error(&err)
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let mut cfg = load_config(&cli.config)?;
    if let Some(mode) = cli.input_mode {
        cfg.input_mode = mode;
    }

    match cli.command {
        Command::Hash {
            input,
            root,
            output,
            token_policy,
            args,
        } => {
            let mut options = HashStepOptions::from_config(&cfg);
            if let Some(root) = root {
                options.root = root;
            }
            if let Some(output) = output {
                options.output = output;
            }
            if let Some(token_policy) = token_policy {
                options.token_policy = token_policy;
            }
            let step_input = resolve_input(
                cfg.input_mode,
                "hash",
                hash::POSITIONAL_ARGS,
                input.as_deref(),
                &args,
            )?;
            print_json(&run_hash_step(&options, step_input)?)?;
            Ok(exit_codes::OK)
        }
        Command::Artifact { input, args } => {
            let step_input = resolve_input(
                cfg.input_mode,
                "artifact",
                artifact::POSITIONAL_ARGS,
                input.as_deref(),
                &args,
            )?;
            print_json(&run_artifact_step(step_input)?)?;
            Ok(exit_codes::OK)
        }
        Command::Report {
            input,
            exit_status,
            args,
        } => {
            let step_input = resolve_input(
                cfg.input_mode,
                "report",
                report::POSITIONAL_ARGS,
                input.as_deref(),
                &args,
            )?;
            let envelope = run_report_step(step_input)?;
            print_json(&envelope)?;
            if exit_status && envelope.report.status == ReportStatus::Failed {
                return Ok(exit_codes::REPORT_FAILED);
            }
            Ok(exit_codes::OK)
        }
    }
}
