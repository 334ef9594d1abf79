//! `scriptpack run`

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use scriptpack_core::config::{RunnerConfig, StagingChoice, StagingConfig};
use scriptpack_runner::ExecutionOutcome;

/// Flags of `run` that override the environment config.
#[derive(Debug, Default)]
pub struct RunOptions {
    pub keep: bool,
    pub project_root: Option<PathBuf>,
    pub shared: bool,
    pub staging_dir: Option<PathBuf>,
    pub interpreter: Option<String>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct RunReport<'a> {
    script: &'a str,
    exit_code: i32,
    success: bool,
    output: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    staging_dir: Option<String>,
}

fn apply_overrides(
    opts: &RunOptions,
    mut runner: RunnerConfig,
    mut staging: StagingConfig,
) -> (RunnerConfig, StagingConfig) {
    if opts.keep {
        runner.keep_scripts = true;
    }
    if opts.interpreter.is_some() {
        runner.interpreter = opts.interpreter.clone();
    }
    if let Some(dir) = &opts.staging_dir {
        staging.choice = StagingChoice::Shared(Some(dir.clone()));
    } else if opts.shared {
        staging.choice = StagingChoice::Shared(None);
    }
    (runner, staging)
}

/// Run `script` and return the exit code the process should exit with.
pub fn cmd_run(script: &str, args: &[String], opts: &RunOptions) -> Result<i32> {
    let (runner_cfg, staging_cfg) =
        apply_overrides(opts, RunnerConfig::from_env(), StagingConfig::from_env());
    let runner = super::build_runner(runner_cfg, &staging_cfg, opts.project_root.clone())
        .context("Failed to configure script runner")?;
    tracing::debug!(?runner, "Runner configured");

    let outcome = runner.execute(script, args);
    if opts.json {
        print_report(script, &outcome)?;
    } else {
        print_plain(&outcome)?;
    }
    Ok(outcome.exit_code)
}

fn print_plain(outcome: &ExecutionOutcome) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(outcome.output.as_bytes())?;
    stdout.flush()?;
    if let Some(err) = &outcome.error {
        eprintln!("Error: {}", err);
    }
    Ok(())
}

fn print_report(script: &str, outcome: &ExecutionOutcome) -> Result<()> {
    let report = RunReport {
        script,
        exit_code: outcome.exit_code,
        success: outcome.success(),
        output: &outcome.output,
        error: outcome.error.as_ref().map(|e| e.to_string()),
        staging_dir: outcome
            .staging_dir
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned()),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
