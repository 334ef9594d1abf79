//! `scriptpack list`

use std::path::PathBuf;

use anyhow::{Context, Result};

use scriptpack_core::config::{RunnerConfig, StagingConfig};

pub fn cmd_list(project_root: Option<PathBuf>, json: bool) -> Result<()> {
    // listing never stages, so the staging mode is irrelevant
    let runner = super::build_runner(RunnerConfig::from_env(), &StagingConfig::default(), project_root)?;
    let names = runner
        .available_scripts()
        .context("Failed to list available scripts")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        for name in &names {
            println!("{}", name);
        }
    }
    Ok(())
}
