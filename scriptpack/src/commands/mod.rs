//! Subcommand implementations.

pub mod list;
pub mod readme;
pub mod run;

use anyhow::Result;
use scriptpack_core::config::{RunnerConfig, StagingConfig};
use scriptpack_runner::ScriptRunner;

/// Runner from env config with the flags common to `run` and `list` applied.
pub(crate) fn build_runner(
    mut runner_cfg: RunnerConfig,
    staging_cfg: &StagingConfig,
    project_root: Option<std::path::PathBuf>,
) -> Result<ScriptRunner> {
    if project_root.is_some() {
        runner_cfg.project_root = project_root;
    }
    Ok(ScriptRunner::from_config(&runner_cfg, staging_cfg)?)
}
