//! ScriptRunner: the stage → extract → chmod → validate → invoke pipeline.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use scriptpack_core::config::{RunnerConfig, StagingConfig};
use scriptpack_core::observability;

use crate::asset::{is_script_name, AssetSource, EmbeddedSource, DEFAULT_BASE_DIR, SCRIPT_SUFFIX};
use crate::error::ScriptError;
use crate::extract::{copy_dir_flat, extract_flat};
use crate::invocation::{platform_invocation, DirectInvocation, InvocationBuilder};
use crate::permissions::make_executable;
use crate::process::{run_invocation, FAILURE_EXIT_CODE};
use crate::staging::StagingArea;

/// Result of one execution.
///
/// `error` is set whenever `exit_code != 0`. Setup failures report exit code 1
/// and empty output.
#[derive(Debug)]
pub struct ExecutionOutcome {
    pub exit_code: i32,
    pub output: String,
    pub error: Option<ScriptError>,
    /// Directory the script was staged in, if staging got that far.
    pub staging_dir: Option<PathBuf>,
}

impl ExecutionOutcome {
    fn failed(error: ScriptError, staging_dir: Option<PathBuf>) -> Self {
        Self {
            exit_code: FAILURE_EXIT_CODE,
            output: String::new(),
            error: Some(error),
            staging_dir,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0 && self.error.is_none()
    }

    /// Output on success, the error otherwise.
    pub fn into_result(self) -> Result<String, ScriptError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.output),
        }
    }
}

/// Where the runner takes its scripts from.
enum ScriptOrigin<'a> {
    Source(&'a dyn AssetSource),
    OverrideRoot(PathBuf),
}

pub struct ScriptRunner {
    source: Arc<dyn AssetSource>,
    base_dir: String,
    invocation: Box<dyn InvocationBuilder>,
    clean_scripts: bool,
    project_root: Option<PathBuf>,
    staging: StagingArea,
}

impl fmt::Debug for ScriptRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptRunner")
            .field("source", &self.source.name())
            .field("base_dir", &self.base_dir)
            .field("invocation", &self.invocation)
            .field("clean_scripts", &self.clean_scripts)
            .field("project_root", &self.project_root)
            .field("staging", &self.staging)
            .finish()
    }
}

impl Default for ScriptRunner {
    fn default() -> Self {
        Self::bash()
    }
}

impl ScriptRunner {
    /// Bundled `bash_scripts`, host-platform bash, unique staging, clean-up on.
    pub fn bash() -> Self {
        Self {
            source: Arc::new(EmbeddedSource::bundled()),
            base_dir: DEFAULT_BASE_DIR.to_string(),
            invocation: platform_invocation(None),
            clean_scripts: true,
            project_root: None,
            staging: StagingArea::default(),
        }
    }

    /// Runner over any source, launching scripts with `interpreter` directly.
    pub fn custom(
        source: Arc<dyn AssetSource>,
        base_dir: impl Into<String>,
        interpreter: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            base_dir: base_dir.into(),
            invocation: Box::new(DirectInvocation::new(interpreter)),
            clean_scripts: true,
            project_root: None,
            staging: StagingArea::default(),
        }
    }

    /// Bash runner configured from [`RunnerConfig`] and [`StagingConfig`].
    pub fn from_config(
        runner: &RunnerConfig,
        staging: &StagingConfig,
    ) -> Result<Self, ScriptError> {
        let mut this = Self::bash()
            .keep_scripts(runner.keep_scripts)
            .with_staging(StagingArea::from_config(staging)?);
        if let Some(interpreter) = runner.interpreter.as_deref() {
            this = this.with_invocation(platform_invocation(Some(interpreter)));
        }
        if let Some(root) = runner.project_root.clone() {
            this = this.with_project_root(root);
        }
        Ok(this)
    }

    /// Copy scripts from `<root>/<base_dir>` instead of the asset source.
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    pub fn with_staging(mut self, staging: StagingArea) -> Self {
        self.staging = staging;
        self
    }

    pub fn with_invocation(mut self, invocation: Box<dyn InvocationBuilder>) -> Self {
        self.invocation = invocation;
        self
    }

    /// Leave staged scripts in place after each run when `keep` is true.
    pub fn keep_scripts(mut self, keep: bool) -> Self {
        self.clean_scripts = !keep;
        self
    }

    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    pub fn invocation(&self) -> &dyn InvocationBuilder {
        self.invocation.as_ref()
    }

    fn origin(&self) -> ScriptOrigin<'_> {
        match &self.project_root {
            Some(root) => ScriptOrigin::OverrideRoot(root.join(&self.base_dir)),
            None => ScriptOrigin::Source(self.source.as_ref()),
        }
    }

    /// Sorted `.sh` names an execution would stage. Nothing is written.
    pub fn available_scripts(&self) -> Result<Vec<String>, ScriptError> {
        let mut names: Vec<String> = match self.origin() {
            ScriptOrigin::Source(source) => source
                .list(&self.base_dir)
                .map_err(|e| ScriptError::AssetRead {
                    name: self.base_dir.clone(),
                    source: e,
                })?
                .into_iter()
                .filter(|e| !e.is_dir && is_script_name(&e.name))
                .map(|e| e.name)
                .collect(),
            ScriptOrigin::OverrideRoot(dir) => {
                if !dir.is_dir() {
                    return Err(ScriptError::OverrideRootMissing { path: dir });
                }
                let read_err = |e: std::io::Error| ScriptError::AssetRead {
                    name: dir.display().to_string(),
                    source: e,
                };
                let mut names = Vec::new();
                for entry in std::fs::read_dir(&dir).map_err(read_err)? {
                    let entry = entry.map_err(read_err)?;
                    let name = entry.file_name().to_string_lossy().into_owned();
                    if entry.path().is_file() && is_script_name(&name) {
                        names.push(name);
                    }
                }
                names
            }
        };
        names.sort();
        Ok(names)
    }

    /// Stage the scripts and run `name` with `args`.
    pub fn execute<S: AsRef<str>>(&self, name: &str, args: &[S]) -> ExecutionOutcome {
        let script = resolve_script_name(name);
        let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();

        let dir = match self.staging.resolve() {
            Ok(dir) => dir,
            Err(e) => return ExecutionOutcome::failed(e, None),
        };
        let result = match self.staging.prepare(&dir, self.clean_scripts) {
            Ok(_guard) => self.run_staged(&script, &args, &dir),
            Err(e) => Err(e),
        };

        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(script = %script, "Execution aborted: {}", e);
                ExecutionOutcome::failed(e, Some(dir))
            }
        }
    }

    fn run_staged(
        &self,
        script: &str,
        args: &[String],
        dir: &Path,
    ) -> Result<ExecutionOutcome, ScriptError> {
        let staged = match self.origin() {
            ScriptOrigin::Source(source) => extract_flat(source, &self.base_dir, dir)?,
            ScriptOrigin::OverrideRoot(src) => copy_dir_flat(&src, dir)?,
        };
        make_executable(dir)?;

        let script_path = validate_script(script, dir, &staged)?;
        let invocation = self.invocation.build(&script_path, args);

        crate::info_log!(
            script = %script,
            builder = self.invocation.name(),
            "Running {} with {} argument(s)",
            script,
            args.len()
        );
        observability::audit_execution_started(
            script,
            &invocation.program.to_string_lossy(),
            &invocation.display_args(),
            &dir.to_string_lossy(),
        );

        let started = Instant::now();
        let result = run_invocation(&invocation, dir, script)?;
        let duration_ms = started.elapsed().as_millis() as u64;

        observability::audit_execution_completed(
            script,
            result.exit_code,
            duration_ms,
            result.output.len(),
        );
        crate::info_log!(
            script = %script,
            exit_code = result.exit_code,
            duration_ms,
            "Script finished"
        );

        let error = (result.exit_code != 0).then(|| ScriptError::ScriptFailed {
            script: script.to_string(),
            code: result.exit_code,
        });
        Ok(ExecutionOutcome {
            exit_code: result.exit_code,
            output: result.output,
            error,
            staging_dir: Some(dir.to_path_buf()),
        })
    }
}

/// Append `.sh` when `name` has no extension.
pub fn resolve_script_name(name: &str) -> String {
    if Path::new(name).extension().is_none() {
        format!("{}{}", name, SCRIPT_SUFFIX)
    } else {
        name.to_string()
    }
}

fn validate_script(script: &str, dir: &Path, staged: &[String]) -> Result<PathBuf, ScriptError> {
    let is_plain = !script.is_empty()
        && !script.contains('/')
        && !script.contains('\\')
        && script != "."
        && script != "..";
    if !is_plain {
        return Err(ScriptError::InvalidScriptName(script.to_string()));
    }

    let path = dir.join(script);
    if !path.is_file() {
        let mut available = staged.to_vec();
        available.sort();
        return Err(ScriptError::ScriptNotFound {
            script: script.to_string(),
            available,
        });
    }
    Ok(path)
}

/// Run `name` once with the default bash runner.
pub fn run_script<S: AsRef<str>>(name: &str, args: &[S]) -> ExecutionOutcome {
    ScriptRunner::bash().execute(name, args)
}
