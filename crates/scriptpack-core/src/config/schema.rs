//! Configuration structs grouped by concern, loaded from the environment.

use super::env_keys::{observability as obv_keys, runner as runner_keys, staging as staging_keys};
use super::loader::{env_bool, env_optional, env_or};
use std::path::PathBuf;

/// Script runner settings.
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    /// Keep staged scripts after the run.
    pub keep_scripts: bool,
    /// Override root: scripts are copied from `<root>/bash_scripts`.
    pub project_root: Option<PathBuf>,
    /// Interpreter override for the direct invocation path.
    pub interpreter: Option<String>,
}

impl RunnerConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self {
            keep_scripts: env_bool(runner_keys::SCRIPTPACK_KEEP_SCRIPTS, false),
            project_root: env_optional(runner_keys::SCRIPTPACK_PROJECT_ROOT)
                .map(PathBuf::from),
            interpreter: env_optional(runner_keys::SCRIPTPACK_INTERPRETER),
        }
    }
}

/// Where executions stage their scripts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StagingChoice {
    /// Fresh directory per execution.
    #[default]
    Unique,
    /// One reused directory. `None` means the per-user default location.
    Shared(Option<PathBuf>),
}

/// Staging area settings.
#[derive(Debug, Clone, Default)]
pub struct StagingConfig {
    pub choice: StagingChoice,
}

impl StagingConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        let dir = env_optional(staging_keys::SCRIPTPACK_STAGING_DIR).map(PathBuf::from);
        if dir.is_some() {
            return Self {
                choice: StagingChoice::Shared(dir),
            };
        }

        let choice = match env_optional(staging_keys::SCRIPTPACK_STAGING) {
            None => StagingChoice::Unique,
            Some(mode) => match mode.to_lowercase().as_str() {
                "unique" => StagingChoice::Unique,
                "shared" => StagingChoice::Shared(None),
                _ => {
                    tracing::warn!("Invalid SCRIPTPACK_STAGING: {}, using default (unique)", mode);
                    StagingChoice::Unique
                }
            },
        };
        Self { choice }
    }
}

/// Observability settings: quiet, log_level, log_json, audit_log.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
    pub audit_log: Option<String>,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| {
            super::loader::load_dotenv();
            Self {
                quiet: env_bool(obv_keys::SCRIPTPACK_QUIET, false),
                log_level: env_or(obv_keys::SCRIPTPACK_LOG_LEVEL, || {
                    "scriptpack=info".to_string()
                }),
                log_json: env_bool(obv_keys::SCRIPTPACK_LOG_JSON, false),
                audit_log: env_optional(obv_keys::SCRIPTPACK_AUDIT_LOG),
            }
        })
    }
}
