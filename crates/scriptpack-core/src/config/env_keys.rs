//! Environment variable keys.
//!
//! Every variable uses the `SCRIPTPACK_*` prefix.

/// Script runner behaviour
pub mod runner {
    /// Keep staged scripts after a run instead of tearing the staging area down.
    pub const SCRIPTPACK_KEEP_SCRIPTS: &str = "SCRIPTPACK_KEEP_SCRIPTS";

    /// Source scripts from `<root>/bash_scripts` instead of the bundled assets.
    pub const SCRIPTPACK_PROJECT_ROOT: &str = "SCRIPTPACK_PROJECT_ROOT";

    /// Interpreter used on the direct invocation path.
    pub const SCRIPTPACK_INTERPRETER: &str = "SCRIPTPACK_INTERPRETER";
}

/// Staging area
pub mod staging {
    /// `unique` (default) or `shared`.
    pub const SCRIPTPACK_STAGING: &str = "SCRIPTPACK_STAGING";

    /// Explicit shared staging directory. Setting it implies `shared`.
    pub const SCRIPTPACK_STAGING_DIR: &str = "SCRIPTPACK_STAGING_DIR";
}

/// Observability and logging
pub mod observability {
    pub const SCRIPTPACK_QUIET: &str = "SCRIPTPACK_QUIET";

    pub const SCRIPTPACK_LOG_LEVEL: &str = "SCRIPTPACK_LOG_LEVEL";

    pub const SCRIPTPACK_LOG_JSON: &str = "SCRIPTPACK_LOG_JSON";

    pub const SCRIPTPACK_AUDIT_LOG: &str = "SCRIPTPACK_AUDIT_LOG";
}
