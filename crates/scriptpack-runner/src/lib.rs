//! Stage bundled shell scripts into a working directory and run them.
//!
//! ```no_run
//! use scriptpack_runner::ScriptRunner;
//!
//! let outcome = ScriptRunner::bash().execute("test-script", &["arg1", "arg2"]);
//! println!("{}", outcome.output);
//! std::process::exit(outcome.exit_code);
//! ```

pub mod log;

pub mod asset;
pub mod error;
pub mod extract;
pub mod invocation;
pub mod permissions;
pub mod process;
pub mod runner;
pub mod staging;

pub use asset::{
    AssetEntry, AssetSource, BundledScripts, DirSource, EmbeddedSource, DEFAULT_BASE_DIR,
    SCRIPT_SUFFIX,
};
pub use error::{ErrorKind, ScriptError};
pub use invocation::{
    platform_invocation, CompatShellInvocation, DirectInvocation, Invocation, InvocationBuilder,
};
pub use runner::{resolve_script_name, run_script, ExecutionOutcome, ScriptRunner};
pub use staging::{StagingArea, DEFAULT_STAGING_DIR_NAME};
