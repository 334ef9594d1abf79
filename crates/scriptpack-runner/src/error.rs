//! Errors produced while staging and running a script.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Home directory lookup, staging directory create/clear, override root missing.
    Setup,
    /// Unreadable bundle entry, write or chmod failure while staging.
    Asset,
    /// Script absent after staging, or an unusable script name.
    Validation,
    /// Interpreter missing or not executable.
    Invocation,
    /// The script ran and exited non-zero.
    Script,
}

/// Errors returned by [`crate::ScriptRunner::execute`].
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not determine the user's home directory")]
    HomeDirUnavailable,

    #[error("Failed to {action} staging directory {}", .path.display())]
    Staging {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Scripts directory not found at {}", .path.display())]
    OverrideRootMissing { path: PathBuf },

    #[error("Failed to read asset {name}")]
    AssetRead {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}", .path.display())]
    AssetWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to make script {} executable", .path.display())]
    Permission {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid script name '{0}': names must not contain path components")]
    InvalidScriptName(String),

    #[error("Script '{script}' not found. Available scripts: [{}]", .available.join(", "))]
    ScriptNotFound {
        script: String,
        available: Vec<String>,
    },

    #[error("Failed to start interpreter {}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to wait for script '{script}'")]
    Wait {
        script: String,
        #[source]
        source: io::Error,
    },

    #[error("Script '{script}' exited with code {code}")]
    ScriptFailed { script: String, code: i32 },
}

impl ScriptError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::HomeDirUnavailable | Self::Staging { .. } | Self::OverrideRootMissing { .. } => {
                ErrorKind::Setup
            }
            Self::AssetRead { .. } | Self::AssetWrite { .. } | Self::Permission { .. } => {
                ErrorKind::Asset
            }
            Self::InvalidScriptName(_) | Self::ScriptNotFound { .. } => ErrorKind::Validation,
            Self::Spawn { .. } | Self::Wait { .. } => ErrorKind::Invocation,
            Self::ScriptFailed { .. } => ErrorKind::Script,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_lists_available() {
        let err = ScriptError::ScriptNotFound {
            script: "missing.sh".to_string(),
            available: vec!["a.sh".to_string(), "b.sh".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Script 'missing.sh' not found. Available scripts: [a.sh, b.sh]"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_kinds_follow_pipeline_stage() {
        let io_err = || io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(ScriptError::HomeDirUnavailable.kind(), ErrorKind::Setup);
        assert_eq!(
            ScriptError::AssetWrite {
                path: PathBuf::from("/x"),
                source: io_err()
            }
            .kind(),
            ErrorKind::Asset
        );
        assert_eq!(
            ScriptError::Spawn {
                program: PathBuf::from("bash"),
                source: io_err()
            }
            .kind(),
            ErrorKind::Invocation
        );
        assert_eq!(
            ScriptError::ScriptFailed {
                script: "x.sh".to_string(),
                code: 2
            }
            .kind(),
            ErrorKind::Script
        );
    }
}
