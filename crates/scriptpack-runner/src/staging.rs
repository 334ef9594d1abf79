//! Staging area: the writable directory scripts are materialized into.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use scriptpack_core::config::{StagingChoice, StagingConfig};

use crate::error::ScriptError;

/// Directory name under the user's home for the shared per-user staging area.
pub const DEFAULT_STAGING_DIR_NAME: &str = ".scriptpack";

const UNIQUE_PREFIX: &str = "scriptpack-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagingArea {
    /// Fresh `scriptpack-<uuid>` directory under `parent` for every execution.
    Unique { parent: PathBuf },
    /// One fixed directory reused by every execution. Callers serialize.
    Shared(PathBuf),
}

impl Default for StagingArea {
    fn default() -> Self {
        Self::unique()
    }
}

impl StagingArea {
    pub fn unique() -> Self {
        Self::unique_in(std::env::temp_dir())
    }

    pub fn unique_in(parent: impl Into<PathBuf>) -> Self {
        Self::Unique {
            parent: parent.into(),
        }
    }

    pub fn shared(path: impl Into<PathBuf>) -> Self {
        Self::Shared(path.into())
    }

    /// Shared staging at `<home>/<dir_name>`.
    pub fn user_scoped(dir_name: &str) -> Result<Self, ScriptError> {
        let home = dirs::home_dir().ok_or(ScriptError::HomeDirUnavailable)?;
        Ok(Self::Shared(home.join(dir_name)))
    }

    pub fn from_config(config: &StagingConfig) -> Result<Self, ScriptError> {
        match &config.choice {
            StagingChoice::Unique => Ok(Self::unique()),
            StagingChoice::Shared(Some(path)) => Ok(Self::shared(path.clone())),
            StagingChoice::Shared(None) => Self::user_scoped(DEFAULT_STAGING_DIR_NAME),
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Shared(_))
    }

    /// Pick the directory for one execution and make sure it exists.
    pub fn resolve(&self) -> Result<PathBuf, ScriptError> {
        let path = match self {
            Self::Unique { parent } => {
                absolutize(parent)?.join(format!("{}{}", UNIQUE_PREFIX, uuid::Uuid::new_v4()))
            }
            Self::Shared(path) => absolutize(path)?,
        };
        create_dir(&path).map_err(|source| ScriptError::Staging {
            action: "create",
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Delete the tree at `path` and recreate it empty.
    pub fn reset(&self, path: &Path) -> Result<(), ScriptError> {
        remove_tree(path).map_err(|source| ScriptError::Staging {
            action: "clear",
            path: path.to_path_buf(),
            source,
        })?;
        create_dir(path).map_err(|source| ScriptError::Staging {
            action: "recreate",
            path: path.to_path_buf(),
            source,
        })
    }

    /// Remove what an execution left behind. Failures are logged only.
    pub fn teardown(&self, path: &Path) {
        if let Err(e) = remove_tree(path) {
            tracing::warn!(path = %path.display(), "Failed to remove staging directory: {}", e);
            return;
        }
        if self.is_shared() {
            if let Err(e) = create_dir(path) {
                tracing::warn!(path = %path.display(), "Failed to recreate staging directory: {}", e);
            }
        }
    }

    /// Arm the teardown guard, then reset `path`.
    ///
    /// If the reset fails the guard is dropped on the way out, so a unique
    /// directory created by [`Self::resolve`] does not outlive the error.
    pub fn prepare<'a>(
        &'a self,
        path: &'a Path,
        clean: bool,
    ) -> Result<TeardownGuard<'a>, ScriptError> {
        let guard = self.guard(path, clean);
        self.reset(path)?;
        Ok(guard)
    }

    /// Guard that runs [`Self::teardown`] on drop when `enabled`.
    pub fn guard<'a>(&'a self, path: &'a Path, enabled: bool) -> TeardownGuard<'a> {
        TeardownGuard {
            area: self,
            path,
            enabled,
        }
    }
}

/// Tears the staging directory down however the execution ends.
pub struct TeardownGuard<'a> {
    area: &'a StagingArea,
    path: &'a Path,
    enabled: bool,
}

impl Drop for TeardownGuard<'_> {
    fn drop(&mut self) {
        if self.enabled {
            tracing::debug!(path = %self.path.display(), "Tearing down staging directory");
            self.area.teardown(self.path);
        }
    }
}

fn absolutize(path: &Path) -> Result<PathBuf, ScriptError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|source| ScriptError::Staging {
            action: "resolve",
            path: path.to_path_buf(),
            source,
        })
}

fn remove_tree(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

fn create_dir(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(path)
}
