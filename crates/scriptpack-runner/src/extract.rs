//! Flat extraction: copy top-level scripts into the staging directory.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::asset::{is_script_name, AssetSource};
use crate::error::ScriptError;

/// Copy every top-level `.sh` entry of `base_dir` in `source` into `dest`.
///
/// Directory entries are skipped, so nested helpers never reach staging.
/// Returns the staged names sorted.
pub fn extract_flat(
    source: &dyn AssetSource,
    base_dir: &str,
    dest: &Path,
) -> Result<Vec<String>, ScriptError> {
    let entries = source.list(base_dir).map_err(|e| ScriptError::AssetRead {
        name: base_dir.to_string(),
        source: e,
    })?;

    let mut staged = Vec::new();
    for entry in entries {
        if entry.is_dir || !is_script_name(&entry.name) {
            continue;
        }
        let data = source
            .read(base_dir, &entry.name)
            .map_err(|e| ScriptError::AssetRead {
                name: format!("{}/{}", base_dir, entry.name),
                source: e,
            })?;
        let target = dest.join(&entry.name);
        write_file(&target, &data).map_err(|e| ScriptError::AssetWrite {
            path: target.clone(),
            source: e,
        })?;
        staged.push(entry.name);
    }

    staged.sort();
    tracing::debug!(
        source = source.name(),
        count = staged.len(),
        "Extracted scripts into {}",
        dest.display()
    );
    Ok(staged)
}

/// Copy every top-level regular file in `src` into `dest`. Subdirectories are skipped.
pub fn copy_dir_flat(src: &Path, dest: &Path) -> Result<Vec<String>, ScriptError> {
    if !src.is_dir() {
        return Err(ScriptError::OverrideRootMissing {
            path: src.to_path_buf(),
        });
    }

    let read_err = |e: io::Error| ScriptError::AssetRead {
        name: src.display().to_string(),
        source: e,
    };

    let mut copied = Vec::new();
    for entry in fs::read_dir(src).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let data = fs::read(&path).map_err(|e| ScriptError::AssetRead {
            name: path.display().to_string(),
            source: e,
        })?;
        let target = dest.join(&name);
        write_file(&target, &data).map_err(|e| ScriptError::AssetWrite {
            path: target.clone(),
            source: e,
        })?;
        copied.push(name);
    }

    copied.sort();
    tracing::debug!(count = copied.len(), "Copied {} into {}", src.display(), dest.display());
    Ok(copied)
}

fn write_file(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.flush()
}
