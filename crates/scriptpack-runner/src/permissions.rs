//! Executable bit for staged scripts.

use std::path::Path;

use crate::error::ScriptError;

/// Set mode `0755` on every `.sh` regular file under `dir`.
#[cfg(unix)]
pub fn make_executable(dir: &Path) -> Result<(), ScriptError> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    use walkdir::WalkDir;

    use crate::asset::is_script_name;

    let mut count = 0usize;
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            ScriptError::Permission {
                path,
                source: e.into(),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !is_script_name(&entry.file_name().to_string_lossy()) {
            continue;
        }
        fs::set_permissions(entry.path(), fs::Permissions::from_mode(0o755)).map_err(|e| {
            ScriptError::Permission {
                path: entry.path().to_path_buf(),
                source: e,
            }
        })?;
        count += 1;
    }

    tracing::debug!(count, "Marked scripts executable in {}", dir.display());
    Ok(())
}

/// Windows has no executable bit.
#[cfg(not(unix))]
pub fn make_executable(_dir: &Path) -> Result<(), ScriptError> {
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn mode_of(path: &Path) -> u32 {
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[test]
    fn test_only_scripts_become_executable() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("a.sh"), "echo a").unwrap();
        fs::write(tmp.path().join("sub").join("b.sh"), "echo b").unwrap();
        fs::write(tmp.path().join("notes.txt"), "text").unwrap();
        fs::set_permissions(tmp.path().join("notes.txt"), fs::Permissions::from_mode(0o644))
            .unwrap();

        make_executable(tmp.path()).unwrap();

        assert_eq!(mode_of(&tmp.path().join("a.sh")), 0o755);
        assert_eq!(mode_of(&tmp.path().join("sub").join("b.sh")), 0o755);
        assert_eq!(mode_of(&tmp.path().join("notes.txt")), 0o644);
    }

    #[test]
    fn test_missing_dir_is_permission_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = make_executable(&tmp.path().join("gone")).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Asset);
    }
}
