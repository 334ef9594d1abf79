//! Per-script descriptions read from `# desc:` header comments.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DocsError, Result};

/// Only this many leading lines are searched for a description comment.
pub const DESCRIPTION_SCAN_LINES: usize = 10;

pub const EMPTY_SCRIPT_DESCRIPTION: &str = "Empty script file";
pub const DEFAULT_DESCRIPTION: &str = "Shell script utility";

const DESCRIPTION_PATTERN: &str = r"(?i)^#\s*desc(?:ription)?:\s*(.+)$";

static DESCRIPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DESCRIPTION_PATTERN).expect("description regex is valid"));

/// Description of a script from its content.
pub fn extract_description(content: &str) -> String {
    if content.trim().is_empty() {
        return EMPTY_SCRIPT_DESCRIPTION.to_string();
    }

    for line in content.lines().take(DESCRIPTION_SCAN_LINES) {
        if let Some(caps) = DESCRIPTION_RE.captures(line.trim_end_matches('\r')) {
            let desc = caps[1].trim();
            if !desc.is_empty() {
                return desc.to_string();
            }
        }
    }

    DEFAULT_DESCRIPTION.to_string()
}

/// Sorted names of the top-level `.sh` files in `dir`.
pub fn script_names(dir: &Path) -> Result<Vec<String>> {
    let dir_err = |e: std::io::Error| DocsError::ScriptsDir {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(dir_err)? {
        let entry = entry.map_err(dir_err)?;
        if !entry.file_type().map_err(dir_err)?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".sh") {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// `name -> description` for every script in `dir`.
pub fn script_descriptions(dir: &Path) -> Result<BTreeMap<String, String>> {
    let mut descriptions = BTreeMap::new();
    for name in script_names(dir)? {
        let path = dir.join(&name);
        let bytes = fs::read(&path).map_err(|e| DocsError::Read {
            path: path.clone(),
            source: e,
        })?;
        let description = extract_description(&String::from_utf8_lossy(&bytes));
        tracing::debug!(script = %name, "Description: {}", description);
        descriptions.insert(name, description);
    }
    Ok(descriptions)
}
