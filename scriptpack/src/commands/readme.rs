//! `scriptpack readme`

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use scriptpack_docs::{extract_description, needs_update, render_section, update_readme};
use scriptpack_runner::asset::is_script_name;
use scriptpack_runner::{AssetSource, EmbeddedSource, DEFAULT_BASE_DIR};

/// Descriptions of the scripts bundled into this binary.
fn bundled_descriptions(source: &dyn AssetSource) -> Result<BTreeMap<String, String>> {
    let mut descriptions = BTreeMap::new();
    let entries = source
        .list(DEFAULT_BASE_DIR)
        .context("Failed to list bundled scripts")?;
    for entry in entries {
        if entry.is_dir || !is_script_name(&entry.name) {
            continue;
        }
        let bytes = source
            .read(DEFAULT_BASE_DIR, &entry.name)
            .with_context(|| format!("Failed to read bundled script {}", entry.name))?;
        let description = extract_description(&String::from_utf8_lossy(&bytes));
        descriptions.insert(entry.name, description);
    }
    Ok(descriptions)
}

/// Returns the exit code: 1 when `check` finds the README out of date.
pub fn cmd_readme(scripts_dir: Option<&Path>, readme: &Path, check: bool) -> Result<i32> {
    let descriptions = match scripts_dir {
        Some(dir) => scriptpack_docs::script_descriptions(dir)
            .with_context(|| format!("Failed to describe scripts in {}", dir.display()))?,
        None => bundled_descriptions(&EmbeddedSource::bundled())?,
    };
    let section = render_section(&descriptions);

    if check {
        if needs_update(&section, readme)? {
            eprintln!("{} is out of date", readme.display());
            return Ok(1);
        }
        println!("{} is up to date", readme.display());
        return Ok(0);
    }

    if update_readme(&section, readme)? {
        println!("Updated {}", readme.display());
    } else {
        println!("No update performed: {} already up to date", readme.display());
    }
    Ok(0)
}
