//! Markdown rendering and the marked README region.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{DocsError, Result};

pub const SECTION_START: &str = "<!-- SCRIPTS_SECTION_START -->";
pub const SECTION_END: &str = "<!-- SCRIPTS_SECTION_END -->";

/// `## Available Scripts` heading plus a two-column table in name order.
pub fn render_section(descriptions: &BTreeMap<String, String>) -> String {
    let mut out = String::from("## Available Scripts\n\n");
    out.push_str("| Script Name | Description |\n");
    out.push_str("|-------------|-------------|\n");
    for (name, desc) in descriptions {
        out.push_str(&format!("| `{}` | {} |\n", name, escape_cell(desc)));
    }
    out
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn marked(section: &str) -> String {
    format!("{}\n{}\n{}", SECTION_START, section, SECTION_END)
}

/// README content with `section` merged in.
///
/// Both markers present: the region from the start marker through the first end
/// marker after it is replaced, everything else is kept byte for byte. Otherwise
/// the marked section is appended after a blank line.
pub fn merge_section(existing: &str, section: &str) -> String {
    if existing.trim().is_empty() {
        return format!("{}\n", marked(section));
    }

    if let Some(start) = existing.find(SECTION_START) {
        let search_from = start + SECTION_START.len();
        if let Some(rel_end) = existing[search_from..].find(SECTION_END) {
            let end = search_from + rel_end + SECTION_END.len();
            let mut merged = String::with_capacity(existing.len() + section.len());
            merged.push_str(&existing[..start]);
            merged.push_str(&marked(section));
            merged.push_str(&existing[end..]);
            return merged;
        }
    }

    format!("{}\n\n{}\n", existing.trim_end(), marked(section))
}

/// Merge `section` into the README at `path`, creating the file if needed.
///
/// Returns `false` when the file already contains exactly this content.
pub fn update_readme(section: &str, path: &Path) -> Result<bool> {
    let existing = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(DocsError::Read {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    let merged = merge_section(&existing, section);
    if merged == existing {
        tracing::info!(path = %path.display(), "README already up to date");
        return Ok(false);
    }

    fs::write(path, merged).map_err(|e| DocsError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), "README scripts section updated");
    Ok(true)
}

/// Whether [`update_readme`] would write. Nothing is modified.
pub fn needs_update(section: &str, path: &Path) -> Result<bool> {
    let existing = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(true),
        Err(e) => {
            return Err(DocsError::Read {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    Ok(merge_section(&existing, section) != existing)
}
