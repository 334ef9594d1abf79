//! README "Available Scripts" table generator.
//!
//! Scans a scripts directory, reads each script's `# desc:` header and keeps a
//! delimited region of a Markdown file in sync with the result.

pub mod describe;
pub mod error;
pub mod readme;

pub use describe::{extract_description, script_descriptions, script_names};
pub use error::{DocsError, Result};
pub use readme::{
    merge_section, needs_update, render_section, update_readme, SECTION_END, SECTION_START,
};

/// Render the section for `scripts_dir` and merge it into `readme`.
pub fn sync_readme(scripts_dir: &std::path::Path, readme: &std::path::Path) -> Result<bool> {
    let descriptions = script_descriptions(scripts_dir)?;
    update_readme(&render_section(&descriptions), readme)
}
