//! AssetSource trait: where scripts come from before they are staged.
//!
//! The production source is the build-time bundle ([`BundledScripts`]); a plain
//! directory ([`DirSource`]) serves tests and custom layouts.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use rust_embed::RustEmbed;

/// Recognized script suffix. Only files ending in it are staged or chmodded.
pub const SCRIPT_SUFFIX: &str = ".sh";

/// Base directory of the bundled scripts inside [`BundledScripts`].
pub const DEFAULT_BASE_DIR: &str = "bash_scripts";

/// Scripts bundled into the binary at build time.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct BundledScripts;

/// One top-level entry under a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Read-only bundle of named script files.
pub trait AssetSource: Send + Sync + fmt::Debug {
    /// Source label for logging and diagnostics.
    fn name(&self) -> &str;

    /// List the top-level entries of `base_dir`, sorted by name.
    fn list(&self, base_dir: &str) -> io::Result<Vec<AssetEntry>>;

    /// Read the whole entry `base_dir/name`.
    fn read(&self, base_dir: &str, name: &str) -> io::Result<Vec<u8>>;
}

pub fn is_script_name(name: &str) -> bool {
    name.ends_with(SCRIPT_SUFFIX)
}

/// Adapter exposing any `rust-embed` bundle as an [`AssetSource`].
pub struct EmbeddedSource<E> {
    label: &'static str,
    _bundle: PhantomData<fn() -> E>,
}

impl<E: RustEmbed> EmbeddedSource<E> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            _bundle: PhantomData,
        }
    }
}

impl EmbeddedSource<BundledScripts> {
    pub fn bundled() -> Self {
        Self::new("bundled")
    }
}

impl<E> fmt::Debug for EmbeddedSource<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedSource")
            .field("label", &self.label)
            .finish()
    }
}

fn embedded_prefix(base_dir: &str) -> String {
    let trimmed = base_dir.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}

impl<E: RustEmbed> AssetSource for EmbeddedSource<E> {
    fn name(&self) -> &str {
        self.label
    }

    fn list(&self, base_dir: &str) -> io::Result<Vec<AssetEntry>> {
        let prefix = embedded_prefix(base_dir);
        // name -> is_dir; embedded paths always use '/'
        let mut entries: BTreeMap<String, bool> = BTreeMap::new();
        for path in E::iter() {
            let Some(rest) = path.strip_prefix(prefix.as_str()) else {
                continue;
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    entries.insert(dir.to_string(), true);
                }
                None => {
                    entries.entry(rest.to_string()).or_insert(false);
                }
            }
        }

        if entries.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no embedded directory '{}' in {} assets", base_dir, self.label),
            ));
        }

        Ok(entries
            .into_iter()
            .map(|(name, is_dir)| AssetEntry { name, is_dir })
            .collect())
    }

    fn read(&self, base_dir: &str, name: &str) -> io::Result<Vec<u8>> {
        let path = format!("{}{}", embedded_prefix(base_dir), name);
        E::get(&path)
            .map(|file| file.data.into_owned())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("embedded file '{}' not found", path),
                )
            })
    }
}

/// Scripts read from a directory tree on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirSource {
    fn name(&self) -> &str {
        "directory"
    }

    fn list(&self, base_dir: &str) -> io::Result<Vec<AssetEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(self.root.join(base_dir))? {
            let entry = entry?;
            entries.push(AssetEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, base_dir: &str, name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.root.join(base_dir).join(name))
    }
}
