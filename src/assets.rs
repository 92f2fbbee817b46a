//! The build output as an in-memory artifact collection.
//!
//! [`Assets`] is what the generator receives from the build: every output
//! file keyed by its `/`-joined path relative to the output root. The generator
//! only ever adds entries (documents, icons, the README copy).
//!
//! When run from the command line the collection is loaded from an existing
//! output directory. Entries this tool generated on a previous run are left out
//! so that rebuilding over the same directory gives the same documents:
//!
//! - every `meta.json`, at any depth
//! - everything under the root `icons/` directory
//! - the root `README.md`

use crate::document::DOCUMENT_FILE_NAME;
use crate::icons::ICONS_DIR;
use crate::tree::Artifact;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Output-root name of the README copy.
pub const README_OUTPUT: &str = "README.md";

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk output directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Asset not in collection: {0}")]
    Missing(String),
    #[error("Output path leaves the output root: {0}")]
    OutsideRoot(String),
}

/// Output files keyed by relative path, iterated in path order.
#[derive(Debug, Clone, Default)]
pub struct Assets {
    entries: BTreeMap<String, Vec<u8>>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry. Returns `true` if an entry was replaced.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> bool {
        let path = path.into();
        let replaced = self.entries.insert(path.clone(), content.into()).is_some();
        if replaced {
            tracing::warn!(path = %path, "replacing existing output file");
        }
        replaced
    }

    /// Move every entry of `other` into this collection.
    pub fn extend(&mut self, other: Assets) {
        for (path, content) in other.entries {
            self.insert(path, content);
        }
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    /// Content of an entry decoded as UTF-8, with invalid bytes replaced.
    pub fn text(&self, path: &str) -> Option<String> {
        self.get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_slice()))
    }

    /// View every entry as a tree-builder artifact.
    pub fn artifacts(&self) -> impl Iterator<Item = Artifact<'_>> {
        self.iter().map(|(path, content)| Artifact { path, content })
    }

    /// Load every regular file under `root`, skipping previously generated output.
    pub fn load_dir(root: &Path) -> Result<Self, AssetError> {
        let mut assets = Self::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(key) = relative_key(root, entry.path()) else {
                continue;
            };
            if is_generated(&key) {
                tracing::debug!(path = %key, "skipping previously generated file");
                continue;
            }
            let content = fs::read(entry.path())?;
            assets.entries.insert(key, content);
        }
        tracing::info!(count = assets.len(), root = %root.display(), "loaded build output");
        Ok(assets)
    }

    /// Write the listed entries under `root`, creating directories as needed.
    ///
    /// Paths must stay inside `root`: absolute paths and `..` components are
    /// rejected before anything is written.
    pub fn write_paths<'a, I>(&self, root: &Path, paths: I) -> Result<Vec<PathBuf>, AssetError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let paths: Vec<&str> = paths.into_iter().collect();
        if let Some(bad) = paths.iter().find(|p| !stays_inside(p)) {
            return Err(AssetError::OutsideRoot(bad.to_string()));
        }

        let mut written = Vec::new();
        for path in paths {
            let content = self
                .get(path)
                .ok_or_else(|| AssetError::Missing(path.to_string()))?;
            let target = root.join(path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, content)?;
            written.push(target);
        }
        Ok(written)
    }
}

/// `/`-joined path of `path` relative to `root`.
fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

fn stays_inside(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn is_generated(key: &str) -> bool {
    key == README_OUTPUT
        || key.starts_with(&format!("{ICONS_DIR}/"))
        || key == DOCUMENT_FILE_NAME
        || key.ends_with(&format!("/{DOCUMENT_FILE_NAME}"))
}
