//! Icon materialization.
//!
//! Icon references in the configuration (the package icon and each folder's
//! `iconPath`) are either remote URLs or paths relative to the context
//! directory. Remote references are left alone. Each local file is read once,
//! given a collision-free name by appending a fresh token to its stem, added
//! to the output under `icons/`, and the reference is rewritten to point there:
//!
//! ```text
//! assets/tools.png  →  icons/tools-3f0c…e1.png
//! https://x/y.png   →  https://x/y.png
//! ```
//!
//! The rewrite itself is [`icon_output_path`], a pure function of the
//! reference and the token. Tokens come from a [`TokenSource`] so tests can
//! use predictable ones.

use crate::assets::Assets;
use crate::config::PluginConfig;
use crate::naming;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output directory for materialized icons.
pub const ICONS_DIR: &str = "icons";

#[derive(Error, Debug)]
pub enum IconError {
    #[error("Failed to read icon {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to clear icon directory {path}: {source}")]
    Clear {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Icon reference has no file name: {0}")]
    NoFileName(String),
}

/// Produces the unique tokens appended to icon file names.
pub trait TokenSource {
    fn next_token(&mut self) -> String;
}

/// Random v4 UUIDs, hyphen-free.
#[derive(Debug, Default)]
pub struct UuidTokens;

impl TokenSource for UuidTokens {
    fn next_token(&mut self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

/// One icon copied into the output.
#[derive(Debug, Clone, PartialEq)]
pub struct IconWrite {
    /// Reference as written in the configuration.
    pub reference: String,
    /// Output-relative path the reference now points to.
    pub output_path: String,
}

/// Whether a reference points at the network rather than a local file.
pub fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Output path for a local reference given a token.
pub fn icon_output_path(reference: &str, token: &str) -> Result<String, IconError> {
    let file_name = Path::new(reference)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| IconError::NoFileName(reference.to_string()))?;
    Ok(format!(
        "{ICONS_DIR}/{}",
        naming::with_suffix(&file_name, token)
    ))
}

/// Remove the `icons/` directory left by a previous build under `output_dir`.
///
/// Returns whether anything was removed.
pub fn clear_icon_dir(output_dir: &Path) -> Result<bool, IconError> {
    let dir = output_dir.join(ICONS_DIR);
    if !dir.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(&dir).map_err(|source| IconError::Clear {
        path: dir.clone(),
        source,
    })?;
    tracing::debug!(dir = %dir.display(), "cleared previous icons");
    Ok(true)
}

/// Copies local icons into an asset collection and rewrites references.
pub struct IconMaterializer<'a, T: TokenSource> {
    context: &'a Path,
    tokens: T,
    written: HashMap<String, String>,
    writes: Vec<IconWrite>,
}

impl<'a, T: TokenSource> IconMaterializer<'a, T> {
    pub fn new(context: &'a Path, tokens: T) -> Self {
        Self {
            context,
            tokens,
            written: HashMap::new(),
            writes: Vec::new(),
        }
    }

    /// Resolve one reference, adding its content to `out` on first sight.
    pub fn materialize(&mut self, reference: &str, out: &mut Assets) -> Result<String, IconError> {
        if is_remote(reference) {
            return Ok(reference.to_string());
        }
        if let Some(existing) = self.written.get(reference) {
            return Ok(existing.clone());
        }

        let source = self.context.join(reference);
        let content = fs::read(&source).map_err(|e| IconError::Read {
            path: source.clone(),
            source: e,
        })?;
        let output_path = icon_output_path(reference, &self.tokens.next_token())?;
        tracing::info!(reference, output = %output_path, "materialized icon");

        out.insert(output_path.clone(), content);
        self.written
            .insert(reference.to_string(), output_path.clone());
        self.writes.push(IconWrite {
            reference: reference.to_string(),
            output_path: output_path.clone(),
        });
        Ok(output_path)
    }

    /// Rewrite the package icon and every folder icon in `config`.
    pub fn rewrite_config(
        &mut self,
        config: &mut PluginConfig,
        out: &mut Assets,
    ) -> Result<(), IconError> {
        if let Some(icon) = config.package_icon.take() {
            config.package_icon = Some(self.materialize(&icon, out)?);
        }
        for folder in &mut config.folder_description_list {
            if let Some(icon) = folder.icon_path.take() {
                folder.icon_path = Some(self.materialize(&icon, out)?);
            }
        }
        Ok(())
    }

    pub fn into_writes(self) -> Vec<IconWrite> {
        self.writes
    }
}
