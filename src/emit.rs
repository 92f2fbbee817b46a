//! The build-completion step.
//!
//! [`emit`] is called once after the build has produced its output. It runs
//! to completion or fails with the first error, and only ever adds entries to
//! the asset collection:
//!
//! 1. Validate the configuration.
//! 2. Clear the previous build's `icons/` directory (when writing to disk).
//! 3. Copy local icons under `icons/` and rewrite their references.
//! 4. Build the directory tree from the script artifacts.
//! 5. Render one `meta.json` per directory.
//! 6. Copy the README, if configured, to the output root.
//!
//! New entries are collected separately and merged into the collection at the
//! end, so the tree only ever sees the artifacts the build produced.

use crate::assets::{Assets, README_OUTPUT};
use crate::config::{ConfigError, PluginConfig};
use crate::document::{self, GeneratedDocument};
use crate::folders::FolderIndex;
use crate::icons::{self, IconError, IconMaterializer, IconWrite, TokenSource, UuidTokens};
use crate::tree::{self, PackageInfo, TreeStats};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Icon error: {0}")]
    Icon(#[from] IconError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to read README {path}: {source}")]
    Readme {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where local references resolve and where output lands on disk.
#[derive(Debug, Clone, Copy)]
pub struct EmitOptions<'a> {
    /// Directory that icon and README paths are relative to.
    pub context: &'a Path,
    /// Output directory on disk, if any. Its `icons/` directory is cleared.
    pub output_dir: Option<&'a Path>,
}

/// What one emit added to the collection.
#[derive(Debug)]
pub struct EmitReport {
    pub documents: Vec<GeneratedDocument>,
    pub icons: Vec<IconWrite>,
    /// Output path of the README copy.
    pub readme: Option<String>,
    pub stats: TreeStats,
    /// Folder annotation paths that matched no directory.
    pub unused_folders: Vec<String>,
    pub cleared_icon_dir: bool,
}

impl EmitReport {
    /// Every output path this emit added, documents first.
    pub fn written_paths(&self) -> Vec<&str> {
        self.documents
            .iter()
            .map(|d| d.output_path.as_str())
            .chain(self.icons.iter().map(|i| i.output_path.as_str()))
            .chain(self.readme.as_deref())
            .collect()
    }
}

/// Generate documents, icons, and the README copy into `assets`.
pub fn emit(
    config: &PluginConfig,
    assets: &mut Assets,
    options: EmitOptions<'_>,
) -> Result<EmitReport, EmitError> {
    emit_with_tokens(config, assets, options, UuidTokens)
}

/// [`emit`] with a caller-supplied token source for icon names.
pub fn emit_with_tokens<T: TokenSource>(
    config: &PluginConfig,
    assets: &mut Assets,
    options: EmitOptions<'_>,
    tokens: T,
) -> Result<EmitReport, EmitError> {
    config.validate()?;

    let cleared_icon_dir = match options.output_dir {
        Some(dir) => icons::clear_icon_dir(dir)?,
        None => false,
    };

    let mut added = Assets::new();
    let mut resolved = config.clone();
    let mut materializer = IconMaterializer::new(options.context, tokens);
    materializer.rewrite_config(&mut resolved, &mut added)?;
    let icon_writes = materializer.into_writes();

    let folders = FolderIndex::new(&resolved.folder_description_list);
    let package = PackageInfo {
        description: resolved.package_description.clone(),
        icon: resolved.package_icon.clone(),
        default_action: None,
        sites: resolved.sites.clone(),
    };
    let built = tree::build_tree(
        assets.artifacts(),
        &package,
        &folders,
        resolved.environment,
    );

    let documents = document::generate_documents(&built.root, &resolved.package);
    for doc in &documents {
        added.insert(doc.output_path.clone(), doc.to_json()?);
    }

    let readme = match &resolved.readme_file {
        Some(reference) => {
            let path = options.context.join(reference);
            let content = fs::read(&path).map_err(|source| EmitError::Readme {
                path: path.clone(),
                source,
            })?;
            added.insert(README_OUTPUT, content);
            Some(README_OUTPUT.to_string())
        }
        None => None,
    };

    assets.extend(added);

    Ok(EmitReport {
        documents,
        icons: icon_writes,
        readme,
        stats: built.stats,
        unused_folders: folders.unused_paths(),
        cleared_icon_dir,
    })
}
