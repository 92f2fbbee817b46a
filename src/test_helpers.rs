//! Shared test utilities for the script-meta test suite.
//!
//! Builders turn `(path, content)` literals into artifacts, trees, and asset
//! collections; lookups panic with the available choices on a miss so failing
//! tests say what was there instead.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let root = build_root(&[("/a/one.js", "// @description first")], &[], Environment::Production);
//! let docs = generate_documents(&root, "pkg");
//! let a = find_document(&docs, "a/meta.json");
//! assert_eq!(script_names(&a.document), vec!["one"]);
//! ```

use crate::assets::Assets;
use crate::config::{Environment, FolderDescription, PluginConfig};
use crate::document::{GeneratedDocument, MetaDocument};
use crate::folders::FolderIndex;
use crate::tree::{Artifact, DirectoryNode, PackageInfo, build_tree};

// =========================================================================
// Builders
// =========================================================================

/// Owned `(path, content)` pairs, in the given order.
pub fn artifacts(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(p, c)| (p.to_string(), c.to_string()))
        .collect()
}

/// Build a tree with default package annotations.
pub fn build_root(
    pairs: &[(&str, &str)],
    folders: &[FolderDescription],
    environment: Environment,
) -> DirectoryNode {
    let index = FolderIndex::new(folders);
    let artifacts = pairs.iter().map(|(p, c)| Artifact {
        path: p,
        content: c.as_bytes(),
    });
    build_tree(artifacts, &PackageInfo::default(), &index, environment).root
}

/// Asset collection holding the given text artifacts.
pub fn assets_from(pairs: &[(&str, &str)]) -> Assets {
    let mut assets = Assets::new();
    for (path, content) in pairs {
        assets.insert(*path, content.as_bytes());
    }
    assets
}

/// Smallest valid configuration.
pub fn config_for(package: &str) -> PluginConfig {
    PluginConfig {
        package: package.to_string(),
        ..Default::default()
    }
}

// =========================================================================
// Lookups: panic with the available choices on a miss
// =========================================================================

/// Find a generated document by output path. Panics if not found.
pub fn find_document<'a>(docs: &'a [GeneratedDocument], output_path: &str) -> &'a GeneratedDocument {
    docs.iter()
        .find(|d| d.output_path == output_path)
        .unwrap_or_else(|| {
            let paths: Vec<&str> = docs.iter().map(|d| d.output_path.as_str()).collect();
            panic!("document '{output_path}' not found. Available: {paths:?}")
        })
}

/// Parse a JSON document stored in an asset collection. Panics if missing.
pub fn parse_document(assets: &Assets, path: &str) -> MetaDocument {
    let bytes = assets.get(path).unwrap_or_else(|| {
        let paths: Vec<&str> = assets.paths().collect();
        panic!("asset '{path}' not found. Available: {paths:?}")
    });
    serde_json::from_slice(bytes).unwrap()
}

/// All script names in catalog order.
pub fn script_names(document: &MetaDocument) -> Vec<&str> {
    document.scripts.iter().map(|s| s.name.as_str()).collect()
}
