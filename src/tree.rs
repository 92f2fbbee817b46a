//! Directory tree reconstruction from a flat set of build artifacts.
//!
//! The build output arrives as a flat map from `/`-delimited output path to
//! content. This module folds it into a tree of [`DirectoryNode`]s, one per
//! directory level, and merges the operator's folder annotations onto the nodes
//! as they are created.
//!
//! ## Example
//!
//! ```text
//! /a/one.js       ─┐        /            (package annotations)
//! /a/b/two.js      ├──▶     └── a/       ← annotation "/a"
//! /logo.png        │            ├── one.js
//! /root.js        ─┘            └── b/   ← annotation "/a/b"
//!                                   └── two.js
//!                           root.js at the root, logo.png skipped
//! ```
//!
//! ## Rules
//!
//! - Images and `.json` files are skipped entirely.
//! - Files carrying `@ignore` are left out of their directory, but the
//!   directories on their path still exist (possibly with no entries).
//! - A leading `/` is dropped; empty and `.` segments elsewhere are skipped.
//! - `..` resolves against the directories before it and stops at the root,
//!   so no directory ever lies outside the output root.
//! - Annotations are looked up by the rooted path (`/a/b`) only when a node
//!   is first created. Later artifacts in the same directory never overwrite
//!   what the first lookup set.
//! - Nothing here fails. Odd paths are placed on a best-effort basis.

use crate::annotation;
use crate::config::Environment;
use crate::folders::FolderIndex;
use crate::naming;
use std::collections::BTreeMap;

/// One build output file.
#[derive(Debug, Clone, Copy)]
pub struct Artifact<'a> {
    pub path: &'a str,
    pub content: &'a [u8],
}

/// A script directly contained in a directory.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    /// File name including its extension.
    pub file_name: String,
    pub description: String,
}

/// Package-level annotations applied to the root node.
#[derive(Debug, Clone, Default)]
pub struct PackageInfo {
    pub description: String,
    pub icon: Option<String>,
    pub default_action: Option<String>,
    pub sites: Vec<serde_json::Value>,
}

/// One directory of the output tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryNode {
    /// Last path segment. Empty for the root.
    pub name: String,
    /// Slash-terminated path from the output root, `/` for the root.
    pub path: String,
    /// Scripts in artifact iteration order.
    pub files: Vec<FileEntry>,
    pub children: BTreeMap<String, DirectoryNode>,
    pub description: String,
    pub icon: Option<String>,
    pub default_action: Option<String>,
    /// Only set on the root.
    pub sites: Option<Vec<serde_json::Value>>,
}

impl DirectoryNode {
    fn root(package: &PackageInfo) -> Self {
        Self {
            name: String::new(),
            path: "/".to_string(),
            files: Vec::new(),
            children: BTreeMap::new(),
            description: package.description.clone(),
            icon: package.icon.clone(),
            default_action: package.default_action.clone(),
            sites: Some(package.sites.clone()),
        }
    }

    fn child(name: &str, key: &str, folders: &FolderIndex) -> Self {
        let annotation = folders.get(key);
        tracing::trace!(path = key, annotated = annotation.is_some(), "new directory");
        Self {
            name: name.to_string(),
            path: format!("{key}/"),
            files: Vec::new(),
            children: BTreeMap::new(),
            description: annotation
                .and_then(|a| a.description.clone())
                .unwrap_or_default(),
            icon: annotation.and_then(|a| a.icon_path.clone()),
            default_action: annotation.and_then(|a| a.default_action.clone()),
            sites: None,
        }
    }

    /// Follow child names from this node.
    pub fn descend<'a, I>(&self, names: I) -> Option<&DirectoryNode>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .try_fold(self, |node, name| node.children.get(name))
    }

    /// Number of directories in this subtree, this node included.
    pub fn directory_count(&self) -> usize {
        1 + self
            .children
            .values()
            .map(DirectoryNode::directory_count)
            .sum::<usize>()
    }
}

/// Counters describing what happened to the input artifacts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeStats {
    pub scripts: usize,
    pub non_scripts: usize,
    pub ignored: usize,
}

#[derive(Debug)]
pub struct BuiltTree {
    pub root: DirectoryNode,
    pub stats: TreeStats,
}

/// Split an output path into directory segments and a file name.
///
/// `.` segments are dropped and `..` steps back one directory, never above
/// the root.
fn split_path(path: &str) -> (Vec<&str>, &str) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let mut parts: Vec<&str> = trimmed.split('/').collect();
    let mut file_name = parts.pop().unwrap_or_default();
    if matches!(file_name, "." | "..") {
        parts.push(file_name);
        file_name = "";
    }

    let mut segments = Vec::new();
    for part in parts {
        match part {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    tracing::debug!(path, "parent segment above the output root ignored");
                }
            }
            _ => segments.push(part),
        }
    }
    (segments, file_name)
}

/// Build the directory tree for a set of artifacts.
pub fn build_tree<'a, I>(
    artifacts: I,
    package: &PackageInfo,
    folders: &FolderIndex,
    environment: Environment,
) -> BuiltTree
where
    I: IntoIterator<Item = Artifact<'a>>,
{
    let mut root = DirectoryNode::root(package);
    let mut stats = TreeStats::default();

    for artifact in artifacts {
        if !naming::is_script_path(artifact.path) {
            tracing::debug!(path = artifact.path, "skipping non-script artifact");
            stats.non_scripts += 1;
            continue;
        }
        let text = String::from_utf8_lossy(artifact.content);
        let found = annotation::extract(&text, environment);

        let (segments, file_name) = split_path(artifact.path);
        let mut node = &mut root;
        let mut key = String::new();
        for segment in segments {
            key.push('/');
            key.push_str(segment);
            node = node
                .children
                .entry(segment.to_string())
                .or_insert_with(|| DirectoryNode::child(segment, &key, folders));
        }

        if found.ignored {
            tracing::debug!(path = artifact.path, "skipping artifact marked @ignore");
            stats.ignored += 1;
            continue;
        }
        if file_name.is_empty() {
            continue;
        }
        node.files.push(FileEntry {
            file_name: file_name.to_string(),
            description: found.description,
        });
        stats.scripts += 1;
    }

    for unused in folders.unused_paths() {
        tracing::debug!(path = %unused, "folder annotation matches no output directory");
    }

    BuiltTree { root, stats }
}
