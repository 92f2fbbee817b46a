//! Per-directory `meta.json` documents.
//!
//! Every directory of the tree gets one document listing its scripts and its
//! immediate subdirectories as a single `scripts` catalog:
//!
//! ```json
//! {
//!   "name": "a",
//!   "description": "Letter A",
//!   "defaultAction": "open",
//!   "icon": "icons/a-1b4e….png",
//!   "scripts": [
//!     { "name": "one", "file": "one.js", "type": "action", "description": "first" },
//!     { "name": "b", "file": "b", "type": "folder", "description": "" }
//!   ]
//! }
//! ```
//!
//! Scripts come first, in the order the tree holds them, then one `folder`
//! record per child directory. A folder record only carries the child's name
//! and description; its icon and default action live in the child's own
//! document. The root document is named after the package and also carries the
//! package's `sites` list.
//!
//! ## Traversal order
//!
//! Documents are produced pre-order: a directory always comes before any of
//! its descendants. Siblings are visited in ascending name order, the same
//! order their folder records use, so output is stable across builds.

use crate::naming;
use crate::tree::DirectoryNode;
use serde::{Deserialize, Serialize};

/// File name of the document written into every directory.
pub const DOCUMENT_FILE_NAME: &str = "meta.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    Action,
    Folder,
}

/// One entry of a document's `scripts` catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptRecord {
    pub name: String,
    pub file: String,
    #[serde(rename = "type")]
    pub kind: ScriptKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDocument {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sites: Option<Vec<serde_json::Value>>,
    pub scripts: Vec<ScriptRecord>,
}

/// A rendered document and where it goes in the output.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    /// Output-relative path, e.g. `a/b/meta.json` (`meta.json` for the root).
    pub output_path: String,
    /// Directory path of the node the document describes, e.g. `/a/b/`.
    pub directory: String,
    /// Nesting level, 0 for the root.
    pub depth: usize,
    pub document: MetaDocument,
}

impl GeneratedDocument {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.document)
    }
}

/// Output path of the document for a directory at `directory` (`/a/b/`).
pub fn document_path(directory: &str) -> String {
    let relative = directory.trim_start_matches('/');
    format!("{relative}{DOCUMENT_FILE_NAME}")
}

fn render(node: &DirectoryNode, name: &str) -> MetaDocument {
    let actions = node
        .files
        .iter()
        .filter(|f| !f.file_name.contains(".json"))
        .map(|f| ScriptRecord {
            name: naming::parse_file_name(&f.file_name).stem,
            file: f.file_name.clone(),
            kind: ScriptKind::Action,
            description: f.description.clone(),
        });
    let folders = node.children.values().map(|child| ScriptRecord {
        name: child.name.clone(),
        file: child.name.clone(),
        kind: ScriptKind::Folder,
        description: child.description.clone(),
    });

    MetaDocument {
        name: name.to_string(),
        description: node.description.clone(),
        default_action: node.default_action.clone(),
        icon: node.icon.clone(),
        sites: node.sites.clone(),
        scripts: actions.chain(folders).collect(),
    }
}

/// Render one document per directory, root first.
pub fn generate_documents(root: &DirectoryNode, package_name: &str) -> Vec<GeneratedDocument> {
    let mut documents = Vec::with_capacity(root.directory_count());
    walk(root, package_name, 0, &mut documents);
    tracing::info!(count = documents.len(), "rendered directory documents");
    documents
}

fn walk(node: &DirectoryNode, name: &str, depth: usize, documents: &mut Vec<GeneratedDocument>) {
    documents.push(GeneratedDocument {
        output_path: document_path(&node.path),
        directory: node.path.clone(),
        depth,
        document: render(node, name),
    });
    for child in node.children.values() {
        walk(child, &child.name, depth + 1, documents);
    }
}
