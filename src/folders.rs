//! Lookup of operator-supplied folder annotations by directory path.
//!
//! Built once per build from [`PluginConfig::folder_description_list`]
//! and read by the tree builder whenever it creates a directory node. Paths are
//! compared byte-for-byte: `/tools` and `tools` are different keys. The index
//! also remembers which entries were looked up so that annotations pointing at
//! directories that do not exist can be reported.
//!
//! [`PluginConfig::folder_description_list`]: crate::config::PluginConfig::folder_description_list

use crate::config::FolderDescription;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Default)]
pub struct FolderIndex {
    entries: HashMap<String, FolderDescription>,
    matched: RefCell<BTreeSet<String>>,
}

impl FolderIndex {
    /// Index annotations by path. A later entry with the same path replaces
    /// an earlier one; validated configs never contain duplicates.
    pub fn new(folders: &[FolderDescription]) -> Self {
        let entries = folders
            .iter()
            .map(|f| (f.path.clone(), f.clone()))
            .collect();
        Self {
            entries,
            matched: RefCell::new(BTreeSet::new()),
        }
    }

    pub fn get(&self, path: &str) -> Option<&FolderDescription> {
        let found = self.entries.get(path);
        if found.is_some() {
            self.matched.borrow_mut().insert(path.to_string());
        }
        found
    }

    /// Paths that were never returned by [`get`](Self::get), sorted.
    pub fn unused_paths(&self) -> Vec<String> {
        let matched = self.matched.borrow();
        let mut unused: Vec<String> = self
            .entries
            .keys()
            .filter(|p| !matched.contains(*p))
            .cloned()
            .collect();
        unused.sort();
        unused
    }
}
