//! # script-meta
//!
//! Generates a `meta.json` document for every directory of a built script
//! bundle. The build output is a flat set of files; this crate folds it back
//! into a directory tree, attaches descriptions, icons, and default actions,
//! and writes one self-contained document per directory listing its scripts
//! and subfolders.
//!
//! # Pipeline
//!
//! ```text
//! build output ──▶ tree ──▶ documents ──▶ build output + meta.json files
//!      ▲             ▲
//!      │             └── folder annotations (config), @description / @ignore markers
//!      └── icons/ and README.md copied in from the context directory
//! ```
//!
//! Everything runs once, synchronously, when the build completes
//! ([`emit::emit`]). The tree and documents are rebuilt from scratch every time.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `script-meta.toml` loading and validation |
//! | [`annotation`] | `@description` / `@ignore` markers in artifact text |
//! | [`folders`] | Folder annotations indexed by directory path |
//! | [`naming`] | File-name splitting and the non-script extension filter |
//! | [`tree`] | Flat artifacts → directory tree |
//! | [`document`] | Directory tree → `meta.json` documents |
//! | [`icons`] | Local icon copying and reference rewriting |
//! | [`assets`] | The build output as an in-memory collection; disk loading/writing |
//! | [`emit`] | The whole build-completion step |
//! | [`output`] | CLI summary formatting |
//! | [`logging`] | `tracing` subscriber setup for the binary |
//!
//! # Markers
//!
//! Scripts describe themselves with comments:
//!
//! ```text
//! // @description Restart the dev server
//! ```
//!
//! and opt out with `// @ignore`. Development bundles keep escaped line breaks
//! in module strings; set `environment = "development"` so the markers are
//! still read line by line.

pub mod annotation;
pub mod assets;
pub mod config;
pub mod document;
pub mod emit;
pub mod folders;
pub mod icons;
pub mod logging;
pub mod naming;
pub mod output;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_helpers;
