//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Each document is shown by its name and position in the tree, with the
//! output path as secondary context after the arrow. Nesting follows the
//! directory tree, four spaces per level.
//!
//! # Output Format
//!
//! ```text
//! Documents
//! pkg → meta.json (1 folder)
//!     a → a/meta.json (1 script, 1 folder)
//!         Letter A
//!         b → a/b/meta.json (1 script)
//!
//! Icons
//!     assets/a.png → icons/a-3f0c….png
//!
//! README → README.md
//!
//! Unused folder annotations
//!     /nowhere
//!
//! Generated 3 documents, 1 icon (2 scripts, 1 skipped, 0 ignored)
//! ```
//!
//! # Architecture
//!
//! [`format_emit_output`] returns `Vec<String>` for testability and
//! [`print_emit_output`] writes it to stdout. Formatting is pure.

use crate::document::{GeneratedDocument, ScriptKind};
use crate::emit::EmitReport;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 script`, `2 scripts`.
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}

/// Script/folder counts shown after a document line, e.g. `(1 script, 2 folders)`.
fn catalog_summary(doc: &GeneratedDocument) -> Option<String> {
    let scripts = &doc.document.scripts;
    let actions = scripts
        .iter()
        .filter(|s| s.kind == ScriptKind::Action)
        .count();
    let folders = scripts.len() - actions;

    let mut parts = Vec::new();
    if actions > 0 {
        parts.push(plural(actions, "script"));
    }
    if folders > 0 {
        parts.push(plural(folders, "folder"));
    }
    if parts.is_empty() {
        None
    } else {
        Some(format!("({})", parts.join(", ")))
    }
}

fn document_line(doc: &GeneratedDocument) -> String {
    let head = format!(
        "{}{} \u{2192} {}",
        indent(doc.depth),
        doc.document.name,
        doc.output_path
    );
    match catalog_summary(doc) {
        Some(summary) => format!("{head} {summary}"),
        None => format!("{head} (empty)"),
    }
}

/// Format the result of one emit.
pub fn format_emit_output(report: &EmitReport) -> Vec<String> {
    let mut lines = vec!["Documents".to_string()];

    for doc in &report.documents {
        lines.push(document_line(doc));
        let description = truncate_desc(doc.document.description.trim(), 60);
        if !description.is_empty() {
            lines.push(format!("{}    {}", indent(doc.depth), description));
        }
    }

    if !report.icons.is_empty() || report.cleared_icon_dir {
        lines.push(String::new());
        lines.push("Icons".to_string());
        if report.cleared_icon_dir {
            lines.push("    (previous icons/ removed)".to_string());
        }
        for icon in &report.icons {
            lines.push(format!(
                "    {} \u{2192} {}",
                icon.reference, icon.output_path
            ));
        }
    }

    if let Some(readme) = &report.readme {
        lines.push(String::new());
        lines.push(format!("README \u{2192} {readme}"));
    }

    if !report.unused_folders.is_empty() {
        lines.push(String::new());
        lines.push("Unused folder annotations".to_string());
        for path in &report.unused_folders {
            lines.push(format!("    {path}"));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {} ({}, {} skipped, {} ignored)",
        plural(report.documents.len(), "document"),
        plural(report.icons.len(), "icon"),
        plural(report.stats.scripts, "script"),
        report.stats.non_scripts,
        report.stats.ignored,
    ));

    lines
}

/// Print emit output to stdout.
pub fn print_emit_output(report: &EmitReport) {
    for line in format_emit_output(report) {
        println!("{}", line);
    }
}
