//! Per-file annotations read from embedded source comments.
//!
//! A script can carry two markers anywhere in a comment:
//!
//! - `@ignore` on any line drops the file from every document.
//! - `@description <text>` supplies the file's description. Only the first
//!   line carrying the marker counts; the text after the marker is trimmed.
//!
//! ```text
//! // @description Restart the dev server
//! // @ignore
//! ```
//!
//! ## Line breaks by environment
//!
//! Production bundles contain real line breaks, so lines are split the usual
//! way. Development bundles wrap each module in a string literal, leaving the
//! two-character escapes `\n` and `\r` in the artifact text. There the text is
//! split on the escaped line feed and a trailing escaped carriage return is
//! dropped from each line before looking for the marker.
//!
//! Minifiers may drop comments that follow dead code, so a description is only
//! reliable when it sits before the first statement of the file.

use crate::config::Environment;

pub const IGNORE_MARKER: &str = "@ignore";
pub const DESCRIPTION_MARKER: &str = "@description";

const ESCAPED_LF: &str = "\\n";
const ESCAPED_CR: &str = "\\r";

/// What the markers in one artifact say about it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotation {
    pub ignored: bool,
    /// Trimmed text after the description marker, empty if absent.
    pub description: String,
}

/// Scan an artifact's text for the ignore and description markers.
pub fn extract(content: &str, environment: Environment) -> Annotation {
    let lines: Vec<&str> = match environment {
        Environment::Production => content.lines().collect(),
        Environment::Development => content
            .split(ESCAPED_LF)
            .map(|line| line.strip_suffix(ESCAPED_CR).unwrap_or(line))
            .collect(),
    };

    let ignored = lines.iter().any(|line| line.contains(IGNORE_MARKER));
    let description = lines
        .iter()
        .find_map(|line| {
            line.find(DESCRIPTION_MARKER)
                .map(|pos| line[pos + DESCRIPTION_MARKER.len()..].trim().to_string())
        })
        .unwrap_or_default();

    Annotation {
        ignored,
        description,
    }
}
