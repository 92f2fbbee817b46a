//! File-name helpers shared by the tree builder and the document generator.
//!
//! Artifacts are addressed by `/`-delimited output paths. The last segment is
//! the file name, which keeps its extension in a document's `file` field but
//! loses it in the `name` field:
//!
//! - `one.js` → name `one`, file `one.js`
//! - `app.min.js` → name `app.min` (only the last extension is stripped)
//! - `Makefile` → name `Makefile`
//!
//! Images and JSON files never become scripts; [`is_script_path`] is the single
//! place that decides this.

/// Extensions that mark an artifact as a non-script (compared case-insensitively).
pub const NON_SCRIPT_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "ico", "bmp", "json",
];

/// Result of splitting a file name into stem and extension.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFileName {
    /// Name without its last extension. Equal to the input when there is none.
    pub stem: String,
    /// Last extension without the dot, if any.
    pub extension: Option<String>,
}

/// Split a file name on its last dot.
///
/// A leading dot is part of the name (`.env` has no extension) and a trailing
/// dot yields an empty extension (`name.` → stem `name`, extension `""`).
pub fn parse_file_name(file_name: &str) -> ParsedFileName {
    match file_name.rfind('.') {
        Some(pos) if pos > 0 => ParsedFileName {
            stem: file_name[..pos].to_string(),
            extension: Some(file_name[pos + 1..].to_string()),
        },
        _ => ParsedFileName {
            stem: file_name.to_string(),
            extension: None,
        },
    }
}

/// The last `/`-delimited segment of an output path.
pub fn file_name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Whether an artifact at `path` can carry a script entry.
pub fn is_script_path(path: &str) -> bool {
    let extension = parse_file_name(file_name_of(path))
        .extension
        .map(|e| e.to_ascii_lowercase());
    match extension {
        Some(ext) => !NON_SCRIPT_EXTENSIONS.contains(&ext.as_str()),
        None => true,
    }
}

/// Append a token to a file name's stem, keeping the extension.
///
/// `logo.png` + `abc` → `logo-abc.png`
pub fn with_suffix(file_name: &str, token: &str) -> String {
    let parsed = parse_file_name(file_name);
    match parsed.extension {
        Some(ext) => format!("{}-{}.{}", parsed.stem, token, ext),
        None => format!("{}-{}", parsed.stem, token),
    }
}
