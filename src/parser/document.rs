//! YAML Content Loader
//!
//! Reads a content file and parses it into a generic JSON value so it can be
//! fed to the schema checker and stored as-is.

use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};

/// Why a content file could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML syntax: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("YAML cannot be represented as JSON: {0}")]
    Convert(#[from] serde_json::Error),
}

/// Load and parse a YAML content file
pub fn load_document(path: &Path) -> Result<JsonValue, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_document_str(&content)
}

/// Parse YAML text into a JSON value. An empty document parses to `null`.
pub fn parse_document_str(content: &str) -> Result<JsonValue, LoadError> {
    let normalized = normalize_content(content);
    let yaml_value: serde_yaml::Value = serde_yaml::from_str(&normalized)?;
    Ok(serde_json::to_value(&yaml_value)?)
}

/// Normalize content: strip BOM, normalize line endings
///
/// Handles:
/// - UTF-8 BOM (EF BB BF / U+FEFF)
/// - CRLF → LF
/// - CR → LF (old Mac style)
pub fn normalize_content(content: &str) -> String {
    let s = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    s.replace("\r\n", "\n").replace('\r', "\n")
}
