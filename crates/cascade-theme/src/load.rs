//! Reading themes from JSON and YAML.
//!
//! Loading only builds the tree; references are left untouched until
//! [`crate::resolve_theme`] runs.

use std::fs;
use std::path::Path;

use crate::error::ThemeLoadError;
use crate::value::ThemeValue;

/// Supported theme file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeFormat {
    Json,
    Yaml,
}

impl ThemeFormat {
    /// Picks the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ThemeFormat::Json),
            "yaml" | "yml" => Some(ThemeFormat::Yaml),
            _ => None,
        }
    }
}

impl ThemeValue {
    /// Parses a theme from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ThemeLoadError> {
        serde_json::from_str(text).map_err(|e| ThemeLoadError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    /// Parses a theme from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, ThemeLoadError> {
        serde_yaml::from_str(text).map_err(|e| ThemeLoadError::Parse {
            path: None,
            message: e.to_string(),
        })
    }
}

/// Loads a theme file, choosing the parser from its extension.
pub fn load_theme(path: impl AsRef<Path>) -> Result<ThemeValue, ThemeLoadError> {
    let path = path.as_ref();
    let format = ThemeFormat::from_path(path).ok_or_else(|| ThemeLoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let text = fs::read_to_string(path).map_err(|source| ThemeLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = match format {
        ThemeFormat::Json => ThemeValue::from_json_str(&text),
        ThemeFormat::Yaml => ThemeValue::from_yaml_str(&text),
    };

    parsed.map_err(|err| match err {
        ThemeLoadError::Parse { message, .. } => ThemeLoadError::Parse {
            path: Some(path.to_path_buf()),
            message,
        },
        other => other,
    })
}
