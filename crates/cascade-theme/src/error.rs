//! Error types for theme loading and reference resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving token references.
///
/// All of them are fatal to the resolution pass: a broken reference means a
/// broken theme, so no partially resolved tree is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// A reference points at a path that does not exist in the theme.
    #[error("missing reference '{{{path}}}' in '{from}': no such path in the theme")]
    MissingReference {
        /// The referenced path.
        path: String,
        /// The theme path holding the reference.
        from: String,
    },

    /// A reference was reached again while it was still being resolved.
    #[error("circular reference '{{{path}}}' in '{from}': '{path}' is still being resolved")]
    CircularReference { path: String, from: String },

    /// A reference embedded in a larger string resolved to something that
    /// has no string form.
    #[error(
        "cannot interpolate '{{{path}}}' into '{container}': expected a string or number, found {found}"
    )]
    InterpolationType {
        path: String,
        container: String,
        found: &'static str,
    },
}

/// Errors raised while reading a theme file.
#[derive(Debug, Error)]
pub enum ThemeLoadError {
    #[error("failed to read theme {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse theme{}: {message}", location(.path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("unsupported theme format for {} (expected .json, .yaml or .yml)", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Result type for theme resolution.
pub type Result<T> = std::result::Result<T, ThemeError>;

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}
