//! Build configuration.
//!
//! A build is described by a small YAML file, `cascade.yaml` by default:
//!
//! ```yaml
//! theme: tokens/theme.yaml
//! theme_output: dist/theme.json
//! stylesheet: dist/app.css
//! stylesheet_output: dist/app.sorted.css
//! media:
//!   sort: true
//!   strict: false
//!   syntax: range
//! ```
//!
//! Relative paths are resolved against the directory holding the config
//! file, so a build behaves the same whatever the working directory.

use std::fs;
use std::path::{Path, PathBuf};

use cascade_media::CanonicalizeOptions;
use serde::Deserialize;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "cascade.yaml";

/// What a build pass reads, writes and how media rules are handled.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Theme file to resolve (`.json`, `.yaml` or `.yml`).
    pub theme: Option<PathBuf>,
    /// Where to write the resolved theme. The format follows the extension.
    pub theme_output: Option<PathBuf>,
    /// Generated stylesheet whose `@media` rules should be canonicalized.
    pub stylesheet: Option<PathBuf>,
    /// Where to write the canonicalized stylesheet.
    pub stylesheet_output: Option<PathBuf>,
    /// Media canonicalization options.
    pub media: CanonicalizeOptions,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config{}: {message}", location(.path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

impl Config {
    /// Reads and parses a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        Self::from_yaml_str(&text, base_dir).map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    /// Parses config text, resolving relative paths against `base_dir`.
    pub fn from_yaml_str(text: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        // An empty document is a valid, empty config.
        let mut config: Config = if text.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(text).map_err(|e| ConfigError::Parse {
                path: None,
                message: e.to_string(),
            })?
        };

        for slot in [
            &mut config.theme,
            &mut config.theme_output,
            &mut config.stylesheet,
            &mut config.stylesheet_output,
        ] {
            if let Some(path) = slot.as_mut() {
                if path.is_relative() {
                    *path = base_dir.join(&*path);
                }
            }
        }
        Ok(config)
    }
}
