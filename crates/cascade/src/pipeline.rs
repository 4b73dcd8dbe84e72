//! File-level build passes.
//!
//! Each pass reads its input from disk, runs the pure transformation from
//! `cascade-theme` or `cascade-media`, and hands back the result. Writing
//! is left to [`run_build`] and the CLI so the passes stay easy to test.

use std::fs;
use std::path::{Path, PathBuf};

use cascade_media::{sort_media_queries, CanonicalizeOptions, MediaError};
use cascade_theme::{load_theme, resolve_theme, ThemeError, ThemeFormat, ThemeLoadError, ThemeValue};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{Config, ConfigError};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] ThemeLoadError),

    #[error("theme resolution failed: {0}")]
    Theme(#[from] ThemeError),

    #[error("media canonicalization failed in {}: {source}", .path.display())]
    Media {
        path: PathBuf,
        #[source]
        source: MediaError,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize theme: {0}")]
    Serialize(String),
}

/// What a [`run_build`] call produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Resolved theme output, if the theme pass wrote one.
    pub theme_output: Option<PathBuf>,
    /// Canonicalized stylesheet output, if the media pass wrote one.
    pub stylesheet_output: Option<PathBuf>,
    /// Number of passes that ran, including check-only passes.
    pub passes: usize,
}

/// Loads a theme file and resolves every reference in it.
pub fn resolve_theme_file(path: impl AsRef<Path>) -> Result<ThemeValue, BuildError> {
    let path = path.as_ref();
    let theme = load_theme(path)?;
    let resolved = resolve_theme(&theme)?;
    info!(path = %path.display(), "resolved theme");
    Ok(resolved)
}

/// Serializes a resolved theme. Output always ends with a newline.
pub fn render_theme(theme: &ThemeValue, format: ThemeFormat) -> Result<String, BuildError> {
    match format {
        ThemeFormat::Json => serde_json::to_string_pretty(theme)
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|e| BuildError::Serialize(e.to_string())),
        ThemeFormat::Yaml => {
            serde_yaml::to_string(theme).map_err(|e| BuildError::Serialize(e.to_string()))
        }
    }
}

/// Reads a generated stylesheet and canonicalizes its `@media` rules.
pub fn sort_stylesheet_file(
    path: impl AsRef<Path>,
    options: &CanonicalizeOptions,
) -> Result<String, BuildError> {
    let path = path.as_ref();
    let css = fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let sorted = sort_media_queries(&css, options).map_err(|source| BuildError::Media {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), sort = options.sort, "canonicalized media queries");
    Ok(sorted)
}

/// Runs every pass the config names.
///
/// A pass with an input but no output still runs, which surfaces reference
/// and strict-mode errors without touching any file.
pub fn run_build(config: &Config) -> Result<BuildReport, BuildError> {
    let mut report = BuildReport::default();

    if let Some(theme_path) = &config.theme {
        let resolved = resolve_theme_file(theme_path)?;
        report.passes += 1;

        if let Some(output) = &config.theme_output {
            let format = ThemeFormat::from_path(output).unwrap_or(ThemeFormat::Json);
            write_output(output, &render_theme(&resolved, format)?)?;
            report.theme_output = Some(output.clone());
        }
    }

    if let Some(stylesheet) = &config.stylesheet {
        let sorted = sort_stylesheet_file(stylesheet, &config.media)?;
        report.passes += 1;

        if let Some(output) = &config.stylesheet_output {
            write_output(output, &sorted)?;
            report.stylesheet_output = Some(output.clone());
        }
    }

    if report.passes == 0 {
        info!("config names no theme or stylesheet; nothing to build");
    }
    Ok(report)
}

/// Loads a config file and runs the build it describes.
pub fn build_from_config_file(path: impl AsRef<Path>) -> Result<BuildReport, BuildError> {
    let config = Config::load(path)?;
    run_build(&config)
}

/// Writes `contents`, creating parent directories as needed.
pub fn write_output(path: &Path, contents: &str) -> Result<(), BuildError> {
    let write_err = |source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, contents).map_err(write_err)?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_theme::ThemeMap;

    #[test]
    fn test_render_theme_json_is_pretty() {
        let mut map = ThemeMap::new();
        map.insert("a".to_string(), ThemeValue::from("x"));
        let text = render_theme(&ThemeValue::Mapping(map), ThemeFormat::Json).unwrap();
        assert_eq!(text, "{\n  \"a\": \"x\"\n}\n");
    }

    #[test]
    fn test_render_theme_yaml() {
        let mut map = ThemeMap::new();
        map.insert("b".to_string(), ThemeValue::from(2i64));
        map.insert("a".to_string(), ThemeValue::from("x"));
        let text = render_theme(&ThemeValue::Mapping(map), ThemeFormat::Yaml).unwrap();
        assert_eq!(text, "b: 2\na: x\n");
    }

    #[test]
    fn test_empty_config_runs_nothing() {
        let report = run_build(&Config::default()).unwrap();
        assert_eq!(report, BuildReport::default());
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let err = build_from_config_file("/no/such/dir/cascade.yaml").unwrap_err();
        assert!(matches!(err, BuildError::Config(ConfigError::Io { .. })));
        assert!(err.to_string().contains("cascade.yaml"));
    }

    #[test]
    fn test_missing_stylesheet_is_read_error() {
        let err = sort_stylesheet_file("/no/such/app.css", &CanonicalizeOptions::default())
            .unwrap_err();
        assert!(matches!(err, BuildError::Read { .. }));
    }
}
