//! # Cascade - Build-Time CSS Passes
//!
//! Cascade bundles two independent passes that run after CSS generation:
//!
//! - **Theme resolution** ([`theme`]): a nested design-token tree whose
//!   string leaves may reference other leaves with `{path.to.value}`. Every
//!   reference is replaced by its final value, detecting missing and
//!   circular references.
//! - **Media query canonicalization** ([`media`]): `@media` rules whose
//!   width constraints are equivalent are merged into one group and the
//!   groups are ordered mobile-first.
//!
//! The [`config`] and [`pipeline`] modules wire both passes to files, driven
//! by a `cascade.yaml` build description. The `cascade` binary exposes the
//! same passes on the command line.
//!
//! ## Quick Start
//!
//! ```rust
//! use cascade::media::{sort_media_queries, CanonicalizeOptions};
//! use cascade::theme::{resolve_theme, ThemeValue};
//!
//! let theme = ThemeValue::from_yaml_str(
//!     "size: { base: 4 }\nspace: { md: \"calc({size.base}px * 2)\" }\n",
//! ).unwrap();
//! let resolved = resolve_theme(&theme).unwrap();
//! assert_eq!(resolved.get_path("space.md").and_then(|v| v.as_str()), Some("calc(4px * 2)"));
//!
//! let css = "@media (min-width: 1024px) { .a { x: 1; } }\n\
//!            @media (min-width: 640px) { .b { x: 2; } }\n";
//! let sorted = sort_media_queries(css, &CanonicalizeOptions::default()).unwrap();
//! assert!(sorted.find("640px").unwrap() < sorted.find("1024px").unwrap());
//! ```

pub mod config;
pub mod pipeline;

/// Design-token theme resolution.
pub use cascade_theme as theme;

/// Media query canonicalization.
pub use cascade_media as media;

pub use config::{Config, ConfigError, DEFAULT_CONFIG_FILE};
pub use pipeline::{
    build_from_config_file, render_theme, resolve_theme_file, run_build, sort_stylesheet_file, write_output, BuildError,
    BuildReport,
};
