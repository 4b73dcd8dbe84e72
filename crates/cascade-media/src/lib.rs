//! Cascade Media - deterministic `@media` rule ordering.
//!
//! Generated stylesheets tend to scatter `@media` rules: every component
//! emits its own breakpoints, in whatever order the components were
//! compiled. This crate folds identical queries together and puts the
//! result in mobile-first order, so the cascade no longer depends on
//! compilation order.
//!
//! ## Core Concepts
//!
//! - [`MediaQuery`]: a parsed `@media` prelude with a canonical width range
//! - [`parse_feature`]: parses one condition in either legacy
//!   (`min-width:`) or range (`width >=`) syntax
//! - [`canonicalize`]: merges rules with equal queries and sorts them
//! - [`sort_media_queries`]: the same, applied to a whole stylesheet
//!
//! ## Quick Start
//!
//! ```rust
//! use cascade_media::{sort_media_queries, CanonicalizeOptions, MediaSyntax};
//!
//! let css = "\
//! @media (min-width: 1024px) { .a { x: 1; } }
//! @media (width < 740px) { .b { x: 2; } }
//! @media (width >= 1024px) { .c { x: 3; } }
//! ";
//!
//! let options = CanonicalizeOptions {
//!     syntax: MediaSyntax::Legacy,
//!     ..CanonicalizeOptions::default()
//! };
//! let out = sort_media_queries(css, &options).unwrap();
//!
//! assert!(out.starts_with("@media (width < 740px) {"));
//! assert!(out.contains("@media (min-width: 1024px) {\n  .a { x: 1; }\n  .c { x: 3; }\n}"));
//! ```
//!
//! ## Ordering
//!
//! | Group | Position |
//! |-------|----------|
//! | max-only (`max-width: 739px`) | first, ascending by max |
//! | with a min (`min-width: 740px`) | ascending by min; at equal min, open-ended first, then ascending max |
//! | anything else (`print`, `hover`, lists) | last, in source order |
//!
//! Values are compared as `(number, unit)` pairs: `48em` and `768px` never
//! merge, and order by number first.

mod canonicalize;
mod error;
mod query;
mod stylesheet;

pub use canonicalize::{canonicalize, compare_mobile_first, CanonicalizeOptions, MediaGroup, MediaRule};
pub use error::MediaError;
pub use query::{
    parse_feature, parse_media_feature, Bound, Dimension, MediaFeature, MediaKey, MediaQuery,
    MediaSyntax, WidthRange,
};
pub use stylesheet::{render_groups, sort_media_queries, split_stylesheet, Stylesheet};
