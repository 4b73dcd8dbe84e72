//! Error types for media query handling.

use thiserror::Error;

/// Errors raised while parsing media conditions.
///
/// Canonicalization is permissive by default: unrecognized conditions are
/// carried along as opaque text. These errors only surface from the strict
/// entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// A parenthesized condition is not a width constraint.
    #[error("not a width condition: '{text}'")]
    NotAWidthCondition { text: String },

    /// Strict canonicalization met a condition it cannot order.
    #[error("unrecognized media feature '{feature}' in '@media {query}'")]
    UnrecognizedFeature { query: String, feature: String },
}
