//! Scanner for `{dot.path}` token references inside theme strings.
//!
//! A reference is `{`, one or more characters other than `}`, then `}`.
//! Scanning is leftmost-first: in `{{a}` the reference path is `{a`. An
//! empty `{}` or an unclosed `{` is plain text.

/// A piece of a scanned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    /// The path between the braces.
    Reference(&'a str),
}

/// Splits `text` into literal runs and references, in order.
///
/// Adjacent literal text is always emitted as a single segment.
///
/// ```rust
/// use cascade_theme::reference::{scan, Segment};
///
/// assert_eq!(
///     scan("{space.sm} {space.md}"),
///     vec![
///         Segment::Reference("space.sm"),
///         Segment::Literal(" "),
///         Segment::Reference("space.md"),
///     ]
/// );
/// ```
pub fn scan(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find('{') {
        let open = cursor + offset;
        let after_open = open + 1;

        match text[after_open..].find('}') {
            Some(0) => {
                // `{}`: not a reference, keep scanning after the brace.
                cursor = after_open;
            }
            Some(len) => {
                if literal_start < open {
                    segments.push(Segment::Literal(&text[literal_start..open]));
                }
                segments.push(Segment::Reference(&text[after_open..after_open + len]));
                cursor = after_open + len + 1;
                literal_start = cursor;
            }
            None => break,
        }
    }

    if literal_start < text.len() {
        segments.push(Segment::Literal(&text[literal_start..]));
    }
    segments
}

/// Returns the path when `text` is exactly one reference and nothing else.
pub fn full_reference(text: &str) -> Option<&str> {
    match scan(text).as_slice() {
        [Segment::Reference(path)] => Some(path),
        _ => None,
    }
}

/// Returns true if `text` contains at least one reference.
pub fn has_references(text: &str) -> bool {
    scan(text)
        .iter()
        .any(|segment| matches!(segment, Segment::Reference(_)))
}
