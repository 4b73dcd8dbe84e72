//! Dot-path lookup into theme trees.
//!
//! Paths are dot-separated keys with optional bracket indices for sequence
//! positions: `colors.brand.primary`, `shadows[1].blur`, `fonts.stack[0]`.

use crate::value::ThemeValue;

/// One step of a parsed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    Key(&'a str),
    Index(usize),
}

/// Splits a path into its segments.
///
/// A bracket whose content is not a non-negative integer is kept as a key,
/// so `a[b]` is equivalent to `a.b`. Empty segments (`a..b`) are kept as
/// empty keys and will simply fail to resolve.
pub fn parse_path(path: &str) -> Vec<PathSegment<'_>> {
    let mut segments = Vec::new();

    for part in path.split('.') {
        let (head, mut rest) = match part.find('[') {
            Some(pos) => (&part[..pos], &part[pos..]),
            None => (part, ""),
        };

        if !head.is_empty() || rest.is_empty() {
            segments.push(PathSegment::Key(head));
        }

        while let Some(inner) = rest.strip_prefix('[') {
            let Some(close) = inner.find(']') else {
                // Unbalanced bracket: keep the remainder verbatim as a key.
                segments.push(PathSegment::Key(rest));
                break;
            };
            let content = &inner[..close];
            segments.push(match content.parse::<usize>() {
                Ok(index) => PathSegment::Index(index),
                Err(_) => PathSegment::Key(content),
            });
            rest = &inner[close + 1..];
        }

        if !rest.is_empty() && !rest.starts_with('[') {
            segments.push(PathSegment::Key(rest));
        }
    }

    segments
}

/// Resolves `path` against `tree`, returning `None` as soon as a segment is
/// missing. Never fails otherwise.
///
/// A numeric key applied to a sequence indexes it, and an index applied to
/// a mapping looks up its decimal key, so `sizes.0` and `sizes[0]` agree.
///
/// # Example
///
/// ```rust
/// use cascade_theme::{resolve_path, ThemeValue};
///
/// let theme: ThemeValue =
///     serde_json::from_str(r#"{"shadows": [{"blur": "2px"}, {"blur": "8px"}]}"#).unwrap();
///
/// assert_eq!(resolve_path(&theme, "shadows[1].blur"), Some(&ThemeValue::from("8px")));
/// assert_eq!(resolve_path(&theme, "shadows[5].blur"), None);
/// ```
pub fn resolve_path<'v>(tree: &'v ThemeValue, path: &str) -> Option<&'v ThemeValue> {
    parse_path(path)
        .into_iter()
        .try_fold(tree, |node, segment| step(node, segment))
}

fn step<'v>(node: &'v ThemeValue, segment: PathSegment<'_>) -> Option<&'v ThemeValue> {
    match (node, segment) {
        (ThemeValue::Mapping(map), PathSegment::Key(key)) => map.get(key),
        (ThemeValue::Mapping(map), PathSegment::Index(index)) => map.get(&index.to_string()),
        (ThemeValue::Sequence(items), PathSegment::Index(index)) => items.get(index),
        (ThemeValue::Sequence(items), PathSegment::Key(key)) => {
            key.parse::<usize>().ok().and_then(|index| items.get(index))
        }
        _ => None,
    }
}

/// Appends a mapping key to a path, as shown in error messages.
pub fn join_key(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Appends a sequence index to a path, as shown in error messages.
pub fn join_index(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}
