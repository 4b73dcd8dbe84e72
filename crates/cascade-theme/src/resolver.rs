//! Token reference resolution.
//!
//! [`resolve_theme`] walks a theme tree depth-first and substitutes every
//! `{dot.path}` reference:
//!
//! - A string that is exactly one reference takes the referenced value as-is,
//!   keeping its type (a mapping stays a mapping, a number stays a number).
//! - A string with references embedded in other text becomes a string, each
//!   reference replaced by the string form of a string or number value.
//!
//! Referenced values are resolved recursively before use, so chains like
//! `a -> b -> c` work to any depth. Each resolved path is memoized for the
//! rest of the pass, and a path reached again while it is still being
//! resolved is reported as a cycle.

use std::collections::{HashMap, HashSet};

use crate::error::{Result, ThemeError};
use crate::path::{join_index, join_key, resolve_path};
use crate::reference::{scan, Segment};
use crate::value::{ThemeMap, ThemeValue};

/// Resolves every reference in `theme`, returning a new tree.
///
/// The input is never modified. Any missing, circular or non-interpolable
/// reference aborts the whole pass.
///
/// # Example
///
/// ```rust
/// use cascade_theme::{resolve_theme, ThemeValue};
///
/// let theme: ThemeValue = serde_json::from_str(r#"{
///     "space": {"unit": 4, "md": "{space.unit}"},
///     "button": {"padding": "{space.md}px {space.unit}px"}
/// }"#).unwrap();
///
/// let resolved = resolve_theme(&theme).unwrap();
/// assert_eq!(resolved.get_path("space.md"), Some(&ThemeValue::from(4i64)));
/// assert_eq!(
///     resolved.get_path("button.padding"),
///     Some(&ThemeValue::from("4px 4px"))
/// );
/// ```
pub fn resolve_theme(theme: &ThemeValue) -> Result<ThemeValue> {
    ThemeResolver::new(theme).resolve()
}

/// State for a single resolution pass over one theme tree.
///
/// The cache and in-flight set belong to this value alone, so independent
/// resolvers never observe each other.
#[derive(Debug)]
pub struct ThemeResolver<'t> {
    root: &'t ThemeValue,
    cache: HashMap<String, ThemeValue>,
    in_flight: HashSet<String>,
}

impl<'t> ThemeResolver<'t> {
    pub fn new(root: &'t ThemeValue) -> Self {
        Self {
            root,
            cache: HashMap::new(),
            in_flight: HashSet::new(),
        }
    }

    /// Resolves the whole tree.
    pub fn resolve(&mut self) -> Result<ThemeValue> {
        let root = self.root;
        let resolved = self.resolve_value(root, "")?;
        tracing::debug!(references = self.cache.len(), "theme references resolved");
        Ok(resolved)
    }

    /// Resolves a single path of the theme, as if it had been referenced.
    pub fn resolve_reference(&mut self, path: &str) -> Result<ThemeValue> {
        self.resolve_ref(path, path)
    }

    /// Returns the memoized value of a reference path, if it has been
    /// resolved during this pass.
    pub fn cached(&self, path: &str) -> Option<&ThemeValue> {
        self.cache.get(path)
    }

    fn resolve_value(&mut self, value: &ThemeValue, current: &str) -> Result<ThemeValue> {
        match value {
            ThemeValue::String(text) => self.resolve_string(text, current),
            ThemeValue::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| self.resolve_value(item, &join_index(current, index)))
                .collect::<Result<Vec<_>>>()
                .map(ThemeValue::Sequence),
            ThemeValue::Mapping(map) => {
                let mut out = ThemeMap::new();
                for (key, item) in map.iter() {
                    let resolved = self.resolve_value(item, &join_key(current, key))?;
                    out.insert(key, resolved);
                }
                Ok(ThemeValue::Mapping(out))
            }
            scalar => Ok(scalar.clone()),
        }
    }

    fn resolve_string(&mut self, text: &str, current: &str) -> Result<ThemeValue> {
        let segments = scan(text);

        if let [Segment::Reference(path)] = segments.as_slice() {
            return self.resolve_ref(path, current);
        }
        if !segments
            .iter()
            .any(|segment| matches!(segment, Segment::Reference(_)))
        {
            return Ok(ThemeValue::String(text.to_string()));
        }

        let mut out = String::with_capacity(text.len());
        for segment in segments {
            match segment {
                Segment::Literal(literal) => out.push_str(literal),
                Segment::Reference(path) => {
                    let value = self.resolve_ref(path, current)?;
                    let piece =
                        value
                            .to_string_form()
                            .ok_or_else(|| ThemeError::InterpolationType {
                                path: path.to_string(),
                                container: current.to_string(),
                                found: value.kind(),
                            })?;
                    out.push_str(&piece);
                }
            }
        }
        Ok(ThemeValue::String(out))
    }

    fn resolve_ref(&mut self, path: &str, from: &str) -> Result<ThemeValue> {
        if let Some(hit) = self.cache.get(path) {
            return Ok(hit.clone());
        }

        if self.in_flight.contains(path) {
            return Err(ThemeError::CircularReference {
                path: path.to_string(),
                from: from.to_string(),
            });
        }

        let root = self.root;
        let raw = resolve_path(root, path).ok_or_else(|| ThemeError::MissingReference {
            path: path.to_string(),
            from: from.to_string(),
        })?;

        self.in_flight.insert(path.to_string());
        let result = self.resolve_value(raw, path);
        self.in_flight.remove(path);

        let resolved = result?;
        tracing::trace!(path, from, kind = resolved.kind(), "resolved reference");
        self.cache.insert(path.to_string(), resolved.clone());
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme(json: &str) -> ThemeValue {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_reference_free_theme_is_unchanged() {
        let input = theme(r#"{"a": {"b": [1, "two", true, null]}, "c": 1.5}"#);
        assert_eq!(resolve_theme(&input).unwrap(), input);
    }

    #[test]
    fn test_full_reference_preserves_mapping_type() {
        let input = theme(r#"{"spacing": {"xs": {"x": "2px", "y": "4px"}}, "pad": "{spacing.xs}"}"#);
        let resolved = resolve_theme(&input).unwrap();
        assert_eq!(resolved.get_path("pad"), input.get_path("spacing.xs"));
        assert_eq!(resolved.get_path("pad").unwrap().kind(), "mapping");
    }

    #[test]
    fn test_full_reference_preserves_sequence_number_and_bool() {
        let input = theme(
            r#"{"stack": ["a", "b"], "n": 3, "flag": false,
                "s": "{stack}", "m": "{n}", "f": "{flag}"}"#,
        );
        let resolved = resolve_theme(&input).unwrap();
        assert_eq!(resolved.get_path("s"), input.get_path("stack"));
        assert_eq!(resolved.get_path("m"), Some(&ThemeValue::from(3i64)));
        assert_eq!(resolved.get_path("f"), Some(&ThemeValue::from(false)));
    }

    #[test]
    fn test_partial_interpolation_yields_string() {
        let input = theme(
            r#"{"space": {"sm": "4px", "md": 8}, "pad": "{space.sm} {space.md}px"}"#,
        );
        let resolved = resolve_theme(&input).unwrap();
        assert_eq!(resolved.get_path("pad"), Some(&ThemeValue::from("4px 8px")));
    }

    #[test]
    fn test_chained_references_resolve_and_memoize() {
        let input = theme(r##"{"a": "{b}", "b": "{c}", "c": "#fff"}"##);
        let mut resolver = ThemeResolver::new(&input);
        let value = resolver.resolve_reference("a").unwrap();

        assert_eq!(value, ThemeValue::from("#fff"));
        assert_eq!(resolver.cached("a"), Some(&ThemeValue::from("#fff")));
        assert_eq!(resolver.cached("b"), Some(&ThemeValue::from("#fff")));
        assert_eq!(resolver.cached("c"), Some(&ThemeValue::from("#fff")));
    }

    #[test]
    fn test_reference_inside_referenced_mapping_resolves() {
        let input = theme(
            r##"{"base": {"fg": "{palette.ink}"}, "palette": {"ink": "#111"}, "card": "{base}"}"##,
        );
        let resolved = resolve_theme(&input).unwrap();
        assert_eq!(resolved.get_path("card.fg"), Some(&ThemeValue::from("#111")));
    }

    #[test]
    fn test_sequence_elements_resolve_in_order() {
        let input = theme(r#"{"c": {"a": "red", "b": "blue"}, "list": ["{c.a}", "x", "{c.b}"]}"#);
        let resolved = resolve_theme(&input).unwrap();
        assert_eq!(
            resolved.get_path("list"),
            Some(&ThemeValue::from(vec![
                ThemeValue::from("red"),
                ThemeValue::from("x"),
                ThemeValue::from("blue"),
            ]))
        );
    }

    #[test]
    fn test_mutual_cycle_is_circular() {
        let input = theme(r#"{"a": "{b}", "b": "{a}"}"#);
        let err = resolve_theme(&input).unwrap_err();
        assert!(matches!(err, ThemeError::CircularReference { .. }));
    }

    #[test]
    fn test_self_reference_is_circular() {
        let input = theme(r#"{"a": "{a}"}"#);
        match resolve_theme(&input).unwrap_err() {
            ThemeError::CircularReference { path, from } => {
                assert_eq!(path, "a");
                assert_eq!(from, "a");
            }
            other => panic!("Expected CircularReference, got {:?}", other),
        }
    }

    #[test]
    fn test_cycle_through_partial_interpolation() {
        let input = theme(r#"{"a": "x {b}", "b": "y {a}"}"#);
        assert!(matches!(
            resolve_theme(&input),
            Err(ThemeError::CircularReference { .. })
        ));
    }

    #[test]
    fn test_missing_reference_names_path() {
        let input = theme(r#"{"x": {"y": "{z.missing}"}}"#);
        match resolve_theme(&input).unwrap_err() {
            ThemeError::MissingReference { path, from } => {
                assert_eq!(path, "z.missing");
                assert_eq!(from, "x.y");
            }
            other => panic!("Expected MissingReference, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_reference_reports_sequence_position() {
        let input = theme(r#"{"list": ["ok", "{nope}"]}"#);
        match resolve_theme(&input).unwrap_err() {
            ThemeError::MissingReference { from, .. } => assert_eq!(from, "list[1]"),
            other => panic!("Expected MissingReference, got {:?}", other),
        }
    }

    #[test]
    fn test_interpolating_mapping_is_type_error() {
        let input = theme(r#"{"spacing": {"xs": "2px"}, "pad": "calc({spacing} * 2)"}"#);
        match resolve_theme(&input).unwrap_err() {
            ThemeError::InterpolationType {
                path,
                container,
                found,
            } => {
                assert_eq!(path, "spacing");
                assert_eq!(container, "pad");
                assert_eq!(found, "mapping");
            }
            other => panic!("Expected InterpolationType, got {:?}", other),
        }
    }

    #[test]
    fn test_interpolating_bool_or_sequence_is_type_error() {
        let input = theme(r#"{"on": true, "pad": "x{on}"}"#);
        assert!(matches!(
            resolve_theme(&input),
            Err(ThemeError::InterpolationType { found: "boolean", .. })
        ));

        let input = theme(r#"{"list": [1], "pad": "x{list}"}"#);
        assert!(matches!(
            resolve_theme(&input),
            Err(ThemeError::InterpolationType { found: "sequence", .. })
        ));
    }

    #[test]
    fn test_shared_reference_is_not_a_cycle() {
        // `base` is referenced twice from independent places.
        let input = theme(r#"{"base": "1px", "a": "{base}", "b": {"c": "{base} solid"}}"#);
        let resolved = resolve_theme(&input).unwrap();
        assert_eq!(resolved.get_path("a"), Some(&ThemeValue::from("1px")));
        assert_eq!(resolved.get_path("b.c"), Some(&ThemeValue::from("1px solid")));
    }

    #[test]
    fn test_failed_resolution_releases_in_flight_path() {
        let input = theme(r#"{"a": "{missing}"}"#);
        let mut resolver = ThemeResolver::new(&input);
        assert!(matches!(
            resolver.resolve_reference("a"),
            Err(ThemeError::MissingReference { .. })
        ));
        // A later attempt reports the same missing path, not a cycle.
        assert!(matches!(
            resolver.resolve_reference("a"),
            Err(ThemeError::MissingReference { .. })
        ));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let input = theme(r#"{"a": "{b}", "b": "x"}"#);
        let before = input.clone();
        let _ = resolve_theme(&input).unwrap();
        assert_eq!(input, before);
        assert_eq!(input.get_path("a"), Some(&ThemeValue::from("{b}")));
    }

    #[test]
    fn test_bracket_reference_into_sequence() {
        let input = theme(r#"{"shadows": ["0 1px #000", "0 4px #000"], "card": "{shadows[1]}"}"#);
        let resolved = resolve_theme(&input).unwrap();
        assert_eq!(resolved.get_path("card"), Some(&ThemeValue::from("0 4px #000")));
    }

    #[test]
    fn test_key_order_is_preserved() {
        let input = theme(r#"{"z": "{a}", "a": "1", "m": "2"}"#);
        let resolved = resolve_theme(&input).unwrap();
        let keys: Vec<&str> = resolved.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
