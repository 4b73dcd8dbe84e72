//! Media query parsing and the canonical width model.
//!
//! Both spellings of a width constraint parse to the same [`WidthRange`]:
//!
//! | Condition | Canonical form |
//! |-----------|----------------|
//! | `(min-width: 740px)`, `(width >= 740px)`, `(740px <= width)` | `min = 740px` |
//! | `(max-width: 739px)`, `(width <= 739px)`, `(739px >= width)` | `max = 739px` |
//! | `(width > 740px)` | `min = 740px`, exclusive |
//! | `(740px <= width <= 1023px)` | `min = 740px`, `max = 1023px` |
//!
//! Anything else (media types, `hover`, `prefers-*`, height queries) is kept
//! as an opaque feature. Opaque features still take part in equality, so two
//! identical `(hover: hover)` rules merge, but a query carrying one cannot be
//! placed in mobile-first order.
//!
//! Tokenization is done with `cssparser`, so comments, escapes and odd
//! whitespace inside conditions are handled the way a browser would.

use std::cmp::Ordering;
use std::fmt;

use cssparser::{ParseError, Parser, ParserInput, Token};

use crate::error::MediaError;

/// Bare media types that strict mode accepts even though they do not
/// constrain width.
const MEDIA_TYPES: &[&str] = &["all", "screen", "print", "only"];

/// A number paired with its unit, e.g. `740px` or `48em`.
///
/// Units are compared lexically: `48em` and `768px` are different values.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub value: f32,
    /// Lowercased unit; empty for unitless numbers such as `0`.
    pub unit: String,
}

impl Dimension {
    pub fn new(value: f32, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// Total order on `(value, unit)`.
    pub fn compare(&self, other: &Dimension) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then_with(|| self.unit.cmp(&other.unit))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// One side of a width range.
#[derive(Debug, Clone, PartialEq)]
pub struct Bound {
    pub dimension: Dimension,
    /// True for `<` / `>`; these order like their inclusive counterparts
    /// but never merge with them.
    pub exclusive: bool,
}

impl Bound {
    pub fn inclusive(dimension: Dimension) -> Self {
        Self {
            dimension,
            exclusive: false,
        }
    }

    pub fn exclusive(dimension: Dimension) -> Self {
        Self {
            dimension,
            exclusive: true,
        }
    }
}

/// The canonical `{min, max}` form of one or more width conditions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WidthRange {
    pub min: Option<Bound>,
    pub max: Option<Bound>,
}

impl WidthRange {
    pub fn min(bound: Bound) -> Self {
        Self {
            min: Some(bound),
            max: None,
        }
    }

    pub fn max(bound: Bound) -> Self {
        Self {
            min: None,
            max: Some(bound),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Intersects `other` into `self`.
    ///
    /// Returns the bounds that could not be combined because they use a
    /// different unit than the bound already in place.
    fn intersect(&mut self, other: WidthRange) -> Vec<(Side, Bound)> {
        let mut rejected = Vec::new();
        if let Some(bound) = other.min {
            if let Some(bound) = tighten(&mut self.min, bound, Side::Min) {
                rejected.push((Side::Min, bound));
            }
        }
        if let Some(bound) = other.max {
            if let Some(bound) = tighten(&mut self.max, bound, Side::Max) {
                rejected.push((Side::Max, bound));
            }
        }
        rejected
    }

    fn apply(&mut self, op: Comparison, dimension: Dimension) {
        match op {
            Comparison::Ge => self.min = Some(Bound::inclusive(dimension)),
            Comparison::Gt => self.min = Some(Bound::exclusive(dimension)),
            Comparison::Le => self.max = Some(Bound::inclusive(dimension)),
            Comparison::Lt => self.max = Some(Bound::exclusive(dimension)),
            Comparison::Eq => {
                self.min = Some(Bound::inclusive(dimension.clone()));
                self.max = Some(Bound::inclusive(dimension));
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Min,
    Max,
}

/// Keeps the tighter of two bounds on the same side. Bounds in different
/// units cannot be compared, so the new one is handed back.
fn tighten(slot: &mut Option<Bound>, bound: Bound, side: Side) -> Option<Bound> {
    let Some(current) = slot.as_ref() else {
        *slot = Some(bound);
        return None;
    };
    if current.dimension.unit != bound.dimension.unit {
        return Some(bound);
    }

    let ordering = bound.dimension.compare(&current.dimension);
    let tighter = match side {
        Side::Min => ordering == Ordering::Greater,
        Side::Max => ordering == Ordering::Less,
    };
    if tighter || (ordering == Ordering::Equal && bound.exclusive) {
        *slot = Some(bound);
    }
    None
}

/// How canonical queries are written back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaSyntax {
    /// Reuse the prelude of the first rule seen for the group.
    #[default]
    Preserve,
    /// `(min-width: 740px) and (max-width: 1023px)`.
    Legacy,
    /// `(width >= 740px) and (width <= 1023px)`.
    Range,
}

/// A single parsed condition: either a width constraint or opaque text.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaFeature {
    Width(WidthRange),
    Opaque(String),
}

/// Parses one parenthesized condition as a width constraint.
///
/// ```rust
/// use cascade_media::{parse_feature, Dimension};
///
/// let legacy = parse_feature("(max-width: 739px)").unwrap();
/// let range = parse_feature("(width <= 739px)").unwrap();
/// assert_eq!(legacy, range);
/// assert_eq!(legacy.max.unwrap().dimension, Dimension::new(739.0, "px"));
///
/// assert!(parse_feature("(hover: hover)").is_err());
/// ```
pub fn parse_feature(text: &str) -> Result<WidthRange, MediaError> {
    match parse_media_feature(text) {
        MediaFeature::Width(range) => Ok(range),
        MediaFeature::Opaque(_) => Err(MediaError::NotAWidthCondition {
            text: text.trim().to_string(),
        }),
    }
}

/// Parses one parenthesized condition, falling back to an opaque feature
/// for anything that is not a width constraint.
pub fn parse_media_feature(text: &str) -> MediaFeature {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);

    let parsed = parser
        .expect_parenthesis_block()
        .map_err(ParseError::from)
        .and_then(|_| parser.parse_nested_block(parse_width_block));

    match parsed {
        Ok(range) if parser.is_exhausted() => MediaFeature::Width(range),
        _ => MediaFeature::Opaque(normalize_opaque(text)),
    }
}

/// A parsed `@media` prelude.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaQuery {
    source: String,
    width: WidthRange,
    /// Normalized opaque features, in source order.
    opaque: Vec<String>,
    /// Media type words (`only`, `screen`) as written.
    media_types: Vec<String>,
    /// Opaque conditions as written, for rendering.
    conditions: Vec<String>,
}

/// Order- and spelling-independent identity of a [`MediaQuery`].
#[derive(Debug, Clone, PartialEq)]
pub struct MediaKey {
    width: WidthRange,
    opaque: Vec<String>,
}

impl MediaQuery {
    /// Parses an `@media` prelude (the text between `@media` and `{`).
    ///
    /// Never fails: unrecognized parts become opaque features. A query list
    /// (`a, b`), a negated query or an `or` chain is kept whole as a single
    /// opaque feature.
    ///
    /// ```rust
    /// use cascade_media::MediaQuery;
    ///
    /// let a = MediaQuery::parse("(max-width: 1023px) and (min-width: 740px)");
    /// let b = MediaQuery::parse("(width >= 740px) and (width <= 1023px)");
    /// assert_eq!(a.key(), b.key());
    /// ```
    pub fn parse(prelude: &str) -> Self {
        let source = prelude.trim().to_string();
        let mut input = ParserInput::new(prelude);
        let mut parser = Parser::new(&mut input);

        let mut width = WidthRange::default();
        let mut opaque = Vec::new();
        let mut media_types = Vec::new();
        let mut conditions = Vec::new();

        loop {
            let start = parser.position();
            let token = match parser.next() {
                Ok(token) => token.clone(),
                Err(_) => break,
            };

            match token {
                Token::ParenthesisBlock => {
                    let parsed = parser.parse_nested_block(parse_width_block);
                    match parsed {
                        Ok(range) => {
                            for (side, bound) in width.intersect(range) {
                                let text = render_bound(side, &bound, MediaSyntax::Range);
                                opaque.push(text.clone());
                                conditions.push(text);
                            }
                        }
                        Err(_) => {
                            let text = parser.slice_from(start).trim();
                            opaque.push(normalize_opaque(text));
                            conditions.push(text.to_string());
                        }
                    }
                }
                Token::Ident(ref name) if name.eq_ignore_ascii_case("and") => {}
                // `or` does not intersect its operands; `not` negates them.
                Token::Ident(ref name)
                    if name.eq_ignore_ascii_case("or") || name.eq_ignore_ascii_case("not") =>
                {
                    return Self::whole_opaque(source)
                }
                Token::Ident(ref name) => {
                    opaque.push(name.to_ascii_lowercase());
                    media_types.push(name.to_string());
                }
                _ => return Self::whole_opaque(source),
            }
        }

        if width.is_empty() && opaque.is_empty() {
            return Self::whole_opaque(source);
        }

        Self {
            source,
            width,
            opaque,
            media_types,
            conditions,
        }
    }

    fn whole_opaque(source: String) -> Self {
        let opaque = vec![normalize_opaque(&source)];
        Self {
            source,
            width: WidthRange::default(),
            opaque,
            media_types: Vec::new(),
            conditions: Vec::new(),
        }
    }

    /// The prelude as written, trimmed.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn width(&self) -> &WidthRange {
        &self.width
    }

    pub fn opaque_features(&self) -> &[String] {
        &self.opaque
    }

    /// The first opaque feature that is not a bare media type.
    pub fn unrecognized_feature(&self) -> Option<&str> {
        self.opaque
            .iter()
            .map(String::as_str)
            .find(|feature| !MEDIA_TYPES.contains(feature))
    }

    /// True when the query is a pure width range and can take part in
    /// mobile-first ordering.
    pub fn is_sortable(&self) -> bool {
        self.opaque.is_empty() && !self.width.is_empty()
    }

    /// The canonical identity used for merging.
    pub fn key(&self) -> MediaKey {
        let mut opaque = self.opaque.clone();
        opaque.sort();
        MediaKey {
            width: self.width.clone(),
            opaque,
        }
    }

    /// Writes the query back out in the requested spelling.
    ///
    /// Media types lead, separated by spaces, followed by the other
    /// conditions as written and then the width bounds. Exclusive bounds
    /// have no legacy spelling and are always written in range form.
    pub fn render(&self, syntax: MediaSyntax) -> String {
        if syntax == MediaSyntax::Preserve || self.width.is_empty() {
            return self.source.clone();
        }

        let mut parts: Vec<String> = self.conditions.clone();
        if let Some(min) = &self.width.min {
            parts.push(render_bound(Side::Min, min, syntax));
        }
        if let Some(max) = &self.width.max {
            parts.push(render_bound(Side::Max, max, syntax));
        }
        if !self.media_types.is_empty() {
            parts.insert(0, self.media_types.join(" "));
        }
        parts.join(" and ")
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn render_bound(side: Side, bound: &Bound, syntax: MediaSyntax) -> String {
    let dim = &bound.dimension;
    match (side, bound.exclusive, syntax) {
        (Side::Min, false, MediaSyntax::Legacy) => format!("(min-width: {})", dim),
        (Side::Max, false, MediaSyntax::Legacy) => format!("(max-width: {})", dim),
        (Side::Min, false, _) => format!("(width >= {})", dim),
        (Side::Max, false, _) => format!("(width <= {})", dim),
        (Side::Min, true, _) => format!("(width > {})", dim),
        (Side::Max, true, _) => format!("(width < {})", dim),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl Comparison {
    /// `a op b` is `b flip(op) a`.
    fn flip(self) -> Self {
        match self {
            Comparison::Lt => Comparison::Gt,
            Comparison::Le => Comparison::Ge,
            Comparison::Gt => Comparison::Lt,
            Comparison::Ge => Comparison::Le,
            Comparison::Eq => Comparison::Eq,
        }
    }
}

/// Parses the inside of a `( ... )` block as a width constraint.
fn parse_width_block<'i, 't>(
    input: &mut Parser<'i, 't>,
) -> Result<WidthRange, ParseError<'i, ()>> {
    let mut range = WidthRange::default();

    if let Ok(name) = input.try_parse(|i| i.expect_ident_cloned()) {
        if input.try_parse(|i| i.expect_colon()).is_ok() {
            let dimension = parse_dimension(input)?;
            let op = if name.eq_ignore_ascii_case("min-width") {
                Comparison::Ge
            } else if name.eq_ignore_ascii_case("max-width") {
                Comparison::Le
            } else if name.eq_ignore_ascii_case("width") {
                Comparison::Eq
            } else {
                return Err(input.new_custom_error::<(), ()>(()));
            };
            range.apply(op, dimension);
        } else if name.eq_ignore_ascii_case("width") {
            let op = parse_comparison(input)?;
            let dimension = parse_dimension(input)?;
            range.apply(op, dimension);
        } else {
            return Err(input.new_custom_error::<(), ()>(()));
        }
    } else {
        // `<dim> op width [op <dim>]`
        let low = parse_dimension(input)?;
        let op = parse_comparison(input)?;
        input.expect_ident_matching("width")?;
        range.apply(op.flip(), low);

        if !input.is_exhausted() {
            let op = parse_comparison(input)?;
            let high = parse_dimension(input)?;
            range.apply(op, high);
        }
    }

    input.expect_exhausted()?;
    Ok(range)
}

fn parse_dimension<'i, 't>(input: &mut Parser<'i, 't>) -> Result<Dimension, ParseError<'i, ()>> {
    match input.next()?.clone() {
        Token::Dimension { value, unit, .. } => Ok(Dimension::new(value, unit.to_ascii_lowercase())),
        Token::Number { value, .. } => Ok(Dimension::new(value, "")),
        _ => Err(input.new_custom_error::<(), ()>(())),
    }
}

fn parse_comparison<'i, 't>(input: &mut Parser<'i, 't>) -> Result<Comparison, ParseError<'i, ()>> {
    let delim = match input.next()?.clone() {
        Token::Delim(c) => c,
        _ => return Err(input.new_custom_error::<(), ()>(())),
    };
    let or_equal = delim != '=' && input.try_parse(|i| i.expect_delim('=')).is_ok();

    match (delim, or_equal) {
        ('<', false) => Ok(Comparison::Lt),
        ('<', true) => Ok(Comparison::Le),
        ('>', false) => Ok(Comparison::Gt),
        ('>', true) => Ok(Comparison::Ge),
        ('=', _) => Ok(Comparison::Eq),
        _ => Err(input.new_custom_error::<(), ()>(())),
    }
}

/// Lowercases and normalizes whitespace so that `( hover:hover )` and
/// `(hover: hover)` compare equal.
fn normalize_opaque(text: &str) -> String {
    let collapsed: Vec<char> = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .collect();

    let mut out = String::with_capacity(collapsed.len());
    for (i, &c) in collapsed.iter().enumerate() {
        if c == ' ' {
            let prev = i.checked_sub(1).and_then(|p| collapsed.get(p)).copied();
            let next = collapsed.get(i + 1).copied();
            if matches!(prev, Some('(' | ':' | ',')) || matches!(next, Some(')' | ':' | ',')) {
                continue;
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(value: f32) -> Dimension {
        Dimension::new(value, "px")
    }

    #[test]
    fn test_legacy_min_and_max() {
        assert_eq!(
            parse_feature("(min-width: 740px)").unwrap(),
            WidthRange::min(Bound::inclusive(px(740.0)))
        );
        assert_eq!(
            parse_feature("(max-width: 739px)").unwrap(),
            WidthRange::max(Bound::inclusive(px(739.0)))
        );
    }

    #[test]
    fn test_range_syntax_matches_legacy() {
        assert_eq!(
            parse_feature("(width >= 740px)").unwrap(),
            parse_feature("(min-width: 740px)").unwrap()
        );
        assert_eq!(
            parse_feature("(width <= 739px)").unwrap(),
            parse_feature("(max-width: 739px)").unwrap()
        );
    }

    #[test]
    fn test_reversed_range_syntax() {
        assert_eq!(
            parse_feature("(740px <= width)").unwrap(),
            WidthRange::min(Bound::inclusive(px(740.0)))
        );
        assert_eq!(
            parse_feature("(739px >= width)").unwrap(),
            WidthRange::max(Bound::inclusive(px(739.0)))
        );
    }

    #[test]
    fn test_strict_comparisons_are_exclusive() {
        assert_eq!(
            parse_feature("(width > 740px)").unwrap(),
            WidthRange::min(Bound::exclusive(px(740.0)))
        );
        assert_eq!(
            parse_feature("(width < 740px)").unwrap(),
            WidthRange::max(Bound::exclusive(px(740.0)))
        );
    }

    #[test]
    fn test_double_sided_range() {
        let range = parse_feature("(740px <= width <= 1023px)").unwrap();
        assert_eq!(range.min, Some(Bound::inclusive(px(740.0))));
        assert_eq!(range.max, Some(Bound::inclusive(px(1023.0))));
    }

    #[test]
    fn test_exact_width() {
        let range = parse_feature("(width: 600px)").unwrap();
        assert_eq!(range.min, Some(Bound::inclusive(px(600.0))));
        assert_eq!(range.max, Some(Bound::inclusive(px(600.0))));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(
            parse_feature("( MIN-WIDTH:40EM )").unwrap(),
            WidthRange::min(Bound::inclusive(Dimension::new(40.0, "em")))
        );
        assert_eq!(
            parse_feature("(width>=740px)").unwrap(),
            parse_feature("(min-width: 740px)").unwrap()
        );
    }

    #[test]
    fn test_unitless_zero() {
        assert_eq!(
            parse_feature("(min-width: 0)").unwrap(),
            WidthRange::min(Bound::inclusive(Dimension::new(0.0, "")))
        );
    }

    #[test]
    fn test_non_width_features_are_opaque() {
        assert!(parse_feature("(hover: hover)").is_err());
        assert!(parse_feature("(min-height: 400px)").is_err());
        assert!(parse_feature("(width >= )").is_err());
        assert_eq!(
            parse_media_feature("(Hover:  hover)"),
            MediaFeature::Opaque("(hover:hover)".to_string())
        );
    }

    #[test]
    fn test_query_is_order_and_syntax_independent() {
        let a = MediaQuery::parse("(min-width: 740px) and (max-width: 1023px)");
        let b = MediaQuery::parse("(width <= 1023px) and (width >= 740px)");
        assert_eq!(a.key(), b.key());
        assert!(a.is_sortable());
    }

    #[test]
    fn test_query_with_media_type_is_unsortable() {
        let q = MediaQuery::parse("screen and (min-width: 740px)");
        assert!(!q.is_sortable());
        assert_eq!(q.opaque_features(), ["screen".to_string()]);
        assert_eq!(q.unrecognized_feature(), None);
    }

    #[test]
    fn test_opaque_features_merge_regardless_of_order() {
        let a = MediaQuery::parse("print and (hover: hover) and (min-width: 740px)");
        let b = MediaQuery::parse("print and (min-width:740px) and (hover:hover)");
        assert_eq!(a.key(), b.key());
        assert_eq!(a.unrecognized_feature(), Some("(hover:hover)"));
    }

    #[test]
    fn test_query_list_is_whole_opaque() {
        let q = MediaQuery::parse("(min-width: 740px), print");
        assert!(!q.is_sortable());
        assert_eq!(q.opaque_features().len(), 1);
        assert!(q.width().is_empty());
    }

    #[test]
    fn test_not_query_is_whole_opaque() {
        let q = MediaQuery::parse("not all and (min-width: 740px)");
        assert!(q.width().is_empty());
        assert_eq!(q.opaque_features(), ["not all and (min-width:740px)".to_string()]);
    }

    #[test]
    fn test_or_query_is_whole_opaque() {
        let q = MediaQuery::parse("(min-width: 600px) or (min-width: 740px)");
        assert!(q.width().is_empty());
        assert_eq!(
            q.opaque_features(),
            ["(min-width:600px) or (min-width:740px)".to_string()]
        );
        assert_eq!(q.render(MediaSyntax::Range), "(min-width: 600px) or (min-width: 740px)");
    }

    #[test]
    fn test_different_or_queries_do_not_merge() {
        let a = MediaQuery::parse("(min-width: 600px) or (min-width: 740px)");
        let b = MediaQuery::parse("(min-width: 100px) or (min-width: 740px)");
        assert_ne!(a.key(), b.key());

        let c = MediaQuery::parse("(MIN-WIDTH: 600px)  or (min-width:740px)");
        assert_eq!(a.key(), c.key());
    }

    #[test]
    fn test_empty_prelude_is_opaque() {
        let q = MediaQuery::parse("  ");
        assert!(!q.is_sortable());
    }

    #[test]
    fn test_repeated_bounds_keep_tighter() {
        let q = MediaQuery::parse("(min-width: 600px) and (min-width: 740px)");
        assert_eq!(q.width().min, Some(Bound::inclusive(px(740.0))));
        assert!(q.is_sortable());
    }

    #[test]
    fn test_conflicting_units_keep_second_bound_opaque() {
        let q = MediaQuery::parse("(min-width: 740px) and (min-width: 40em)");
        assert_eq!(q.width().min, Some(Bound::inclusive(px(740.0))));
        assert_eq!(q.opaque_features(), ["(width >= 40em)".to_string()]);
        assert!(!q.is_sortable());
    }

    #[test]
    fn test_mixed_units_do_not_merge() {
        let a = MediaQuery::parse("(min-width: 48em)");
        let b = MediaQuery::parse("(min-width: 768px)");
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_strict_and_inclusive_do_not_merge() {
        let a = MediaQuery::parse("(width > 740px)");
        let b = MediaQuery::parse("(min-width: 740px)");
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_render_legacy_and_range() {
        let q = MediaQuery::parse("(740px <= width <= 1023px)");
        assert_eq!(
            q.render(MediaSyntax::Legacy),
            "(min-width: 740px) and (max-width: 1023px)"
        );
        assert_eq!(
            q.render(MediaSyntax::Range),
            "(width >= 740px) and (width <= 1023px)"
        );
        assert_eq!(q.render(MediaSyntax::Preserve), "(740px <= width <= 1023px)");
    }

    #[test]
    fn test_render_keeps_exclusive_bounds_in_range_form() {
        let q = MediaQuery::parse("(width > 47.5em)");
        assert_eq!(q.render(MediaSyntax::Legacy), "(width > 47.5em)");
    }

    #[test]
    fn test_render_opaque_first() {
        let q = MediaQuery::parse("screen and (width >= 740px)");
        assert_eq!(q.render(MediaSyntax::Legacy), "screen and (min-width: 740px)");
    }

    #[test]
    fn test_render_only_screen_keeps_media_types_together() {
        let q = MediaQuery::parse("only screen and (width >= 740px)");
        assert_eq!(
            q.render(MediaSyntax::Legacy),
            "only screen and (min-width: 740px)"
        );
        assert_eq!(q.render(MediaSyntax::Range), "only screen and (width >= 740px)");
    }

    #[test]
    fn test_render_keeps_opaque_conditions_as_written() {
        let q = MediaQuery::parse("screen and (prefers-reduced-motion: reduce) and (min-width: 740px)");
        assert_eq!(
            q.render(MediaSyntax::Range),
            "screen and (prefers-reduced-motion: reduce) and (width >= 740px)"
        );
        assert_eq!(
            q.key(),
            MediaQuery::parse("(width >= 740px) and SCREEN and (prefers-reduced-motion:reduce)").key()
        );
    }

    #[test]
    fn test_dimension_display_drops_trailing_zero() {
        assert_eq!(px(740.0).to_string(), "740px");
        assert_eq!(Dimension::new(47.5, "em").to_string(), "47.5em");
    }

    #[test]
    fn test_normalize_opaque() {
        assert_eq!(normalize_opaque("( Hover :  HOVER )"), "(hover:hover)");
        assert_eq!(normalize_opaque("print"), "print");
    }
}
