//! Merging and mobile-first ordering of `@media` rules.
//!
//! Canonicalization runs in two passes over the rules of a stylesheet:
//!
//! 1. **Merge**: rules whose queries have the same canonical key are folded
//!    into one group. Bodies are appended in the order the rules appear, and
//!    the group keeps the position of its first rule.
//! 2. **Sort** (unless disabled): groups are stably ordered by
//!    [`compare_mobile_first`].

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::MediaError;
use crate::query::{Bound, MediaKey, MediaQuery, MediaSyntax, WidthRange};

/// A top-level `@media` rule: its prelude and the raw text of its block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRule {
    pub query: String,
    pub body: String,
}

impl MediaRule {
    pub fn new(query: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            body: body.into(),
        }
    }
}

/// Options for [`canonicalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalizeOptions {
    /// Order groups mobile-first. When false only the merge pass runs.
    pub sort: bool,
    /// Reject queries containing conditions other than width constraints
    /// and bare media types, instead of carrying them as opaque text.
    pub strict: bool,
    /// Spelling used when groups are rendered.
    pub syntax: MediaSyntax,
}

impl Default for CanonicalizeOptions {
    fn default() -> Self {
        Self {
            sort: true,
            strict: false,
            syntax: MediaSyntax::Preserve,
        }
    }
}

/// Rules sharing one canonical query.
#[derive(Debug, Clone)]
pub struct MediaGroup {
    /// The query of the first rule seen for this group.
    pub query: MediaQuery,
    /// Block contents of every merged rule, in source order.
    pub bodies: Vec<String>,
    key: MediaKey,
}

impl MediaGroup {
    fn new(query: MediaQuery, body: String) -> Self {
        let key = query.key();
        Self {
            query,
            bodies: vec![body],
            key,
        }
    }

    /// Renders the group as a single `@media` rule.
    ///
    /// Each body is dedented and re-indented by two spaces.
    pub fn render(&self, syntax: MediaSyntax) -> String {
        let mut out = format!("@media {} {{", self.query.render(syntax));
        for body in &self.bodies {
            for line in reindent(body) {
                out.push('\n');
                out.push_str(&line);
            }
        }
        out.push_str("\n}");
        out
    }
}

/// Merges rules with equal canonical queries, then sorts the groups
/// mobile-first unless `options.sort` is false.
///
/// Only fails in strict mode.
///
/// ```rust
/// use cascade_media::{canonicalize, CanonicalizeOptions, MediaRule};
///
/// let rules = vec![
///     MediaRule::new("(min-width: 1024px)", ".a { color: red; }"),
///     MediaRule::new("(max-width: 739px)", ".b { color: blue; }"),
///     MediaRule::new("(width >= 1024px)", ".c { color: green; }"),
/// ];
///
/// let groups = canonicalize(rules, &CanonicalizeOptions::default()).unwrap();
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].query.source(), "(max-width: 739px)");
/// assert_eq!(groups[1].bodies, vec![".a { color: red; }", ".c { color: green; }"]);
/// ```
pub fn canonicalize(
    rules: Vec<MediaRule>,
    options: &CanonicalizeOptions,
) -> Result<Vec<MediaGroup>, MediaError> {
    let mut groups: Vec<MediaGroup> = Vec::new();

    for rule in rules {
        let query = MediaQuery::parse(&rule.query);

        if options.strict {
            if let Some(feature) = query.unrecognized_feature() {
                return Err(MediaError::UnrecognizedFeature {
                    query: query.source().to_string(),
                    feature: feature.to_string(),
                });
            }
        }
        if !query.is_sortable() {
            tracing::debug!(query = query.source(), "media query kept in source order");
        }

        let key = query.key();
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => {
                tracing::debug!(
                    query = query.source(),
                    into = group.query.source(),
                    "merging media rule"
                );
                group.bodies.push(rule.body);
            }
            None => groups.push(MediaGroup::new(query, rule.body)),
        }
    }

    if options.sort {
        groups.sort_by(|a, b| compare_mobile_first(&a.query, &b.query));
    }
    Ok(groups)
}

/// Mobile-first ordering of two queries.
///
/// - max-only ranges come first, ascending by max;
/// - then ranges with a min, ascending by min;
/// - at equal min, an open-ended range comes before bounded ones, which
///   follow in ascending max;
/// - unsortable queries compare equal to each other and after everything
///   else, so a stable sort keeps their source order.
pub fn compare_mobile_first(a: &MediaQuery, b: &MediaQuery) -> Ordering {
    match (a.is_sortable(), b.is_sortable()) {
        (true, true) => compare_ranges(a.width(), b.width()),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

fn compare_ranges(a: &WidthRange, b: &WidthRange) -> Ordering {
    match (&a.min, &b.min) {
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => compare_max(a.max.as_ref(), b.max.as_ref()),
        (Some(x), Some(y)) => x
            .dimension
            .compare(&y.dimension)
            .then_with(|| compare_max(a.max.as_ref(), b.max.as_ref())),
    }
}

fn compare_max(a: Option<&Bound>, b: Option<&Bound>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.dimension.compare(&y.dimension),
    }
}

/// Dedents a block body and indents it by two spaces. Leading and trailing
/// blank lines are dropped; blank lines inside are kept empty.
fn reindent(body: &str) -> Vec<String> {
    let lines: Vec<&str> = body.trim_matches(|c| c == '\n' || c == '\r').lines().collect();
    let lines: Vec<&str> = {
        let start = lines.iter().position(|l| !l.trim().is_empty());
        let end = lines.iter().rposition(|l| !l.trim().is_empty());
        match (start, end) {
            (Some(start), Some(end)) => lines[start..=end].to_vec(),
            _ => return Vec::new(),
        }
    };

    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("  {}", line.get(indent..).unwrap_or(line.trim_start()).trim_end())
            }
        })
        .collect()
}
