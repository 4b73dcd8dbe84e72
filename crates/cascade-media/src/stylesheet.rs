//! Late pass over a whole stylesheet.
//!
//! Every top-level `@media` block is lifted out of the stylesheet,
//! canonicalized, and appended after the remaining rules. A comment directly
//! in front of an `@media` rule moves with it, as the first line of its body.
//! Everything else (qualified rules, other at-rules, `@media` nested inside
//! `@supports` or `@layer`, other comments) is kept verbatim and in place.

use cssparser::{ParseError, Parser, ParserInput, Token};

use crate::canonicalize::{canonicalize, CanonicalizeOptions, MediaGroup, MediaRule};
use crate::error::MediaError;
use crate::query::MediaSyntax;

/// A stylesheet split into its top-level `@media` rules and everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// All non-`@media` content, verbatim.
    pub rest: String,
    /// Top-level `@media` rules in source order.
    pub media: Vec<MediaRule>,
}

/// Splits `css` into top-level `@media` rules and the remaining text.
///
/// An `@media` statement without a block is not a rule and stays in
/// [`Stylesheet::rest`].
pub fn split_stylesheet(css: &str) -> Stylesheet {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut sheet = Stylesheet::default();
    // Whitespace right after a lifted rule would otherwise pile up as
    // blank lines in `rest`.
    let mut after_media = false;
    // Start of a comment in `rest` that may belong to the next `@media`.
    let mut leading_comment: Option<usize> = None;

    loop {
        let start = parser.position();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        let skip_whitespace = std::mem::take(&mut after_media);

        match token {
            Token::AtKeyword(ref name) if name.eq_ignore_ascii_case("media") => {
                match take_media_rule(&mut parser) {
                    Some(mut rule) => {
                        if let Some(at) = leading_comment.take() {
                            let comment = sheet.rest.split_off(at);
                            rule.body = with_leading_comment(comment.trim_end(), &rule.body);
                        }
                        sheet.media.push(rule);
                        after_media = true;
                    }
                    None => {
                        leading_comment = None;
                        sheet.rest.push_str(parser.slice_from(start));
                    }
                }
            }
            Token::WhiteSpace(_) if skip_whitespace => {}
            Token::WhiteSpace(_) => sheet.rest.push_str(parser.slice_from(start)),
            Token::Comment(_) => {
                leading_comment = Some(sheet.rest.len());
                sheet.rest.push_str(parser.slice_from(start));
            }
            Token::CurlyBracketBlock
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::Function(_) => {
                leading_comment = None;
                skip_block(&mut parser);
                sheet.rest.push_str(parser.slice_from(start));
            }
            _ => {
                leading_comment = None;
                sheet.rest.push_str(parser.slice_from(start));
            }
        }
    }

    tracing::trace!(rules = sheet.media.len(), "split top-level media rules");
    sheet
}

/// Reads the prelude and block of an `@media` rule whose keyword has just
/// been consumed.
fn take_media_rule(parser: &mut Parser<'_, '_>) -> Option<MediaRule> {
    let prelude_start = parser.position();
    loop {
        let before = parser.position();
        let token = parser.next_including_whitespace_and_comments().ok()?.clone();
        match token {
            Token::CurlyBracketBlock => {
                let query = parser.slice(prelude_start..before).trim().to_string();
                let body = parser.parse_nested_block(block_contents).ok()?;
                return Some(MediaRule::new(query, body));
            }
            Token::Semicolon => return None,
            Token::ParenthesisBlock | Token::SquareBracketBlock | Token::Function(_) => {
                skip_block(parser)
            }
            _ => {}
        }
    }
}

/// Puts `comment` on its own line ahead of `body`, at the body's indent.
fn with_leading_comment(comment: &str, body: &str) -> String {
    let lines: Vec<&str> = body
        .lines()
        .skip_while(|line| line.trim().is_empty())
        .collect();
    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    format!("{}{}\n{}", " ".repeat(indent), comment, lines.join("\n"))
}

fn skip_block(parser: &mut Parser<'_, '_>) {
    let _ = parser.parse_nested_block(block_contents);
}

fn block_contents<'i, 't>(input: &mut Parser<'i, 't>) -> Result<&'i str, ParseError<'i, ()>> {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    Ok(input.slice_from(start))
}

/// Renders groups as consecutive `@media` rules separated by blank lines.
pub fn render_groups(groups: &[MediaGroup], syntax: MediaSyntax) -> String {
    groups
        .iter()
        .map(|group| group.render(syntax))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Canonicalizes all top-level `@media` rules of a stylesheet.
///
/// The non-media content comes first, unchanged apart from surrounding
/// whitespace, followed by the merged (and, by default, mobile-first
/// sorted) media rules.
///
/// ```rust
/// use cascade_media::{sort_media_queries, CanonicalizeOptions};
///
/// let css = "\
/// @media (min-width: 1024px) { .nav { display: flex; } }
/// .nav { display: block; }
/// @media (max-width: 739px) { .nav { display: none; } }
/// ";
///
/// let out = sort_media_queries(css, &CanonicalizeOptions::default()).unwrap();
/// assert_eq!(
///     out,
///     "\
/// .nav { display: block; }
///
/// @media (max-width: 739px) {
///   .nav { display: none; }
/// }
///
/// @media (min-width: 1024px) {
///   .nav { display: flex; }
/// }
/// "
/// );
/// ```
pub fn sort_media_queries(css: &str, options: &CanonicalizeOptions) -> Result<String, MediaError> {
    let sheet = split_stylesheet(css);
    let groups = canonicalize(sheet.media, options)?;

    let mut out = sheet.rest.trim().to_string();
    let media = render_groups(&groups, options.syntax);
    if !media.is_empty() {
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(&media);
    }
    if !out.is_empty() {
        out.push('\n');
    }

    tracing::debug!(
        groups = groups.len(),
        sorted = options.sort,
        "canonicalized media rules"
    );
    Ok(out)
}
