//! Tag scanner using winnow.
//!
//! Finds every `{{ ... }}` occurrence whose interior contains no `}` and
//! classifies it as a placeholder or a block marker. Text that merely looks
//! like the start of a tag (`{{a}b}}`) is skipped one character at a time,
//! so the scan always makes progress.

use winnow::combinator::{alt, delimited, eof, preceded, terminated};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

use super::ast::{Tag, TagKind};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Characters that introduce a block or control tag instead of a placeholder.
const MARKER_PREFIXES: [char; 4] = ['#', '/', '^', '!'];

/// Scan a document for tags, in source order.
///
/// # Example
///
/// ```
/// use docfill::parser::{TagKind, scan_tags};
///
/// let tags = scan_tags("{{#vat_included}}Total: {{Total:number}}{{/vat_included}}");
/// assert_eq!(tags.len(), 3);
/// assert_eq!(tags[0].kind, TagKind::Open("vat_included"));
/// assert_eq!(tags[1].literal, "{{Total:number}}");
/// assert_eq!(tags[2].kind, TagKind::Close("vat_included"));
/// ```
pub fn scan_tags(input: &str) -> Vec<Tag<'_>> {
    let mut tags = Vec::new();
    let mut offset = 0;

    while let Some(found) = input[offset..].find(OPEN) {
        let start = offset + found;
        let mut remaining = &input[start..];
        match tag_interior(&mut remaining) {
            Ok(interior) => {
                let end = input.len() - remaining.len();
                tags.push(Tag {
                    span: start..end,
                    literal: &input[start..end],
                    interior,
                    kind: classify(interior),
                });
                offset = end;
            }
            Err(_) => {
                // `{` is a single byte, so this stays on a char boundary.
                offset = start + 1;
            }
        }
    }

    log::trace!("scanned {} tag(s) from {} byte(s)", tags.len(), input.len());
    tags
}

/// Parse `{{`, an interior without `}`, and `}}`.
fn tag_interior<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited(OPEN, take_till(0.., '}'), CLOSE).parse_next(input)
}

/// Decide what a tag interior denotes.
fn classify(interior: &str) -> TagKind<'_> {
    let trimmed = interior.trim();
    if !trimmed.starts_with(MARKER_PREFIXES) {
        return TagKind::Placeholder;
    }

    let mut remaining = trimmed;
    block_marker(&mut remaining).unwrap_or(TagKind::Control)
}

/// Parse a whole `#identifier` or `/identifier` marker.
fn block_marker<'i>(input: &mut &'i str) -> ModalResult<TagKind<'i>> {
    terminated(
        alt((
            preceded('#', identifier).map(TagKind::Open),
            preceded('/', identifier).map(TagKind::Close),
        )),
        eof,
    )
    .parse_next(input)
}

/// Parse a block identifier (alphanumeric plus `_`, `-` and `.`).
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.')).parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literals(input: &str) -> Vec<&str> {
        scan_tags(input).into_iter().map(|t| t.literal).collect()
    }

    #[test]
    fn finds_tags_with_offsets() {
        let tags = scan_tags("Dear {{Name}}, pay {{Amount:number}}.");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].span, 5..13);
        assert_eq!(tags[0].interior, "Name");
        assert_eq!(tags[1].literal, "{{Amount:number}}");
    }

    #[test]
    fn empty_interior_is_a_placeholder_candidate() {
        let tags = scan_tags("a {{}} b");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].interior, "");
        assert!(tags[0].is_placeholder());
    }

    #[test]
    fn close_brace_inside_interior_is_not_a_tag() {
        assert!(literals("{{a}b}}").is_empty());
        assert_eq!(literals("{{a}b}} {{c}}"), vec!["{{c}}"]);
    }

    #[test]
    fn extra_open_brace_is_part_of_interior() {
        let tags = scan_tags("{{{x}}}");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].interior, "{x");
    }

    #[test]
    fn unterminated_open_is_skipped() {
        assert_eq!(literals("{{oops} and {{Name}}"), vec!["{{Name}}"]);
        assert!(literals("{{never closed").is_empty());
    }

    #[test]
    fn classifies_block_markers() {
        let tags = scan_tags("{{#a_b}}{{ /a_b }}{{^x}}{{! note }}{{# }}");
        let kinds: Vec<_> = tags.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TagKind::Open("a_b"),
                TagKind::Close("a_b"),
                TagKind::Control,
                TagKind::Control,
                TagKind::Control,
            ]
        );
    }

    #[test]
    fn multibyte_text_around_tags() {
        let tags = scan_tags("Café — {{Prénom}} ✓");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].interior, "Prénom");
    }
}
