//! Placeholder interior grammar.
//!
//! `{{<key>[:type][|<default>][?optional]}}`, with a case-insensitive `(s)`
//! anywhere in the interior forcing the `multiple` type. Modifiers are
//! stripped from the end of the interior in a fixed order: optional suffix,
//! type annotation, then default value.

use crate::types::{FieldType, PlaceholderField, canonicalize};

use super::ast::Tag;

const MULTIPLE_MARKER: &str = "(s)";
const OPTIONAL_WORD: &str = "optional";

/// The modifiers found in one placeholder interior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interior<'a> {
    pub key: &'a str,
    pub field_type: FieldType,
    pub default_value: Option<&'a str>,
    pub is_optional: bool,
}

/// Parse a placeholder tag into a field.
///
/// Returns `None` for block markers and for interiors whose key is empty
/// once every modifier has been stripped.
///
/// # Example
///
/// ```
/// use docfill::FieldType;
/// use docfill::parser::{parse_placeholder, scan_tags};
///
/// let tags = scan_tags("{{Stage 1 Costs:number|0?optional}}");
/// let field = parse_placeholder(&tags[0]).unwrap();
/// assert_eq!(field.canonical_key, "stage 1 costs");
/// assert_eq!(field.field_type, FieldType::Number);
/// assert_eq!(field.default_value.as_deref(), Some("0"));
/// assert!(field.is_optional);
/// ```
pub fn parse_placeholder(tag: &Tag<'_>) -> Option<PlaceholderField> {
    if !tag.is_placeholder() {
        return None;
    }
    let Some(interior) = parse_interior(tag.interior) else {
        log::debug!("dropping placeholder {:?}: empty key", tag.literal);
        return None;
    };

    let (canonical_key, display_key) = canonicalize(interior.key);
    Some(
        PlaceholderField::builder()
            .canonical_key(canonical_key)
            .display_key(display_key)
            .field_type(interior.field_type)
            .maybe_default_value(interior.default_value.map(str::to_string))
            .is_optional(interior.is_optional)
            .is_multiple(interior.field_type == FieldType::Multiple)
            .original_placeholder(tag.literal)
            .offset(tag.start())
            .build(),
    )
}

/// Parse the text between the brackets.
pub fn parse_interior(interior: &str) -> Option<Interior<'_>> {
    let rest = interior.trim();
    let forced_multiple = rest.to_lowercase().contains(MULTIPLE_MARKER);

    let (rest, is_optional) = match strip_optional(rest) {
        Some(stripped) => (stripped, true),
        None => (rest, false),
    };

    let (body, default_value) = match rest.split_once('|') {
        Some((body, default)) => (body, Some(default)),
        None => (rest, None),
    };

    // The annotation is normally written before the default, but a trailing
    // annotation after the default is honored first.
    let mut annotated = None;
    let default_value = default_value.map(|default| match strip_type(default) {
        Some((stripped, field_type)) => {
            annotated = Some(field_type);
            stripped
        }
        None => default,
    });
    let body = match annotated {
        Some(_) => body,
        None => match strip_type(body) {
            Some((stripped, field_type)) => {
                annotated = Some(field_type);
                stripped
            }
            None => body,
        },
    };

    let key = body.trim();
    if key.is_empty() {
        return None;
    }

    let field_type = if forced_multiple {
        FieldType::Multiple
    } else {
        annotated.unwrap_or_default()
    };

    Some(Interior {
        key,
        field_type,
        default_value: default_value.map(str::trim),
        is_optional,
    })
}

/// Strip a trailing `?optional` (any case, whitespace around `?` allowed).
fn strip_optional(text: &str) -> Option<&str> {
    let before_word = strip_suffix_ignore_case(text.trim_end(), OPTIONAL_WORD)?;
    let before_mark = before_word.trim_end().strip_suffix('?')?;
    Some(before_mark.trim_end())
}

/// Strip a trailing `:type` where `type` names a [`FieldType`].
fn strip_type(text: &str) -> Option<(&str, FieldType)> {
    let trimmed = text.trim_end();
    let (before, name) = trimmed.rsplit_once(':')?;
    let field_type = FieldType::from_name(name)?;
    Some((before, field_type))
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let split = text.len().checked_sub(suffix.len())?;
    if !text.is_char_boundary(split) {
        return None;
    }
    let (before, tail) = text.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(before)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interior(text: &str) -> Interior<'_> {
        parse_interior(text).unwrap()
    }

    #[test]
    fn plain_key() {
        let parsed = interior(" Company Name ");
        assert_eq!(parsed.key, "Company Name");
        assert_eq!(parsed.field_type, FieldType::Text);
        assert_eq!(parsed.default_value, None);
        assert!(!parsed.is_optional);
    }

    #[test]
    fn full_composition() {
        let parsed = interior("Stage 1 Costs:number|0?optional");
        assert_eq!(parsed.key, "Stage 1 Costs");
        assert_eq!(parsed.field_type, FieldType::Number);
        assert_eq!(parsed.default_value, Some("0"));
        assert!(parsed.is_optional);
    }

    #[test]
    fn optional_suffix_is_case_and_space_tolerant() {
        assert!(interior("Notes ? OPTIONAL ").is_optional);
        assert!(interior("Notes?Optional").is_optional);
        assert_eq!(interior("Notes ?optional").key, "Notes");
        assert!(!interior("Optional").is_optional);
    }

    #[test]
    fn multiple_marker_overrides_annotation() {
        let parsed = interior("Items(s):text");
        assert_eq!(parsed.key, "Items(s)");
        assert_eq!(parsed.field_type, FieldType::Multiple);
        assert_eq!(interior("Deliverable(S)").field_type, FieldType::Multiple);
    }

    #[test]
    fn explicit_multiple_annotation() {
        assert_eq!(interior("Items:multiple").field_type, FieldType::Multiple);
    }

    #[test]
    fn default_takes_everything_after_first_pipe() {
        let parsed = interior("Greeting|Hello | world");
        assert_eq!(parsed.key, "Greeting");
        assert_eq!(parsed.default_value, Some("Hello | world"));
    }

    #[test]
    fn trailing_annotation_after_default() {
        let parsed = interior("Start|2024-01-01:date");
        assert_eq!(parsed.key, "Start");
        assert_eq!(parsed.field_type, FieldType::Date);
        assert_eq!(parsed.default_value, Some("2024-01-01"));
    }

    #[test]
    fn colon_in_default_is_not_an_annotation() {
        let parsed = interior("Time|12:30");
        assert_eq!(parsed.field_type, FieldType::Text);
        assert_eq!(parsed.default_value, Some("12:30"));
    }

    #[test]
    fn unknown_annotation_stays_in_key() {
        let parsed = interior("Ratio:percent");
        assert_eq!(parsed.key, "Ratio:percent");
        assert_eq!(parsed.field_type, FieldType::Text);
    }

    #[test]
    fn empty_keys_are_rejected() {
        assert_eq!(parse_interior(""), None);
        assert_eq!(parse_interior("   "), None);
        assert_eq!(parse_interior(":number"), None);
        assert_eq!(parse_interior("|default"), None);
        assert_eq!(parse_interior("?optional"), None);
    }
}
