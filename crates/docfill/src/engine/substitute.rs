//! Value substitution.
//!
//! Replaces every parseable placeholder occurrence with its formatted value.
//! Occurrences that do not parse into a field, and block markers, are left
//! exactly as written.

use std::collections::HashMap;
use std::fmt::Write;

use chrono::NaiveDate;

use crate::engine::FillOptions;
use crate::parser::{parse_placeholder, scan_tags};
use crate::types::{FieldType, PlaceholderField, Value};

/// Values keyed by canonical field key.
pub type Values = HashMap<String, Value>;

/// The key a field's value is looked up under.
///
/// This is the canonical key, except that a key containing `_` is cut at the
/// first `_`: `client_alt` looks up `client`. Canonical keys that genuinely
/// contain underscores therefore share a value with their prefix.
pub fn lookup_key(canonical_key: &str) -> &str {
    match canonical_key.split_once('_') {
        Some((root, _)) => root,
        None => canonical_key,
    }
}

/// Substitute values into a document.
///
/// # Example
///
/// ```
/// use docfill::{FillOptions, substitute, values};
///
/// let text = "Client: {{Client}}\nNotes: {{Notes?optional}}\nItems:\n{{Item(s)}}";
/// let filled = substitute(
///     text,
///     &values! { "item(s)" => vec!["Alpha", "", "Beta"] },
///     &FillOptions::default(),
/// );
/// assert_eq!(filled, "Client: —\nNotes: \nItems:\n• Alpha\n• Beta");
/// ```
pub fn substitute(text: &str, values: &Values, options: &FillOptions) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rendered: HashMap<&str, String> = HashMap::new();
    let mut cursor = 0;

    for tag in scan_tags(text) {
        if !rendered.contains_key(tag.literal) {
            let Some(field) = parse_placeholder(&tag) else {
                continue;
            };
            let value = values.get(lookup_key(&field.canonical_key));
            rendered.insert(tag.literal, format_field(&field, value, options));
        }
        output.push_str(&text[cursor..tag.start()]);
        output.push_str(&rendered[tag.literal]);
        cursor = tag.end();
    }

    output.push_str(&text[cursor..]);
    output
}

/// Format one field's value.
///
/// A missing or blank value falls back to the field's default; with no
/// usable default, optional fields render empty and required fields render
/// the required glyph.
pub fn format_field(field: &PlaceholderField, value: Option<&Value>, options: &FillOptions) -> String {
    let default = field
        .default_value
        .as_deref()
        .filter(|default| !default.is_empty())
        .map(Value::from);
    let Some(value) = value.filter(|value| !value.is_blank()).or(default.as_ref()) else {
        return missing(field, options);
    };

    match (field.field_type, value) {
        (FieldType::Multiple, Value::List(items)) => bullets(items.iter().map(String::as_str), options),
        (FieldType::Multiple, Value::Text(text)) => match bullets(text.lines(), options) {
            rendered if rendered.is_empty() => missing(field, options),
            rendered => rendered,
        },
        (_, value) => render_value(value, options),
    }
}

/// One bulleted line per non-blank item.
fn bullets<'a>(items: impl Iterator<Item = &'a str>, options: &FillOptions) -> String {
    items
        .filter(|item| !item.trim().is_empty())
        .map(|item| format!("{}{item}", options.bullet))
        .collect::<Vec<_>>()
        .join("\n")
}

/// String form of a value outside of list rendering.
pub fn render_value(value: &Value, options: &FillOptions) -> String {
    match value {
        Value::Date(date) => format_date(*date, &options.date_format),
        Value::List(items) => items
            .iter()
            .filter(|item| !item.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(options.list_separator.as_str()),
        Value::Text(_) | Value::Number(_) | Value::Float(_) => value.to_string(),
    }
}

fn missing(field: &PlaceholderField, options: &FillOptions) -> String {
    if field.is_optional {
        String::new()
    } else {
        options.required_glyph.clone()
    }
}

fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        log::warn!("invalid date format {format:?}, falling back to ISO");
        return date.to_string();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;

    fn fill(text: &str, values: &Values) -> String {
        substitute(text, values, &FillOptions::default())
    }

    #[test]
    fn lookup_key_cuts_at_first_underscore() {
        assert_eq!(lookup_key("client name"), "client name");
        assert_eq!(lookup_key("client_alt"), "client");
        assert_eq!(lookup_key("a_b_c"), "a");
    }

    #[test]
    fn required_and_optional_missing_values() {
        assert_eq!(fill("[{{Name}}]", &Values::new()), "[—]");
        assert_eq!(fill("[{{Name?optional}}]", &Values::new()), "[]");
        assert_eq!(fill("[{{Name}}]", &values! { "name" => "" }), "[—]");
    }

    #[test]
    fn whitespace_only_text_is_kept() {
        assert_eq!(fill("[{{Name}}]", &values! { "name" => " " }), "[ ]");
    }

    #[test]
    fn default_value_fills_missing() {
        assert_eq!(fill("{{Fee:number|0}}", &Values::new()), "0");
        assert_eq!(fill("{{Fee:number|0}}", &values! { "fee" => 250 }), "250");
        assert_eq!(fill("{{Fee|}}", &Values::new()), "—");
    }

    #[test]
    fn multiple_values_render_as_bullets() {
        let vals = values! { "item(s)" => vec!["Alpha", "", "Beta"] };
        assert_eq!(fill("{{Item(s)}}", &vals), "• Alpha\n• Beta");
    }

    #[test]
    fn multiple_field_default_renders_as_bullet() {
        assert_eq!(fill("{{Items(s)|Alpha}}", &Values::new()), "• Alpha");
        assert_eq!(fill("{{Items(s)|Alpha}}", &values! { "items(s)" => vec!["B"] }), "• B");
    }

    #[test]
    fn text_in_multiple_field_is_split_into_lines() {
        let vals = values! { "items(s)" => "Alpha\n\nBeta" };
        assert_eq!(fill("{{Items(s)}}", &vals), "• Alpha\n• Beta");
        assert_eq!(fill("{{Items(s)}}", &values! { "items(s)" => " \n " }), "—");
    }

    #[test]
    fn blank_list_follows_missing_rule() {
        let vals = values! { "item(s)" => vec!["", "  "] };
        assert_eq!(fill("{{Item(s)}}", &vals), "—");
        assert_eq!(fill("{{Item(s)?optional}}", &vals), "");
    }

    #[test]
    fn list_in_text_field_is_joined() {
        let vals = values! { "names" => vec!["A", " ", "B"] };
        assert_eq!(fill("{{Names}}", &vals), "A, B");
    }

    #[test]
    fn numbers_and_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let vals = values! { "fee" => 1.5, "start" => date, "count" => 7 };
        assert_eq!(fill("{{Fee:number}}", &vals), "1.5");
        assert_eq!(fill("{{Count:number}}", &vals), "7");
        assert_eq!(fill("{{Start:date}}", &vals), "3/5/2024");

        let options = FillOptions::builder().date_format("%Y.%m.%d").build();
        assert_eq!(substitute("{{Start:date}}", &vals, &options), "2024.03.05");
    }

    #[test]
    fn date_field_with_text_value_is_unchanged() {
        assert_eq!(fill("{{Start:date}}", &values! { "start" => "next Monday" }), "next Monday");
    }

    #[test]
    fn multiline_passes_newlines_through() {
        let vals = values! { "address" => "1 Main St\nSpringfield" };
        assert_eq!(fill("{{Address:multiline}}", &vals), "1 Main St\nSpringfield");
    }

    #[test]
    fn case_variants_share_a_value_but_format_independently() {
        let text = "{{Fee:number}} / {{FEE?optional}} / {{fee:number|0}}";
        assert_eq!(fill(text, &values! { "fee" => 10 }), "10 / 10 / 10");
        assert_eq!(fill(text, &Values::new()), "— /  / 0");
    }

    #[test]
    fn unparseable_tags_and_markers_stay_verbatim() {
        let text = "{{}} {{ }} {{:number}} {{#a_b}}{{/a_b}} {{a}b}}";
        assert_eq!(fill(text, &Values::new()), text);
    }

    #[test]
    fn underscore_keys_use_the_prefix() {
        let vals = values! { "client" => "Acme" };
        assert_eq!(fill("{{Client_Alt}}", &vals), "Acme");
    }

    #[test]
    fn substitution_is_deterministic() {
        let text = "{{A}} {{B|x}} {{C(s)}} {{A}}";
        let vals = values! { "a" => "1", "c(s)" => vec!["p"] };
        let first = fill(text, &vals);
        assert_eq!(first, fill(text, &vals));
        insta::assert_snapshot!(first, @"1 x • p 1");
    }
}
