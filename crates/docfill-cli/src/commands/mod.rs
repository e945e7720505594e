//! CLI command implementations.

mod check;
mod fields;
mod fill;
mod groups;

pub use check::{run_check, CheckArgs};
pub use fields::{run_fields, FieldsArgs};
pub use fill::{run_fill, FillArgs};
pub use groups::{run_groups, GroupsArgs};

use std::path::Path;

use docfill::{Document, FillOptions, Selection};

/// Parse a key=value argument string.
pub(crate) fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid argument '{s}': expected name=value"))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

/// Collect `GROUP=OPTION` pairs into a selection, warning about names the
/// document does not define.
pub(crate) fn selection_for(document: &Document, pairs: &[(String, String)]) -> Selection {
    let mut selection = Selection::new();
    for (group, option) in pairs {
        match document.analysis().group(group) {
            Some(found) if !found.has_option(option) => {
                log::warn!("group '{group}' has no option '{option}'");
            }
            None => log::warn!("document has no group '{group}'"),
            Some(_) => {}
        }
        selection.insert(group.clone(), option.clone());
    }
    selection
}

/// Load a document, printing the error and returning the exit code on
/// failure.
pub(crate) fn load_document(path: &Path, options: FillOptions) -> Result<Document, i32> {
    match Document::from_path(path) {
        Ok(mut document) => {
            document.set_options(options);
            Ok(document)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            Err(exitcode::NOINPUT)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_val_splits_on_first_equals() {
        assert_eq!(
            parse_key_val("Formula = a=b").unwrap(),
            ("Formula".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("novalue").is_err());
    }

    #[test]
    fn selection_keeps_unknown_pairs() {
        let document = Document::parse("{{#service_basic}}x{{/service_basic}}");
        let selection = selection_for(
            &document,
            &[
                ("Service Options".to_string(), "Basic".to_string()),
                ("Period Options".to_string(), "1 year".to_string()),
            ],
        );
        assert_eq!(selection.len(), 2);
        assert_eq!(selection["Service Options"], "Basic");
    }
}
