//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use docfill::{ConditionalGroup, FieldEntry};

/// Format logical fields as a table.
pub fn format_fields_table(entries: &[&FieldEntry]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Type", "Required", "Default", "Shown when"]);

    for entry in entries {
        let shown_when = if entry.is_unconditional() {
            "always".to_string()
        } else {
            entry.dependencies().join(" | ")
        };
        table.add_row(vec![
            entry.display_key.clone(),
            entry.field_type().to_string(),
            if entry.is_required() { "yes" } else { "no" }.to_string(),
            entry.default_value().unwrap_or_default().to_string(),
            shown_when,
        ]);
    }

    table
}

/// Format option groups as a table.
pub fn format_groups_table(groups: &[ConditionalGroup]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Group", "Options"]);

    for group in groups {
        let options: Vec<&str> = group.options.iter().map(String::as_str).collect();
        table.add_row(vec![group.name.clone(), options.join(", ")]);
    }

    table
}
