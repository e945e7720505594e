//! Integration tests for placeholder detection and option groups.

use docfill::{Document, FieldType, detect_fields, detect_groups};

// =========================================================================
// Field Detection
// =========================================================================

#[test]
fn case_variants_merge_into_one_field() {
    let doc = Document::parse("{{COMPANY NAME}} and {{Company Name}} and {{COMPANY NAME}}");
    assert_eq!(doc.registry().len(), 1);

    let entry = doc.registry().get("company name").unwrap();
    assert_eq!(entry.display_key, "Company Name");
    let literals: Vec<_> = entry
        .variants
        .iter()
        .map(|v| v.original_placeholder.as_str())
        .collect();
    assert_eq!(literals, vec!["{{COMPANY NAME}}", "{{Company Name}}"]);
}

#[test]
fn all_modifiers_compose() {
    let fields = detect_fields("{{Stage 1 Costs:number|0?optional}}");
    assert_eq!(fields.len(), 1);
    let field = &fields[0];
    assert_eq!(field.canonical_key, "stage 1 costs");
    assert_eq!(field.display_key, "Stage 1 Costs");
    assert_eq!(field.field_type, FieldType::Number);
    assert_eq!(field.default_value.as_deref(), Some("0"));
    assert!(field.is_optional);
    assert!(!field.is_multiple);
}

#[test]
fn plural_marker_forces_multiple() {
    let fields = detect_fields("{{Items(s):text}} {{Deliverable(S)}}");
    assert!(fields.iter().all(|f| f.field_type == FieldType::Multiple && f.is_multiple));
}

#[test]
fn whitespace_is_collapsed_in_keys() {
    let fields = detect_fields("{{  Client \t Name  }}");
    assert_eq!(fields[0].canonical_key, "client name");
    assert_eq!(fields[0].display_key, "Client Name");
    assert_eq!(fields[0].original_placeholder, "{{  Client \t Name  }}");
}

#[test]
fn unknown_type_annotation_stays_in_key() {
    let fields = detect_fields("{{Ratio:percent}}");
    assert_eq!(fields[0].canonical_key, "ratio:percent");
    assert_eq!(fields[0].field_type, FieldType::Text);
}

#[test]
fn empty_and_marker_tags_are_not_fields() {
    assert!(detect_fields("{{}} {{ }} {{?optional}} {{#a_b}}{{/a_b}} {{!comment}}").is_empty());
}

#[test]
fn fields_serialize_for_form_builders() {
    let fields = detect_fields("{{Fee:number|0}}");
    let json = serde_json::to_string_pretty(&fields[0]).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "canonicalKey": "fee",
      "displayKey": "Fee",
      "type": "number",
      "defaultValue": "0",
      "isOptional": false,
      "isMultiple": false,
      "originalPlaceholder": "{{Fee:number|0}}",
      "conditionalDependencies": [],
      "offset": 0
    }
    "#);
}

// =========================================================================
// Conditional Scoping
// =========================================================================

#[test]
fn fields_inside_blocks_record_their_option() {
    let doc = Document::parse(
        "{{#service_full_package}}{{Full Price:number}}{{/service_full_package}}",
    );
    let entry = doc.registry().get("full price").unwrap();
    assert_eq!(entry.dependencies(), vec!["Service Options:Full Package"]);
}

#[test]
fn nested_blocks_record_every_enclosing_option() {
    let doc = Document::parse(
        "{{#service_basic}}{{#period_2}}{{Renewal Date:date}}{{/period_2}}{{/service_basic}}",
    );
    let entry = doc.registry().get("renewal date").unwrap();
    assert_eq!(
        entry.dependencies(),
        vec!["Service Options:Basic", "Period Options:2 years"]
    );
}

#[test]
fn control_blocks_do_not_scope_fields() {
    let doc = Document::parse("{{#if_signed}}{{Signed By}}{{/if_signed}}");
    assert!(doc.registry().get("signed by").unwrap().is_unconditional());
}

#[test]
fn unterminated_block_leaves_fields_unconditional() {
    let doc = Document::parse("{{#service_basic}}{{Fee}}");
    assert!(doc.registry().get("fee").unwrap().is_unconditional());
    assert!(doc.groups().is_empty());
}

// =========================================================================
// Option Groups
// =========================================================================

#[test]
fn groups_collect_options_in_sorted_sets() {
    let groups = detect_groups(
        "{{#service_full_package}}a{{/service_full_package}}\
         {{#period_6}}b{{/period_6}}\
         {{#service_basic}}c{{/service_basic}}\
         {{#service_basic}}d{{/service_basic}}",
    );
    let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Service Options", "Period Options"]);

    let options: Vec<_> = groups[0].options.iter().map(String::as_str).collect();
    assert_eq!(options, vec!["Basic", "Full Package"]);
    assert!(groups[1].has_option("6 months"));
}

#[test]
fn single_segment_identifiers_form_no_group() {
    assert!(detect_groups("{{#notes}}x{{/notes}}").is_empty());
}
