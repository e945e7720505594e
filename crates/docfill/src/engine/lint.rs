//! Template lint rules.
//!
//! Detection and substitution never fail; problems in a template only show
//! up as fields that silently disappear or blocks that never apply. These
//! rules surface them as warnings.

use thiserror::Error;

use crate::analyzer::ConditionalAnalysis;
use crate::engine::registry::FieldRegistry;
use crate::engine::substitute::Values;
use crate::parser::{Tag, parse_placeholder};

/// A non-fatal problem found in a template or in the values for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintWarning {
    /// An open marker with no matching close; its content is unconditional.
    #[error("block '{identifier}' is never closed")]
    UnterminatedBlock { identifier: String, offset: usize },

    /// A close marker with no pending open.
    #[error("closing marker for '{identifier}' has no matching open")]
    UnmatchedClose { identifier: String, offset: usize },

    /// A placeholder whose key is empty once modifiers are stripped.
    #[error("placeholder '{literal}' has no key and will be left as written")]
    EmptyPlaceholder { literal: String, offset: usize },

    /// Spellings of one field declare different types.
    #[error("field '{display_key}' is declared with conflicting types: {}", .types.join(", "))]
    ConflictingTypes {
        display_key: String,
        types: Vec<String>,
        offset: usize,
    },

    /// A block that maps to no option group, so no selection can drop it.
    #[error("block '{identifier}' does not belong to any option group")]
    UngroupedBlock { identifier: String, offset: usize },

    /// A supplied value that no field looks up.
    #[error("value '{key}' does not match any field{}", suggestion_suffix(.suggestions))]
    UnknownValue {
        key: String,
        suggestions: Vec<String>,
    },
}

impl LintWarning {
    /// Byte offset of the offending text, when there is one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            LintWarning::UnterminatedBlock { offset, .. }
            | LintWarning::UnmatchedClose { offset, .. }
            | LintWarning::EmptyPlaceholder { offset, .. }
            | LintWarning::ConflictingTypes { offset, .. }
            | LintWarning::UngroupedBlock { offset, .. } => Some(*offset),
            LintWarning::UnknownValue { .. } => None,
        }
    }

    /// Short stable name of the rule, e.g. `unterminated-block`.
    pub fn code(&self) -> &'static str {
        match self {
            LintWarning::UnterminatedBlock { .. } => "unterminated-block",
            LintWarning::UnmatchedClose { .. } => "unmatched-close",
            LintWarning::EmptyPlaceholder { .. } => "empty-placeholder",
            LintWarning::ConflictingTypes { .. } => "conflicting-types",
            LintWarning::UngroupedBlock { .. } => "ungrouped-block",
            LintWarning::UnknownValue { .. } => "unknown-value",
        }
    }
}

fn suggestion_suffix(suggestions: &[String]) -> String {
    match suggestions.first() {
        Some(best) => format!(", did you mean '{best}'?"),
        None => String::new(),
    }
}

/// Run the template rules, returning warnings ordered by offset.
pub fn lint_template(
    tags: &[Tag<'_>],
    analysis: &ConditionalAnalysis,
    registry: &FieldRegistry,
) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    for marker in analysis.unterminated() {
        warnings.push(LintWarning::UnterminatedBlock {
            identifier: marker.identifier.clone(),
            offset: marker.offset,
        });
    }
    for marker in analysis.unmatched_closes() {
        warnings.push(LintWarning::UnmatchedClose {
            identifier: marker.identifier.clone(),
            offset: marker.offset,
        });
    }
    for tag in tags {
        if tag.is_placeholder() && parse_placeholder(tag).is_none() {
            warnings.push(LintWarning::EmptyPlaceholder {
                literal: tag.literal.to_string(),
                offset: tag.start(),
            });
        }
    }
    for block in analysis.blocks() {
        if !block.is_control() && analysis.resolve(&block.identifier).is_none() {
            warnings.push(LintWarning::UngroupedBlock {
                identifier: block.identifier.clone(),
                offset: block.open.start,
            });
        }
    }
    for entry in registry.entries() {
        let types = entry.declared_types();
        if types.len() > 1 {
            let offset = entry.variants.iter().map(|v| v.offset).min().unwrap_or_default();
            warnings.push(LintWarning::ConflictingTypes {
                display_key: entry.display_key.clone(),
                types: types.iter().map(|t| t.as_str().to_string()).collect(),
                offset,
            });
        }
    }

    warnings.sort_by_key(|warning| warning.offset());
    warnings
}

/// Warn about values that no field of the registry would use.
pub fn lint_values(registry: &FieldRegistry, values: &Values) -> Vec<LintWarning> {
    registry
        .unknown_values(values)
        .into_iter()
        .map(|unknown| LintWarning::UnknownValue {
            key: unknown.key,
            suggestions: unknown.suggestions,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_fields, scan_tags};
    use crate::values;

    fn lint(text: &str) -> Vec<LintWarning> {
        let tags = scan_tags(text);
        let analysis = ConditionalAnalysis::from_tags(&tags);
        let registry = FieldRegistry::from_fields(parse_fields(text));
        lint_template(&tags, &analysis, &registry)
    }

    #[test]
    fn clean_template_has_no_warnings() {
        assert!(lint("{{Name}} {{#service_basic}}{{Fee:number}}{{/service_basic}}").is_empty());
    }

    #[test]
    fn reports_block_problems() {
        let warnings = lint("{{/period_1}} {{#service_basic}} {{#notes}}x{{/notes}}");
        let codes: Vec<_> = warnings.iter().map(LintWarning::code).collect();
        assert_eq!(codes, vec!["unmatched-close", "unterminated-block", "ungrouped-block"]);
        assert_eq!(warnings[0].offset(), Some(0));
    }

    #[test]
    fn reports_empty_placeholders() {
        let warnings = lint("a {{}} b {{|x}}");
        assert_eq!(
            warnings,
            vec![
                LintWarning::EmptyPlaceholder { literal: "{{}}".into(), offset: 2 },
                LintWarning::EmptyPlaceholder { literal: "{{|x}}".into(), offset: 9 },
            ]
        );
    }

    #[test]
    fn reports_conflicting_types() {
        let warnings = lint("{{Start:date}} {{START}}");
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].to_string(),
            "field 'Start' is declared with conflicting types: date, text"
        );
    }

    #[test]
    fn unknown_values_carry_suggestions() {
        let registry = FieldRegistry::from_fields(parse_fields("{{Client}}"));
        let warnings = lint_values(&registry, &values! { "clent" => "x" });
        assert_eq!(
            warnings[0].to_string(),
            "value 'clent' does not match any field, did you mean 'client'?"
        );
        assert_eq!(warnings[0].offset(), None);
    }
}
