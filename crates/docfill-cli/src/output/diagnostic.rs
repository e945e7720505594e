//! Miette diagnostic wrapper for template lint warnings.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::path::Path;

use docfill::LintWarning;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

const TAG_CLOSE: &str = "}}";

/// A miette-compatible diagnostic for one lint warning.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(docfill::lint), severity(Warning))]
pub struct LintDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{rule}")]
    span: Option<SourceSpan>,

    message: String,

    rule: &'static str,

    #[help]
    help: Option<String>,
}

impl LintDiagnostic {
    /// Create a diagnostic for a warning found in `content`.
    ///
    /// The label covers the whole tag starting at the warning's offset.
    pub fn new(path: &Path, content: &str, warning: &LintWarning) -> Self {
        let span = warning
            .offset()
            .map(|offset| tag_span(content, offset));

        LintDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span,
            message: warning.to_string(),
            rule: warning.code(),
            help: help_for(warning),
        }
    }
}

/// Span from `offset` through the end of the tag there, clamped to content.
fn tag_span(content: &str, offset: usize) -> SourceSpan {
    let offset = offset.min(content.len());
    let length = content
        .get(offset..)
        .and_then(|rest| rest.find(TAG_CLOSE))
        .map_or(1, |end| end + TAG_CLOSE.len());
    (offset, length).into()
}

fn help_for(warning: &LintWarning) -> Option<String> {
    match warning {
        LintWarning::UnterminatedBlock { identifier, .. } => {
            Some(format!("add {{{{/{identifier}}}}} where the section ends"))
        }
        LintWarning::UngroupedBlock { .. } => {
            Some("name blocks group_option, e.g. service_full_package".to_string())
        }
        LintWarning::ConflictingTypes { .. } => {
            Some("the first spelling's type is used for form input".to_string())
        }
        LintWarning::UnknownValue { suggestions, .. } => suggestions
            .first()
            .map(|best| format!("did you mean '{best}'?")),
        LintWarning::UnmatchedClose { .. } | LintWarning::EmptyPlaceholder { .. } => None,
    }
}
