use std::fmt::{Display, Formatter, Result as FmtResult};

use bon::Builder;
use serde::{Deserialize, Serialize};

/// The declared type of a placeholder, selected with a `:type` annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Date,
    Multiline,
    /// A sequence of strings rendered as a bulleted list.
    Multiple,
}

impl FieldType {
    /// All field types in annotation order.
    pub const ALL: [FieldType; 5] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Date,
        FieldType::Multiline,
        FieldType::Multiple,
    ];

    /// The annotation name of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Multiline => "multiline",
            FieldType::Multiple => "multiple",
        }
    }

    /// Looks up a type by annotation name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<FieldType> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// One parsed placeholder occurrence.
///
/// Fields are produced by the tokenizer and merged by
/// [`FieldRegistry`](crate::FieldRegistry). The `original_placeholder` is the
/// exact literal found in the source (brackets included) and is what gets
/// replaced during substitution.
///
/// # Example
///
/// ```
/// use docfill::{FieldType, PlaceholderField};
///
/// let field = PlaceholderField::builder()
///     .canonical_key("full price")
///     .display_key("Full Price")
///     .field_type(FieldType::Number)
///     .original_placeholder("{{Full Price:number}}")
///     .build();
///
/// assert!(field.is_required());
/// assert!(!field.is_conditional());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Builder)]
#[builder(on(String, into))]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderField {
    /// Trimmed, whitespace-collapsed, lowercased key.
    pub canonical_key: String,

    /// Trimmed, whitespace-collapsed key in its best-ranked original case.
    pub display_key: String,

    #[builder(default)]
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Literal inserted when no value is supplied.
    pub default_value: Option<String>,

    #[builder(default)]
    pub is_optional: bool,

    /// True iff `field_type` is [`FieldType::Multiple`].
    #[builder(default)]
    pub is_multiple: bool,

    /// The exact matched text, including `{{` and `}}`.
    pub original_placeholder: String,

    /// `"Group:Option"` or bare `"Group"` entries; empty means always shown.
    #[builder(default)]
    pub conditional_dependencies: Vec<String>,

    /// Byte offset of the first occurrence in the source text.
    #[builder(default)]
    pub offset: usize,
}

impl PlaceholderField {
    pub fn is_required(&self) -> bool {
        !self.is_optional
    }

    pub fn is_conditional(&self) -> bool {
        !self.conditional_dependencies.is_empty()
    }

    /// Adds a dependency unless it is already recorded.
    pub fn add_dependency(&mut self, dependency: impl Into<String>) {
        let dependency = dependency.into();
        if !self.conditional_dependencies.contains(&dependency) {
            self.conditional_dependencies.push(dependency);
        }
    }
}
