pub mod analyzer;
pub mod engine;
pub mod parser;
pub mod types;

pub use analyzer::ConditionalAnalysis;
pub use engine::{
    Document, FieldEntry, FieldRegistry, FillOptions, LintWarning, LoadError, ValueError, Values,
    render_sections, substitute,
};
pub use types::{
    ConditionalGroup, FieldType, PlaceholderField, Selection, Value, canonical_key, display_key,
};

/// Creates a [`Values`] map from key-value pairs.
///
/// Keys are canonical field keys. Values are converted via `Into<Value>`, so
/// integers, floats, strings, dates and string vectors can be passed
/// directly.
///
/// # Example
///
/// ```
/// use docfill::values;
///
/// let v = values! { "fee" => 250, "client" => "Acme", "items(s)" => vec!["a", "b"] };
/// assert_eq!(v.len(), 3);
/// assert_eq!(v["fee"].as_number(), Some(250));
/// assert_eq!(v["client"].as_text(), Some("Acme"));
/// ```
#[macro_export]
macro_rules! values {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}

/// Detect the logical fields of a document, ordered by display key.
///
/// # Example
///
/// ```
/// let fields = docfill::detect_fields("{{Client}} owes {{Fee:number|0}}");
/// let keys: Vec<_> = fields.iter().map(|f| f.display_key.as_str()).collect();
/// assert_eq!(keys, vec!["Client", "Fee"]);
/// ```
pub fn detect_fields(text: &str) -> Vec<PlaceholderField> {
    Document::parse(text).fields()
}

/// Detect the option groups of a document, in first-appearance order.
pub fn detect_groups(text: &str) -> Vec<ConditionalGroup> {
    ConditionalAnalysis::analyze(text).groups().to_vec()
}
