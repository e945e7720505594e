//! Placeholder tokenizer.
//!
//! Scanning produces [`Tag`]s for every `{{ ... }}` occurrence; placeholder
//! tags are then parsed into [`PlaceholderField`](crate::PlaceholderField)s.
//! Block markers (`{{#id}}`, `{{/id}}`) are left to the
//! [`analyzer`](crate::analyzer).

pub mod ast;
mod placeholder;
mod scan;

pub use ast::{Tag, TagKind};
pub use placeholder::{Interior, parse_interior, parse_placeholder};
pub use scan::scan_tags;

use crate::types::PlaceholderField;

/// Scan a document and parse every placeholder occurrence, in source order.
///
/// Duplicate literals are returned once per occurrence; merging happens in
/// [`FieldRegistry`](crate::FieldRegistry). Conditional dependencies are not
/// filled in here.
pub fn parse_fields(input: &str) -> Vec<PlaceholderField> {
    scan_tags(input).iter().filter_map(parse_placeholder).collect()
}
