//! Field registry, section rendering and value substitution.

mod document;
mod error;
mod lint;
mod options;
mod registry;
mod sections;
mod substitute;

pub use document::Document;
pub use error::{LoadError, ValueError};
pub use lint::{LintWarning, lint_template, lint_values};
pub use options::{BULLET, DEFAULT_DATE_FORMAT, FillOptions, REQUIRED_GLYPH};
pub use registry::{FieldEntry, FieldRegistry, UnknownValue};
pub use sections::render_sections;
pub use substitute::{Values, format_field, lookup_key, render_value, substitute};
