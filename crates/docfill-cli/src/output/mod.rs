//! Terminal output: tables and lint diagnostics.

mod diagnostic;
mod table;

pub use diagnostic::LintDiagnostic;
pub use table::{format_fields_table, format_groups_table};
