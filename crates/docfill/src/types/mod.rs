mod field;
mod group;
mod key;
mod value;

pub use field::{FieldType, PlaceholderField};
pub use group::{ConditionalGroup, Selection, dependency_satisfied};
pub use key::{KeyCase, canonical_key, canonicalize, display_key};
pub use value::{ISO_DATE_FORMAT, Value};
