use bon::Builder;
use serde::{Deserialize, Serialize};

/// Substituted for required fields that have no value.
pub const REQUIRED_GLYPH: &str = "—";

/// Prefix for each entry of a `multiple` field.
pub const BULLET: &str = "• ";

/// Default `chrono` format for date values (`3/5/2024`).
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Formatting settings for substitution.
///
/// # Example
///
/// ```
/// use docfill::FillOptions;
///
/// let options = FillOptions::builder()
///     .required_glyph("[missing]")
///     .date_format("%d.%m.%Y")
///     .build();
///
/// assert_eq!(options.required_glyph, "[missing]");
/// assert_eq!(options.bullet, "• ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
#[serde(default)]
pub struct FillOptions {
    /// Text for a required field with no value.
    #[builder(default = REQUIRED_GLYPH.to_string())]
    pub required_glyph: String,

    /// Prefix for each line of a `multiple` field.
    #[builder(default = BULLET.to_string())]
    pub bullet: String,

    /// Separator used when a list is rendered into a non-`multiple` field.
    #[builder(default = ", ".to_string())]
    pub list_separator: String,

    /// `chrono` strftime format for date values.
    #[builder(default = DEFAULT_DATE_FORMAT.to_string())]
    pub date_format: String,
}

impl Default for FillOptions {
    fn default() -> Self {
        FillOptions::builder().build()
    }
}
