//! Placeholder key normalization.
//!
//! Every placeholder key has two forms: a canonical form used to decide
//! whether two occurrences name the same logical field, and a display form
//! used to label that field.

/// Returns the display form of a raw key: trimmed, with internal whitespace
/// runs collapsed to a single space. Case is preserved.
///
/// # Example
///
/// ```
/// use docfill::display_key;
///
/// assert_eq!(display_key("  Company   Name "), "Company Name");
/// ```
pub fn display_key(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the canonical comparison form of a raw key: the display form,
/// lowercased.
///
/// # Example
///
/// ```
/// use docfill::canonical_key;
///
/// assert_eq!(canonical_key("COMPANY  Name"), "company name");
/// ```
pub fn canonical_key(raw: &str) -> String {
    display_key(raw).to_lowercase()
}

/// Returns `(canonical_key, display_key)` for a raw key.
pub fn canonicalize(raw: &str) -> (String, String) {
    let display = display_key(raw);
    (display.to_lowercase(), display)
}

/// Case style of a display key, ordered from most to least preferred when
/// several spellings of one field compete for the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyCase {
    /// Every word starts with an uppercase letter (`Company Name`).
    Title,
    /// Anything that is neither Title Case nor ALL CAPS (`Company name`).
    Other,
    /// Letters present and none of them lowercase (`COMPANY NAME`).
    AllCaps,
}

impl KeyCase {
    /// Classifies a display key.
    pub fn of(display: &str) -> KeyCase {
        let has_upper = display.chars().any(char::is_uppercase);
        let has_lower = display.chars().any(char::is_lowercase);
        if has_upper && !has_lower {
            return KeyCase::AllCaps;
        }

        let words_capitalized = display.split_whitespace().all(|word| {
            word.chars()
                .next()
                .is_none_or(|c| !c.is_alphabetic() || c.is_uppercase())
        });
        if has_upper && words_capitalized {
            KeyCase::Title
        } else {
            KeyCase::Other
        }
    }
}
