//! Per-document registry of logical fields.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use strsim::levenshtein;

use crate::engine::ValueError;
use crate::engine::substitute::{Values, lookup_key};
use crate::types::{
    FieldType, KeyCase, PlaceholderField, Selection, dependency_satisfied,
};

/// One logical field: every literal spelling of a canonical key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldEntry {
    pub canonical_key: String,
    /// The best-ranked display form among the variants.
    pub display_key: String,
    /// One field per distinct literal, in first-seen order.
    pub variants: Vec<PlaceholderField>,
}

impl FieldEntry {
    fn new(field: PlaceholderField) -> Self {
        Self {
            canonical_key: field.canonical_key.clone(),
            display_key: field.display_key.clone(),
            variants: vec![field],
        }
    }

    /// The first-seen variant, used to render a single form control.
    pub fn primary(&self) -> &PlaceholderField {
        &self.variants[0]
    }

    pub fn field_type(&self) -> FieldType {
        self.primary().field_type
    }

    /// The first default value declared by any variant.
    pub fn default_value(&self) -> Option<&str> {
        self.variants
            .iter()
            .find_map(|variant| variant.default_value.as_deref())
    }

    /// True if any variant must be filled.
    pub fn is_required(&self) -> bool {
        self.variants.iter().any(PlaceholderField::is_required)
    }

    /// True if any variant is shown regardless of section selection.
    pub fn is_unconditional(&self) -> bool {
        self.variants.iter().any(|variant| !variant.is_conditional())
    }

    /// All dependencies across variants, first-seen order, no duplicates.
    pub fn dependencies(&self) -> Vec<&str> {
        let mut dependencies: Vec<&str> = Vec::new();
        for dependency in self.variants.iter().flat_map(|v| &v.conditional_dependencies) {
            if !dependencies.contains(&dependency.as_str()) {
                dependencies.push(dependency);
            }
        }
        dependencies
    }

    /// Distinct declared types, first-seen order.
    pub fn declared_types(&self) -> Vec<FieldType> {
        let mut types = Vec::new();
        for variant in &self.variants {
            if !types.contains(&variant.field_type) {
                types.push(variant.field_type);
            }
        }
        types
    }

    /// True if the field is relevant under a selection.
    pub fn is_visible(&self, selection: &Selection) -> bool {
        self.is_unconditional()
            || self
                .dependencies()
                .into_iter()
                .any(|dependency| dependency_satisfied(dependency, selection))
    }

    fn merge(&mut self, field: PlaceholderField) {
        if let Some(existing) = self
            .variants
            .iter_mut()
            .find(|variant| variant.original_placeholder == field.original_placeholder)
        {
            if !existing.is_conditional() {
                return;
            }
            if field.is_conditional() {
                for dependency in field.conditional_dependencies {
                    existing.add_dependency(dependency);
                }
            } else {
                existing.conditional_dependencies.clear();
            }
            return;
        }

        if KeyCase::of(&field.display_key) < KeyCase::of(&self.display_key) {
            self.display_key.clone_from(&field.display_key);
        }
        self.variants.push(field);
    }
}

/// A value key that matches no field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue {
    pub key: String,
    /// Closest canonical keys, nearest first.
    pub suggestions: Vec<String>,
}

/// The logical fields of one document.
///
/// Occurrences are grouped by canonical key. Each group keeps one field per
/// distinct literal so every spelling can be substituted, while the group as
/// a whole carries one display label. Entries are ordered by display key.
///
/// # Example
///
/// ```
/// use docfill::FieldRegistry;
/// use docfill::parser::parse_fields;
///
/// let registry = FieldRegistry::from_fields(parse_fields(
///     "{{COMPANY NAME}} and {{Company Name}} and {{COMPANY NAME}}",
/// ));
/// assert_eq!(registry.len(), 1);
///
/// let entry = registry.get("company name").unwrap();
/// assert_eq!(entry.display_key, "Company Name");
/// assert_eq!(entry.variants.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRegistry {
    entries: Vec<FieldEntry>,
    /// Canonical key to position in `entries`.
    index: HashMap<String, usize>,
}

impl FieldRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from parsed occurrences in source order.
    pub fn from_fields(fields: impl IntoIterator<Item = PlaceholderField>) -> Self {
        let mut entries: Vec<FieldEntry> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for field in fields {
            match positions.get(&field.canonical_key) {
                Some(&position) => entries[position].merge(field),
                None => {
                    positions.insert(field.canonical_key.clone(), entries.len());
                    entries.push(FieldEntry::new(field));
                }
            }
        }

        for entry in &mut entries {
            for variant in &mut entry.variants {
                variant.display_key.clone_from(&entry.display_key);
            }
        }
        entries.sort_by(|a, b| a.display_key.cmp(&b.display_key));

        let index = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.canonical_key.clone(), position))
            .collect();
        Self { entries, index }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Logical fields ordered by display key.
    pub fn entries(&self) -> &[FieldEntry] {
        &self.entries
    }

    /// Get a logical field by canonical key.
    pub fn get(&self, canonical_key: &str) -> Option<&FieldEntry> {
        self.index
            .get(canonical_key)
            .map(|&position| &self.entries[position])
    }

    /// Every literal variant, grouped by entry in display-key order.
    pub fn fields(&self) -> impl Iterator<Item = &PlaceholderField> {
        self.entries.iter().flat_map(|entry| &entry.variants)
    }

    /// Find the field for an exact literal such as `{{Name:text}}`.
    pub fn find_literal(&self, literal: &str) -> Option<&PlaceholderField> {
        self.fields()
            .find(|field| field.original_placeholder == literal)
    }

    /// Entries relevant under a selection of group options.
    pub fn visible(&self, selection: &Selection) -> impl Iterator<Item = &FieldEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.is_visible(selection))
    }

    /// Value keys that no field would look up, with typo suggestions.
    pub fn unknown_values(&self, values: &Values) -> Vec<UnknownValue> {
        let mut keys: Vec<&String> = values.keys().collect();
        keys.sort();

        keys.into_iter()
            .filter(|key| !self.is_known_value_key(key))
            .map(|key| UnknownValue {
                key: key.clone(),
                suggestions: self.suggestions(key),
            })
            .collect()
    }

    /// Convert text values into the shape each field's type expects.
    ///
    /// See [`Value::coerce`](crate::Value::coerce). Each lookup key is
    /// converted once, and only when every entry reading it declares the same
    /// type; `{{Client}}` and `{{Client_Start:date}}` share the `client`
    /// value, so it stays text. Values that fail to convert are kept as text.
    ///
    /// Returns one [`ValueError::Field`] per value that failed to convert.
    pub fn coerce_values(&self, values: &mut Values) -> Vec<ValueError> {
        let mut types: BTreeMap<&str, Option<FieldType>> = BTreeMap::new();
        for entry in &self.entries {
            let field_type = entry.field_type();
            types
                .entry(lookup_key(&entry.canonical_key))
                .and_modify(|agreed| {
                    if *agreed != Some(field_type) {
                        *agreed = None;
                    }
                })
                .or_insert(Some(field_type));
        }

        let mut failures = Vec::new();
        for (key, field_type) in types {
            let Some(field_type) = field_type else {
                log::debug!("fields reading '{key}' disagree on type, leaving value as is");
                continue;
            };
            let Some(value) = values.get(key) else {
                continue;
            };
            match value.clone().coerce(field_type) {
                Ok(coerced) => {
                    values.insert(key.to_string(), coerced);
                }
                Err(source) => {
                    let error = ValueError::Field {
                        key: key.to_string(),
                        source: Box::new(source),
                    };
                    log::warn!("{error}, keeping it as text");
                    failures.push(error);
                }
            }
        }
        failures
    }

    fn is_known_value_key(&self, key: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| lookup_key(&entry.canonical_key) == key)
    }

    fn suggestions(&self, key: &str) -> Vec<String> {
        let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
        let mut suggestions: Vec<(usize, &str)> = self
            .entries
            .iter()
            .map(|entry| lookup_key(&entry.canonical_key))
            .filter_map(|candidate| {
                let distance = levenshtein(key, candidate);
                (distance > 0 && distance <= max_distance).then_some((distance, candidate))
            })
            .collect();
        suggestions.sort_unstable();
        suggestions.dedup();
        suggestions
            .into_iter()
            .take(3)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}
