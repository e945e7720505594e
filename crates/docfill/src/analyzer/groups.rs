//! Derivation of option groups from block identifiers.
//!
//! Identifiers follow a `root_option_words` convention. The root names the
//! group (`service` becomes `Service Options`) and the remaining segments name
//! the option (`full_package` becomes `Full Package`).

use std::iter;

use crate::types::ConditionalGroup;

const GROUP_SUFFIX: &str = " Options";
const PERIOD_ROOT: &str = "period";

/// Split an identifier into its root segment and remaining segments.
///
/// Returns `None` unless the identifier has at least two non-empty
/// alphanumeric segments separated by `_`.
pub fn split_identifier(identifier: &str) -> Option<(&str, Vec<&str>)> {
    let mut segments = identifier.split('_');
    let root = segments.next()?;
    let rest: Vec<&str> = segments.collect();
    let well_formed = !rest.is_empty()
        && iter::once(root)
            .chain(rest.iter().copied())
            .all(|segment| !segment.is_empty() && segment.chars().all(char::is_alphanumeric));
    well_formed.then_some((root, rest))
}

/// Group name for a root segment: `service` becomes `Service Options`.
pub fn group_name(root: &str) -> String {
    let mut chars = root.chars();
    let mut name = String::with_capacity(root.len() + GROUP_SUFFIX.len());
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(&chars.as_str().to_lowercase());
    }
    name.push_str(GROUP_SUFFIX);
    name
}

/// Option name for the segments after the root.
///
/// Each segment becomes a word with its first letter capitalized. For the
/// `period` root, a numeric first segment is read as a duration instead:
/// `1` is `1 year`, `2` is `2 years`, anything else is `<N> months`.
pub fn option_name(root: &str, rest: &[&str]) -> String {
    if root.eq_ignore_ascii_case(PERIOD_ROOT) {
        if let Some(n) = rest.first().and_then(|segment| segment.parse::<u32>().ok()) {
            return match n {
                1 => "1 year".to_string(),
                2 => "2 years".to_string(),
                n => format!("{n} months"),
            };
        }
    }

    rest.iter()
        .map(|segment| capitalize(segment))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Option name derived from a whole identifier, if it is well formed.
pub fn identifier_option(identifier: &str) -> Option<String> {
    split_identifier(identifier).map(|(root, rest)| option_name(root, &rest))
}

/// Normalized comparison form of an option name: spaces become `_`,
/// lowercased.
pub fn normalize_option(option: &str) -> String {
    option.replace(' ', "_").to_lowercase()
}

/// Build groups from block identifiers.
///
/// Groups keep the order in which their root first appears. Identifiers
/// that do not follow the naming convention contribute nothing.
pub fn derive_groups<'a>(identifiers: impl IntoIterator<Item = &'a str>) -> Vec<ConditionalGroup> {
    let mut groups: Vec<ConditionalGroup> = Vec::new();
    for identifier in identifiers {
        let Some((root, rest)) = split_identifier(identifier) else {
            continue;
        };
        let name = group_name(root);
        let option = option_name(root, &rest);
        let index = match groups.iter().position(|group| group.name == name) {
            Some(index) => index,
            None => {
                groups.push(ConditionalGroup::new(name, root.to_lowercase()));
                groups.len() - 1
            }
        };
        groups[index].options.insert(option);
    }
    groups
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_well_formed_identifiers() {
        assert_eq!(
            split_identifier("service_full_package"),
            Some(("service", vec!["full", "package"]))
        );
        assert_eq!(split_identifier("service"), None);
        assert_eq!(split_identifier("service__x"), None);
        assert_eq!(split_identifier("_x"), None);
        assert_eq!(split_identifier("a-b_c"), None);
    }

    #[test]
    fn names_groups_and_options() {
        assert_eq!(group_name("service"), "Service Options");
        assert_eq!(group_name("PAYMENT"), "Payment Options");
        assert_eq!(option_name("service", &["full", "package"]), "Full Package");
        assert_eq!(option_name("service", &["basic"]), "Basic");
    }

    #[test]
    fn period_durations() {
        assert_eq!(option_name("period", &["1"]), "1 year");
        assert_eq!(option_name("period", &["2"]), "2 years");
        assert_eq!(option_name("period", &["6"]), "6 months");
        assert_eq!(option_name("Period", &["18", "extra"]), "18 months");
        assert_eq!(option_name("period", &["open", "ended"]), "Open Ended");
    }

    #[test]
    fn options_accumulate_as_a_set() {
        let groups = derive_groups([
            "service_full_package",
            "period_1",
            "service_basic",
            "service_full_package",
            "standalone",
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Service Options");
        assert_eq!(groups[0].root, "service");
        assert_eq!(
            groups[0].options.iter().collect::<Vec<_>>(),
            vec!["Basic", "Full Package"]
        );
        assert_eq!(groups[1].name, "Period Options");
        assert!(groups[1].has_option("1 year"));
    }

    #[test]
    fn normalizes_option_names() {
        assert_eq!(normalize_option("Full Package"), "full_package");
    }
}
