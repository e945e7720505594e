use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// A chosen option per group name, e.g. `"Service Options" -> "Full Package"`.
pub type Selection = BTreeMap<String, String>;

/// A family of related document-section choices derived from conditional
/// block identifiers sharing a root segment.
///
/// The identifier `service_full_package` contributes the option
/// `Full Package` to the group `Service Options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionalGroup {
    /// Human-readable group name, e.g. `Service Options`.
    pub name: String,

    /// Lowercased root segment the group was derived from, e.g. `service`.
    #[serde(skip)]
    pub root: String,

    /// Option names; duplicates collapse.
    pub options: BTreeSet<String>,
}

impl ConditionalGroup {
    /// Creates an empty group for a root segment.
    pub fn new(name: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            options: BTreeSet::new(),
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.contains(option)
    }

    /// Formats a dependency string for this group: `"Group:Option"`, or the
    /// bare group name when no option is known.
    pub fn dependency(&self, option: Option<&str>) -> String {
        match option {
            Some(option) => format!("{}:{option}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Returns true if a dependency string is satisfied by a selection.
///
/// `"Group:Option"` requires that exact choice; a bare `"Group"` is satisfied
/// by any choice in that group.
pub fn dependency_satisfied(dependency: &str, selection: &Selection) -> bool {
    match dependency.split_once(':') {
        Some((group, option)) => selection.get(group).is_some_and(|chosen| chosen == option),
        None => selection.contains_key(dependency),
    }
}
