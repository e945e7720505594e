//! Conditional block analysis.
//!
//! Pairs `{{#id}} ... {{/id}}` markers into blocks, derives option groups
//! from their identifiers, and resolves which group/option a position in the
//! document depends on.

mod blocks;
mod groups;

pub use blocks::{Block, BlockPairing, StrayMarker, is_control_identifier, pair_blocks};
pub use groups::{
    derive_groups, group_name, identifier_option, normalize_option, option_name,
    split_identifier,
};

use crate::parser::{Tag, scan_tags};
use crate::types::ConditionalGroup;

/// The group and option a block identifier resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'g> {
    pub group: &'g ConditionalGroup,
    /// `None` when the group matched but no option did.
    pub option: Option<&'g str>,
}

impl Resolution<'_> {
    /// `"Group:Option"`, or the bare group name.
    pub fn dependency(&self) -> String {
        self.group.dependency(self.option)
    }
}

/// Blocks and groups found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionalAnalysis {
    pairing: BlockPairing,
    groups: Vec<ConditionalGroup>,
}

impl ConditionalAnalysis {
    /// Analyze a document's text.
    ///
    /// # Example
    ///
    /// ```
    /// use docfill::analyzer::ConditionalAnalysis;
    ///
    /// let text = "{{#service_full_package}}{{Full Price}}{{/service_full_package}}";
    /// let analysis = ConditionalAnalysis::analyze(text);
    /// assert_eq!(analysis.groups()[0].name, "Service Options");
    /// assert_eq!(
    ///     analysis.dependencies_at(25),
    ///     vec!["Service Options:Full Package".to_string()]
    /// );
    /// ```
    pub fn analyze(text: &str) -> Self {
        Self::from_tags(&scan_tags(text))
    }

    /// Analyze already-scanned tags.
    pub fn from_tags(tags: &[Tag<'_>]) -> Self {
        let pairing = pair_blocks(tags);
        let groups = derive_groups(pairing.blocks.iter().map(|b| b.identifier.as_str()));
        log::debug!(
            "found {} block(s) in {} group(s)",
            pairing.blocks.len(),
            groups.len()
        );
        Self { pairing, groups }
    }

    /// Matched blocks, ordered by open marker position.
    pub fn blocks(&self) -> &[Block] {
        &self.pairing.blocks
    }

    pub fn groups(&self) -> &[ConditionalGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&ConditionalGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    pub fn unterminated(&self) -> &[StrayMarker] {
        &self.pairing.unterminated
    }

    pub fn unmatched_closes(&self) -> &[StrayMarker] {
        &self.pairing.unmatched_closes
    }

    /// Resolve a block identifier to a group and option.
    ///
    /// The group is the one whose root equals the identifier's first segment,
    /// or failing that the first group whose root occurs anywhere in the
    /// identifier (case-insensitive). The option is the one derived from the
    /// identifier itself, or failing that the first option whose normalized
    /// name is contained in the identifier or contains it.
    pub fn resolve(&self, identifier: &str) -> Option<Resolution<'_>> {
        let lower = identifier.to_lowercase();
        let first_segment = lower.split('_').next().unwrap_or_default();

        let group = self
            .groups
            .iter()
            .find(|group| group.root == first_segment)
            .or_else(|| self.groups.iter().find(|group| lower.contains(&group.root)))?;

        let derived = identifier_option(identifier).filter(|option| group.has_option(option));
        let option = match derived {
            Some(derived) => group.options.get(&derived),
            None => group.options.iter().find(|option| {
                let normalized = normalize_option(option);
                lower.contains(&normalized) || normalized.contains(&lower)
            }),
        };

        log::trace!("resolved block '{identifier}' to {} / {option:?}", group.name);
        Some(Resolution {
            group,
            option: option.map(String::as_str),
        })
    }

    /// Dependencies of a byte offset: one entry per enclosing non-control
    /// block that resolves to a group, in block order, without duplicates.
    pub fn dependencies_at(&self, offset: usize) -> Vec<String> {
        let mut dependencies: Vec<String> = Vec::new();
        for block in self.enclosing(offset) {
            let Some(resolution) = self.resolve(&block.identifier) else {
                continue;
            };
            let dependency = resolution.dependency();
            if !dependencies.contains(&dependency) {
                dependencies.push(dependency);
            }
        }
        dependencies
    }

    /// Non-control blocks whose span contains `offset`.
    fn enclosing(&self, offset: usize) -> impl Iterator<Item = &Block> {
        self.pairing
            .blocks
            .iter()
            .filter(move |block| !block.is_control() && block.contains(offset))
    }
}
