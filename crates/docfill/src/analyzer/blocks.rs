//! Pairing of `{{#id}}` / `{{/id}}` markers into blocks.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::parser::{Tag, TagKind};

/// Identifiers reserved for template control flow.
const CONTROL_IDENTIFIERS: [&str; 5] = ["if", "unless", "else", "each", "with"];

/// Prefixes marking an identifier as a control block.
const CONTROL_PREFIXES: [&str; 2] = ["if_", "unless_"];

/// A matched conditional block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub identifier: String,
    /// Byte range of the `{{#id}}` marker.
    pub open: Range<usize>,
    /// Byte range of the `{{/id}}` marker.
    pub close: Range<usize>,
}

impl Block {
    /// The whole block, markers included.
    pub fn span(&self) -> Range<usize> {
        self.open.start..self.close.end
    }

    /// The text between the markers.
    pub fn content(&self) -> Range<usize> {
        self.open.end..self.close.start
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.span().contains(&offset)
    }

    pub fn is_control(&self) -> bool {
        is_control_identifier(&self.identifier)
    }
}

/// A block marker that was never paired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrayMarker {
    pub identifier: String,
    pub offset: usize,
}

/// Result of pairing block markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockPairing {
    /// Matched blocks ordered by open marker position.
    pub blocks: Vec<Block>,
    /// Opens with no later close of the same identifier.
    pub unterminated: Vec<StrayMarker>,
    /// Closes with no pending open of the same identifier.
    pub unmatched_closes: Vec<StrayMarker>,
}

/// Returns true for identifiers reserved for control flow.
pub fn is_control_identifier(identifier: &str) -> bool {
    let lower = identifier.to_lowercase();
    CONTROL_IDENTIFIERS.contains(&lower.as_str())
        || CONTROL_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

/// Pair open and close markers.
///
/// An open pairs with the next close of the same identifier. While a block
/// is pending, further opens of that identifier are ignored, so blocks never
/// nest under one identifier; blocks with different identifiers nest freely.
pub fn pair_blocks(tags: &[Tag<'_>]) -> BlockPairing {
    let mut pending: BTreeMap<&str, Range<usize>> = BTreeMap::new();
    let mut pairing = BlockPairing::default();

    for tag in tags {
        match tag.kind {
            TagKind::Open(identifier) => {
                pending
                    .entry(identifier)
                    .or_insert_with(|| tag.span.clone());
            }
            TagKind::Close(identifier) => match pending.remove(identifier) {
                Some(open) => pairing.blocks.push(Block {
                    identifier: identifier.to_string(),
                    open,
                    close: tag.span.clone(),
                }),
                None => pairing.unmatched_closes.push(StrayMarker {
                    identifier: identifier.to_string(),
                    offset: tag.start(),
                }),
            },
            TagKind::Placeholder | TagKind::Control => {}
        }
    }

    pairing.unterminated = pending
        .into_iter()
        .map(|(identifier, open)| StrayMarker {
            identifier: identifier.to_string(),
            offset: open.start,
        })
        .collect();
    pairing.unterminated.sort_by_key(|marker| marker.offset);
    pairing.blocks.sort_by_key(|block| block.open.start);

    for marker in &pairing.unterminated {
        log::debug!(
            "block '{}' at byte {} has no closing marker",
            marker.identifier,
            marker.offset
        );
    }
    pairing
}
