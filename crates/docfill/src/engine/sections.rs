//! Conditional section rendering.

use std::ops::Range;

use crate::analyzer::ConditionalAnalysis;
use crate::types::Selection;

/// Keep selected conditional sections and drop the rest.
///
/// For every non-control block that resolves to a group:
/// - `Group:Option` blocks are kept when the selection picks that option
/// - bare `Group` blocks are kept when the group has any selection
///
/// Kept blocks lose their markers; dropped blocks lose everything inside
/// them. Control blocks and blocks that resolve to no group are left as
/// written. `analysis` must come from the same `text`.
pub fn render_sections(text: &str, analysis: &ConditionalAnalysis, selection: &Selection) -> String {
    let mut cuts: Vec<Range<usize>> = Vec::new();

    for block in analysis.blocks() {
        if block.is_control() {
            continue;
        }
        let Some(resolution) = analysis.resolve(&block.identifier) else {
            continue;
        };
        let chosen = selection.get(&resolution.group.name);
        let keep = match resolution.option {
            Some(option) => chosen.is_some_and(|chosen| chosen == option),
            None => chosen.is_some(),
        };
        log::debug!(
            "{} block '{}'",
            if keep { "keeping" } else { "dropping" },
            block.identifier
        );
        if keep {
            cuts.push(block.open.clone());
            cuts.push(block.close.clone());
        } else {
            cuts.push(block.span());
        }
    }

    cuts.sort_by_key(|cut| cut.start);
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    for cut in cuts {
        if cut.start > cursor {
            output.push_str(&text[cursor..cut.start]);
        }
        cursor = cursor.max(cut.end);
    }
    output.push_str(&text[cursor..]);
    output
}
