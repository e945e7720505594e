//! Tag types produced by scanning document text.

use std::ops::Range;

/// One `{{ ... }}` occurrence in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Byte range of the whole tag, brackets included.
    pub span: Range<usize>,
    /// The literal text of the tag, brackets included.
    pub literal: &'a str,
    /// The text between the brackets, untrimmed.
    pub interior: &'a str,
    pub kind: TagKind<'a>,
}

/// What a tag's interior denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind<'a> {
    /// A placeholder candidate; its interior may still fail to parse.
    Placeholder,
    /// `{{#identifier}}`
    Open(&'a str),
    /// `{{/identifier}}`
    Close(&'a str),
    /// Any other `#`, `/`, `^` or `!` tag, e.g. a malformed block marker.
    Control,
}

impl Tag<'_> {
    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, TagKind::Placeholder)
    }
}
