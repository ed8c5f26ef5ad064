//! The tag → block kind table.

use std::collections::BTreeMap;

use crate::blocks::BlockKind;

/// Which block kind each HTML tag becomes.
///
/// Lookups are case-insensitive. Tags missing from the table resolve to a
/// group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTable {
    entries: BTreeMap<String, BlockKind>,
    fallback: BlockKind,
}

impl TagTable {
    /// An empty table: every tag resolves to a group.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
            fallback: BlockKind::Group,
        }
    }

    /// The built-in mapping onto `core/*` blocks.
    pub fn core() -> Self {
        use BlockKind::*;

        let entries = [
            // Containers
            ("div", Group),
            ("section", Group),
            ("article", Group),
            ("header", Group),
            ("main", Group),
            ("footer", Group),
            ("aside", Group),
            // Text
            ("p", Paragraph),
            ("span", Paragraph),
            ("h1", Heading),
            ("h2", Heading),
            ("h3", Heading),
            ("h4", Heading),
            ("h5", Heading),
            ("h6", Heading),
            // Media
            ("img", Image),
            ("video", Video),
            // Lists
            ("ul", List),
            ("ol", List),
            ("li", List),
            // Other
            ("code", Code),
            ("blockquote", Quote),
            ("quote", Quote),
            // Layout aliases
            ("col", Column),
            ("cols", Columns),
            ("row", Group),
            ("stack", Group),
            ("sep", Separator),
            ("separator", Separator),
            ("sp", Spacer),
            ("spacer", Spacer),
        ];

        entries
            .into_iter()
            .fold(Self::empty(), |table, (tag, kind)| table.with_override(tag, kind))
    }

    /// Add or replace the entry for `tag`.
    pub fn with_override(mut self, tag: &str, kind: BlockKind) -> Self {
        self.entries.insert(tag.to_ascii_lowercase(), kind);
        self
    }

    /// Resolve a tag, falling back for unknown ones.
    pub fn lookup(&self, tag: &str) -> &BlockKind {
        self.get(tag).unwrap_or(&self.fallback)
    }

    /// The explicit entry for a tag, if any.
    pub fn get(&self, tag: &str) -> Option<&BlockKind> {
        self.entries.get(&tag.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by tag.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BlockKind)> {
        self.entries.iter().map(|(tag, kind)| (tag.as_str(), kind))
    }
}

impl Default for TagTable {
    fn default() -> Self {
        Self::core()
    }
}
