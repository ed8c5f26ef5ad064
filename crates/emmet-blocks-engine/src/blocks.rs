//! Block records handed to the editor.
//!
//! Serialized with serde to the shape the block editor consumes:
//!
//! ```json
//! {"name": "core/group", "attributes": {"tagName": "header"}, "innerBlocks": []}
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Namespace assumed for block names given without one.
pub const CORE_NAMESPACE: &str = "core";

/// The kind of a block, named like `core/paragraph`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockKind {
    Group,
    Paragraph,
    Heading,
    Image,
    Video,
    List,
    Code,
    Quote,
    Column,
    Columns,
    Separator,
    Spacer,
    /// Any other namespaced name, e.g. `core/cover` or `acme/hero`.
    Custom(String),
}

impl BlockKind {
    pub fn name(&self) -> &str {
        match self {
            BlockKind::Group => "core/group",
            BlockKind::Paragraph => "core/paragraph",
            BlockKind::Heading => "core/heading",
            BlockKind::Image => "core/image",
            BlockKind::Video => "core/video",
            BlockKind::List => "core/list",
            BlockKind::Code => "core/code",
            BlockKind::Quote => "core/quote",
            BlockKind::Column => "core/column",
            BlockKind::Columns => "core/columns",
            BlockKind::Separator => "core/separator",
            BlockKind::Spacer => "core/spacer",
            BlockKind::Custom(name) => name,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBlockKindError {
    #[error("block name is empty")]
    Empty,
    #[error("invalid block name `{0}`: expected `name` or `namespace/name`")]
    Malformed(String),
}

impl FromStr for BlockKind {
    type Err = ParseBlockKindError;

    /// Accepts `namespace/name`, or a bare `name` meaning `core/name`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseBlockKindError::Empty);
        }

        let full = match s.split_once('/') {
            Some((namespace, name))
                if !namespace.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                s.to_ascii_lowercase()
            }
            Some(_) => return Err(ParseBlockKindError::Malformed(s.to_string())),
            None => format!("{CORE_NAMESPACE}/{}", s.to_ascii_lowercase()),
        };

        let kind = match full.as_str() {
            "core/group" => BlockKind::Group,
            "core/paragraph" => BlockKind::Paragraph,
            "core/heading" => BlockKind::Heading,
            "core/image" => BlockKind::Image,
            "core/video" => BlockKind::Video,
            "core/list" => BlockKind::List,
            "core/code" => BlockKind::Code,
            "core/quote" => BlockKind::Quote,
            "core/column" => BlockKind::Column,
            "core/columns" => BlockKind::Columns,
            "core/separator" => BlockKind::Separator,
            "core/spacer" => BlockKind::Spacer,
            _ => BlockKind::Custom(full),
        };
        Ok(kind)
    }
}

impl Serialize for BlockKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    Flex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Layout of a group's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    pub orientation: Orientation,
}

impl Layout {
    pub const fn flex(orientation: Orientation) -> Self {
        Self {
            layout_type: LayoutType::Flex,
            orientation,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout_type = match self.layout_type {
            LayoutType::Flex => "flex",
        };
        let orientation = match self.orientation {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        };
        write!(f, "{layout_type} {orientation}")
    }
}

/// Block attributes. Every field is optional; absent ones are not serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    /// Semantic tag of a group, e.g. `header`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered: Option<bool>,
    /// List items as `<li>…</li>` markup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl BlockAttributes {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Present attributes as `(key, value)` pairs, in a fixed order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = Vec::new();
        if let Some(class_name) = &self.class_name {
            entries.push(("className", class_name.clone()));
        }
        if let Some(anchor) = &self.anchor {
            entries.push(("anchor", anchor.clone()));
        }
        if let Some(tag_name) = &self.tag_name {
            entries.push(("tagName", tag_name.clone()));
        }
        if let Some(layout) = &self.layout {
            entries.push(("layout", layout.to_string()));
        }
        if let Some(ordered) = self.ordered {
            entries.push(("ordered", ordered.to_string()));
        }
        if let Some(values) = &self.values {
            entries.push(("values", values.clone()));
        }
        if let Some(content) = &self.content {
            entries.push(("content", content.clone()));
        }
        entries
    }
}

/// A block and the blocks nested inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(rename = "name")]
    kind: BlockKind,
    attributes: BlockAttributes,
    inner_blocks: Vec<Block>,
}

impl Block {
    pub fn new(kind: BlockKind, attributes: BlockAttributes, inner_blocks: Vec<Block>) -> Self {
        Self {
            kind,
            attributes,
            inner_blocks,
        }
    }

    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    pub fn attributes(&self) -> &BlockAttributes {
        &self.attributes
    }

    pub fn inner_blocks(&self) -> &[Block] {
        &self.inner_blocks
    }

    /// Number of blocks in this subtree, this one included.
    pub fn count(&self) -> usize {
        1 + self.inner_blocks.iter().map(Block::count).sum::<usize>()
    }
}
