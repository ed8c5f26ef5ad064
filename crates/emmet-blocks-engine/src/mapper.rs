//! Element tree → block tree.
//!
//! Each element becomes one block:
//!
//! 1. the tag table picks the block kind;
//! 2. classes become `className`, a non-empty id becomes `anchor`;
//! 3. groups keep landmark tags in `tagName`, and `row`/`stack` get a flex
//!    layout;
//! 4. lists with `li` children fold those items into `values` and stop there;
//! 5. text tags keep their trimmed text in `content`;
//! 6. every child element is mapped into `inner_blocks`.

use html_escape::encode_text;
use log::trace;

use crate::blocks::{Block, BlockAttributes, BlockKind, Layout, Orientation};
use crate::fragment::{GenericElement, parse_fragment};
use crate::table::TagTable;

/// Groups that remember their HTML tag.
pub const LANDMARK_TAGS: &[&str] = &["header", "main", "footer", "section", "aside", "article"];

/// Tags whose text is kept as `content`.
pub const TEXT_TAGS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6", "code"];

/// Maps elements to blocks with a fixed tag table. Stateless apart from the
/// table, so one mapper can be shared by any number of submissions.
#[derive(Debug, Clone, Default)]
pub struct BlockMapper {
    table: TagTable,
}

impl BlockMapper {
    pub fn new(table: TagTable) -> Self {
        Self { table }
    }

    /// Map one element and everything under it.
    pub fn map(&self, element: &GenericElement) -> Block {
        let tag = element.tag.to_ascii_lowercase();
        let kind = self.table.lookup(&tag).clone();
        if self.table.get(&tag).is_none() {
            trace!("no block mapping for <{tag}>, using {kind}");
        }

        let mut attributes = shared_attributes(element);

        if kind == BlockKind::Group {
            specialize_group(&tag, &mut attributes);
        }

        if kind == BlockKind::List {
            if tag == "ol" {
                attributes.ordered = Some(true);
            }
            if let Some(values) = fold_list_items(element) {
                attributes.values = Some(values);
                return Block::new(kind, attributes, Vec::new());
            }
        }

        if TEXT_TAGS.contains(&tag.as_str()) {
            let text = element.text_content.trim();
            if !text.is_empty() {
                attributes.content = Some(text.to_string());
            }
        }

        let inner_blocks = self.map_all(&element.children);
        Block::new(kind, attributes, inner_blocks)
    }

    /// Map sibling elements in order.
    pub fn map_all(&self, elements: &[GenericElement]) -> Vec<Block> {
        elements.iter().map(|element| self.map(element)).collect()
    }

    /// Parse an HTML fragment and map its top-level elements.
    pub fn map_html(&self, html: &str) -> Vec<Block> {
        self.map_all(&parse_fragment(html))
    }
}

fn shared_attributes(element: &GenericElement) -> BlockAttributes {
    BlockAttributes {
        class_name: (!element.class_list.is_empty()).then(|| element.class_list.join(" ")),
        anchor: element.id.clone().filter(|id| !id.is_empty()),
        ..Default::default()
    }
}

fn specialize_group(tag: &str, attributes: &mut BlockAttributes) {
    if LANDMARK_TAGS.contains(&tag) {
        attributes.tag_name = Some(tag.to_string());
    } else if tag == "row" {
        attributes.layout = Some(Layout::flex(Orientation::Horizontal));
    } else if tag == "stack" {
        attributes.layout = Some(Layout::flex(Orientation::Vertical));
    }
}

/// `<li>` markup for the direct `li` children, or `None` when there are none.
/// Other children are ignored.
fn fold_list_items(element: &GenericElement) -> Option<String> {
    let items: Vec<_> = element
        .children
        .iter()
        .filter(|child| child.tag.eq_ignore_ascii_case("li"))
        .map(|li| format!("<li>{}</li>", encode_text(li.text_content.trim())))
        .collect();

    (!items.is_empty()).then(|| items.concat())
}
