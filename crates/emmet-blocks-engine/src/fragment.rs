//! HTML fragment parsing into a plain element tree.
//!
//! The fragment is handed to html5ever as a whole document, so everything the
//! HTML5 tree builder does to tag soup happens here too: unclosed tags are
//! closed, a `<div>` inside a `<p>` ends the paragraph, table-only tags such as
//! `<col>` are dropped outside a table. What comes back is the element
//! children of `<body>`.

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// An element with just the parts block mapping looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericElement {
    /// Lowercase tag name.
    pub tag: String,
    /// Class tokens in source order, duplicates kept.
    pub class_list: Vec<String>,
    /// `None` when the element has no `id` or an empty one.
    pub id: Option<String>,
    /// Element children only; text nodes are folded into `text_content`.
    pub children: Vec<GenericElement>,
    /// All text of the element and its descendants, concatenated.
    pub text_content: String,
}

impl GenericElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class_list.push(class.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.id = (!id.is_empty()).then_some(id);
        self
    }

    /// Append text directly inside this element.
    pub fn with_text(mut self, text: impl AsRef<str>) -> Self {
        self.text_content.push_str(text.as_ref());
        self
    }

    /// Append a child element; its text becomes part of ours.
    pub fn with_child(mut self, child: GenericElement) -> Self {
        self.text_content.push_str(&child.text_content);
        self.children.push(child);
        self
    }
}

/// Parse an HTML fragment and return the top-level elements of its body.
///
/// Never fails: anything html5ever accepts yields a best-effort tree, and
/// input without elements yields an empty list.
pub fn parse_fragment(html: &str) -> Vec<GenericElement> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let dom = parse_document(RcDom::default(), opts).one(html);

    find_element(&dom.document, "body")
        .map(|body| element_children(&body))
        .unwrap_or_default()
}

fn find_element(handle: &Handle, wanted: &str) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &handle.data
        && &*name.local == wanted
    {
        return Some(handle.clone());
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, wanted))
}

fn element_children(handle: &Handle) -> Vec<GenericElement> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert)
        .collect()
}

fn convert(handle: &Handle) -> Option<GenericElement> {
    let NodeData::Element { name, attrs, .. } = &handle.data else {
        return None;
    };

    let mut element = GenericElement::new(&*name.local);
    for attr in attrs.borrow().iter() {
        match &*attr.name.local {
            "class" => element.class_list = attr.value.split_ascii_whitespace().map(String::from).collect(),
            "id" if !attr.value.is_empty() => element.id = Some(attr.value.to_string()),
            _ => {}
        }
    }

    element.children = element_children(handle);
    collect_text(handle, &mut element.text_content);
    Some(element)
}

fn collect_text(handle: &Handle, out: &mut String) {
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { .. } => collect_text(child, out),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tags(elements: &[GenericElement]) -> Vec<&str> {
        elements.iter().map(|e| e.tag.as_str()).collect()
    }

    #[test]
    fn top_level_elements_in_order() {
        let elements = parse_fragment("<div></div><p>Hi</p><section></section>");
        assert_eq!(tags(&elements), vec!["div", "p", "section"]);
    }

    #[test]
    fn class_id_and_text_are_read() {
        let elements = parse_fragment(r#"<header class="top  site top" id="h1"><p>Hi <b>there</b></p></header>"#);
        let header = &elements[0];
        assert_eq!(header.class_list, vec!["top", "site", "top"]);
        assert_eq!(header.id.as_deref(), Some("h1"));
        assert_eq!(header.text_content, "Hi there");
        assert_eq!(tags(&header.children), vec!["p"]);
        assert_eq!(tags(&header.children[0].children), vec!["b"]);
    }

    #[test]
    fn empty_id_is_absent() {
        let elements = parse_fragment(r#"<div id=""></div>"#);
        assert_eq!(elements[0].id, None);
    }

    #[test]
    fn text_nodes_are_not_children() {
        let elements = parse_fragment("<p>one<span>two</span>three</p>");
        assert_eq!(elements[0].children.len(), 1);
        assert_eq!(elements[0].text_content, "onetwothree");
    }

    #[test]
    fn unknown_tags_are_kept() {
        let elements = parse_fragment("<row><stack></stack><sp></sp></row>");
        assert_eq!(tags(&elements), vec!["row"]);
        assert_eq!(tags(&elements[0].children), vec!["stack", "sp"]);
    }

    #[test]
    fn tag_names_are_lowercased() {
        let elements = parse_fragment("<DIV><P>x</P></DIV>");
        assert_eq!(tags(&elements), vec!["div"]);
        assert_eq!(tags(&elements[0].children), vec!["p"]);
    }

    #[test]
    fn unclosed_tags_are_tolerated() {
        let elements = parse_fragment("<ul><li>A<li>B");
        assert_eq!(tags(&elements), vec!["ul"]);
        assert_eq!(tags(&elements[0].children), vec!["li", "li"]);
    }

    #[test]
    fn div_inside_paragraph_closes_it() {
        let elements = parse_fragment("<p><div></div></p>");
        assert_eq!(tags(&elements), vec!["p", "div", "p"]);
    }

    #[test]
    fn stray_col_is_dropped() {
        let elements = parse_fragment("<col><p>x</p>");
        assert_eq!(tags(&elements), vec!["p"]);
    }

    #[test]
    fn text_only_input_has_no_elements() {
        assert!(parse_fragment("just words").is_empty());
        assert!(parse_fragment("").is_empty());
    }

    #[test]
    fn builder_accumulates_text_from_children() {
        let element = GenericElement::new("UL")
            .with_text("x")
            .with_child(GenericElement::new("li").with_text("A"));
        assert_eq!(element.tag, "ul");
        assert_eq!(element.text_content, "xA");
        assert_eq!(GenericElement::new("div").with_id("").id, None);
    }
}
