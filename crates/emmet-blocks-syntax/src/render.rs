//! Rendering an abbreviation tree as compact HTML.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::abbreviation::{AbbrKind, AbbrNode, ElementSpec};
use crate::numbering::{self, Counter};

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Parents whose implicit child is a `span` rather than a `div`.
const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdo", "cite", "code", "dfn", "em", "i", "kbd", "label", "p", "q", "s",
    "samp", "small", "span", "strong", "sub", "sup", "u", "var",
];

/// Attributes every expansion of these tags carries unless given explicitly.
const DEFAULT_ATTRIBUTES: &[(&str, &[&str])] = &[("a", &["href"]), ("img", &["src", "alt"])];

/// Tag used when an element names no tag of its own.
pub fn implicit_tag(parent: Option<&str>) -> &'static str {
    match parent {
        Some("ul" | "ol") => "li",
        Some("table" | "tbody" | "thead" | "tfoot") => "tr",
        Some("tr") => "td",
        Some("select" | "optgroup") => "option",
        Some(tag) if INLINE_ELEMENTS.contains(&tag) => "span",
        _ => "div",
    }
}

/// Render top-level nodes.
pub fn render(nodes: &[AbbrNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        render_node(node, None, None, &mut out);
    }
    out
}

fn render_node(node: &AbbrNode, parent: Option<&str>, counter: Option<Counter>, out: &mut String) {
    let total = node.repeat.unwrap_or(1);

    for index in 0..total {
        let counter = match node.repeat {
            Some(total) => Some(Counter { index, total }),
            None => counter,
        };

        match &node.kind {
            AbbrKind::Group => {
                for child in &node.children {
                    render_node(child, parent, counter, out);
                }
            }
            AbbrKind::Text(text) => {
                out.push_str(&encode_text(&numbering::apply(text, counter)));
                for child in &node.children {
                    render_node(child, parent, counter, out);
                }
            }
            AbbrKind::Element(spec) => render_element(spec, &node.children, parent, counter, out),
        }
    }
}

fn render_element(
    spec: &ElementSpec,
    children: &[AbbrNode],
    parent: Option<&str>,
    counter: Option<Counter>,
    out: &mut String,
) {
    let tag = match &spec.name {
        Some(name) => numbering::apply(name, counter).into_owned(),
        None => implicit_tag(parent).to_string(),
    };

    out.push('<');
    out.push_str(&tag);

    if let Some(id) = &spec.id {
        push_attribute(out, "id", &numbering::apply(id, counter));
    }
    if !spec.classes.is_empty() {
        let classes: Vec<_> = spec
            .classes
            .iter()
            .map(|class| numbering::apply(class, counter))
            .collect();
        push_attribute(out, "class", &classes.join(" "));
    }
    for (name, value) in &spec.attributes {
        let value = value.as_deref().unwrap_or("");
        push_attribute(out, name, &numbering::apply(value, counter));
    }
    for name in default_attributes(&tag) {
        if !spec.attributes.iter().any(|(given, _)| given.as_str() == *name) {
            push_attribute(out, name, "");
        }
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&tag.as_str()) {
        return;
    }

    if let Some(text) = &spec.text {
        out.push_str(&encode_text(&numbering::apply(text, counter)));
    }
    for child in children {
        render_node(child, Some(&tag), counter, out);
    }

    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
}

fn default_attributes(tag: &str) -> &'static [&'static str] {
    DEFAULT_ATTRIBUTES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, attributes)| *attributes)
        .unwrap_or(&[])
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&encode_double_quoted_attribute(value));
    out.push('"');
}
