//! Lowering the flat CST into a nested abbreviation tree.
//!
//! The grammar keeps operators flat: `ul>li*2^p` parses as
//! `ROOT[ELEMENT(ul) GT REPEAT(li, 2) CARET ELEMENT(p)]`. Here the operators
//! are applied with a stack of open levels: `>` opens a level under the last
//! term, `^` closes one, `+` keeps the current level. Lowering assumes an
//! error-free parse; erroneous subtrees are skipped, not reported.

use rowan::NodeOrToken;

use crate::error::SyntaxError;
use crate::syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Largest count a single `*N` may ask for.
pub const MAX_REPEAT: u32 = 1000;

/// Most nodes one expansion may produce once nested repeats are multiplied out.
pub const MAX_NODES: u64 = 10_000;

/// One node of the expanded abbreviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbbrNode {
    pub kind: AbbrKind,
    /// Repeat count from `*N`.
    pub repeat: Option<u32>,
    /// Byte offset of the repeat count, or of the term itself when unrepeated.
    pub offset: usize,
    pub children: Vec<AbbrNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbbrKind {
    Element(ElementSpec),
    /// Bare `{text}` with nothing else attached.
    Text(String),
    /// `( ... )`; the group's contents are its children.
    Group,
}

/// Everything written for a single element. Values are still templates:
/// `$` numbering is applied while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSpec {
    /// `None` when the tag is implied by the parent.
    pub name: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// In source order; `None` for valueless attributes such as `[disabled]`.
    pub attributes: Vec<(String, Option<String>)>,
    pub text: Option<String>,
}

impl AbbrNode {
    fn new(kind: AbbrKind, offset: usize) -> Self {
        Self {
            kind,
            repeat: None,
            offset,
            children: Vec::new(),
        }
    }
}

/// Reject trees whose repeats multiply out to more than [`MAX_NODES`] nodes.
///
/// The error points at the count that crossed the limit.
pub fn check_size(nodes: &[AbbrNode]) -> Result<(), SyntaxError> {
    let mut total = 0;
    count_nodes(nodes, 1, &mut total)
}

fn count_nodes(nodes: &[AbbrNode], factor: u64, total: &mut u64) -> Result<(), SyntaxError> {
    for node in nodes {
        let copies = factor.saturating_mul(u64::from(node.repeat.unwrap_or(1)));
        *total = total.saturating_add(copies);
        if *total > MAX_NODES {
            return Err(SyntaxError::new(
                format!("expansion would produce more than {MAX_NODES} elements"),
                node.offset,
            ));
        }
        count_nodes(&node.children, copies, total)?;
    }
    Ok(())
}

/// Lower a parsed `ROOT` into its top-level nodes.
pub fn lower(root: &SyntaxNode) -> Vec<AbbrNode> {
    lower_sequence(root.children_with_tokens())
}

fn lower_sequence(items: impl Iterator<Item = SyntaxElement>) -> Vec<AbbrNode> {
    // Each level is the node that `>` descended into plus the siblings
    // collected under it so far. Level 0 has no parent.
    let mut levels: Vec<(Option<AbbrNode>, Vec<AbbrNode>)> = vec![(None, Vec::new())];

    for item in items {
        match item {
            NodeOrToken::Node(node) => {
                if let Some(term) = lower_term(&node)
                    && let Some((_, siblings)) = levels.last_mut()
                {
                    siblings.push(term);
                }
            }
            NodeOrToken::Token(token) => match token.kind() {
                SyntaxKind::GT => {
                    let last = levels.last_mut().and_then(|(_, siblings)| siblings.pop());
                    if let Some(parent) = last {
                        levels.push((Some(parent), Vec::new()));
                    }
                }
                SyntaxKind::CARET => close_level(&mut levels),
                _ => {}
            },
        }
    }

    while levels.len() > 1 {
        close_level(&mut levels);
    }

    levels.pop().map(|(_, nodes)| nodes).unwrap_or_default()
}

/// Attach the innermost level's nodes to its parent. No-op at the root.
fn close_level(levels: &mut Vec<(Option<AbbrNode>, Vec<AbbrNode>)>) {
    if levels.len() < 2 {
        return;
    }
    if let Some((Some(mut parent), children)) = levels.pop() {
        parent.children.extend(children);
        if let Some((_, siblings)) = levels.last_mut() {
            siblings.push(parent);
        }
    }
}

fn lower_term(node: &SyntaxNode) -> Option<AbbrNode> {
    match node.kind() {
        SyntaxKind::ELEMENT => Some(lower_element(node)),
        SyntaxKind::GROUP => {
            let mut group = AbbrNode::new(AbbrKind::Group, start(node));
            group.children = lower_sequence(node.children_with_tokens());
            Some(group)
        }
        SyntaxKind::REPEAT => {
            let mut inner = node.children().find_map(|child| lower_term(&child))?;
            let count = node
                .children()
                .find(|child| child.kind() == SyntaxKind::MULTIPLIER)
                .and_then(|m| word_token(&m));
            if let Some(count) = count {
                inner.repeat = count.text().parse().ok();
                inner.offset = count.text_range().start().into();
            }
            Some(inner)
        }
        _ => None,
    }
}

fn lower_element(node: &SyntaxNode) -> AbbrNode {
    let mut spec = ElementSpec::default();

    for child in node.children() {
        match child.kind() {
            SyntaxKind::TAG_NAME => spec.name = word(&child),
            SyntaxKind::ID => spec.id = word(&child),
            SyntaxKind::CLASS => spec.classes.extend(word(&child)),
            SyntaxKind::ATTR_LIST => spec.attributes.extend(
                child
                    .children()
                    .filter(|attr| attr.kind() == SyntaxKind::ATTR)
                    .filter_map(|attr| lower_attr(&attr)),
            ),
            SyntaxKind::TEXT => {
                if let Some(text) = brace_text(&child) {
                    spec.text.get_or_insert_with(String::new).push_str(&text);
                }
            }
            _ => {}
        }
    }

    let text_only =
        spec.name.is_none() && spec.id.is_none() && spec.classes.is_empty() && spec.attributes.is_empty();
    match spec.text.take() {
        Some(text) if text_only => AbbrNode::new(AbbrKind::Text(text), start(node)),
        text => {
            spec.text = text;
            AbbrNode::new(AbbrKind::Element(spec), start(node))
        }
    }
}

fn lower_attr(node: &SyntaxNode) -> Option<(String, Option<String>)> {
    let tokens: Vec<_> = node
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .collect();

    let (name, rest) = tokens.split_first()?;
    let value = match rest.split_first() {
        Some((eq, value_tokens)) if eq.kind() == SyntaxKind::EQ => match value_tokens {
            [quoted] if quoted.kind() == SyntaxKind::QUOTED => Some(strip_quotes(quoted.text()).to_string()),
            _ => Some(value_tokens.iter().map(|t| t.text()).collect()),
        },
        _ => None,
    };

    Some((name.text().to_string(), value))
}

/// First `WORD` token directly under `node`.
fn word_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| token.kind() == SyntaxKind::WORD)
}

fn word(node: &SyntaxNode) -> Option<String> {
    word_token(node).map(|token| token.text().to_string())
}

fn start(node: &SyntaxNode) -> usize {
    node.text_range().start().into()
}

fn brace_text(node: &SyntaxNode) -> Option<String> {
    let token = node
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| token.kind() == SyntaxKind::TEXT_BLOCK)?;
    let text = token.text();
    Some(text[1..text.len() - 1].to_string())
}

fn strip_quotes(text: &str) -> &str {
    if text.len() >= 2 { &text[1..text.len() - 1] } else { text }
}
