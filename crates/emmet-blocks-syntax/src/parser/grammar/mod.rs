//! # Grammar Rules
//!
//! Each function takes a `&mut Parser` and uses its methods to inspect and
//! consume tokens and to build tree structure.
//!
//! ## Shape of the tree
//!
//! Operators do not nest in the CST. `a>b+c` is a flat `ROOT` holding
//! `ELEMENT GT ELEMENT PLUS ELEMENT`; turning the operators into parent/child
//! relationships is the job of [`crate::abbreviation`], which walks the
//! sequence with a stack the way Emmet itself does.
//!
//! ```text
//! root     := WHITESPACE? sequence WHITESPACE? EOF
//! sequence := term (operator term)*
//! operator := '>' | '+' | '^'+
//! term     := (element | group) multiplier?
//! group    := '(' sequence ')'
//! element  := WORD? (id | class | attr_list | TEXT_BLOCK)*
//! ```
//!
//! ## Error Recovery
//!
//! Grammar functions never bail out. Unexpected tokens are recorded with
//! `p.error()` and wrapped in `ERROR` nodes, so the tree always covers the
//! whole input.

mod element;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root abbreviation.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();

    p.eat(SyntaxKind::WHITESPACE);
    if p.at_end() {
        p.error("abbreviation is empty");
    } else {
        sequence(p);
        while !p.at_end() {
            // Only a stray `)` stops a top-level sequence early.
            p.err_and_bump("unmatched `)`");
            sequence(p);
        }
    }

    m.complete(p, SyntaxKind::ROOT);
}

/// Parse terms joined by operators, up to EOF or a closing `)`.
///
/// Returns false when the sequence contained no term at all.
pub(super) fn sequence(p: &mut Parser<'_, '_>) -> bool {
    let mut last = term(p);
    let mut any = last.is_some();
    if last.is_none() && !at_sequence_end(p) && !p.current().is_operator() {
        p.error("expected an element, group or text");
    }

    loop {
        match p.current() {
            SyntaxKind::EOF | SyntaxKind::RPAREN => break,
            SyntaxKind::GT => {
                match last {
                    None => p.error("`>` has nothing to nest into"),
                    Some(Term::Group) => p.error("cannot nest elements inside a group with `>`"),
                    Some(Term::Element) => {}
                }
                p.bump();
                last = expect_term(p);
            }
            SyntaxKind::PLUS => {
                if last.is_none() {
                    p.error("`+` needs an element before it");
                }
                p.bump();
                last = expect_term(p);
            }
            SyntaxKind::CARET => {
                while p.eat(SyntaxKind::CARET) {}
                last = expect_term(p);
            }
            SyntaxKind::WHITESPACE if p.nth(1) == SyntaxKind::EOF => {
                // Trailing whitespace is harmless.
                p.bump();
            }
            SyntaxKind::WHITESPACE => {
                p.err_and_bump("whitespace is only allowed inside attribute brackets");
            }
            SyntaxKind::LBRACE => {
                p.err_and_bump("unclosed `{`");
            }
            SyntaxKind::STAR => {
                p.err_and_bump("`*` must follow an element or group");
            }
            _ => {
                p.err_and_bump("unexpected character");
            }
        }
        any |= last.is_some();
    }

    any
}

/// What a term turned out to be; `>` may only follow an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Term {
    Element,
    Group,
}

/// Parse one element or group, with an optional multiplier.
fn term(p: &mut Parser<'_, '_>) -> Option<Term> {
    let (completed, term) = match p.current() {
        SyntaxKind::LPAREN => (element::group(p), Term::Group),
        SyntaxKind::WORD
        | SyntaxKind::DOT
        | SyntaxKind::HASH
        | SyntaxKind::LBRACKET
        | SyntaxKind::TEXT_BLOCK => (element::element(p), Term::Element),
        _ => return None,
    };

    if p.at(SyntaxKind::STAR) {
        let repeat = completed.precede(p);
        element::multiplier(p);
        repeat.complete(p, SyntaxKind::REPEAT);
    }

    Some(term)
}

fn expect_term(p: &mut Parser<'_, '_>) -> Option<Term> {
    let term = term(p);
    if term.is_none() {
        p.error("expected an element, group or text after operator");
    }
    term
}

fn at_sequence_end(p: &Parser<'_, '_>) -> bool {
    matches!(p.current(), SyntaxKind::EOF | SyntaxKind::RPAREN)
}
