//! Element-level grammar rules: names, ids, classes, attributes, text,
//! groups and multipliers.

use crate::abbreviation::MAX_REPEAT;
use crate::parser::{CompletedMarker, Parser};
use crate::syntax_kind::SyntaxKind;

use super::sequence;

/// Parse an element. The tag name is optional (`.card` means an implicit tag).
pub(super) fn element(p: &mut Parser<'_, '_>) -> CompletedMarker {
    let m = p.start();

    if p.at(SyntaxKind::WORD) {
        let name = p.start();
        p.bump();
        name.complete(p, SyntaxKind::TAG_NAME);
    }

    loop {
        match p.current() {
            SyntaxKind::HASH => prefixed(p, SyntaxKind::ID, "`#`"),
            SyntaxKind::DOT => prefixed(p, SyntaxKind::CLASS, "`.`"),
            SyntaxKind::LBRACKET => attr_list(p),
            SyntaxKind::TEXT_BLOCK => {
                let text = p.start();
                p.bump();
                text.complete(p, SyntaxKind::TEXT);
            }
            _ => break,
        }
    }

    m.complete(p, SyntaxKind::ELEMENT)
}

/// `#word` or `.word`.
fn prefixed(p: &mut Parser<'_, '_>, kind: SyntaxKind, sigil: &str) {
    let m = p.start();
    p.bump();
    if !p.eat(SyntaxKind::WORD) {
        p.error(format!("expected a name after {sigil}"));
    }
    m.complete(p, kind);
}

/// `[name name=value name="quoted value"]`
fn attr_list(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump(); // [

    loop {
        p.eat(SyntaxKind::WHITESPACE);
        match p.current() {
            SyntaxKind::RBRACKET => {
                p.bump();
                break;
            }
            SyntaxKind::WORD => attr(p),
            SyntaxKind::EOF => {
                p.error("unclosed `[`");
                break;
            }
            SyntaxKind::QUOTE => p.err_and_bump("unclosed quote"),
            _ => p.err_and_bump("unexpected character in attribute list"),
        }
    }

    m.complete(p, SyntaxKind::ATTR_LIST);
}

fn attr(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump(); // name

    if p.eat(SyntaxKind::EQ) {
        if p.at(SyntaxKind::QUOTED) {
            p.bump();
        } else if p.at(SyntaxKind::QUOTE) || p.current_text().starts_with(['"', '\'']) {
            p.err_and_bump("unclosed quote");
        } else {
            // Unquoted values run to the next space or `]`.
            let mut consumed = false;
            while !matches!(
                p.current(),
                SyntaxKind::WHITESPACE | SyntaxKind::RBRACKET | SyntaxKind::EOF | SyntaxKind::QUOTE
            ) {
                p.bump();
                consumed = true;
            }
            if !consumed {
                p.error("expected a value after `=`");
            }
        }
    }

    m.complete(p, SyntaxKind::ATTR);
}

/// `( sequence )`
pub(super) fn group(p: &mut Parser<'_, '_>) -> CompletedMarker {
    let m = p.start();
    p.bump(); // (

    if !sequence(p) {
        p.error("empty group");
    }
    if !p.eat(SyntaxKind::RPAREN) {
        p.error("unclosed `(`");
    }

    m.complete(p, SyntaxKind::GROUP)
}

/// `*N` with N in `1..=MAX_REPEAT`.
pub(super) fn multiplier(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump(); // *

    if p.at(SyntaxKind::WORD) {
        match p.current_text().parse::<u64>() {
            Ok(0) => p.error("repeat count must be at least 1"),
            Ok(count) if count > u64::from(MAX_REPEAT) => {
                p.error(format!("repeat count must be at most {MAX_REPEAT}"))
            }
            Ok(_) => {}
            Err(_) => p.error("repeat count must be a number"),
        }
        p.bump();
    } else {
        p.error("expected a repeat count after `*`");
    }

    m.complete(p, SyntaxKind::MULTIPLIER);
}
