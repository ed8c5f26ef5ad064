//! # Lexer - Tokenizing Abbreviations
//!
//! This module provides the first stage of parsing: breaking abbreviation text
//! into tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte in the input appears in exactly one token. Characters the lexer
//! does not understand become `UNKNOWN` tokens rather than being dropped, so
//! the parser can point at them when it reports an error:
//!
//! ```
//! use emmet_blocks_syntax::lexer::lex;
//!
//! let input = "ul>li.item$*3";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Token Design
//!
//! Operators and sigils get their own kinds (`>`, `+`, `^`, `*`, `.`, `#`,
//! brackets). Names, numbers and numbering templates (`item$@-`) are all
//! `WORD`s; the parser decides what a word means from its position.
//!
//! Two constructs are lexed whole because their contents are opaque:
//! `{brace text}` and quoted attribute values. An unclosed one comes out as
//! `LBRACE`, `QUOTE` or an `UNKNOWN` run starting with the opening character,
//! and the parser reports it.

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// This enum exists separately from [`SyntaxKind`] because Logos needs to
/// derive on it. Each variant maps to a corresponding `SyntaxKind` token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// Names, numbers and numbering templates
    #[regex(r"[A-Za-z0-9_$@:!\-]+")]
    Word,

    #[token(".")]
    Dot,

    #[token("#")]
    Hash,

    #[token("*")]
    Star,

    #[token(">")]
    Gt,

    #[token("+")]
    Plus,

    #[token("^")]
    Caret,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("=")]
    Eq,

    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    Quoted,

    /// Opening quote without a partner
    #[token("\"")]
    #[token("'")]
    Quote,

    #[regex(r"\{[^}]*\}")]
    TextBlock,

    /// Opening brace without a partner
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Word => SyntaxKind::WORD,
            TokenKind::Dot => SyntaxKind::DOT,
            TokenKind::Hash => SyntaxKind::HASH,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::Caret => SyntaxKind::CARET,
            TokenKind::LParen => SyntaxKind::LPAREN,
            TokenKind::RParen => SyntaxKind::RPAREN,
            TokenKind::LBracket => SyntaxKind::LBRACKET,
            TokenKind::RBracket => SyntaxKind::RBRACKET,
            TokenKind::Eq => SyntaxKind::EQ,
            TokenKind::Quoted => SyntaxKind::QUOTED,
            TokenKind::Quote => SyntaxKind::QUOTE,
            TokenKind::TextBlock => SyntaxKind::TEXT_BLOCK,
            TokenKind::LBrace => SyntaxKind::LBRACE,
            TokenKind::RBrace => SyntaxKind::RBRACE,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            Err(()) => SyntaxKind::UNKNOWN,
        };
        tokens.push(Token { kind, text });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(kind: SyntaxKind, text: &str) -> Token<'_> {
        Token { kind, text }
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn lex_single_word() {
        assert_eq!(lex("section"), vec![token(SyntaxKind::WORD, "section")]);
    }

    #[test]
    fn lex_operators() {
        let tokens = lex("a>b+c^d");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::WORD, "a"),
                token(SyntaxKind::GT, ">"),
                token(SyntaxKind::WORD, "b"),
                token(SyntaxKind::PLUS, "+"),
                token(SyntaxKind::WORD, "c"),
                token(SyntaxKind::CARET, "^"),
                token(SyntaxKind::WORD, "d"),
            ]
        );
    }

    #[test]
    fn lex_id_class_and_multiplier() {
        let tokens = lex("li#main.item-$*3");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::WORD, "li"),
                token(SyntaxKind::HASH, "#"),
                token(SyntaxKind::WORD, "main"),
                token(SyntaxKind::DOT, "."),
                token(SyntaxKind::WORD, "item-$"),
                token(SyntaxKind::STAR, "*"),
                token(SyntaxKind::WORD, "3"),
            ]
        );
    }

    #[test]
    fn lex_brace_text_is_one_token() {
        let tokens = lex("p{Hello > world}");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::WORD, "p"),
                token(SyntaxKind::TEXT_BLOCK, "{Hello > world}"),
            ]
        );
    }

    #[test]
    fn lex_attribute_list() {
        let tokens = lex(r#"[title="a b" data-x=1]"#);
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::LBRACKET, "["),
                token(SyntaxKind::WORD, "title"),
                token(SyntaxKind::EQ, "="),
                token(SyntaxKind::QUOTED, "\"a b\""),
                token(SyntaxKind::WHITESPACE, " "),
                token(SyntaxKind::WORD, "data-x"),
                token(SyntaxKind::EQ, "="),
                token(SyntaxKind::WORD, "1"),
                token(SyntaxKind::RBRACKET, "]"),
            ]
        );
    }

    #[test]
    fn lex_single_quoted_value() {
        let tokens = lex("'x y'");
        assert_eq!(tokens, vec![token(SyntaxKind::QUOTED, "'x y'")]);
    }

    #[test]
    fn lex_groups() {
        let tokens = lex("(a)*2");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::LPAREN, "("),
                token(SyntaxKind::WORD, "a"),
                token(SyntaxKind::RPAREN, ")"),
                token(SyntaxKind::STAR, "*"),
                token(SyntaxKind::WORD, "2"),
            ]
        );
    }

    #[test]
    fn unrecognized_characters_are_kept() {
        let tokens = lex("a%b");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::WORD, "a"),
                token(SyntaxKind::UNKNOWN, "%"),
                token(SyntaxKind::WORD, "b"),
            ]
        );
    }

    #[test]
    fn all_bytes_preserved_complex() {
        let input = r##"div#page>(header.top>h1{Title})+ul>li.item$@-*3>a[href="#x$"]^^footer{bye"##;
        let tokens = lex(input);
        let reconstructed: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(input, reconstructed);
    }
}
