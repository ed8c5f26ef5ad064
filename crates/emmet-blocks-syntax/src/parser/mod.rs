//! # Parser - Event-Based Tree Construction
//!
//! This module implements the core parsing logic, transforming a token stream
//! into a syntax tree using the **event-based** architecture from rust-analyzer.
//!
//! The parser emits a flat list of [`Event`]s; the [`Sink`] then builds the
//! Rowan tree from them. Grammar rules live in the private `grammar` module.
//!
//! ## Errors
//!
//! Parsing never fails. Malformed input still produces a tree that contains
//! every input byte (unexpected tokens are wrapped in `ERROR` nodes), and each
//! problem is recorded as a [`SyntaxError`] with the byte offset where it was
//! noticed. Callers decide what an error means; [`crate::expand`] refuses to
//! render an abbreviation that has any.
//!
//! ## The Marker System
//!
//! When you call `parser.start()`, you get a [`Marker`]. This marker **must**
//! be completed with `marker.complete(parser, KIND)`. Dropping it without
//! completing panics.
//!
//! ```ignore
//! let m = parser.start();
//! parser.bump();
//! m.complete(parser, SyntaxKind::TAG_NAME);
//! ```
//!
//! ## Public API
//!
//! ```
//! use emmet_blocks_syntax::parse;
//!
//! let parse = parse("ul>li*2");
//! assert!(parse.errors().is_empty());
//! assert_eq!(parse.syntax().text().to_string(), "ul>li*2");
//! ```

pub mod event;
pub mod sink;

mod grammar;

use crate::error::SyntaxError;
use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// The result of parsing an abbreviation: a lossless tree plus the problems
/// found along the way.
#[derive(Debug, Clone)]
pub struct Parse {
    tree: SyntaxNode,
    errors: Vec<SyntaxError>,
}

impl Parse {
    /// The root `ROOT` node.
    pub fn syntax(&self) -> SyntaxNode {
        self.tree.clone()
    }

    /// Errors in source order.
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }
}

/// The parser state machine.
///
/// Holds the token stream, current position, and accumulated events.
/// Grammar functions receive `&mut Parser` and use its methods to:
///
/// - Inspect tokens: `current()`, `nth()`, `at()`, `at_end()`
/// - Consume tokens: `bump()`, `eat()`
/// - Build structure: `start()` → `Marker` → `complete()` → `precede()`
/// - Report problems: `error()`, `err_and_bump()`
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
    errors: Vec<SyntaxError>,
}

impl<'t, 'input> Parser<'t, 'input> {
    /// Create a new parser from a slice of tokens.
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Parse the tokens and return the tree with its errors.
    pub fn parse(mut self) -> Parse {
        grammar::root(&mut self);
        let errors = std::mem::take(&mut self.errors);
        let sink = Sink::new(self.tokens, self.events);
        Parse {
            tree: sink.finish(),
            errors,
        }
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Check if at end of input.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Get the text of the current token.
    pub fn current_text(&self) -> &'input str {
        self.tokens.get(self.pos).map(|t| t.text).unwrap_or("")
    }

    /// Byte offset of the current token in the source.
    pub fn offset(&self) -> usize {
        self.tokens[..self.pos.min(self.tokens.len())]
            .iter()
            .map(|t| t.text.len())
            .sum()
    }

    /// Record an error at the current position without consuming anything.
    pub fn error(&mut self, message: impl Into<String>) {
        let offset = self.offset();
        self.errors.push(SyntaxError::new(message, offset));
    }

    /// Record an error and wrap the current token in an `ERROR` node.
    pub fn err_and_bump(&mut self, message: impl Into<String>) {
        self.error(message);
        let m = self.start();
        self.bump();
        m.complete(self, SyntaxKind::ERROR);
    }
}

/// A marker for a node being constructed.
///
/// When you call `parser.start()`, a `Placeholder` event is pushed and you get
/// a `Marker` pointing to it. The `#[must_use]` attribute and the `Drop` impl
/// together enforce that every marker is completed.
#[must_use = "Markers must be completed, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    /// Tracks whether complete() was called
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) -> CompletedMarker {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::Start {
            kind,
            forward_parent: None,
        };
        p.events.push(Event::Finish);
        CompletedMarker { pos: self.pos }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be completed");
        }
    }
}

/// A marker for a node that has been completed.
///
/// Calling `precede()` wraps the completed node in a new parent. The grammar
/// uses it to wrap an element or group in `REPEAT` once a `*N` shows up.
#[derive(Debug, Clone, Copy)]
pub struct CompletedMarker {
    /// Position of the Start event for this completed node
    pos: usize,
}

impl CompletedMarker {
    /// Create a new parent node that will contain this node.
    pub fn precede(self, p: &mut Parser<'_, '_>) -> Marker {
        let new_pos = p.events.len();
        p.events.push(Event::Placeholder);

        if let Event::Start { forward_parent, .. } = &mut p.events[self.pos] {
            *forward_parent = Some(new_pos);
        }

        Marker {
            pos: new_pos,
            completed: false,
        }
    }
}

/// Parse abbreviation source into a syntax tree.
pub fn parse(source: &str) -> Parse {
    let tokens = lex(source);
    let parser = Parser::new(&tokens);
    parser.parse()
}
