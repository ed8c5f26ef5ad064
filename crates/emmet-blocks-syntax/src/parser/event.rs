//! # Parser Events
//!
//! Events are the intermediate representation between parsing and tree building.
//! Instead of building the tree directly, the parser emits a **flat sequence**
//! of events that describe the tree structure.
//!
//! ```text
//! Start(ELEMENT)     ← Begin an ELEMENT node
//!   Start(TAG_NAME)
//!     Token(WORD)
//!   Finish
//!   Start(CLASS)
//!     Token(DOT)
//!     Token(WORD)
//!   Finish
//! Finish             ← End the ELEMENT node
//! ```
//!
//! The Sink processes these in order, maintaining a stack of open nodes.
//! Start pushes, Finish pops.
//!
//! ## Forward Parent Links
//!
//! A multiplier is only seen after its element or group has been parsed, so
//! the `REPEAT` node that wraps both is created afterwards with
//! `CompletedMarker::precede`. The `forward_parent` field in `Start` records
//! that link; the Sink opens the outer node first.

use crate::syntax_kind::SyntaxKind;

/// An event emitted by the parser during tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin a new composite node.
    ///
    /// If `forward_parent` is set, it points to another `Start` event that
    /// should become this node's parent.
    Start {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },

    /// Add the next lexer token to the current node.
    Token { kind: SyntaxKind },

    /// Finish the current node.
    Finish,

    /// A placeholder left by `parser.start()` and replaced on completion. The
    /// Sink also leaves one behind for each forward parent it has consumed.
    Placeholder,
}

impl Event {
    /// Create a start event with no forward parent.
    #[cfg(test)]
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start {
            kind,
            forward_parent: None,
        }
    }

    /// Create a token event.
    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token { kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_start_creation() {
        let event = Event::start(SyntaxKind::ELEMENT);
        assert_eq!(
            event,
            Event::Start {
                kind: SyntaxKind::ELEMENT,
                forward_parent: None
            }
        );
    }

    #[test]
    fn event_token_creation() {
        let event = Event::token(SyntaxKind::WORD);
        assert_eq!(
            event,
            Event::Token {
                kind: SyntaxKind::WORD
            }
        );
    }
}
