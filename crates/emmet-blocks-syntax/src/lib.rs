//! # emmet-blocks-syntax
//!
//! Emmet abbreviations as a lossless syntax tree, plus expansion to HTML.
//!
//! The crate follows the [rust-analyzer] model built on [Rowan] + [Logos]:
//!
//! ```text
//! Abbreviation → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!                (Logos)          (Grammar)        (GreenNodeBuilder)
//!
//! Rowan Tree → lower → AbbrNode tree → render → HTML
//! ```
//!
//! The tree keeps every byte of the input, so error offsets always point at
//! the right place in what the user typed.
//!
//! ## Module Structure
//!
//! ```text
//! emmet-blocks-syntax/
//! ├── lib.rs           # Public API: parse() and expand()
//! ├── syntax_kind.rs   # SyntaxKind enum and Rowan integration
//! ├── lexer.rs         # Logos tokenizer
//! ├── parser/          # Event-based parser, markers and grammar rules
//! ├── abbreviation.rs  # CST → nested abbreviation tree
//! ├── numbering.rs     # `$` numbering inside multipliers
//! ├── render.rs        # Abbreviation tree → compact HTML
//! └── error.rs         # SyntaxError, ExpandError
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use emmet_blocks_syntax::expand;
//!
//! let html = expand("ul>li.item$*2").unwrap();
//! assert_eq!(html, r#"<ul><li class="item1"></li><li class="item2"></li></ul>"#);
//!
//! let err = expand("ul>(li").unwrap_err();
//! assert_eq!(err.offset(), 6);
//! ```
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html

pub mod abbreviation;
pub mod error;
pub mod lexer;
pub mod numbering;
pub mod parser;
pub mod render;
pub mod syntax_kind;

pub use error::{ExpandError, SyntaxError};
pub use parser::{Parse, parse};
pub use syntax_kind::{AbbreviationLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Expand an Emmet abbreviation into a compact HTML string.
///
/// Fails with the first syntax error when the abbreviation is malformed, or
/// when its repeats would multiply out past [`abbreviation::MAX_NODES`].
pub fn expand(abbreviation: &str) -> Result<String, ExpandError> {
    let parse = parse(abbreviation);
    if let Some(err) = parse.errors().first() {
        return Err(err.clone().into());
    }

    let nodes = abbreviation::lower(&parse.syntax());
    abbreviation::check_size(&nodes)?;
    Ok(render::render(&nodes))
}
