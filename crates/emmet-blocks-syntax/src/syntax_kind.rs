//! SyntaxKind enum for all tokens and nodes in the abbreviation CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

/// All syntax kinds for the abbreviation CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser output).
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Spaces, tabs and line breaks
    WHITESPACE,
    /// Tag names, identifiers, class names, repeat counts
    WORD,
    /// `.` introducing a class
    DOT,
    /// `#` introducing an id
    HASH,
    /// `*` introducing a repeat count
    STAR,
    /// `>` child operator
    GT,
    /// `+` sibling operator
    PLUS,
    /// `^` climb-up operator
    CARET,
    /// `(` opening a group
    LPAREN,
    /// `)` closing a group
    RPAREN,
    /// `[` opening an attribute list
    LBRACKET,
    /// `]` closing an attribute list
    RBRACKET,
    /// `=` between attribute name and value
    EQ,
    /// Single- or double-quoted attribute value, quotes included
    QUOTED,
    /// A lone quote that never got closed
    QUOTE,
    /// Brace-delimited text, braces included
    TEXT_BLOCK,
    /// A lone `{` that never got closed
    LBRACE,
    /// A stray `}`
    RBRACE,
    /// Anything the lexer does not recognize
    UNKNOWN,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root abbreviation node
    ROOT,
    /// A single element: name, id, classes, attributes, text
    ELEMENT,
    /// Explicit tag name of an element
    TAG_NAME,
    /// `#id`
    ID,
    /// `.class`
    CLASS,
    /// `[...]`
    ATTR_LIST,
    /// One `name` or `name=value` inside an attribute list
    ATTR,
    /// `{text}`
    TEXT,
    /// `( ... )`
    GROUP,
    /// An element or group followed by a multiplier
    REPEAT,
    /// `*N`
    MULTIPLIER,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind combines terms into a tree shape.
    pub fn is_operator(self) -> bool {
        matches!(self, Self::GT | Self::PLUS | Self::CARET)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AbbreviationLang {}

impl rowan::Language for AbbreviationLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<AbbreviationLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<AbbreviationLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<AbbreviationLang>;
