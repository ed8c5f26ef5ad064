use thiserror::Error;

/// A problem found while parsing an abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct SyntaxError {
    /// Human-readable description.
    pub message: String,
    /// Byte offset into the abbreviation where the problem was noticed.
    pub offset: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    #[error("Invalid abbreviation: {0}")]
    Syntax(#[from] SyntaxError),
}

impl ExpandError {
    /// Where in the abbreviation the expansion gave up.
    pub fn offset(&self) -> usize {
        match self {
            ExpandError::Syntax(err) => err.offset,
        }
    }
}
