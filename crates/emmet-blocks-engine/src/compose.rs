//! Abbreviation → block tree, and handing the result to a sink.
//!
//! [`Composer::compose`] runs expand → parse → map and returns the whole tree
//! or an error. [`Composer::submit`] is the user-facing boundary: it never
//! fails, logs expansion errors, and only touches the sink once a complete,
//! non-empty tree exists.

use std::error::Error;

use log::{debug, error};
use thiserror::Error;

use crate::blocks::Block;
use crate::fragment::parse_fragment;
use crate::mapper::BlockMapper;

/// Error type expanders report.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Turns an abbreviation into an HTML fragment.
pub trait Expander {
    fn expand(&self, abbreviation: &str) -> Result<String, BoxError>;
}

impl<F> Expander for F
where
    F: Fn(&str) -> Result<String, BoxError>,
{
    fn expand(&self, abbreviation: &str) -> Result<String, BoxError> {
        self(abbreviation)
    }
}

/// The built-in Emmet expander.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmmetExpander;

impl Expander for EmmetExpander {
    fn expand(&self, abbreviation: &str) -> Result<String, BoxError> {
        Ok(emmet_blocks_syntax::expand(abbreviation)?)
    }
}

/// Receives finished block trees.
pub trait BlockSink {
    fn insert_blocks(&mut self, blocks: Vec<Block>);
}

impl BlockSink for Vec<Block> {
    fn insert_blocks(&mut self, blocks: Vec<Block>) {
        self.extend(blocks);
    }
}

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("abbreviation is empty")]
    Empty,
    #[error("failed to expand abbreviation: {0}")]
    Expand(#[source] BoxError),
}

/// What happened to a submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blank input; nothing was expanded.
    Empty,
    /// The expander rejected the input. Already logged.
    Failed(ComposeError),
    /// The expansion contained no elements.
    NothingGenerated,
    /// `count` top-level blocks went to the sink.
    Inserted { count: usize },
}

impl SubmitOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, SubmitOutcome::Inserted { .. })
    }
}

pub struct Composer<E> {
    expander: E,
    mapper: BlockMapper,
}

impl Composer<EmmetExpander> {
    /// A composer using the built-in expander.
    pub fn emmet(mapper: BlockMapper) -> Self {
        Self::new(EmmetExpander, mapper)
    }
}

impl<E: Expander> Composer<E> {
    pub fn new(expander: E, mapper: BlockMapper) -> Self {
        Self { expander, mapper }
    }

    /// Expand an abbreviation to HTML without mapping it.
    pub fn expand_html(&self, text: &str) -> Result<String, ComposeError> {
        let abbreviation = text.trim();
        if abbreviation.is_empty() {
            return Err(ComposeError::Empty);
        }
        self.expander.expand(abbreviation).map_err(ComposeError::Expand)
    }

    /// Build the complete block tree for an abbreviation.
    pub fn compose(&self, text: &str) -> Result<Vec<Block>, ComposeError> {
        let html = self.expand_html(text)?;
        let blocks = self.mapper.map_all(&parse_fragment(&html));
        debug!(
            "{:?} expanded to {} bytes of HTML, {} top-level blocks",
            text.trim(),
            html.len(),
            blocks.len()
        );
        Ok(blocks)
    }

    /// Compose and insert. Failures are logged and reported in the outcome,
    /// never propagated; the sink sees either the whole tree or nothing.
    pub fn submit<S>(&self, text: &str, sink: &mut S) -> SubmitOutcome
    where
        S: BlockSink + ?Sized,
    {
        match self.compose(text) {
            Err(ComposeError::Empty) => SubmitOutcome::Empty,
            Err(err) => {
                error!("Error parsing Emmet abbreviation: {err}");
                SubmitOutcome::Failed(err)
            }
            Ok(blocks) if blocks.is_empty() => SubmitOutcome::NothingGenerated,
            Ok(blocks) => {
                let count = blocks.len();
                sink.insert_blocks(blocks);
                SubmitOutcome::Inserted { count }
            }
        }
    }
}
