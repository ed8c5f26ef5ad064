//! # emmet-blocks-engine
//!
//! Turns HTML expanded from an Emmet abbreviation into a tree of editor
//! blocks (`core/group`, `core/paragraph`, ...).
//!
//! ```text
//! abbreviation → Expander → HTML → parse_fragment → GenericElement tree
//!              → BlockMapper (TagTable) → Block tree → BlockSink
//! ```
//!
//! ```
//! use emmet_blocks_engine::{BlockMapper, Composer, TagTable, outline};
//!
//! let composer = Composer::emmet(BlockMapper::new(TagTable::core()));
//! let blocks = composer.compose("header.top>p{Hi}").unwrap();
//! assert_eq!(
//!     outline(&blocks),
//!     "core/group className=\"top\" tagName=\"header\"\n  core/paragraph content=\"Hi\"\n"
//! );
//! ```

pub mod blocks;
pub mod compose;
pub mod fragment;
pub mod mapper;
pub mod outline;
pub mod table;

pub use blocks::{Block, BlockAttributes, BlockKind, Layout, LayoutType, Orientation, ParseBlockKindError};
pub use compose::{BlockSink, BoxError, ComposeError, Composer, EmmetExpander, Expander, SubmitOutcome};
pub use fragment::{GenericElement, parse_fragment};
pub use mapper::BlockMapper;
pub use outline::outline;
pub use table::TagTable;
