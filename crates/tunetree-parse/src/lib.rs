//! Tree-text parser for tunetree.
//!
//! This crate turns the output of a `tree`-style listing into a
//! [`MusicNode`] hierarchy.
//!
//! # Overview
//!
//! Parsing happens in four passes over the non-blank lines:
//!
//! - **Depth extraction** from the columns before the rightmost branch glyph
//! - **Lookahead**: a line has children if the next line is deeper
//! - **Classification**: files need a recognized extension and no children
//! - **Assembly** with a depth-indexed stack of open folders
//!
//! Malformed lines never abort a parse; they are reported as warnings.
//!
//! # Example
//!
//! ```rust
//! use tunetree_parse::TreeTextParser;
//!
//! let text = ".\n├── Songs\n│   └── track.mp3\n└── notes.txt";
//! let tree = TreeTextParser::new().parse_tree(text);
//!
//! assert_eq!(tree.total_files(), 2);
//! assert_eq!(tree.root.children()[0].children()[0].path, "Songs/track.mp3");
//! ```

mod line;
mod parser;

pub use line::{DecodedLine, LineKind, decode_line};
pub use parser::{TreeTextParser, parse};

// Re-export core types for convenience
pub use tunetree_core::{
    MusicNode, MusicTree, NodeKind, ParseConfig, ParseWarning, TreeStats, WarningKind,
};
