//! Core types for tunetree.
//!
//! This crate provides the fundamental data structures shared by the
//! parser, the analysis helpers and the loading service: collection
//! nodes, trees with statistics, extension tiers and configuration.

mod config;
mod error;
mod extension;
mod node;
mod tree;

pub use config::{DEFAULT_INDENT_WIDTH, DEFAULT_ROOT_LABEL, ParseConfig, ParseConfigBuilder};
pub use error::{ParseWarning, SourceError, WarningKind};
pub use extension::{AUDIO_EXTENSIONS, ExtensionTier, KNOWN_EXTENSIONS, recognized_extension};
pub use node::{MusicNode, NodeIter, NodeKind};
pub use tree::{MusicTree, TreeOrigin, TreeStats};
