//! Filtering, views and statistics for tunetree.
//!
//! This crate holds everything built on top of a parsed collection:
//!
//! - **Filtering** by search term, file type and folder
//! - **Views**: flattened rows for tree, list and grid layouts
//! - **Folder collection** for folder pickers
//! - **Song links**: YouTube Music search URLs for audio files
//!
//! ```rust,ignore
//! use tunetree_analyze::{FilterState, filter_tree, summary};
//! use tunetree_core::TreeStats;
//!
//! let filtered = filter_tree(&tree.root, &FilterState::search("synthwave"));
//! println!("{}", summary(&TreeStats::from_node(&filtered), true));
//! ```

mod filter;
mod folders;
mod link;
pub mod view;

pub use filter::{FilterState, FilterStateBuilder, filter_tree};
pub use folders::collect_folders;
pub use link::{YOUTUBE_MUSIC_SEARCH, song_query, song_search_url};
pub use view::{Row, RowIcon, ViewKind, render, rows, summary};

// Re-export core types
pub use tunetree_core::{MusicNode, TreeStats};
