//! Parsed collection container and statistics.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ParseWarning;
use crate::node::MusicNode;

/// Summary statistics for a collection.
///
/// The synthetic root is never counted as a folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total number of files.
    pub total_files: u64,
    /// Total number of folders.
    pub total_folders: u64,
    /// Files in the audio tier.
    pub audio_files: u64,
    /// Deepest nesting level seen (top level is 0).
    pub max_depth: u32,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats with a file entry.
    pub fn record_file(&mut self, audio: bool, depth: u32) {
        self.total_files += 1;
        if audio {
            self.audio_files += 1;
        }
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a folder.
    pub fn record_folder(&mut self, depth: u32) {
        self.total_folders += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Recompute stats by walking the descendants of `root`.
    ///
    /// Parsed trees carry stats from assembly; this is for trees that were
    /// produced some other way (filtering, cache, fallback data).
    pub fn from_node(root: &MusicNode) -> Self {
        let mut stats = Self::new();
        let mut stack: Vec<(&MusicNode, u32)> =
            root.children().iter().map(|child| (child, 0)).collect();

        while let Some((node, depth)) = stack.pop() {
            if node.is_file() {
                stats.record_file(node.is_audio(), depth);
            } else {
                stats.record_folder(depth);
                stack.extend(node.children().iter().map(|child| (child, depth + 1)));
            }
        }

        stats
    }

    /// Get total entries (files + folders).
    pub fn total_items(&self) -> u64 {
        self.total_files + self.total_folders
    }
}

/// Where a loaded tree came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeOrigin {
    /// Freshly parsed from the text source.
    Source,
    /// Restored from the cache blob.
    Cache,
    /// Built-in sample data used after a source failure.
    Fallback,
}

/// A complete collection tree with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicTree {
    /// Synthetic root node.
    pub root: MusicNode,

    /// Summary statistics.
    pub stats: TreeStats,

    /// Time spent parsing (zero when not parsed).
    pub parse_duration: Duration,

    /// Lines that were handled on a best-effort basis.
    pub warnings: Vec<ParseWarning>,

    /// Where this tree came from.
    pub origin: TreeOrigin,
}

impl MusicTree {
    /// Create a new tree from parser output.
    pub fn new(
        root: MusicNode,
        stats: TreeStats,
        parse_duration: Duration,
        warnings: Vec<ParseWarning>,
    ) -> Self {
        Self {
            root,
            stats,
            parse_duration,
            warnings,
            origin: TreeOrigin::Source,
        }
    }

    /// Wrap an already-built root, computing its stats.
    pub fn from_root(root: MusicNode, origin: TreeOrigin) -> Self {
        let stats = TreeStats::from_node(&root);
        Self {
            root,
            stats,
            parse_duration: Duration::ZERO,
            warnings: Vec::new(),
            origin,
        }
    }

    /// Get the total number of files.
    pub fn total_files(&self) -> u64 {
        self.stats.total_files
    }

    /// Get the total number of folders.
    pub fn total_folders(&self) -> u64 {
        self.stats.total_folders
    }

    /// Get the number of audio files.
    pub fn audio_files(&self) -> u64 {
        self.stats.audio_files
    }

    /// Check if there were any warnings during parsing.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
