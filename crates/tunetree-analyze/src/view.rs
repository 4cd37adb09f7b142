//! Flattened rows for the tree, list and grid views.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use tunetree_core::{MusicNode, TreeStats};

/// Layout of the collection browser.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ViewKind {
    /// Indented hierarchy with branch connectors.
    #[default]
    Tree,
    /// One entry per line with its type.
    List,
    /// Entries laid out in columns.
    Grid,
}

/// Icon shown next to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowIcon {
    Folder,
    Music,
    Playlist,
    File,
}

impl RowIcon {
    /// Pick the icon for a node.
    pub fn for_node(node: &MusicNode) -> Self {
        if node.is_folder() {
            Self::Folder
        } else if node.is_audio() {
            Self::Music
        } else if node.extension.as_deref() == Some("xspf") {
            Self::Playlist
        } else {
            Self::File
        }
    }

    /// Single-glyph rendering for terminals.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Folder => "📁",
            Self::Music => "♪",
            Self::Playlist => "≡",
            Self::File => "·",
        }
    }
}

/// One rendered entry. The synthetic root never produces a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    /// The entry.
    pub node: &'a MusicNode,
    /// Nesting level below the root (top level is 0).
    pub level: usize,
    /// Icon for the entry.
    pub icon: RowIcon,
}

impl Row<'_> {
    /// Upper-case type label: the extension for files, `FOLDER` otherwise.
    pub fn type_label(&self) -> String {
        if self.node.is_folder() {
            "FOLDER".to_string()
        } else {
            self.node
                .extension
                .as_deref()
                .unwrap_or("file")
                .to_uppercase()
        }
    }

    /// Whether clicking the entry should search for the song.
    pub fn is_playable(&self) -> bool {
        self.node.is_audio()
    }
}

/// Flatten every descendant of `root` in pre-order.
pub fn rows(root: &MusicNode) -> Vec<Row<'_>> {
    let mut out = Vec::new();
    let mut stack: Vec<(&MusicNode, usize)> =
        root.children().iter().rev().map(|c| (c, 0)).collect();

    while let Some((node, level)) = stack.pop() {
        out.push(Row {
            node,
            level,
            icon: RowIcon::for_node(node),
        });
        stack.extend(node.children().iter().rev().map(|c| (c, level + 1)));
    }

    out
}

/// Render `root` as text lines for the given view.
///
/// `grid_columns` is only used by [`ViewKind::Grid`].
pub fn render(root: &MusicNode, view: ViewKind, grid_columns: usize) -> Vec<String> {
    let rows = rows(root);
    match view {
        ViewKind::Tree => rows.iter().map(tree_line).collect(),
        ViewKind::List => {
            let width = rows
                .iter()
                .map(|r| r.node.name.chars().count())
                .max()
                .unwrap_or(0);
            rows.iter()
                .map(|r| {
                    format!(
                        "{} {:<width$}  {}",
                        r.icon.glyph(),
                        r.node.name.as_str(),
                        r.type_label()
                    )
                })
                .collect()
        }
        ViewKind::Grid => {
            const CELL: usize = 28;
            rows.iter()
                .chunks(grid_columns.max(1))
                .into_iter()
                .map(|chunk| {
                    chunk
                        .map(|r| {
                            let name = truncate(&r.node.name, CELL - 2);
                            let cell = format!("{} {name}", r.icon.glyph());
                            format!("{cell:<width$}", width = CELL)
                        })
                        .join(" ")
                        .trim_end()
                        .to_string()
                })
                .collect()
        }
    }
}

fn tree_line(row: &Row<'_>) -> String {
    let indent = "│   ".repeat(row.level);
    let connector = if row.level > 0 { "├── " } else { "" };
    format!("{indent}{connector}{} {}", row.icon.glyph(), row.node.name)
}

/// Results line shown above a view, e.g. `3 files, 1 folders total`.
pub fn summary(stats: &TreeStats, filtered: bool) -> String {
    let suffix = if filtered { "found" } else { "total" };
    format!(
        "{} files, {} folders {suffix}",
        stats.total_files, stats.total_folders
    )
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
