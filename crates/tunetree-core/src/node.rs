//! Music collection node types.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::extension::ExtensionTier;

/// Type of collection entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeKind {
    /// Leaf entry with a recognized extension.
    File,
    /// Directory-like entry. This is the default classification.
    Folder,
}

impl NodeKind {
    /// Check if this is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, NodeKind::Folder)
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File)
    }
}

/// A single file or folder in the collection.
///
/// Serializes to the same JSON shape that the cache blob stores:
/// `type` is `"file"` or `"folder"`, and `extension` / `children` are
/// omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicNode {
    /// Display label with tree-drawing decoration stripped.
    pub name: CompactString,

    /// File or folder.
    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Lowercase recognized extension, without the dot (files only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<CompactString>,

    /// Children in source order (folders only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MusicNode>>,

    /// Slash-joined names from the top level down to this node.
    pub path: String,
}

impl MusicNode {
    /// Create a new file node.
    pub fn new_file(
        name: impl Into<CompactString>,
        extension: Option<CompactString>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            extension,
            children: None,
            path: path.into(),
        }
    }

    /// Create a new, empty folder node.
    pub fn new_folder(name: impl Into<CompactString>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Folder,
            extension: None,
            children: Some(Vec::new()),
            path: path.into(),
        }
    }

    /// Create the synthetic collection root.
    pub fn root(label: impl Into<CompactString>) -> Self {
        Self::new_folder(label, String::new())
    }

    /// Check if this node is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Check if this is a file in the audio tier.
    pub fn is_audio(&self) -> bool {
        self.is_file()
            && self
                .extension
                .as_deref()
                .is_some_and(|ext| ExtensionTier::of(ext) == Some(ExtensionTier::Audio))
    }

    /// Children as a slice (empty for files).
    pub fn children(&self) -> &[MusicNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Append a child, creating the sequence if absent.
    pub fn push_child(&mut self, child: MusicNode) {
        self.children.get_or_insert_with(Vec::new).push(child);
    }

    /// Path a child named `name` would have under this node.
    pub fn child_path(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.path, name)
        }
    }

    /// Depth-first pre-order iterator over this node and its descendants.
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { stack: vec![self] }
    }

    /// Iterator over descendants only.
    pub fn descendants(&self) -> impl Iterator<Item = &MusicNode> {
        self.iter().skip(1)
    }
}

/// Pre-order traversal that keeps source order among siblings.
pub struct NodeIter<'a> {
    stack: Vec<&'a MusicNode>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a MusicNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
