//! Search, file-type and folder filtering.
//!
//! Filtering never mutates the source tree; it produces a pruned copy that
//! keeps the original order, names and paths.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use tunetree_core::MusicNode;

/// Active filters for a collection view.
///
/// An unset or empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into, strip_option), default)]
pub struct FilterState {
    /// Case-insensitive substring matched against names.
    #[serde(default)]
    pub search_term: Option<String>,

    /// Exact extension that files must have (folders are unaffected).
    #[serde(default)]
    pub file_type: Option<String>,

    /// Substring that every kept entry's path must contain.
    #[serde(default)]
    pub folder: Option<String>,
}

impl FilterState {
    /// Create a new filter builder.
    pub fn builder() -> FilterStateBuilder {
        FilterStateBuilder::default()
    }

    /// Create a filter with only a search term.
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
            ..Self::default()
        }
    }

    /// Check if any filter would exclude something.
    pub fn is_active(&self) -> bool {
        self.needle().is_some() || self.file_type().is_some() || self.folder().is_some()
    }

    /// Check if a search term is set.
    pub fn has_search(&self) -> bool {
        self.needle().is_some()
    }

    fn needle(&self) -> Option<&str> {
        non_empty(&self.search_term)
    }

    fn file_type(&self) -> Option<&str> {
        non_empty(&self.file_type)
    }

    fn folder(&self) -> Option<&str> {
        non_empty(&self.folder)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Filter `root`, returning a pruned copy.
///
/// Children are filtered bottom-up: a child is kept if, after its own
/// subtree has been filtered, it matches every active filter. A folder whose
/// name misses the search term is still kept when any of its remaining
/// children matched. The root itself is always returned.
pub fn filter_tree(root: &MusicNode, filter: &FilterState) -> MusicNode {
    if !filter.is_active() {
        return root.clone();
    }
    let matcher = Matcher {
        needle: filter.needle().map(str::to_lowercase),
        file_type: filter.file_type(),
        folder: filter.folder(),
    };
    matcher.filter(root)
}

struct Matcher<'f> {
    needle: Option<String>,
    file_type: Option<&'f str>,
    folder: Option<&'f str>,
}

impl Matcher<'_> {
    fn filter(&self, node: &MusicNode) -> MusicNode {
        let children = node.children.as_ref().map(|children| {
            children
                .iter()
                .map(|child| self.filter(child))
                .filter(|child| self.matches(child))
                .collect()
        });

        MusicNode {
            name: node.name.clone(),
            kind: node.kind,
            extension: node.extension.clone(),
            children,
            path: node.path.clone(),
        }
    }

    /// `node` must already have its children filtered.
    fn matches(&self, node: &MusicNode) -> bool {
        if let Some(needle) = &self.needle {
            if !node.name.to_lowercase().contains(needle.as_str()) {
                // Remaining children have each passed `matches` already.
                return node.child_count() > 0;
            }
        }

        if let Some(file_type) = self.file_type {
            if node.is_file() && node.extension.as_deref() != Some(file_type) {
                return false;
            }
        }

        if let Some(folder) = self.folder {
            if !node.path.contains(folder) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MusicNode {
        let mut root = MusicNode::root("Music Collection");
        let mut rock = MusicNode::new_folder("Rock", "Rock");
        rock.push_child(MusicNode::new_file(
            "Thunderstruck.mp3",
            Some("mp3".into()),
            "Rock/Thunderstruck.mp3",
        ));
        rock.push_child(MusicNode::new_file(
            "cover.jpg",
            Some("jpg".into()),
            "Rock/cover.jpg",
        ));
        let mut jazz = MusicNode::new_folder("Jazz", "Jazz");
        jazz.push_child(MusicNode::new_file(
            "So What.flac",
            Some("flac".into()),
            "Jazz/So What.flac",
        ));
        root.push_child(rock);
        root.push_child(jazz);
        root
    }

    #[test]
    fn test_inactive_filter_is_identity() {
        let root = sample();
        assert_eq!(filter_tree(&root, &FilterState::default()), root);
        assert_eq!(filter_tree(&root, &FilterState::search("")), root);
    }

    #[test]
    fn test_search_keeps_ancestors() {
        let filtered = filter_tree(&sample(), &FilterState::search("THUNDER"));
        assert_eq!(filtered.child_count(), 1);
        let rock = &filtered.children()[0];
        assert_eq!(rock.name, "Rock");
        assert_eq!(rock.child_count(), 1);
        assert_eq!(rock.children()[0].path, "Rock/Thunderstruck.mp3");
    }

    #[test]
    fn test_search_matching_folder_keeps_only_matching_children() {
        let filtered = filter_tree(&sample(), &FilterState::search("jazz"));
        let jazz = &filtered.children()[0];
        assert_eq!(jazz.name, "Jazz");
        // "So What.flac" does not contain "jazz".
        assert_eq!(jazz.child_count(), 0);
    }

    #[test]
    fn test_file_type_filter() {
        let filter = FilterState::builder().file_type("mp3").build().unwrap();
        let filtered = filter_tree(&sample(), &filter);
        let names: Vec<_> = filtered.descendants().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Rock", "Thunderstruck.mp3", "Jazz"]);
    }

    #[test]
    fn test_folder_filter_matches_path() {
        let filter = FilterState::builder().folder("Jazz").build().unwrap();
        let filtered = filter_tree(&sample(), &filter);
        let paths: Vec<_> = filtered.descendants().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["Jazz", "Jazz/So What.flac"]);
    }

    #[test]
    fn test_is_active() {
        assert!(!FilterState::default().is_active());
        assert!(FilterState::search("x").is_active());
        assert!(!FilterState::search("").has_search());
    }
}
