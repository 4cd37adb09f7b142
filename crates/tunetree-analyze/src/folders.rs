//! Folder name collection for folder pickers.

use indexmap::IndexSet;

use tunetree_core::MusicNode;

/// Distinct folder names under `root`, in first-seen pre-order.
///
/// The synthetic root is not included.
pub fn collect_folders(root: &MusicNode) -> Vec<String> {
    root.descendants()
        .filter(|node| node.is_folder())
        .map(|node| node.name.to_string())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_folders_dedups_in_order() {
        let mut root = MusicNode::root("Music Collection");
        let mut a = MusicNode::new_folder("Artist A", "Artist A");
        a.push_child(MusicNode::new_folder("Singles", "Artist A/Singles"));
        let mut b = MusicNode::new_folder("Artist B", "Artist B");
        b.push_child(MusicNode::new_folder("Singles", "Artist B/Singles"));
        b.push_child(MusicNode::new_file("x.mp3", Some("mp3".into()), "Artist B/x.mp3"));
        root.push_child(a);
        root.push_child(b);

        assert_eq!(
            collect_folders(&root),
            vec!["Artist A", "Singles", "Artist B"]
        );
    }

    #[test]
    fn test_empty_root() {
        assert!(collect_folders(&MusicNode::root("Music Collection")).is_empty());
    }
}
