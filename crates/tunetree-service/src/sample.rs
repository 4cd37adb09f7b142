//! Built-in sample collection served when the listing cannot be loaded.

use tunetree_core::MusicNode;

const SAMPLE: &[(&str, &[&str])] = &[
    (
        "0MIXES",
        &[
            "100 Minutes Of Heavenly Synthwave.mp3",
            "Cybercity - A Synthwave Mix.mp3",
            "Lofi Hip Hop Mix - Beats To Relax Study To [2018].mp3",
        ],
    ),
    (
        "4K Downloads",
        &[
            "AC DC - T.N.T..mp3",
            "Beat It (Studio Version).mp3",
            "Sweet Home Alabama.mp3",
        ],
    ),
];

/// Build the fallback tree under a root named `root_label`.
pub fn sample_tree(root_label: &str) -> MusicNode {
    let mut root = MusicNode::root(root_label);

    for (folder_name, songs) in SAMPLE {
        let mut folder = MusicNode::new_folder(*folder_name, *folder_name);
        for song in *songs {
            let path = folder.child_path(song);
            folder.push_child(MusicNode::new_file(*song, Some("mp3".into()), path));
        }
        root.push_child(folder);
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunetree_core::TreeStats;

    #[test]
    fn test_sample_shape() {
        let root = sample_tree("Music Collection");
        assert_eq!(root.name, "Music Collection");
        assert_eq!(root.child_count(), 2);
        assert_eq!(
            root.children()[1].children()[0].path,
            "4K Downloads/AC DC - T.N.T..mp3"
        );

        let stats = TreeStats::from_node(&root);
        assert_eq!(stats.total_folders, 2);
        assert_eq!(stats.total_files, 6);
        assert_eq!(stats.audio_files, 6);
    }
}
