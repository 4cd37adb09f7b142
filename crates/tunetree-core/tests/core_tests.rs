use tunetree_core::{
    ExtensionTier, MusicNode, MusicTree, NodeKind, ParseConfig, TreeOrigin, TreeStats,
    recognized_extension,
};

fn sample_root() -> MusicNode {
    let mut root = MusicNode::root("Music Collection");

    let mut songs = MusicNode::new_folder("Songs", "Songs");
    songs.push_child(MusicNode::new_file(
        "track.mp3",
        Some("mp3".into()),
        "Songs/track.mp3",
    ));
    songs.push_child(MusicNode::new_file(
        "notes.txt",
        Some("txt".into()),
        "Songs/notes.txt",
    ));

    let mut playlists = MusicNode::new_folder("Playlists", "Playlists");
    playlists.push_child(MusicNode::new_file(
        "list.xspf",
        Some("xspf".into()),
        "Playlists/list.xspf",
    ));

    root.push_child(songs);
    root.push_child(playlists);
    root
}

#[test]
fn test_node_kind_discrimination() {
    assert!(NodeKind::File.is_file());
    assert!(!NodeKind::File.is_folder());
    assert!(NodeKind::Folder.is_folder());
    assert!(!NodeKind::Folder.is_file());
}

#[test]
fn test_json_shape_matches_cache_blob() {
    let file = MusicNode::new_file("a.mp3", Some("mp3".into()), "Songs/a.mp3");
    let json = serde_json::to_value(&file).unwrap();

    assert_eq!(json["type"], "file");
    assert_eq!(json["extension"], "mp3");
    assert_eq!(json["path"], "Songs/a.mp3");
    assert!(json.get("children").is_none());

    let folder = MusicNode::new_folder("Songs", "Songs");
    let json = serde_json::to_value(&folder).unwrap();
    assert_eq!(json["type"], "folder");
    assert!(json.get("extension").is_none());
    assert_eq!(json["children"], serde_json::json!([]));
}

#[test]
fn test_json_roundtrip_preserves_tree() {
    let root = sample_root();
    let json = serde_json::to_string(&root).unwrap();
    let restored: MusicNode = serde_json::from_str(&json).unwrap();
    assert_eq!(root, restored);
}

#[test]
fn test_deserialize_blob_without_optional_fields() {
    let json = r#"{"name":"Loose","type":"folder","path":"Loose"}"#;
    let node: MusicNode = serde_json::from_str(json).unwrap();
    assert!(node.is_folder());
    assert!(node.children.is_none());
    assert_eq!(node.child_count(), 0);
}

#[test]
fn test_paths_follow_parents() {
    let root = sample_root();
    for parent in root.iter() {
        for child in parent.children() {
            assert_eq!(child.path, parent.child_path(&child.name));
        }
    }
}

#[test]
fn test_stats_from_sample_root() {
    let stats = TreeStats::from_node(&sample_root());
    assert_eq!(stats.total_folders, 2);
    assert_eq!(stats.total_files, 3);
    assert_eq!(stats.audio_files, 1);
}

#[test]
fn test_tree_from_root_sets_origin() {
    let tree = MusicTree::from_root(sample_root(), TreeOrigin::Fallback);
    assert_eq!(tree.origin, TreeOrigin::Fallback);
    assert_eq!(tree.total_files(), 3);
}

#[test]
fn test_every_audio_extension_is_audio_tier() {
    for ext in tunetree_core::AUDIO_EXTENSIONS {
        let name = format!("song.{}", ext.to_uppercase());
        assert_eq!(
            recognized_extension(&name),
            Some((ext.to_string(), ExtensionTier::Audio))
        );
    }
}

#[test]
fn test_default_parse_config() {
    let config = ParseConfig::default();
    assert_eq!(config.indent_width, 4);
    assert_eq!(config.root_label, "Music Collection");
}
