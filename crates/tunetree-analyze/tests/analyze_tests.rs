use tunetree_analyze::{
    FilterState, ViewKind, collect_folders, filter_tree, render, rows, song_search_url, summary,
};
use tunetree_core::TreeStats;
use tunetree_parse::TreeTextParser;

const COLLECTION: &str = "\
.
├── 0MIXES
│   ├── Cybercity - A Synthwave Mix.mp3
│   └── tracklist.txt
├── 4K Downloads
│   ├── Beat It (Studio Version).mp3
│   └── Sweet Home Alabama.mp3
└── Playlists
    ├── synthwave.xspf
    └── 0MIXES
        └── old.m3u
";

#[test]
fn test_filter_config_builder() {
    let filter = FilterState::builder()
        .search_term("synth")
        .file_type("mp3")
        .folder("0MIXES")
        .build()
        .unwrap();

    assert_eq!(filter.search_term.as_deref(), Some("synth"));
    assert_eq!(filter.file_type.as_deref(), Some("mp3"));
    assert_eq!(filter.folder.as_deref(), Some("0MIXES"));
    assert!(filter.is_active());

    let default_filter = FilterState::builder().build().unwrap();
    assert!(!default_filter.is_active());
}

#[test]
fn test_search_across_parsed_collection() {
    let tree = TreeTextParser::new().parse_tree(COLLECTION);
    let filtered = filter_tree(&tree.root, &FilterState::search("synthwave"));

    let paths: Vec<_> = filtered.descendants().map(|n| n.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "0MIXES",
            "0MIXES/Cybercity - A Synthwave Mix.mp3",
            "Playlists",
            "Playlists/synthwave.xspf",
        ]
    );

    let stats = TreeStats::from_node(&filtered);
    assert_eq!(summary(&stats, true), "2 files, 2 folders found");
}

#[test]
fn test_filtering_does_not_touch_source() {
    let tree = TreeTextParser::new().parse_tree(COLLECTION);
    let before = tree.root.clone();
    let _ = filter_tree(&tree.root, &FilterState::search("nothing matches this"));
    assert_eq!(tree.root, before);
}

#[test]
fn test_no_match_leaves_empty_root() {
    let tree = TreeTextParser::new().parse_tree(COLLECTION);
    let filtered = filter_tree(&tree.root, &FilterState::search("zzz"));
    assert_eq!(filtered.name, tree.root.name);
    assert_eq!(filtered.child_count(), 0);
}

#[test]
fn test_folder_filter_uses_path_substring() {
    let tree = TreeTextParser::new().parse_tree(COLLECTION);
    let filter = FilterState::builder().folder("0MIXES").build().unwrap();
    let filtered = filter_tree(&tree.root, &filter);

    // Playlists itself does not contain "0MIXES", so its nested 0MIXES goes too.
    let top: Vec<_> = filtered.children().iter().map(|n| n.name.as_str()).collect();
    assert_eq!(top, vec!["0MIXES"]);
    assert_eq!(filtered.children()[0].child_count(), 2);
}

#[test]
fn test_collect_folders_from_parsed_collection() {
    let tree = TreeTextParser::new().parse_tree(COLLECTION);
    assert_eq!(
        collect_folders(&tree.root),
        vec!["0MIXES", "4K Downloads", "Playlists"]
    );
}

#[test]
fn test_list_and_tree_views_have_one_line_per_entry() {
    let tree = TreeTextParser::new().parse_tree(COLLECTION);
    let count = rows(&tree.root).len();
    assert_eq!(count as u64, tree.stats.total_items());

    assert_eq!(render(&tree.root, ViewKind::Tree, 4).len(), count);
    assert_eq!(render(&tree.root, ViewKind::List, 4).len(), count);

    let list = render(&tree.root, ViewKind::List, 4);
    assert!(list[1].ends_with("MP3"));
    assert!(list[2].ends_with("TXT"));
}

#[test]
fn test_playable_rows_link_to_search() {
    let tree = TreeTextParser::new().parse_tree(COLLECTION);
    let links: Vec<_> = rows(&tree.root)
        .into_iter()
        .filter(|r| r.is_playable())
        .map(|r| song_search_url(&r.node.name))
        .collect();

    assert_eq!(links.len(), 3);
    assert!(links.contains(&"https://music.youtube.com/search?q=Beat%20It".to_string()));
}
