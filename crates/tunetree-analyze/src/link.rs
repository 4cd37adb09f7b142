//! Outbound song search links.

use std::sync::OnceLock;

use regex::Regex;

/// Base URL for YouTube Music searches.
pub const YOUTUBE_MUSIC_SEARCH: &str = "https://music.youtube.com/search?q=";

struct Cleaners {
    extension: Regex,
    parens: Regex,
    brackets: Regex,
    suffix: Regex,
    spaces: Regex,
}

static CLEANERS: OnceLock<Cleaners> = OnceLock::new();

fn cleaners() -> &'static Cleaners {
    CLEANERS.get_or_init(|| Cleaners {
        extension: Regex::new(r"(?i)\.(mp3|m4a|flac|wav|aac|ogg|wma)$").expect("valid regex"),
        parens: Regex::new(r"\s*\([^)]*\)\s*").expect("valid regex"),
        brackets: Regex::new(r"\s*\[[^\]]*\]\s*").expect("valid regex"),
        suffix: Regex::new(
            r"(?i)\s*-\s*(Official|Music|Video|Audio|Remix|Extended|Radio|Edit|Version|Mix|Remaster|Remastered).*$",
        )
        .expect("valid regex"),
        spaces: Regex::new(r"\s+").expect("valid regex"),
    })
}

/// Reduce a file name to a search query.
///
/// Drops the audio extension, anything in parentheses or brackets and
/// trailing tags such as `- Official Video`, then collapses whitespace.
pub fn song_query(file_name: &str) -> String {
    let c = cleaners();
    let query = c.extension.replace(file_name, "");
    let query = c.parens.replace_all(&query, " ");
    let query = c.brackets.replace_all(&query, " ");
    let query = c.suffix.replace(&query, "");
    c.spaces.replace_all(&query, " ").trim().to_string()
}

/// YouTube Music search URL for a song file name.
pub fn song_search_url(file_name: &str) -> String {
    format!(
        "{YOUTUBE_MUSIC_SEARCH}{}",
        urlencoding::encode(&song_query(file_name))
    )
}
