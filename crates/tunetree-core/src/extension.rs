//! Recognized file extension tiers.

use serde::{Deserialize, Serialize};

/// Extensions that count as audio files in statistics.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "flac", "wav", "aac", "ogg", "wma"];

/// Other extensions that mark an entry as a file.
pub const KNOWN_EXTENSIONS: &[&str] = &[
    "txt", "pdf", "doc", "docx", "xls", "xlsx", "jpg", "jpeg", "png", "gif", "zip", "rar", "7z",
    "tar", "gz", "exe", "msi", "dmg", "iso", "xspf", "pls", "m3u", "m3u8", "cue", "log", "nfo",
    "sfv", "md5", "sha1",
];

/// Which allow-list an extension belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtensionTier {
    /// Audio formats.
    Audio,
    /// Documents, archives, images, playlists and checksums.
    Known,
}

impl ExtensionTier {
    /// Look up the tier of a lowercase extension without its dot.
    pub fn of(ext: &str) -> Option<Self> {
        if AUDIO_EXTENSIONS.contains(&ext) {
            Some(Self::Audio)
        } else if KNOWN_EXTENSIONS.contains(&ext) {
            Some(Self::Known)
        } else {
            None
        }
    }
}

/// Lowercased suffix after the last `.` of `name`, if it is recognized.
///
/// A name with no dot, or whose suffix is in neither tier, yields `None`.
pub fn recognized_extension(name: &str) -> Option<(String, ExtensionTier)> {
    let (_, suffix) = name.rsplit_once('.')?;
    let suffix = suffix.to_lowercase();
    let tier = ExtensionTier::of(&suffix)?;
    Some((suffix, tier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_lookup() {
        assert_eq!(ExtensionTier::of("flac"), Some(ExtensionTier::Audio));
        assert_eq!(ExtensionTier::of("xspf"), Some(ExtensionTier::Known));
        assert_eq!(ExtensionTier::of("rs"), None);
    }

    #[test]
    fn test_recognized_extension_is_lowercase() {
        assert_eq!(
            recognized_extension("Track 01.MP3"),
            Some(("mp3".to_string(), ExtensionTier::Audio))
        );
    }

    #[test]
    fn test_last_dot_wins() {
        assert_eq!(
            recognized_extension("AC DC - T.N.T..mp3").map(|(e, _)| e),
            Some("mp3".to_string())
        );
        assert_eq!(recognized_extension("archive.tar.gz").map(|(e, _)| e), Some("gz".to_string()));
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(recognized_extension("Songs"), None);
        assert_eq!(recognized_extension("Vol. 2"), None);
        assert_eq!(recognized_extension("trailing."), None);
    }
}
