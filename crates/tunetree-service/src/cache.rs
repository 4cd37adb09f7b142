//! Key-value persistence for the parsed tree.
//!
//! The blob is stored under two keys: the serialized root and the capture
//! time in milliseconds since the Unix epoch.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use tunetree_core::MusicNode;

use crate::error::CacheError;

/// Key holding the serialized root node.
pub const CACHE_JSON_KEY: &str = "musicData-json";

/// Key holding the capture timestamp.
pub const CACHE_TIMESTAMP_KEY: &str = "musicData-timestamp";

/// Default maximum age of a usable blob.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// A string key-value store.
pub trait CacheStore: Send + Sync {
    /// Read a value, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Remove a value. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), CacheError>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCacheStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// Store with one file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    dir: PathBuf,
}

impl FileCacheStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default location under the platform cache directory.
    pub fn default_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tunetree")
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Default for FileCacheStore {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}

impl CacheStore for FileCacheStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.key_path(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::io(path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| CacheError::io(&self.dir, e))?;
        let path = self.key_path(key);
        std::fs::write(&path, value).map_err(|e| CacheError::io(path, e))
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        let path = self.key_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::io(path, e)),
        }
    }
}

/// Summary of the cached blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheInfo {
    /// Whether both keys are present.
    pub cached: bool,
    /// Age of the blob (zero when not cached or stamped in the future).
    pub age: Duration,
    /// Size of the serialized tree in bytes.
    pub size_bytes: u64,
    /// Capture time.
    pub timestamp: Option<DateTime<Utc>>,
}

impl CacheInfo {
    fn empty() -> Self {
        Self {
            cached: false,
            age: Duration::ZERO,
            size_bytes: 0,
            timestamp: None,
        }
    }
}

/// Reads and writes the tree blob in a [`CacheStore`].
#[derive(Clone)]
pub struct TreeCache {
    store: Arc<dyn CacheStore>,
    max_age: Duration,
}

impl TreeCache {
    /// Create a cache over `store` with the default one-hour lifetime.
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            max_age: DEFAULT_MAX_AGE,
        }
    }

    /// Set the maximum age of a usable blob.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Load the cached root if present, decodable and younger than `max_age`.
    ///
    /// Every failure is treated as a cache miss.
    pub fn load(&self, now: DateTime<Utc>) -> Option<MusicNode> {
        match self.try_load(now) {
            Ok(root) => root,
            Err(err) => {
                tracing::warn!(%err, "Ignoring unreadable cache");
                None
            }
        }
    }

    fn try_load(&self, now: DateTime<Utc>) -> Result<Option<MusicNode>, CacheError> {
        let Some((json, captured)) = self.read_blob()? else {
            return Ok(None);
        };

        // A blob stamped in the future counts as fresh.
        let age = (now - captured).to_std().unwrap_or(Duration::ZERO);
        if age >= self.max_age {
            tracing::debug!(age_secs = age.as_secs(), "Cache expired");
            return Ok(None);
        }

        let root = serde_json::from_str(&json)?;
        Ok(Some(root))
    }

    /// Store `root` stamped with `now`.
    pub fn save(&self, root: &MusicNode, now: DateTime<Utc>) -> Result<(), CacheError> {
        let json = serde_json::to_string(root)?;
        self.store.set(CACHE_JSON_KEY, &json)?;
        self.store
            .set(CACHE_TIMESTAMP_KEY, &now.timestamp_millis().to_string())?;
        tracing::debug!(bytes = json.len(), "Cached music data");
        Ok(())
    }

    /// Remove both keys.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.store.remove(CACHE_JSON_KEY)?;
        self.store.remove(CACHE_TIMESTAMP_KEY)
    }

    /// Describe the current blob.
    pub fn info(&self, now: DateTime<Utc>) -> Result<CacheInfo, CacheError> {
        let Some((json, captured)) = self.read_blob()? else {
            return Ok(CacheInfo::empty());
        };
        Ok(CacheInfo {
            cached: true,
            age: (now - captured).to_std().unwrap_or(Duration::ZERO),
            size_bytes: json.len() as u64,
            timestamp: Some(captured),
        })
    }

    fn read_blob(&self) -> Result<Option<(String, DateTime<Utc>)>, CacheError> {
        let json = self.store.get(CACHE_JSON_KEY)?;
        let stamp = self.store.get(CACHE_TIMESTAMP_KEY)?;
        let (Some(json), Some(stamp)) = (json, stamp) else {
            return Ok(None);
        };
        let captured = parse_timestamp(&stamp)?;
        Ok(Some((json, captured)))
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, CacheError> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| CacheError::InvalidTimestamp {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_root() -> MusicNode {
        let mut root = MusicNode::root("Music Collection");
        root.push_child(MusicNode::new_file("a.mp3", Some("mp3".into()), "a.mp3"));
        root
    }

    fn memory_cache() -> (Arc<MemoryCacheStore>, TreeCache) {
        let store = Arc::new(MemoryCacheStore::new());
        let cache = TreeCache::new(store.clone());
        (store, cache)
    }

    #[test]
    fn test_save_then_load_fresh() {
        let (store, cache) = memory_cache();
        let now = Utc::now();
        cache.save(&sample_root(), now).unwrap();

        assert_eq!(
            store.get(CACHE_TIMESTAMP_KEY).unwrap(),
            Some(now.timestamp_millis().to_string())
        );
        let later = now + chrono::Duration::minutes(59);
        assert_eq!(cache.load(later), Some(sample_root()));
    }

    #[test]
    fn test_expired_blob_is_a_miss() {
        let (_, cache) = memory_cache();
        let now = Utc::now();
        cache.save(&sample_root(), now).unwrap();
        assert_eq!(cache.load(now + chrono::Duration::minutes(60)), None);
    }

    #[test]
    fn test_custom_max_age() {
        let (_, cache) = memory_cache();
        let cache = cache.with_max_age(Duration::from_secs(10));
        let now = Utc::now();
        cache.save(&sample_root(), now).unwrap();
        assert!(cache.load(now + chrono::Duration::seconds(5)).is_some());
        assert!(cache.load(now + chrono::Duration::seconds(10)).is_none());
    }

    #[test]
    fn test_corrupt_blob_is_a_miss() {
        let (store, cache) = memory_cache();
        store.set(CACHE_JSON_KEY, "{not json").unwrap();
        store
            .set(CACHE_TIMESTAMP_KEY, &Utc::now().timestamp_millis().to_string())
            .unwrap();
        assert_eq!(cache.load(Utc::now()), None);

        store.set(CACHE_TIMESTAMP_KEY, "yesterday").unwrap();
        assert_eq!(cache.load(Utc::now()), None);
        assert!(matches!(
            cache.info(Utc::now()),
            Err(CacheError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_missing_timestamp_is_a_miss() {
        let (store, cache) = memory_cache();
        store.set(CACHE_JSON_KEY, "{}").unwrap();
        assert_eq!(cache.load(Utc::now()), None);
        assert!(!cache.info(Utc::now()).unwrap().cached);
    }

    #[test]
    fn test_info_and_clear() {
        let (_, cache) = memory_cache();
        // Stored stamps have millisecond precision.
        let now = DateTime::from_timestamp_millis(Utc::now().timestamp_millis()).unwrap();
        cache.save(&sample_root(), now).unwrap();

        let info = cache.info(now + chrono::Duration::seconds(30)).unwrap();
        assert!(info.cached);
        assert_eq!(info.age, Duration::from_secs(30));
        assert!(info.size_bytes > 0);
        assert_eq!(
            info.timestamp.map(|t| t.timestamp_millis()),
            Some(now.timestamp_millis())
        );

        cache.clear().unwrap();
        assert_eq!(cache.info(now).unwrap(), CacheInfo::empty());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::new(dir.path().join("nested"));

        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
