//! Cached, single-flight loading service for tunetree.
//!
//! [`MusicDataService`] owns the parsed collection for a session. It:
//!
//! - **Serves** a cached blob younger than an hour when one exists
//! - **Fetches** the listing from a [`TextSource`] otherwise, parses it and
//!   writes the cache
//! - **Shares** a single in-flight fetch between concurrent callers
//! - **Falls back** to a built-in sample tree when the source fails
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tunetree_service::{FileCacheStore, FileSource, MusicDataService, ServiceConfig};
//!
//! # async fn run() {
//! let service = MusicDataService::with_cache(
//!     FileSource::new("music.txt"),
//!     Arc::new(FileCacheStore::default()),
//!     ServiceConfig::default(),
//! );
//!
//! let tree = service.load().await;
//! println!("{} files", tree.total_files());
//! # }
//! ```

mod cache;
mod error;
mod sample;
mod service;
mod source;

pub use cache::{
    CACHE_JSON_KEY, CACHE_TIMESTAMP_KEY, CacheInfo, CacheStore, DEFAULT_MAX_AGE, FileCacheStore,
    MemoryCacheStore, TreeCache,
};
pub use error::CacheError;
pub use sample::sample_tree;
pub use service::{LoadStatus, MusicDataService, ServiceConfig, ServiceConfigBuilder};
pub use source::{BoxFuture, FileSource, StaticSource, TextSource};

// Re-export core types for convenience
pub use tunetree_core::{MusicNode, MusicTree, SourceError, TreeOrigin, TreeStats};
