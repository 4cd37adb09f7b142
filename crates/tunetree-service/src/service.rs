//! Cached, single-flight collection loading.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use derive_builder::Builder;
use tokio::sync::watch;

use tunetree_core::{MusicNode, MusicTree, ParseConfig, SourceError, TreeOrigin};
use tunetree_parse::TreeTextParser;

use crate::cache::{CacheInfo, CacheStore, DEFAULT_MAX_AGE, TreeCache};
use crate::error::CacheError;
use crate::sample::sample_tree;
use crate::source::TextSource;

/// Configuration for the loading service.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct ServiceConfig {
    /// Parser settings.
    #[builder(default)]
    pub parse: ParseConfig,

    /// Maximum age of a usable cache blob.
    #[builder(default = "DEFAULT_MAX_AGE")]
    pub cache_max_age: Duration,

    /// Whether to read and write the cache at all.
    #[builder(default = "true")]
    pub use_cache: bool,
}

impl ServiceConfig {
    /// Create a new config builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            parse: ParseConfig::default(),
            cache_max_age: DEFAULT_MAX_AGE,
            use_cache: true,
        }
    }
}

/// Observable phase of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing loaded yet.
    Idle,
    /// A load is in flight.
    Loading,
    /// A tree from the cache or the source is available.
    Ready,
    /// The source failed and the sample tree is being served.
    Failed,
}

enum LoadState {
    Idle,
    Loading(watch::Receiver<Option<Arc<MusicTree>>>),
    Ready(Arc<MusicTree>),
    Failed {
        error: String,
        fallback: Arc<MusicTree>,
    },
}

enum Begin {
    Done(Arc<MusicTree>),
    Wait(watch::Receiver<Option<Arc<MusicTree>>>),
    Lead(watch::Sender<Option<Arc<MusicTree>>>),
}

/// Loads, parses and caches the collection.
///
/// Concurrent [`load`](Self::load) calls share a single fetch: the first
/// caller performs it and everyone else awaits its outcome. A failed fetch
/// is never surfaced as an error; the built-in sample tree is served instead.
pub struct MusicDataService {
    source: Box<dyn TextSource>,
    cache: Option<TreeCache>,
    parser: TreeTextParser,
    state: Mutex<LoadState>,
}

impl MusicDataService {
    /// Create a service without a cache.
    pub fn new(source: impl TextSource + 'static, config: ServiceConfig) -> Self {
        Self {
            source: Box::new(source),
            cache: None,
            parser: TreeTextParser::with_config(config.parse),
            state: Mutex::new(LoadState::Idle),
        }
    }

    /// Create a service backed by `store`.
    ///
    /// The store is ignored when `config.use_cache` is false.
    pub fn with_cache(
        source: impl TextSource + 'static,
        store: Arc<dyn CacheStore>,
        config: ServiceConfig,
    ) -> Self {
        let cache = config
            .use_cache
            .then(|| TreeCache::new(store).with_max_age(config.cache_max_age));
        Self {
            cache,
            ..Self::new(source, config)
        }
    }

    /// Get the loaded collection, fetching it on first use.
    pub async fn load(&self) -> Arc<MusicTree> {
        loop {
            let mut rx = match self.begin() {
                Begin::Done(tree) => return tree,
                Begin::Lead(tx) => return self.lead(tx).await,
                Begin::Wait(rx) => rx,
            };

            match rx.wait_for(Option::is_some).await {
                Ok(tree) => {
                    if let Some(tree) = &*tree {
                        return Arc::clone(tree);
                    }
                }
                Err(_) => {
                    // The leading load was dropped before finishing.
                    tracing::debug!("In-flight load abandoned, retrying");
                }
            }
        }
    }

    /// Clear the cache and load again.
    pub async fn reload(&self) -> Arc<MusicTree> {
        if let Err(err) = self.clear_cache() {
            tracing::warn!(%err, "Failed to clear cache before reload");
        }
        self.load().await
    }

    /// Forget the loaded tree and remove the cache blob.
    ///
    /// An in-flight load is left to finish.
    pub fn clear_cache(&self) -> Result<(), CacheError> {
        {
            let mut state = self.state();
            if !matches!(*state, LoadState::Loading(_)) {
                *state = LoadState::Idle;
            }
        }
        if let Some(cache) = &self.cache {
            cache.clear()?;
        }
        tracing::info!("Music data cache cleared");
        Ok(())
    }

    /// Describe the cache blob, `None` when caching is disabled.
    pub fn cache_info(&self) -> Result<Option<CacheInfo>, CacheError> {
        self.cache
            .as_ref()
            .map(|cache| cache.info(Utc::now()))
            .transpose()
    }

    /// Current phase.
    pub fn status(&self) -> LoadStatus {
        match *self.state() {
            LoadState::Idle => LoadStatus::Idle,
            LoadState::Loading(_) => LoadStatus::Loading,
            LoadState::Ready(_) => LoadStatus::Ready,
            LoadState::Failed { .. } => LoadStatus::Failed,
        }
    }

    /// The tree being served, if any.
    pub fn current(&self) -> Option<Arc<MusicTree>> {
        match &*self.state() {
            LoadState::Ready(tree) => Some(Arc::clone(tree)),
            LoadState::Failed { fallback, .. } => Some(Arc::clone(fallback)),
            _ => None,
        }
    }

    /// Message of the source failure that caused the fallback.
    pub fn last_error(&self) -> Option<String> {
        match &*self.state() {
            LoadState::Failed { error, .. } => Some(error.clone()),
            _ => None,
        }
    }

    fn state(&self) -> MutexGuard<'_, LoadState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin(&self) -> Begin {
        let mut state = self.state();
        match &*state {
            LoadState::Ready(tree) => Begin::Done(Arc::clone(tree)),
            LoadState::Failed { fallback, .. } => Begin::Done(Arc::clone(fallback)),
            LoadState::Loading(rx) => Begin::Wait(rx.clone()),
            LoadState::Idle => {
                let (tx, rx) = watch::channel(None);
                *state = LoadState::Loading(rx);
                Begin::Lead(tx)
            }
        }
    }

    async fn lead(&self, tx: watch::Sender<Option<Arc<MusicTree>>>) -> Arc<MusicTree> {
        let mut guard = LoadingGuard {
            state: &self.state,
            armed: true,
        };

        let (tree, error) = self.fetch().await;
        let tree = Arc::new(tree);

        {
            let mut state = self.state();
            *state = match error {
                None => LoadState::Ready(Arc::clone(&tree)),
                Some(error) => LoadState::Failed {
                    error: error.to_string(),
                    fallback: Arc::clone(&tree),
                },
            };
        }
        guard.armed = false;

        // Waiters may all have gone away.
        let _ = tx.send(Some(Arc::clone(&tree)));
        tree
    }

    async fn fetch(&self) -> (MusicTree, Option<SourceError>) {
        if let Some(root) = self.read_cache().await {
            tracing::info!("Loading music data from cache");
            return (MusicTree::from_root(root, TreeOrigin::Cache), None);
        }

        tracing::info!(source = %self.source.describe(), "Fetching listing");
        match self.source.fetch().await {
            Ok(text) => {
                let tree = self.parser.parse_tree(&text);
                self.write_cache(&tree.root).await;
                (tree, None)
            }
            Err(err) => {
                tracing::warn!(%err, "Could not load listing, using sample data");
                let root = sample_tree(&self.parser.config().root_label);
                (MusicTree::from_root(root, TreeOrigin::Fallback), Some(err))
            }
        }
    }

    // Stores may touch the filesystem, so they run on the blocking pool.
    async fn read_cache(&self) -> Option<MusicNode> {
        let cache = self.cache.clone()?;
        tokio::task::spawn_blocking(move || cache.load(Utc::now()))
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(%err, "Cache read task failed");
                None
            })
    }

    async fn write_cache(&self, root: &MusicNode) {
        let Some(cache) = self.cache.clone() else {
            return;
        };
        let root = root.clone();
        match tokio::task::spawn_blocking(move || cache.save(&root, Utc::now())).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::warn!(%err, "Failed to cache music data"),
            Err(err) => tracing::warn!(%err, "Cache write task failed"),
        }
    }
}

/// Resets a `Loading` state to `Idle` if the leading load is dropped early.
struct LoadingGuard<'a> {
    state: &'a Mutex<LoadState>,
    armed: bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            if matches!(*state, LoadState::Loading(_)) {
                *state = LoadState::Idle;
            }
        }
    }
}
