//! Raw listing text sources.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tunetree_core::SourceError;

/// Type alias for boxed futures returned by async source methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Something that can supply the raw tree listing.
pub trait TextSource: Send + Sync {
    /// Short description for logs (e.g. the file path).
    fn describe(&self) -> String;

    /// Fetch the complete listing text.
    fn fetch(&self) -> BoxFuture<'_, Result<String, SourceError>>;
}

/// Reads the listing from a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given listing file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the listing path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextSource for FileSource {
    fn describe(&self) -> String {
        self.path().display().to_string()
    }

    fn fetch(&self) -> BoxFuture<'_, Result<String, SourceError>> {
        Box::pin(async move {
            let text = tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| SourceError::io(&self.path, e))?;
            if text.trim().is_empty() {
                return Err(SourceError::Empty);
            }
            Ok(text)
        })
    }
}

/// Serves a fixed string; useful for embedding and tests.
#[derive(Debug, Clone)]
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    /// Create a source that always returns `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextSource for StaticSource {
    fn describe(&self) -> String {
        "<static>".to_string()
    }

    fn fetch(&self) -> BoxFuture<'_, Result<String, SourceError>> {
        Box::pin(async move {
            if self.text.trim().is_empty() {
                return Err(SourceError::Empty);
            }
            Ok(self.text.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_source_reads_listing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("music.txt");
        std::fs::write(&path, ".\n└── a.mp3\n").unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.fetch().await.unwrap(), ".\n└── a.mp3\n");
        assert_eq!(source.describe(), path.display().to_string());
    }

    #[tokio::test]
    async fn test_file_source_missing() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.txt"));
        assert!(matches!(
            source.fetch().await,
            Err(SourceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_blank_listing_is_an_error() {
        let source = StaticSource::new("  \n\n");
        assert!(matches!(source.fetch().await, Err(SourceError::Empty)));
    }
}
