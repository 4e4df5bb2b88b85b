//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── readme.md      # Index of generated feeds
//! └── {site}.xml     # RSS document per site
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{FeedStorage, README_KEY, feed_key};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Read a stored file as text, returning None if it doesn't exist.
    pub async fn read_string(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl FeedStorage for LocalStorage {
    async fn write_feed(&self, site_name: &str, xml: &str) -> Result<String> {
        let key = feed_key(site_name);
        self.write_bytes(&key, xml.as_bytes()).await?;
        Ok(key)
    }

    async fn write_index(&self, markdown: &str) -> Result<String> {
        self.write_bytes(README_KEY, markdown.as_bytes()).await?;
        Ok(README_KEY.to_string())
    }

    fn location(&self, key: &str) -> String {
        self.path(key).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_feed_creates_dir() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("nested/rss"));

        let key = storage.write_feed("my blog", "<rss/>").await.unwrap();
        assert_eq!(key, "my_blog.xml");

        let data = storage.read_string(&key).await.unwrap();
        assert_eq!(data.as_deref(), Some("<rss/>"));
        assert!(!storage.path("my_blog.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_feed_overwrites() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.write_feed("blog", "old").await.unwrap();
        storage.write_feed("blog", "new").await.unwrap();
        assert_eq!(
            storage.read_string("blog.xml").await.unwrap().as_deref(),
            Some("new")
        );
    }

    #[tokio::test]
    async fn test_write_index() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let key = storage.write_index("# RSS Feeds\n").await.unwrap();
        assert_eq!(key, README_KEY);
        assert!(storage.location(&key).ends_with("readme.md"));
    }

    #[tokio::test]
    async fn test_read_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        assert!(storage.read_string("nope.xml").await.unwrap().is_none());
    }
}
