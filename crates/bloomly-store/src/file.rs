//! File-backed key-value store: one file per key under a data directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use bloomly_core::error::StoreError;
use bloomly_core::storage::KeyValueStore;

/// Stores each key as `<root>/<key>.json`.
///
/// The root directory is created lazily on first write, so a store can be
/// constructed against a path that does not exist yet.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are logical names, not paths.
        let safe: String = key
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
            .collect();
        self.root.join(format!("{safe}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).await?;
        fs::write(self.path_for(key), value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data"));

        assert!(store.get("@bloomly_stats").await.unwrap().is_none());

        store.set("@bloomly_stats", r#"{"energy":50}"#).await.unwrap();
        assert_eq!(
            store.get("@bloomly_stats").await.unwrap().as_deref(),
            Some(r#"{"energy":50}"#)
        );

        store.set("@bloomly_stats", "{}").await.unwrap();
        assert_eq!(store.get("@bloomly_stats").await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.delete("missing").await.unwrap();
        store.set("k", "v").await.unwrap();
        store.delete("k").await.unwrap();
        store.delete("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn keys_with_separators_stay_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("a/b", "v").await.unwrap();
        assert_eq!(store.get("a/b").await.unwrap().as_deref(), Some("v"));
        assert!(dir.path().join("a_b.json").exists());
    }
}
