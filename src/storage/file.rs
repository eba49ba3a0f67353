//! JSON file storage under the user config directory

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::KeyValueStore;
use crate::config::StoreConfig;
use crate::error::StorageError;

/// All keys live in one JSON object file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.preferences_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Current contents for a rewrite, and whether the file was unparsable.
    /// A corrupt file is replaced rather than blocking every later write.
    async fn read_for_write(&self) -> Result<(BTreeMap<String, String>, bool), StorageError> {
        match self.read_all().await {
            Ok(values) => Ok((values, false)),
            Err(StorageError::Json(e)) => {
                tracing::warn!("Discarding unreadable preferences file {:?}: {}", self.path, e);
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    async fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let content = serde_json::to_string_pretty(values)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.read_all().await?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let (mut values, _) = self.read_for_write().await?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values).await?;
        tracing::debug!("Stored {} in {:?}", key, self.path);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let (mut values, corrupt) = self.read_for_write().await?;
        if values.remove(key).is_some() || corrupt {
            self.write_all(&values).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("preferences.json"));
        assert_eq!(store.get("darkMode").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_survive_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        FileStore::new(&path).set("darkMode", "true").await.unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("darkMode").await.unwrap().as_deref(), Some("true"));
        reopened.remove("darkMode").await.unwrap();
        assert_eq!(reopened.get("darkMode").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.get("darkMode").await, Err(StorageError::Json(_))));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{truncated").unwrap();

        let store = FileStore::new(&path);
        store.set("darkMode", "true").await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let values: BTreeMap<String, String> = serde_json::from_str(&content).unwrap();
        assert_eq!(values.get("darkMode").map(String::as_str), Some("true"));
        assert_eq!(values.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_replaced_on_remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{truncated").unwrap();

        let store = FileStore::new(&path);
        store.remove("darkMode").await.unwrap();
        assert_eq!(store.get("darkMode").await.unwrap(), None);
    }

    #[test]
    fn test_from_config() {
        let config = StoreConfig {
            dir: PathBuf::from("/tmp/shade"),
        };
        let store = FileStore::from_config(&config);
        assert_eq!(store.path(), Path::new("/tmp/shade/preferences.json"));
    }
}
