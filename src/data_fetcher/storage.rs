//! Small key-value persistence for user preferences (favorites).
//!
//! Separate from the cache: values here are durable and never expire.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::error::AppError;

#[async_trait]
pub trait StorageService: Send + Sync {
    async fn save_value(&self, key: &str, value: Value) -> Result<(), AppError>;

    async fn load_value(&self, key: &str) -> Result<Option<Value>, AppError>;

    async fn remove(&self, key: &str) -> Result<(), AppError>;

    async fn clear(&self) -> Result<(), AppError>;
}

/// Typed access on top of [`StorageService`] through serde
#[async_trait]
pub trait StorageServiceExt: StorageService {
    async fn save<T>(&self, key: &str, value: &T) -> Result<(), AppError>
    where
        T: Serialize + Sync,
    {
        let value = serde_json::to_value(value)?;
        self.save_value(key, value).await
    }

    async fn load<T>(&self, key: &str) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        match self.load_value(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}

impl<S: StorageService + ?Sized> StorageServiceExt for S {}

#[derive(Debug, Default)]
pub struct InMemoryStorage {
    values: RwLock<HashMap<String, Value>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageService for InMemoryStorage {
    async fn save_value(&self, key: &str, value: Value) -> Result<(), AppError> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn load_value(&self, key: &str) -> Result<Option<Value>, AppError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.values.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        self.values.write().await.clear();
        Ok(())
    }
}

/// Storage kept as a single JSON object file, rewritten on every change
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<Map<String, Value>, AppError> {
        match tokio::fs::read(&self.path).await {
            Ok(contents) if contents.is_empty() => Ok(Map::new()),
            Ok(contents) => Ok(serde_json::from_slice(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_map(&self, map: &Map<String, Value>) -> Result<(), AppError> {
        let to_persistence_error =
            |e: std::io::Error| AppError::persistence(self.path.display().to_string(), e.to_string());

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(to_persistence_error)?;
        }

        let contents = serde_json::to_vec_pretty(map)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, contents)
            .await
            .map_err(to_persistence_error)?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(to_persistence_error)?;

        debug!("Wrote storage file {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl StorageService for JsonFileStorage {
    async fn save_value(&self, key: &str, value: Value) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value);
        self.write_map(&map).await
    }

    async fn load_value(&self, key: &str) -> Result<Option<Value>, AppError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        Ok(map.remove(key))
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        self.write_map(&Map::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_in_memory_typed_round_trip() {
        let storage = InMemoryStorage::new();
        let ids = vec!["p1".to_string(), "p2".to_string()];
        storage.save("ids", &ids).await.unwrap();

        let loaded: Option<Vec<String>> = storage.load("ids").await.unwrap();
        assert_eq!(loaded, Some(ids));

        storage.remove("ids").await.unwrap();
        let loaded: Option<Vec<String>> = storage.load("ids").await.unwrap();
        assert_eq!(loaded, None);
    }

    #[tokio::test]
    async fn test_load_with_wrong_type_is_a_decode_error() {
        let storage = InMemoryStorage::new();
        storage.save("ids", &"not a list").await.unwrap();

        let result: Result<Option<Vec<String>>, AppError> = storage.load("ids").await;
        assert!(matches!(result, Err(AppError::Decode(_))));
    }

    #[tokio::test]
    async fn test_json_file_storage_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs").join("storage.json");

        let storage = JsonFileStorage::new(&path);
        storage.save("ids", &vec!["p1"]).await.unwrap();
        storage.save("theme", &"dark").await.unwrap();

        let reopened = JsonFileStorage::new(&path);
        let ids: Option<Vec<String>> = reopened.load("ids").await.unwrap();
        assert_eq!(ids, Some(vec!["p1".to_string()]));

        reopened.remove("ids").await.unwrap();
        let theme: Option<String> = reopened.load("theme").await.unwrap();
        assert_eq!(theme.as_deref(), Some("dark"));

        reopened.clear().await.unwrap();
        let theme: Option<String> = storage.load("theme").await.unwrap();
        assert_eq!(theme, None);
    }

    #[tokio::test]
    async fn test_json_file_storage_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("storage.json"));
        let value: Option<Vec<String>> = storage.load("ids").await.unwrap();
        assert_eq!(value, None);

        // Removing from a file that does not exist yet does not create it
        storage.remove("ids").await.unwrap();
        assert!(!storage.path().exists());
    }
}
