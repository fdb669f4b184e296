use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use super::FavoriteRepository;
use crate::constants::FAVORITES_STORAGE_KEY;
use crate::data_fetcher::storage::{StorageService, StorageServiceExt};
use crate::error::AppError;

/// Favorite player ids kept as one ordered list under a single storage key
pub struct StoredFavoriteRepository {
    storage: Arc<dyn StorageService>,
    // Serializes read-modify-write cycles so concurrent adds are not lost
    lock: Mutex<()>,
}

impl StoredFavoriteRepository {
    pub fn new(storage: Arc<dyn StorageService>) -> Self {
        Self {
            storage,
            lock: Mutex::new(()),
        }
    }

    async fn load_ids(&self) -> Result<Vec<String>, AppError> {
        let ids = self
            .storage
            .load::<Vec<String>>(FAVORITES_STORAGE_KEY)
            .await?;
        Ok(ids.unwrap_or_default())
    }
}

#[async_trait]
impl FavoriteRepository for StoredFavoriteRepository {
    #[instrument(skip(self))]
    async fn add_favorite(&self, player_id: &str) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        let mut ids = self.load_ids().await?;
        if ids.iter().any(|id| id == player_id) {
            debug!("Player {} is already a favorite", player_id);
            return Ok(());
        }

        ids.push(player_id.to_string());
        self.storage.save(FAVORITES_STORAGE_KEY, &ids).await?;
        info!("Added favorite player {}", player_id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_favorite(&self, player_id: &str) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        let mut ids = self.load_ids().await?;
        let before = ids.len();
        ids.retain(|id| id != player_id);
        if ids.len() == before {
            debug!("Player {} was not a favorite", player_id);
            return Ok(());
        }

        self.storage.save(FAVORITES_STORAGE_KEY, &ids).await?;
        info!("Removed favorite player {}", player_id);
        Ok(())
    }

    async fn get_favorites(&self) -> Result<Vec<String>, AppError> {
        self.load_ids().await
    }

    async fn is_favorite(&self, player_id: &str) -> Result<bool, AppError> {
        Ok(self.load_ids().await?.iter().any(|id| id == player_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::storage::InMemoryStorage;

    fn repository() -> StoredFavoriteRepository {
        StoredFavoriteRepository::new(Arc::new(InMemoryStorage::new()))
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let favorites = repository();
        favorites.add_favorite("p1").await.unwrap();
        favorites.add_favorite("p1").await.unwrap();

        assert_eq!(favorites.get_favorites().await.unwrap(), vec!["p1"]);
        assert!(favorites.is_favorite("p1").await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_non_member_is_noop() {
        let favorites = repository();
        favorites.add_favorite("p1").await.unwrap();
        favorites.remove_favorite("p2").await.unwrap();

        assert_eq!(favorites.get_favorites().await.unwrap(), vec!["p1"]);
        assert!(!favorites.is_favorite("p2").await.unwrap());
    }

    #[tokio::test]
    async fn test_order_is_preserved() {
        let favorites = repository();
        for id in ["p3", "p1", "p2"] {
            favorites.add_favorite(id).await.unwrap();
        }
        favorites.remove_favorite("p1").await.unwrap();

        assert_eq!(favorites.get_favorites().await.unwrap(), vec!["p3", "p2"]);
    }

    #[tokio::test]
    async fn test_empty_storage_has_no_favorites() {
        let favorites = repository();
        assert!(favorites.get_favorites().await.unwrap().is_empty());
        assert!(!favorites.is_favorite("p1").await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_all_kept() {
        let favorites = Arc::new(repository());
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let favorites = Arc::clone(&favorites);
                tokio::spawn(async move { favorites.add_favorite(&format!("p{i}")).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(favorites.get_favorites().await.unwrap().len(), 10);
    }
}
