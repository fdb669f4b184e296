use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::PlayerRepository;
use super::shared::{CachePolicy, decode_snapshot, fresh_from_cache, keys, store, store_collection};
use crate::data_fetcher::cache::CacheService;
use crate::data_fetcher::dto::{PlayerDto, decode_collection, decode_one};
use crate::data_fetcher::sources::{EntityKind, LocalStore, RemoteSources};
use crate::error::AppError;
use crate::models::Player;

pub struct CachingPlayerRepository {
    remote: RemoteSources,
    local: LocalStore,
    cache: Arc<dyn CacheService>,
    policy: CachePolicy,
}

impl CachingPlayerRepository {
    pub fn new(remote: RemoteSources, local: LocalStore, cache: Arc<dyn CacheService>) -> Self {
        Self {
            remote,
            local,
            cache,
            policy: CachePolicy::players(),
        }
    }

    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    fn local_players(&self) -> Option<Vec<Player>> {
        let local = self.local.load(EntityKind::Players);
        decode_snapshot("players", local, decode_collection::<PlayerDto>)
    }

    /// Downloads, persists and caches the full player collection
    async fn fetch_remote_players(&self) -> Result<Vec<Player>, AppError> {
        info!("Fetching players from remote source");
        let bytes = self
            .remote
            .core
            .fetch_players()
            .await
            .inspect_err(|e| error!("Failed to fetch players: {}", e))?;
        let players = decode_collection::<PlayerDto>(&bytes)?;

        self.local.persist(EntityKind::Players, &bytes);
        store_collection(self.cache.as_ref(), keys::PLAYERS, &players, &self.policy).await;
        Ok(players)
    }

    async fn fetch_remote_player(&self, id: &str) -> Result<Player, AppError> {
        if let Some(profiles) = &self.remote.player_profiles {
            info!("Fetching player profile {} from remote source", id);
            let bytes = profiles
                .fetch_player_profile(id)
                .await
                .inspect_err(|e| error!("Failed to fetch player {}: {}", id, e))?;
            return decode_one::<PlayerDto>(&bytes);
        }

        debug!("No player profile capability, filtering the full collection");
        self.fetch_remote_players()
            .await?
            .into_iter()
            .find(|player| player.id == id)
            .ok_or_else(|| AppError::entity_not_found("player", id))
    }
}

#[async_trait]
impl PlayerRepository for CachingPlayerRepository {
    #[instrument(skip(self))]
    async fn get_players(&self) -> Result<Vec<Player>, AppError> {
        let cache = self.cache.as_ref();

        if let Some(players) = fresh_from_cache::<Vec<Player>>(cache, keys::PLAYERS, &self.policy).await
        {
            return Ok(players);
        }

        if let Some(players) = self.local_players() {
            info!("Serving {} players from local snapshot", players.len());
            store_collection(cache, keys::PLAYERS, &players, &self.policy).await;
            return Ok(players);
        }

        self.fetch_remote_players().await
    }

    #[instrument(skip(self))]
    async fn get_player(&self, id: &str) -> Result<Player, AppError> {
        let key = keys::player(id);
        let cache = self.cache.as_ref();

        if let Some(player) = fresh_from_cache::<Player>(cache, &key, &self.policy).await {
            return Ok(player);
        }

        let local = self
            .local_players()
            .and_then(|players| players.into_iter().find(|player| player.id == id));
        if let Some(player) = local {
            info!("Serving player {} from local snapshot", id);
            store(cache, &key, player.clone(), &self.policy).await;
            return Ok(player);
        }

        let player = self.fetch_remote_player(id).await?;
        store(cache, &key, player.clone(), &self.policy).await;
        Ok(player)
    }
}
