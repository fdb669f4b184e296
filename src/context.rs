//! The composition root. Everything the application needs is built once
//! here and handed down explicitly.

use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::data_fetcher::api::{HttpRemoteDataSource, RetryPolicy};
use crate::data_fetcher::cache::{CacheInfo, CacheService, MemoryCache};
use crate::data_fetcher::sources::{
    FileRemoteDataSource, LocalStore, RemoteSources, SnapshotLocalDataSource,
};
use crate::data_fetcher::storage::{JsonFileStorage, StorageService};
use crate::error::AppError;
use crate::repositories::{
    CachePolicy, CachingGameRepository, CachingLeadersRepository, CachingPlayerRepository,
    CachingTeamRepository, FavoriteRepository, GameRepository, LeagueLeadersRepository,
    PlayerRepository, StoredFavoriteRepository, TeamRepository,
};
use crate::use_cases::{
    GetGamesUseCase, GetPlayerProfileUseCase, GetStatLeadersUseCase, GetTeamPageUseCase,
    ManageFavoritesUseCase,
};

pub struct AppContext {
    cache: Arc<MemoryCache>,
    remote: RemoteSources,
    pub games: GetGamesUseCase,
    pub players: GetPlayerProfileUseCase,
    pub leaders: GetStatLeadersUseCase,
    pub teams: GetTeamPageUseCase,
    pub favorites: ManageFavoritesUseCase,
}

impl AppContext {
    /// Wires the sources named by `config`: the REST API when an api domain
    /// is set, the fixture directory otherwise. Snapshots and favorites go to
    /// their platform default locations unless configured.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let remote = remote_sources(config)?;

        let snapshot_dir = config.effective_snapshot_dir();
        info!("Using local snapshots in {}", snapshot_dir.display());
        let local = LocalStore::writable(Arc::new(SnapshotLocalDataSource::new(snapshot_dir)));

        let storage = Arc::new(JsonFileStorage::new(Config::get_storage_path()));
        Ok(Self::from_parts(config, remote, local, storage))
    }

    /// Builds the context around explicitly supplied sources. Only the cache
    /// settings are taken from `config`.
    pub fn from_parts(
        config: &Config,
        remote: RemoteSources,
        local: LocalStore,
        storage: Arc<dyn StorageService>,
    ) -> Self {
        let cache = Arc::new(MemoryCache::with_capacity(config.cache.capacity));
        let shared: Arc<dyn CacheService> = cache.clone();
        let settings = &config.cache;

        let games: Arc<dyn GameRepository> = Arc::new(
            CachingGameRepository::new(remote.clone(), local.clone(), shared.clone())
                .with_policy(CachePolicy::games().with_max_age(settings.games_max_age())),
        );
        let players: Arc<dyn PlayerRepository> = Arc::new(
            CachingPlayerRepository::new(remote.clone(), local.clone(), shared.clone())
                .with_policy(CachePolicy::players().with_max_age(settings.players_max_age())),
        );
        let teams: Arc<dyn TeamRepository> = Arc::new(
            CachingTeamRepository::new(remote.clone(), local.clone(), shared.clone())
                .with_policy(CachePolicy::teams().with_max_age(settings.teams_max_age())),
        );
        let leaders: Arc<dyn LeagueLeadersRepository> = Arc::new(
            CachingLeadersRepository::new(remote.clone(), local, shared, teams.clone())
                .with_policy(CachePolicy::leaders().with_max_age(settings.leaders_max_age())),
        );
        let favorites: Arc<dyn FavoriteRepository> =
            Arc::new(StoredFavoriteRepository::new(storage));

        Self {
            cache,
            remote,
            games: GetGamesUseCase::new(games),
            players: GetPlayerProfileUseCase::new(players),
            leaders: GetStatLeadersUseCase::new(leaders),
            teams: GetTeamPageUseCase::new(teams),
            favorites: ManageFavoritesUseCase::new(favorites),
        }
    }

    pub fn remote(&self) -> &RemoteSources {
        &self.remote
    }

    pub async fn cache_stats(&self) -> CacheInfo {
        self.cache.stats().await
    }

    /// Drops every cached entry so the next reads go to the sources again
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }
}

fn remote_sources(config: &Config) -> Result<RemoteSources, AppError> {
    if config.uses_http() {
        info!("Using REST API at {}", config.api_domain);
        let retry = RetryPolicy {
            max_retries: config.http_max_retries,
            ..RetryPolicy::default()
        };
        let source =
            HttpRemoteDataSource::with_timeout(config.api_domain.clone(), config.http_timeout_seconds)?
                .with_retry_policy(retry);
        return Ok(RemoteSources::full(Arc::new(source)));
    }

    let data_dir = config.data_dir.as_ref().ok_or_else(|| {
        AppError::config_error(
            "No data source configured: set api_domain or data_dir (COURTSIDE_API_DOMAIN / COURTSIDE_DATA_DIR)",
        )
    })?;
    info!("Using fixture directory {}", data_dir);

    let source =
        Arc::new(FileRemoteDataSource::new(data_dir).with_latency(config.simulated_latency()));
    let remote = RemoteSources::new(source.clone())
        .with_player_profiles(source.clone())
        .with_team_profiles(source.clone());

    // Leaders and standings are optional fixtures
    if source.has_league_data() {
        Ok(remote.with_league(source))
    } else {
        Ok(remote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::files;
    use crate::data_fetcher::storage::InMemoryStorage;
    use crate::testing_utils::{SpyRemoteDataSource, fixtures};
    use tempfile::tempdir;

    #[test]
    fn test_missing_data_source_is_a_config_error() {
        let result = AppContext::from_config(&Config::default());
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_http_config_wires_every_capability() {
        let config = Config {
            api_domain: "https://api.example.com".to_string(),
            ..Config::default()
        };
        let remote = remote_sources(&config).unwrap();
        assert!(remote.player_profiles.is_some());
        assert!(remote.team_profiles.is_some());
        assert!(remote.league.is_some());
    }

    #[test]
    fn test_fixture_dir_without_league_files() {
        let dir = tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().to_string_lossy().to_string()),
            ..Config::default()
        };
        let remote = remote_sources(&config).unwrap();
        assert!(remote.player_profiles.is_some());
        assert!(remote.league.is_none());

        std::fs::write(dir.path().join(files::LEADERS), "[]").unwrap();
        std::fs::write(dir.path().join(files::STANDINGS), "[]").unwrap();
        let remote = remote_sources(&config).unwrap();
        assert!(remote.league.is_some());
    }

    #[tokio::test]
    async fn test_context_shares_one_cache() {
        let spy = Arc::new(SpyRemoteDataSource::new());
        spy.respond(
            "teams",
            fixtures::array_bytes(vec![fixtures::team("t1", "Aces")]),
        );
        spy.respond(
            "players",
            fixtures::array_bytes(vec![fixtures::player("p1", "Star", "t1", 20.0)]),
        );

        let context = AppContext::from_parts(
            &Config::default(),
            RemoteSources::new(spy.clone()),
            LocalStore::in_memory(),
            Arc::new(InMemoryStorage::new()),
        );

        context.teams.execute_all().await.unwrap();
        context.players.execute_all().await.unwrap();
        assert_eq!(context.cache_stats().await.size, 2);

        context.clear_cache().await;
        assert_eq!(context.cache_stats().await.size, 0);
    }
}
