use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use super::GameRepository;
use super::shared::{CachePolicy, decode_snapshot, fresh_from_cache, keys, store, store_collection};
use crate::data_fetcher::cache::CacheService;
use crate::data_fetcher::dto::{BoxScoreDto, GameDto, decode_collection, decode_one};
use crate::data_fetcher::sources::{EntityKind, LocalStore, RemoteSources};
use crate::error::AppError;
use crate::models::{BoxScore, Game};

pub struct CachingGameRepository {
    remote: RemoteSources,
    local: LocalStore,
    cache: Arc<dyn CacheService>,
    policy: CachePolicy,
}

impl CachingGameRepository {
    pub fn new(remote: RemoteSources, local: LocalStore, cache: Arc<dyn CacheService>) -> Self {
        Self {
            remote,
            local,
            cache,
            policy: CachePolicy::games(),
        }
    }

    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The full collection through cache, then local snapshot, then remote
    async fn load_all_games(&self) -> Result<Vec<Game>, AppError> {
        let cache = self.cache.as_ref();

        if let Some(games) = fresh_from_cache::<Vec<Game>>(cache, keys::GAMES, &self.policy).await {
            debug!("Serving {} games from cache", games.len());
            return Ok(games);
        }

        let local = self.local.load(EntityKind::Games);
        if let Some(games) = decode_snapshot("games", local, decode_collection::<GameDto>) {
            info!("Serving {} games from local snapshot", games.len());
            let games: Vec<Game> = games
                .into_iter()
                .map(|game| self.with_local_box_score(game))
                .collect();
            store_collection(cache, keys::GAMES, &games, &self.policy).await;
            return Ok(games);
        }

        info!("Fetching games from remote source");
        let bytes = self
            .remote
            .core
            .fetch_games(None)
            .await
            .inspect_err(|e| error!("Failed to fetch games: {}", e))?;
        let games = decode_collection::<GameDto>(&bytes)?;
        let games = self.attach_box_scores(games).await;

        self.local.persist(EntityKind::Games, &bytes);
        store_collection(cache, keys::GAMES, &games, &self.policy).await;
        info!("Cached {} games from remote source", games.len());
        Ok(games)
    }

    /// Fills in missing box scores for live and finished games, fetching them
    /// concurrently. A game whose box score cannot be fetched is kept without one.
    async fn attach_box_scores(&self, games: Vec<Game>) -> Vec<Game> {
        let missing = games.iter().filter(|game| game.needs_box_score()).count();
        if missing == 0 {
            return games;
        }
        debug!("Fetching {} missing box scores", missing);

        let enriched = games.into_iter().map(|mut game| async move {
            if game.needs_box_score() {
                let fetched = self.fetch_box_score(&game.id).await;
                match fetched {
                    Ok(box_score) => game.box_score = Some(box_score),
                    Err(e) => warn!("Box score unavailable for game {}: {}", game.id, e),
                }
            }
            game
        });
        join_all(enriched).await
    }

    async fn fetch_box_score(&self, game_id: &str) -> Result<BoxScore, AppError> {
        let bytes = self.remote.core.fetch_box_score(game_id).await?;
        let box_score = decode_one::<BoxScoreDto>(&bytes)?;
        self.local.persist_box_score(&bytes, game_id);
        Ok(box_score)
    }

    /// A game from the local snapshot, with a locally stored box score attached
    fn local_game(&self, id: &str) -> Option<Game> {
        let local = self.local.load(EntityKind::Games);
        let games = decode_snapshot("games", local, decode_collection::<GameDto>)?;
        let game = games.into_iter().find(|game| game.id == id)?;
        Some(self.with_local_box_score(game))
    }

    /// Attaches the locally stored box score to a live or finished game that
    /// lacks one
    fn with_local_box_score(&self, mut game: Game) -> Game {
        if game.needs_box_score() {
            let bytes = self.local.load_box_score(&game.id);
            game.box_score = decode_snapshot("box score", bytes, decode_one::<BoxScoreDto>);
        }
        game
    }
}

fn filter_by_date(games: Vec<Game>, date: Option<NaiveDate>) -> Vec<Game> {
    match date {
        Some(date) => games
            .into_iter()
            .filter(|game| game.local_date() == date)
            .collect(),
        None => games,
    }
}

#[async_trait]
impl GameRepository for CachingGameRepository {
    #[instrument(skip(self))]
    async fn get_games(&self, date: Option<NaiveDate>) -> Result<Vec<Game>, AppError> {
        let games = self.load_all_games().await?;
        let games = filter_by_date(games, date);
        debug!("Returning {} games (date filter: {:?})", games.len(), date);
        Ok(games)
    }

    #[instrument(skip(self))]
    async fn get_game(&self, id: &str) -> Result<Game, AppError> {
        let key = keys::game(id);
        let cache = self.cache.as_ref();

        if let Some(game) = fresh_from_cache::<Game>(cache, &key, &self.policy).await {
            return Ok(game);
        }

        if let Some(game) = self.local_game(id) {
            info!("Serving game {} from local snapshot", id);
            store(cache, &key, game.clone(), &self.policy).await;
            return Ok(game);
        }

        info!("Fetching game {} from remote source", id);
        let bytes = self
            .remote
            .core
            .fetch_game(id)
            .await
            .inspect_err(|e| error!("Failed to fetch game {}: {}", id, e))?;
        let mut game = decode_one::<GameDto>(&bytes)?;

        if game.needs_box_score() {
            match self.fetch_box_score(id).await {
                Ok(box_score) => game.box_score = Some(box_score),
                Err(e) => warn!("Box score unavailable for game {}: {}", id, e),
            }
        }

        store(cache, &key, game.clone(), &self.policy).await;
        Ok(game)
    }
}
