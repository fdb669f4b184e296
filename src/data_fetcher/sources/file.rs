use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Local, NaiveDate};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

use super::remote::{LeagueDataSource, PlayerProfileSource, RemoteDataSource, TeamProfileSource};
use crate::constants::files;
use crate::error::AppError;

/// Remote source backed by a directory of JSON fixtures.
///
/// Stands in for the HTTP API during development and demos. Each call reads
/// the file fresh and can be delayed to mimic network latency.
#[derive(Debug, Clone)]
pub struct FileRemoteDataSource {
    root: PathBuf,
    latency: Duration,
}

impl FileRemoteDataSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            latency: Duration::ZERO,
        }
    }

    /// Delays every call by `latency` plus up to 25% random jitter
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the directory carries leader and standings fixtures
    pub fn has_league_data(&self) -> bool {
        self.root.join(files::LEADERS).exists() && self.root.join(files::STANDINGS).exists()
    }

    async fn simulate_latency(&self) {
        if self.latency.is_zero() {
            return;
        }
        let base_ms = u64::try_from(self.latency.as_millis()).unwrap_or(u64::MAX);
        let jitter_ms = rand::random_range(0..=base_ms / 4);
        tokio::time::sleep(Duration::from_millis(base_ms.saturating_add(jitter_ms))).await;
    }

    async fn read_file(&self, name: &str) -> Result<Bytes, AppError> {
        self.simulate_latency().await;

        let path = self.root.join(name);
        match tokio::fs::read(&path).await {
            Ok(contents) => {
                debug!("Read fixture {} ({} bytes)", path.display(), contents.len());
                Ok(Bytes::from(contents))
            }
            Err(e) => Err(AppError::data_source_unavailable(
                path.display().to_string(),
                e.to_string(),
            )),
        }
    }

    async fn read_array(&self, name: &str) -> Result<Vec<Value>, AppError> {
        let bytes = self.read_file(name).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// First element of `name` whose `field` equals `id`
    async fn find_in(
        &self,
        name: &str,
        field: &str,
        id: &str,
        kind: &'static str,
    ) -> Result<Bytes, AppError> {
        let entry = self
            .read_array(name)
            .await?
            .into_iter()
            .find(|entry| entry.get(field).and_then(Value::as_str) == Some(id))
            .ok_or_else(|| AppError::entity_not_found(kind, id))?;
        Ok(Bytes::from(serde_json::to_vec(&entry)?))
    }
}

fn falls_on(entry: &Value, date: NaiveDate) -> bool {
    entry
        .get("date")
        .and_then(Value::as_str)
        .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
        .is_none_or(|instant| instant.with_timezone(&Local).date_naive() == date)
}

#[async_trait]
impl RemoteDataSource for FileRemoteDataSource {
    #[instrument(skip(self))]
    async fn fetch_games(&self, date: Option<NaiveDate>) -> Result<Bytes, AppError> {
        let Some(date) = date else {
            return self.read_file(files::GAMES).await;
        };

        // Entries with an unreadable date are kept so the mapper reports them
        let games: Vec<Value> = self
            .read_array(files::GAMES)
            .await?
            .into_iter()
            .filter(|game| falls_on(game, date))
            .collect();
        Ok(Bytes::from(serde_json::to_vec(&games)?))
    }

    async fn fetch_players(&self) -> Result<Bytes, AppError> {
        self.read_file(files::PLAYERS).await
    }

    async fn fetch_teams(&self) -> Result<Bytes, AppError> {
        self.read_file(files::TEAMS).await
    }

    #[instrument(skip(self))]
    async fn fetch_box_score(&self, game_id: &str) -> Result<Bytes, AppError> {
        self.find_in(files::BOX_SCORES, "gameId", game_id, "box score")
            .await
    }

    #[instrument(skip(self))]
    async fn fetch_game(&self, game_id: &str) -> Result<Bytes, AppError> {
        self.find_in(files::GAMES, "id", game_id, "game").await
    }
}

#[async_trait]
impl PlayerProfileSource for FileRemoteDataSource {
    async fn fetch_player_profile(&self, player_id: &str) -> Result<Bytes, AppError> {
        self.find_in(files::PLAYERS, "id", player_id, "player")
            .await
    }
}

#[async_trait]
impl TeamProfileSource for FileRemoteDataSource {
    async fn fetch_team_profile(&self, team_id: &str) -> Result<Bytes, AppError> {
        self.find_in(files::TEAMS, "id", team_id, "team").await
    }

    async fn fetch_team_roster(&self, team_id: &str) -> Result<Bytes, AppError> {
        let roster: Vec<Value> = self
            .read_array(files::PLAYERS)
            .await?
            .into_iter()
            .filter(|player| {
                player
                    .get("team")
                    .and_then(|team| team.get("id"))
                    .and_then(Value::as_str)
                    == Some(team_id)
            })
            .collect();
        Ok(Bytes::from(serde_json::to_vec(&roster)?))
    }
}

#[async_trait]
impl LeagueDataSource for FileRemoteDataSource {
    async fn fetch_league_leaders(
        &self,
        season_year: Option<i32>,
        season_type: &str,
    ) -> Result<Bytes, AppError> {
        debug!(
            "Serving leaders fixture (season={:?}, type={})",
            season_year, season_type
        );
        self.read_file(files::LEADERS).await
    }

    async fn fetch_standings(&self) -> Result<Bytes, AppError> {
        self.read_file(files::STANDINGS).await
    }
}
