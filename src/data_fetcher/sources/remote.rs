//! Remote data capabilities.
//!
//! Every remote source serves the core collections. Richer endpoints are
//! split into separate capability traits, and [`RemoteSources`] records at
//! construction time which of them a given backend offers, so repositories
//! never inspect a source's concrete type at runtime.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::error::AppError;

/// Raw JSON bytes for games, players, teams and box scores
#[async_trait]
pub trait RemoteDataSource: Send + Sync {
    /// Games, optionally narrowed to one day. Callers must not rely on the
    /// date filter being applied.
    async fn fetch_games(&self, date: Option<NaiveDate>) -> Result<Bytes, AppError>;

    async fn fetch_players(&self) -> Result<Bytes, AppError>;

    async fn fetch_teams(&self) -> Result<Bytes, AppError>;

    async fn fetch_box_score(&self, game_id: &str) -> Result<Bytes, AppError>;

    async fn fetch_game(&self, game_id: &str) -> Result<Bytes, AppError>;
}

/// Single-player lookup without downloading the full roster of the league
#[async_trait]
pub trait PlayerProfileSource: Send + Sync {
    async fn fetch_player_profile(&self, player_id: &str) -> Result<Bytes, AppError>;
}

#[async_trait]
pub trait TeamProfileSource: Send + Sync {
    async fn fetch_team_profile(&self, team_id: &str) -> Result<Bytes, AppError>;

    /// Players (JSON array) on the given team
    async fn fetch_team_roster(&self, team_id: &str) -> Result<Bytes, AppError>;
}

#[async_trait]
pub trait LeagueDataSource: Send + Sync {
    /// Leader entries (`[{category, player}]`) for a season. `season_type`
    /// is a provider code such as `"REG"`.
    async fn fetch_league_leaders(
        &self,
        season_year: Option<i32>,
        season_type: &str,
    ) -> Result<Bytes, AppError>;

    /// Teams (JSON array) carrying their win/loss records
    async fn fetch_standings(&self) -> Result<Bytes, AppError>;
}

/// The capability set handed to repositories
#[derive(Clone)]
pub struct RemoteSources {
    pub core: Arc<dyn RemoteDataSource>,
    pub player_profiles: Option<Arc<dyn PlayerProfileSource>>,
    pub team_profiles: Option<Arc<dyn TeamProfileSource>>,
    pub league: Option<Arc<dyn LeagueDataSource>>,
}

impl RemoteSources {
    /// Core capability only
    pub fn new(core: Arc<dyn RemoteDataSource>) -> Self {
        Self {
            core,
            player_profiles: None,
            team_profiles: None,
            league: None,
        }
    }

    /// Wires every capability to the same backend
    pub fn full<S>(source: Arc<S>) -> Self
    where
        S: RemoteDataSource
            + PlayerProfileSource
            + TeamProfileSource
            + LeagueDataSource
            + 'static,
    {
        Self {
            core: source.clone(),
            player_profiles: Some(source.clone()),
            team_profiles: Some(source.clone()),
            league: Some(source),
        }
    }

    pub fn with_player_profiles(mut self, source: Arc<dyn PlayerProfileSource>) -> Self {
        self.player_profiles = Some(source);
        self
    }

    pub fn with_team_profiles(mut self, source: Arc<dyn TeamProfileSource>) -> Self {
        self.team_profiles = Some(source);
        self
    }

    pub fn with_league(mut self, source: Arc<dyn LeagueDataSource>) -> Self {
        self.league = Some(source);
        self
    }
}

impl std::fmt::Debug for RemoteSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSources")
            .field("player_profiles", &self.player_profiles.is_some())
            .field("team_profiles", &self.team_profiles.is_some())
            .field("league", &self.league.is_some())
            .finish()
    }
}
