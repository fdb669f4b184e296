//! Repositories: one per entity family.
//!
//! Each read walks the same chain. A fresh cache entry is returned without
//! any I/O. Otherwise the local snapshot is tried, then the remote source.
//! Remote payloads are decoded before anything is stored, so invalid data
//! never reaches the cache or the snapshot. Saving the snapshot is
//! best-effort. Remote and decode errors reach the caller unchanged and
//! nothing is retried here.

pub mod favorites;
pub mod games;
pub mod leaders;
pub mod players;
pub mod shared;
pub mod teams;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::{Game, Player, StatCategory, Team};

pub use favorites::StoredFavoriteRepository;
pub use games::CachingGameRepository;
pub use leaders::CachingLeadersRepository;
pub use players::CachingPlayerRepository;
pub use shared::{CachePolicy, keys};
pub use teams::CachingTeamRepository;

#[async_trait]
pub trait GameRepository: Send + Sync {
    /// All games, or only those on `date` (local calendar day) when given
    async fn get_games(&self, date: Option<NaiveDate>) -> Result<Vec<Game>, AppError>;

    /// One game, with its box score when one is available
    async fn get_game(&self, id: &str) -> Result<Game, AppError>;
}

#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn get_players(&self) -> Result<Vec<Player>, AppError>;

    async fn get_player(&self, id: &str) -> Result<Player, AppError>;
}

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn get_teams(&self) -> Result<Vec<Team>, AppError>;

    async fn get_team(&self, id: &str) -> Result<Team, AppError>;

    async fn get_team_roster(&self, team_id: &str) -> Result<Vec<Player>, AppError>;

    /// Teams ordered by win percentage, best first
    async fn get_standings(&self) -> Result<Vec<Team>, AppError>;
}

#[async_trait]
pub trait LeagueLeadersRepository: Send + Sync {
    /// Top `limit` players for `category`, highest value first. Ties keep
    /// source order. A `limit` of zero or less yields an empty list.
    async fn get_league_leaders(
        &self,
        category: StatCategory,
        limit: i32,
    ) -> Result<Vec<Player>, AppError>;
}

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Adding an id twice keeps a single entry
    async fn add_favorite(&self, player_id: &str) -> Result<(), AppError>;

    /// Removing an id that is not a favorite does nothing
    async fn remove_favorite(&self, player_id: &str) -> Result<(), AppError>;

    /// Favorite ids in the order they were added
    async fn get_favorites(&self) -> Result<Vec<String>, AppError>;

    async fn is_favorite(&self, player_id: &str) -> Result<bool, AppError>;
}
