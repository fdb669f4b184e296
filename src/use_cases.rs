//! Entry points for the presentation layer. Each use case forwards to a
//! single repository and adds nothing but argument defaults.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::constants::DEFAULT_LEADERS_LIMIT;
use crate::error::AppError;
use crate::models::{Game, Player, StatCategory, Team};
use crate::repositories::{
    FavoriteRepository, GameRepository, LeagueLeadersRepository, PlayerRepository, TeamRepository,
};

#[derive(Clone)]
pub struct GetGamesUseCase {
    repository: Arc<dyn GameRepository>,
}

impl GetGamesUseCase {
    pub fn new(repository: Arc<dyn GameRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, date: Option<NaiveDate>) -> Result<Vec<Game>, AppError> {
        self.repository.get_games(date).await
    }

    pub async fn execute_game(&self, id: &str) -> Result<Game, AppError> {
        self.repository.get_game(id).await
    }
}

#[derive(Clone)]
pub struct GetPlayerProfileUseCase {
    repository: Arc<dyn PlayerRepository>,
}

impl GetPlayerProfileUseCase {
    pub fn new(repository: Arc<dyn PlayerRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, player_id: &str) -> Result<Player, AppError> {
        self.repository.get_player(player_id).await
    }

    pub async fn execute_all(&self) -> Result<Vec<Player>, AppError> {
        self.repository.get_players().await
    }
}

#[derive(Clone)]
pub struct GetStatLeadersUseCase {
    repository: Arc<dyn LeagueLeadersRepository>,
}

impl GetStatLeadersUseCase {
    pub fn new(repository: Arc<dyn LeagueLeadersRepository>) -> Self {
        Self { repository }
    }

    /// Leaders for `category`, ten of them unless `limit` says otherwise
    pub async fn execute(
        &self,
        category: StatCategory,
        limit: Option<i32>,
    ) -> Result<Vec<Player>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_LEADERS_LIMIT);
        self.repository.get_league_leaders(category, limit).await
    }
}

#[derive(Clone)]
pub struct GetTeamPageUseCase {
    repository: Arc<dyn TeamRepository>,
}

impl GetTeamPageUseCase {
    pub fn new(repository: Arc<dyn TeamRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, team_id: &str) -> Result<Team, AppError> {
        self.repository.get_team(team_id).await
    }

    pub async fn execute_all(&self) -> Result<Vec<Team>, AppError> {
        self.repository.get_teams().await
    }

    pub async fn roster(&self, team_id: &str) -> Result<Vec<Player>, AppError> {
        self.repository.get_team_roster(team_id).await
    }

    pub async fn standings(&self) -> Result<Vec<Team>, AppError> {
        self.repository.get_standings().await
    }
}

#[derive(Clone)]
pub struct ManageFavoritesUseCase {
    repository: Arc<dyn FavoriteRepository>,
}

impl ManageFavoritesUseCase {
    pub fn new(repository: Arc<dyn FavoriteRepository>) -> Self {
        Self { repository }
    }

    pub async fn add(&self, player_id: &str) -> Result<(), AppError> {
        self.repository.add_favorite(player_id).await
    }

    pub async fn remove(&self, player_id: &str) -> Result<(), AppError> {
        self.repository.remove_favorite(player_id).await
    }

    pub async fn list(&self) -> Result<Vec<String>, AppError> {
        self.repository.get_favorites().await
    }

    pub async fn contains(&self, player_id: &str) -> Result<bool, AppError> {
        self.repository.is_favorite(player_id).await
    }

    /// Adds the player if absent, removes it otherwise. Returns whether the
    /// player is a favorite afterwards.
    pub async fn toggle(&self, player_id: &str) -> Result<bool, AppError> {
        if self.repository.is_favorite(player_id).await? {
            self.repository.remove_favorite(player_id).await?;
            Ok(false)
        } else {
            self.repository.add_favorite(player_id).await?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::storage::InMemoryStorage;
    use crate::repositories::StoredFavoriteRepository;

    #[tokio::test]
    async fn test_toggle_favorite() {
        let repository = StoredFavoriteRepository::new(Arc::new(InMemoryStorage::new()));
        let favorites = ManageFavoritesUseCase::new(Arc::new(repository));

        assert!(favorites.toggle("p1").await.unwrap());
        assert!(favorites.contains("p1").await.unwrap());
        assert!(!favorites.toggle("p1").await.unwrap());
        assert!(favorites.list().await.unwrap().is_empty());
    }
}
