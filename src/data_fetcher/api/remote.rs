use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDate;
use reqwest::Client;

use super::fetch_utils::{RetryPolicy, fetch_bytes};
use super::http_client::create_http_client_with_timeout;
use super::urls::{
    build_box_score_url, build_game_url, build_games_url, build_leaders_url, build_player_url,
    build_players_url, build_standings_url, build_team_roster_url, build_team_url,
    build_teams_url,
};
use crate::data_fetcher::sources::{
    LeagueDataSource, PlayerProfileSource, RemoteDataSource, TeamProfileSource,
};
use crate::error::AppError;

/// Remote source talking to the stats REST API. Implements every capability.
#[derive(Debug, Clone)]
pub struct HttpRemoteDataSource {
    client: Client,
    api_domain: String,
    retry: RetryPolicy,
}

impl HttpRemoteDataSource {
    pub fn new(client: Client, api_domain: impl Into<String>) -> Self {
        let api_domain = api_domain.into().trim_end_matches('/').to_string();
        Self {
            client,
            api_domain,
            retry: RetryPolicy::default(),
        }
    }

    /// Builds its own client with the given request timeout
    pub fn with_timeout(
        api_domain: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(timeout_seconds)?;
        Ok(Self::new(client, api_domain))
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn api_domain(&self) -> &str {
        &self.api_domain
    }

    async fn get(&self, url: String) -> Result<Bytes, AppError> {
        fetch_bytes(&self.client, &url, self.retry).await
    }
}

#[async_trait]
impl RemoteDataSource for HttpRemoteDataSource {
    async fn fetch_games(&self, date: Option<NaiveDate>) -> Result<Bytes, AppError> {
        self.get(build_games_url(&self.api_domain, date)).await
    }

    async fn fetch_players(&self) -> Result<Bytes, AppError> {
        self.get(build_players_url(&self.api_domain)).await
    }

    async fn fetch_teams(&self) -> Result<Bytes, AppError> {
        self.get(build_teams_url(&self.api_domain)).await
    }

    async fn fetch_box_score(&self, game_id: &str) -> Result<Bytes, AppError> {
        self.get(build_box_score_url(&self.api_domain, game_id))
            .await
    }

    async fn fetch_game(&self, game_id: &str) -> Result<Bytes, AppError> {
        self.get(build_game_url(&self.api_domain, game_id)).await
    }
}

#[async_trait]
impl PlayerProfileSource for HttpRemoteDataSource {
    async fn fetch_player_profile(&self, player_id: &str) -> Result<Bytes, AppError> {
        self.get(build_player_url(&self.api_domain, player_id))
            .await
    }
}

#[async_trait]
impl TeamProfileSource for HttpRemoteDataSource {
    async fn fetch_team_profile(&self, team_id: &str) -> Result<Bytes, AppError> {
        self.get(build_team_url(&self.api_domain, team_id)).await
    }

    async fn fetch_team_roster(&self, team_id: &str) -> Result<Bytes, AppError> {
        self.get(build_team_roster_url(&self.api_domain, team_id))
            .await
    }
}

#[async_trait]
impl LeagueDataSource for HttpRemoteDataSource {
    async fn fetch_league_leaders(
        &self,
        season_year: Option<i32>,
        season_type: &str,
    ) -> Result<Bytes, AppError> {
        self.get(build_leaders_url(&self.api_domain, season_year, season_type))
            .await
    }

    async fn fetch_standings(&self) -> Result<Bytes, AppError> {
        self.get(build_standings_url(&self.api_domain)).await
    }
}
