//! Test utilities: domain fixture builders, matching wire-format JSON, and a
//! call-counting remote source with canned responses.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::data_fetcher::sources::{
    LeagueDataSource, PlayerProfileSource, RemoteDataSource, TeamProfileSource,
};
use crate::error::AppError;
use crate::models::{
    BoxScore, Game, GameStatus, Player, StatCategory, StatUnit, Statistic, Team, TeamStats,
};

fn abbreviate(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

fn team_name(team_id: &str) -> String {
    format!("Team {team_id}")
}

/// Test utilities for creating domain entities
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// A team with only the required fields set
    pub fn team(id: &str, name: &str) -> Team {
        Team {
            id: id.to_string(),
            name: name.to_string(),
            abbreviation: abbreviate(name),
            logo_url: None,
            city: None,
            conference: None,
            division: None,
            wins: None,
            losses: None,
            win_percentage: None,
        }
    }

    /// A forward on `team_id` with a single "Points Per Game" scoring statistic
    pub fn player(id: &str, name: &str, team_id: &str, points_per_game: f64) -> Player {
        Player {
            id: id.to_string(),
            name: name.to_string(),
            team: Self::team(team_id, &team_name(team_id)),
            position: "Forward".to_string(),
            statistics: vec![Statistic {
                id: format!("{id}-ppg"),
                name: "Points Per Game".to_string(),
                value: points_per_game,
                category: StatCategory::Scoring,
                unit: Some(StatUnit::Points),
                season: None,
                games_played: None,
            }],
            jersey_number: None,
            height: None,
            weight: None,
            age: None,
            college: None,
            photo_url: None,
        }
    }

    /// A game between teams "home" and "away" at the given RFC 3339 instant
    pub fn game(id: &str, status: GameStatus, date: &str) -> Game {
        Game {
            id: id.to_string(),
            home_team: Self::team("home", "Home"),
            away_team: Self::team("away", "Away"),
            date: DateTime::parse_from_rfc3339(date)
                .expect("test date must be RFC 3339")
                .with_timezone(&Utc),
            status,
            box_score: None,
            venue: None,
            league: None,
            broadcast_network: None,
            time_zone: None,
        }
    }

    pub fn box_score(home_score: i32, away_score: i32) -> BoxScore {
        BoxScore {
            home_score,
            away_score,
            home_stats: Self::team_stats(home_score),
            away_stats: Self::team_stats(away_score),
            quarters: None,
            last_updated: None,
        }
    }

    pub fn team_stats(points: i32) -> TeamStats {
        TeamStats {
            points,
            rebounds: 40,
            assists: 20,
            steals: None,
            blocks: None,
            turnovers: None,
            field_goal_percentage: None,
            three_point_percentage: None,
            free_throw_percentage: None,
            fouls: None,
        }
    }

    /// An instant given as wall-clock time in the local time zone
    pub fn local_instant(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .earliest()
            .expect("local time must exist")
            .with_timezone(&Utc)
    }

    /// RFC 3339 text for a local wall-clock time, for use in JSON fixtures
    pub fn local_rfc3339(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> String {
        Self::local_instant(year, month, day, hour, minute).to_rfc3339()
    }

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
    }
}

/// Wire-format JSON matching the [`TestDataBuilder`] entities. Decoding any of
/// these yields exactly what the builder with the same arguments returns.
pub mod fixtures {
    use super::{abbreviate, team_name};
    use bytes::Bytes;
    use serde_json::{Value, json};

    pub fn team(id: &str, name: &str) -> Value {
        json!({"id": id, "name": name, "abbreviation": abbreviate(name)})
    }

    /// A team carrying a win-loss record, as standings payloads do
    pub fn team_with_record(id: &str, wins: u32, losses: u32) -> Value {
        let mut team = team(id, &team_name(id));
        team["wins"] = json!(wins);
        team["losses"] = json!(losses);
        team["winPercentage"] = json!(f64::from(wins) / f64::from(wins + losses));
        team
    }

    pub fn player(id: &str, name: &str, team_id: &str, points_per_game: f64) -> Value {
        json!({
            "id": id,
            "name": name,
            "team": team(team_id, &team_name(team_id)),
            "position": "Forward",
            "statistics": [{
                "id": format!("{id}-ppg"),
                "name": "Points Per Game",
                "value": points_per_game,
                "category": "scoring",
                "unit": "points"
            }]
        })
    }

    /// A game between "home" and "away". `status` is passed through verbatim
    /// so invalid values can be exercised.
    pub fn game(id: &str, status: &str, date: &str) -> Value {
        json!({
            "id": id,
            "homeTeam": team("home", "Home"),
            "awayTeam": team("away", "Away"),
            "date": date,
            "status": status
        })
    }

    pub fn box_score(home_score: i32, away_score: i32) -> Value {
        json!({
            "homeScore": home_score,
            "awayScore": away_score,
            "homeStats": {"points": home_score, "rebounds": 40, "assists": 20},
            "awayStats": {"points": away_score, "rebounds": 40, "assists": 20}
        })
    }

    pub fn leader(category: &str, player: Value) -> Value {
        json!({"category": category, "player": player})
    }

    pub fn to_bytes(value: &Value) -> Bytes {
        Bytes::from(value.to_string())
    }

    /// A JSON array of `values`, as bytes
    pub fn array_bytes(values: Vec<Value>) -> Bytes {
        to_bytes(&Value::Array(values))
    }
}

type Responder = Arc<dyn Fn() -> Result<Bytes, AppError> + Send + Sync>;

/// Remote source returning canned responses and counting every call.
///
/// Responses are registered per endpoint (`"players"`) or per endpoint and
/// id (`"player_profile/p1"`); the id-specific one wins. Endpoints are
/// `games`, `game`, `box_score`, `players`, `player_profile`, `teams`,
/// `team_profile`, `team_roster`, `league_leaders` and `standings`. An
/// endpoint without a response fails with `DataSourceUnavailable`.
#[derive(Default)]
pub struct SpyRemoteDataSource {
    responses: Mutex<HashMap<String, Responder>>,
    calls: Mutex<HashMap<String, usize>>,
    leader_requests: Mutex<Vec<(Option<i32>, String)>>,
    delay: Option<Duration>,
}

impl SpyRemoteDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn respond(&self, endpoint: &str, body: impl Into<Bytes>) -> &Self {
        let body = body.into();
        self.respond_with(endpoint, move || Ok(body.clone()))
    }

    pub fn respond_json(&self, endpoint: &str, body: &Value) -> &Self {
        self.respond(endpoint, fixtures::to_bytes(body))
    }

    pub fn fail(
        &self,
        endpoint: &str,
        error: impl Fn() -> AppError + Send + Sync + 'static,
    ) -> &Self {
        self.respond_with(endpoint, move || Err(error()))
    }

    pub fn respond_with(
        &self,
        endpoint: &str,
        responder: impl Fn() -> Result<Bytes, AppError> + Send + Sync + 'static,
    ) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(endpoint.to_string(), Arc::new(responder));
        self
    }

    /// Calls made to `endpoint`, across all ids
    pub fn calls(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(endpoint)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .sum()
    }

    /// Arguments of every league leaders request, in call order
    pub fn leader_requests(&self) -> Vec<(Option<i32>, String)> {
        self.leader_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn answer(&self, endpoint: &str, id: Option<&str>) -> Result<Bytes, AppError> {
        *self
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(endpoint.to_string())
            .or_insert(0) += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let keyed = id.map(|id| format!("{endpoint}/{id}"));
        let responder = {
            let responses = self.responses.lock().unwrap_or_else(PoisonError::into_inner);
            keyed
                .as_deref()
                .and_then(|key| responses.get(key))
                .or_else(|| responses.get(endpoint))
                .cloned()
        };

        match responder {
            Some(responder) => responder(),
            None => Err(AppError::data_source_unavailable(
                keyed.unwrap_or_else(|| endpoint.to_string()),
                "no canned response",
            )),
        }
    }
}

#[async_trait]
impl RemoteDataSource for SpyRemoteDataSource {
    async fn fetch_games(&self, _date: Option<NaiveDate>) -> Result<Bytes, AppError> {
        self.answer("games", None).await
    }

    async fn fetch_players(&self) -> Result<Bytes, AppError> {
        self.answer("players", None).await
    }

    async fn fetch_teams(&self) -> Result<Bytes, AppError> {
        self.answer("teams", None).await
    }

    async fn fetch_box_score(&self, game_id: &str) -> Result<Bytes, AppError> {
        self.answer("box_score", Some(game_id)).await
    }

    async fn fetch_game(&self, game_id: &str) -> Result<Bytes, AppError> {
        self.answer("game", Some(game_id)).await
    }
}

#[async_trait]
impl PlayerProfileSource for SpyRemoteDataSource {
    async fn fetch_player_profile(&self, player_id: &str) -> Result<Bytes, AppError> {
        self.answer("player_profile", Some(player_id)).await
    }
}

#[async_trait]
impl TeamProfileSource for SpyRemoteDataSource {
    async fn fetch_team_profile(&self, team_id: &str) -> Result<Bytes, AppError> {
        self.answer("team_profile", Some(team_id)).await
    }

    async fn fetch_team_roster(&self, team_id: &str) -> Result<Bytes, AppError> {
        self.answer("team_roster", Some(team_id)).await
    }
}

#[async_trait]
impl LeagueDataSource for SpyRemoteDataSource {
    async fn fetch_league_leaders(
        &self,
        season_year: Option<i32>,
        season_type: &str,
    ) -> Result<Bytes, AppError> {
        self.leader_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((season_year, season_type.to_string()));
        self.answer("league_leaders", None).await
    }

    async fn fetch_standings(&self) -> Result<Bytes, AppError> {
        self.answer("standings", None).await
    }
}
