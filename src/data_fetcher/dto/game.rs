use serde::{Deserialize, Serialize};
use tracing::debug;

use super::team::TeamDto;
use super::{IntoDomain, MappingError, parse_instant, require_id};
use crate::models::{BoxScore, Game, GameStatus, QuarterScore, TeamStats};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDto {
    pub id: String,
    #[serde(rename = "homeTeam")]
    pub home_team: TeamDto,
    #[serde(rename = "awayTeam")]
    pub away_team: TeamDto,
    /// ISO-8601 instant
    pub date: String,
    pub status: String,
    #[serde(rename = "boxScore", default)]
    pub box_score: Option<BoxScoreDto>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(rename = "broadcastNetwork", default)]
    pub broadcast_network: Option<String>,
    #[serde(rename = "timeZone", default)]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxScoreDto {
    #[serde(rename = "homeScore")]
    pub home_score: i32,
    #[serde(rename = "awayScore")]
    pub away_score: i32,
    #[serde(rename = "homeStats")]
    pub home_stats: TeamStatsDto,
    #[serde(rename = "awayStats")]
    pub away_stats: TeamStatsDto,
    #[serde(default)]
    pub quarters: Option<Vec<QuarterScoreDto>>,
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStatsDto {
    pub points: i32,
    pub rebounds: i32,
    pub assists: i32,
    #[serde(default)]
    pub steals: Option<i32>,
    #[serde(default)]
    pub blocks: Option<i32>,
    #[serde(default)]
    pub turnovers: Option<i32>,
    #[serde(rename = "fieldGoalPercentage", default)]
    pub field_goal_percentage: Option<f64>,
    #[serde(rename = "threePointPercentage", default)]
    pub three_point_percentage: Option<f64>,
    #[serde(rename = "freeThrowPercentage", default)]
    pub free_throw_percentage: Option<f64>,
    #[serde(default)]
    pub fouls: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuarterScoreDto {
    pub id: String,
    #[serde(rename = "homeScore")]
    pub home_score: i32,
    #[serde(rename = "awayScore")]
    pub away_score: i32,
    #[serde(rename = "quarterNumber")]
    pub quarter_number: u32,
}

impl IntoDomain for GameDto {
    type Domain = Game;

    fn into_domain(self) -> Result<Game, MappingError> {
        require_id(&self.id)?;

        let date = parse_instant("date", &self.date)?;
        let status = GameStatus::parse(&self.status)
            .ok_or_else(|| MappingError::InvalidStatus(self.status.clone()))?;

        Ok(Game {
            id: self.id,
            home_team: self.home_team.into_domain()?,
            away_team: self.away_team.into_domain()?,
            date,
            status,
            box_score: self.box_score.map(IntoDomain::into_domain).transpose()?,
            venue: self.venue,
            league: self.league,
            broadcast_network: self.broadcast_network,
            time_zone: self.time_zone,
        })
    }
}

impl IntoDomain for BoxScoreDto {
    type Domain = BoxScore;

    fn into_domain(self) -> Result<BoxScore, MappingError> {
        // Only a freshness hint, so an unreadable value is dropped
        let last_updated = self.last_updated.as_deref().and_then(|value| {
            parse_instant("lastUpdated", value)
                .inspect_err(|e| debug!("Ignoring box score {}", e))
                .ok()
        });

        Ok(BoxScore {
            home_score: self.home_score,
            away_score: self.away_score,
            home_stats: self.home_stats.into_domain()?,
            away_stats: self.away_stats.into_domain()?,
            quarters: self.quarters.map(IntoDomain::into_domain).transpose()?,
            last_updated,
        })
    }
}

impl IntoDomain for TeamStatsDto {
    type Domain = TeamStats;

    fn into_domain(self) -> Result<TeamStats, MappingError> {
        Ok(TeamStats {
            points: self.points,
            rebounds: self.rebounds,
            assists: self.assists,
            steals: self.steals,
            blocks: self.blocks,
            turnovers: self.turnovers,
            field_goal_percentage: self.field_goal_percentage,
            three_point_percentage: self.three_point_percentage,
            free_throw_percentage: self.free_throw_percentage,
            fouls: self.fouls,
        })
    }
}

impl IntoDomain for QuarterScoreDto {
    type Domain = QuarterScore;

    fn into_domain(self) -> Result<QuarterScore, MappingError> {
        Ok(QuarterScore {
            id: self.id,
            home_score: self.home_score,
            away_score: self.away_score,
            quarter_number: self.quarter_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stats(points: i32) -> serde_json::Value {
        json!({"points": points, "rebounds": 40, "assists": 20})
    }

    fn game_json(date: &str, box_score: Option<serde_json::Value>) -> serde_json::Value {
        let mut game = json!({
            "id": "g1",
            "homeTeam": {"id": "h", "name": "Home", "abbreviation": "HOM"},
            "awayTeam": {"id": "a", "name": "Away", "abbreviation": "AWY"},
            "date": date,
            "status": "finished",
            "venue": "Michelob Ultra Arena",
            "broadcastNetwork": "ESPN",
            "timeZone": "America/Los_Angeles"
        });
        if let Some(box_score) = box_score {
            game["boxScore"] = box_score;
        }
        game
    }

    #[test]
    fn test_game_dto_maps_all_fields() {
        let box_score = json!({
            "homeScore": 88,
            "awayScore": 80,
            "homeStats": stats(88),
            "awayStats": stats(80),
            "quarters": [
                {"id": "Q1", "homeScore": 20, "awayScore": 18, "quarterNumber": 1},
                {"id": "OT1", "homeScore": 8, "awayScore": 4, "quarterNumber": 5}
            ],
            "lastUpdated": "2026-06-01T21:15:00.123Z"
        });
        let dto: GameDto =
            serde_json::from_value(game_json("2026-06-01T19:00:00Z", Some(box_score))).unwrap();
        let game = dto.into_domain().unwrap();

        assert_eq!(game.status, GameStatus::Finished);
        assert_eq!(game.venue.as_deref(), Some("Michelob Ultra Arena"));
        assert_eq!(game.broadcast_network.as_deref(), Some("ESPN"));
        assert_eq!(game.time_zone.as_deref(), Some("America/Los_Angeles"));

        let box_score = game.box_score.unwrap();
        assert_eq!(box_score.home_score, 88);
        assert_eq!(box_score.home_stats.points, 88);
        let quarters = box_score.quarters.unwrap();
        assert_eq!(quarters[1].display_name(), "OT1");
        assert!(box_score.last_updated.is_some());
    }

    #[test]
    fn test_invalid_game_date() {
        let dto: GameDto = serde_json::from_value(game_json("06/01/2026", None)).unwrap();
        assert_eq!(
            dto.into_domain(),
            Err(MappingError::InvalidDate {
                field: "date",
                value: "06/01/2026".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_last_updated_is_dropped() {
        let box_score = json!({
            "homeScore": 1, "awayScore": 0,
            "homeStats": stats(1), "awayStats": stats(0),
            "lastUpdated": "soon"
        });
        let dto: GameDto =
            serde_json::from_value(game_json("2026-06-01T19:00:00Z", Some(box_score))).unwrap();
        let game = dto.into_domain().unwrap();

        let box_score = game.box_score.unwrap();
        assert_eq!(box_score.home_score, 1);
        assert_eq!(box_score.last_updated, None);
    }

    #[test]
    fn test_missing_required_stats_is_a_shape_error() {
        let result = serde_json::from_value::<BoxScoreDto>(json!({
            "homeScore": 1, "awayScore": 0,
            "homeStats": {"points": 1}, "awayStats": stats(0)
        }));
        assert!(result.is_err());
    }
}
