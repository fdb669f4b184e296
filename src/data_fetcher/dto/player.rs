use serde::{Deserialize, Serialize};

use super::team::TeamDto;
use super::{IntoDomain, MappingError, require_id};
use crate::models::{Player, StatCategory, StatUnit, Statistic};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDto {
    pub id: String,
    pub name: String,
    pub team: TeamDto,
    pub position: String,
    pub statistics: Vec<StatisticDto>,
    #[serde(rename = "jerseyNumber", default)]
    pub jersey_number: Option<u32>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticDto {
    pub id: String,
    pub name: String,
    pub value: f64,
    pub category: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(rename = "gamesPlayed", default)]
    pub games_played: Option<u32>,
}

impl IntoDomain for StatisticDto {
    type Domain = Statistic;

    fn into_domain(self) -> Result<Statistic, MappingError> {
        let category = StatCategory::parse(&self.category)
            .ok_or_else(|| MappingError::InvalidCategory(self.category.clone()))?;

        Ok(Statistic {
            id: self.id,
            name: self.name,
            value: self.value,
            category,
            unit: self.unit.as_deref().and_then(StatUnit::parse),
            season: self.season,
            games_played: self.games_played,
        })
    }
}

impl IntoDomain for PlayerDto {
    type Domain = Player;

    fn into_domain(self) -> Result<Player, MappingError> {
        require_id(&self.id)?;

        Ok(Player {
            id: self.id,
            name: self.name,
            team: self.team.into_domain()?,
            position: self.position,
            statistics: self.statistics.into_domain()?,
            jersey_number: self.jersey_number,
            height: self.height,
            weight: self.weight,
            age: self.age,
            college: self.college,
            photo_url: self.photo_url,
        })
    }
}
