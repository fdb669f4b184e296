use serde::{Deserialize, Serialize};

use super::{IntoDomain, MappingError, require_id};
use crate::models::{Conference, Team};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDto {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    #[serde(rename = "logoURL", default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub conference: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub losses: Option<u32>,
    #[serde(rename = "winPercentage", default)]
    pub win_percentage: Option<f64>,
}

impl IntoDomain for TeamDto {
    type Domain = Team;

    fn into_domain(self) -> Result<Team, MappingError> {
        require_id(&self.id)?;

        // Unknown conference names are tolerated and dropped
        let conference = self.conference.as_deref().and_then(Conference::parse);

        Ok(Team {
            id: self.id,
            name: self.name,
            abbreviation: self.abbreviation,
            logo_url: self.logo_url,
            city: self.city,
            conference,
            division: self.division,
            wins: self.wins,
            losses: self.losses,
            win_percentage: self.win_percentage,
        })
    }
}
