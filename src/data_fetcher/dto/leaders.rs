use serde::{Deserialize, Serialize};

use super::player::PlayerDto;
use super::{IntoDomain, MappingError};
use crate::models::Player;

/// One row of a league leaders payload. `category` is the provider's own
/// name (`points`, `offensive_rebounds`...), matched later against a
/// `StatCategory`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderEntryDto {
    pub category: String,
    pub player: PlayerDto,
}

/// A decoded leader row
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderEntry {
    pub category: String,
    pub player: Player,
}

impl IntoDomain for LeaderEntryDto {
    type Domain = LeaderEntry;

    fn into_domain(self) -> Result<LeaderEntry, MappingError> {
        Ok(LeaderEntry {
            category: self.category,
            player: self.player.into_domain()?,
        })
    }
}
